//! xoshiro256++ random source
//!
//! Fast, non-cryptographic generator with good statistical properties. This
//! matters because the incremental process draws two indices per ball and
//! experiments place billions of balls.

use super::RandomSource;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Random source backed by xoshiro256++
///
/// Normal deviates are drawn from `rand_distr::StandardNormal` and scaled by
/// the requested standard deviation.
#[derive(Debug, Clone)]
pub struct XoshiroSource {
    rng: Xoshiro256PlusPlus,
}

impl XoshiroSource {
    /// Create a new source seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a new source with a specific seed
    ///
    /// Useful for reproducible runs and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Create a source from an optional seed, falling back to entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for XoshiroSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for XoshiroSource {
    #[inline(always)]
    fn uniform_index(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    #[inline]
    fn normal(&mut self, stddev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * stddev
    }

    #[inline]
    fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_index_in_range() {
        let mut rng = XoshiroSource::new();
        for _ in 0..1000 {
            assert!(rng.uniform_index(10) < 10);
        }
        assert_eq!(rng.uniform_index(1), 0);
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = XoshiroSource::with_seed(12345);
        let mut b = XoshiroSource::with_seed(12345);

        for _ in 0..10 {
            assert_eq!(a.uniform_index(1000), b.uniform_index(1000));
            assert_eq!(a.normal(2.0), b.normal(2.0));
            assert_eq!(a.bernoulli(0.5), b.bernoulli(0.5));
        }
    }

    #[test]
    fn test_uniform_index_coverage() {
        let mut rng = XoshiroSource::with_seed(42);
        let mut buckets = vec![0u32; 10];

        for _ in 0..10000 {
            buckets[rng.uniform_index(10)] += 1;
        }

        // Allow 20% deviation around 1000 per bucket
        for count in buckets {
            assert!(count > 800 && count < 1200, "Bucket count {} outside expected range", count);
        }
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = XoshiroSource::with_seed(7);
        let samples: Vec<f64> = (0..20000).map(|_| rng.normal(3.0)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.1, "mean too far from 0: {}", mean);
        assert!((var.sqrt() - 3.0).abs() < 0.1, "stddev too far from 3: {}", var.sqrt());
    }

    #[test]
    fn test_zero_stddev_is_zero() {
        let mut rng = XoshiroSource::with_seed(1);
        for _ in 0..100 {
            assert_eq!(rng.normal(0.0), 0.0);
        }
    }

    #[test]
    fn test_fair_coin() {
        let mut rng = XoshiroSource::with_seed(99);
        let heads = (0..10000).filter(|_| rng.bernoulli(0.5)).count();
        assert!(heads > 4700 && heads < 5300, "heads = {}", heads);
    }
}
