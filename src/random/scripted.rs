//! Scripted random source for deterministic tests
//!
//! Replays fixed sequences of indices, normal deviates and coin flips. Each
//! sequence wraps around when exhausted, and an empty sequence yields a fixed
//! fallback (index 0, deviate 0.0, coin `true`). Indices are reduced modulo
//! the requested range so they are always valid.
//!
//! # Example
//!
//! ```
//! use gapsim::random::{RandomSource, scripted::ScriptedSource};
//!
//! let mut rng = ScriptedSource::from_indices(vec![0, 1, 2, 3]);
//! assert_eq!(rng.uniform_index(4), 0);
//! assert_eq!(rng.uniform_index(4), 1);
//! ```

use super::RandomSource;

/// Random source that replays prepared draws
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    indices: Vec<usize>,
    normals: Vec<f64>,
    coins: Vec<bool>,

    next_index: usize,
    next_normal: usize,
    next_coin: usize,

    /// Number of normal deviates handed out
    normals_drawn: usize,

    /// Number of coin flips handed out
    coins_drawn: usize,
}

impl ScriptedSource {
    /// Create a source with all three scripts
    pub fn new(indices: Vec<usize>, normals: Vec<f64>, coins: Vec<bool>) -> Self {
        Self {
            indices,
            normals,
            coins,
            ..Self::default()
        }
    }

    /// Create a source that only scripts bin indices
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self::new(indices, Vec::new(), Vec::new())
    }

    /// Create a source from candidate pairs, flattened in draw order
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Self {
        let indices = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        Self::from_indices(indices)
    }

    /// Replace the normal deviate script
    pub fn with_normals(mut self, normals: Vec<f64>) -> Self {
        self.normals = normals;
        self.next_normal = 0;
        self
    }

    /// Replace the coin flip script
    pub fn with_coins(mut self, coins: Vec<bool>) -> Self {
        self.coins = coins;
        self.next_coin = 0;
        self
    }

    /// How many normal deviates have been consumed
    pub fn normals_drawn(&self) -> usize {
        self.normals_drawn
    }

    /// How many coin flips have been consumed
    pub fn coins_drawn(&self) -> usize {
        self.coins_drawn
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_index(&mut self, n: usize) -> usize {
        if self.indices.is_empty() || n == 0 {
            return 0;
        }
        let value = self.indices[self.next_index % self.indices.len()];
        self.next_index += 1;
        value % n
    }

    fn normal(&mut self, stddev: f64) -> f64 {
        self.normals_drawn += 1;
        if self.normals.is_empty() {
            return 0.0;
        }
        let z = self.normals[self.next_normal % self.normals.len()];
        self.next_normal += 1;
        z * stddev
    }

    fn bernoulli(&mut self, _p: f64) -> bool {
        self.coins_drawn += 1;
        if self.coins.is_empty() {
            return true;
        }
        let coin = self.coins[self.next_coin % self.coins.len()];
        self.next_coin += 1;
        coin
    }
}
