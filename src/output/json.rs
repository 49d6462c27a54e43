//! JSON output formatting
//!
//! One document per run: run metadata, the sweep configuration, every sweep
//! point with its mean, histogram buckets and quantiles, and the plot series.

use crate::config::{Config, ExperimentConfig, ExperimentKind};
use crate::experiment::{BatchedSweepResult, ExperimentReport, NoiseSweepResult, Series};
use crate::stats::GapStats;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// RFC 3339 timestamp of when the report was written
    pub timestamp: String,
    pub kind: ExperimentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub trials: u64,
    pub experiment: ExperimentConfig,
    pub sweeps: Vec<JsonSweep>,
    pub series: Vec<JsonSeries>,
}

/// One sweep over a fixed bin count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSweep {
    /// Strategy family or `batched-two-choice`
    pub name: String,
    pub num_bins: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balls: Option<u64>,
    pub points: Vec<JsonPoint>,
}

/// One sweep point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPoint {
    /// Swept value (`g`, `sigma` or batch size)
    pub param: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u64>,
    pub gap: JsonGapStats,
    /// Gap after the first round of a batched trial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_round_gap: Option<JsonGapStats>,
}

/// Aggregated gaps of one sweep point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonGapStats {
    pub trials: u64,
    pub mean: f64,
    pub histogram: Vec<JsonBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p90: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBucket {
    pub gap: i64,
    pub count: u64,
    pub percent: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSeries {
    pub name: String,
    pub num_bins: usize,
    pub coordinates: Vec<(f64, f64)>,
}

impl From<&GapStats> for JsonGapStats {
    fn from(stats: &GapStats) -> Self {
        let histogram = stats
            .histogram()
            .iter()
            .zip(stats.percentages())
            .map(|((&gap, &count), (_, percent))| JsonBucket { gap, count, percent })
            .collect();

        Self {
            trials: stats.trials(),
            mean: stats.mean(),
            histogram,
            p50: stats.percentile(50.0),
            p90: stats.percentile(90.0),
            p99: stats.percentile(99.0),
        }
    }
}

impl From<Series> for JsonSeries {
    fn from(series: Series) -> Self {
        Self {
            name: series.name,
            num_bins: series.num_bins,
            coordinates: series.coordinates,
        }
    }
}

/// Build the JSON document for a finished run
pub fn build_json_report(report: &ExperimentReport, config: &Config) -> JsonReport {
    let sweeps = match report {
        ExperimentReport::Noise(results) => results.iter().map(noise_sweep).collect(),
        ExperimentReport::Batched(result) => vec![batched_sweep(result)],
    };

    JsonReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        kind: config.experiment.kind(),
        seed: config.runtime.seed,
        trials: config.runtime.trials,
        experiment: config.experiment.clone(),
        sweeps,
        series: report.series().into_iter().map(JsonSeries::from).collect(),
    }
}

fn noise_sweep(result: &NoiseSweepResult) -> JsonSweep {
    JsonSweep {
        name: result.family.name().to_string(),
        num_bins: result.num_bins,
        balls: Some(result.balls),
        points: result
            .points
            .iter()
            .map(|point| JsonPoint {
                param: point.param,
                rounds: None,
                gap: JsonGapStats::from(&point.stats),
                first_round_gap: None,
            })
            .collect(),
    }
}

fn batched_sweep(result: &BatchedSweepResult) -> JsonSweep {
    JsonSweep {
        name: "batched-two-choice".to_string(),
        num_bins: result.num_bins,
        balls: None,
        points: result
            .points
            .iter()
            .map(|point| JsonPoint {
                param: point.batch_size as f64,
                rounds: Some(point.rounds),
                gap: JsonGapStats::from(&point.two_choice),
                first_round_gap: Some(JsonGapStats::from(&point.one_choice)),
            })
            .collect(),
    }
}

/// Write the JSON document to a file
pub fn write_json_output(output_path: &Path, report: &ExperimentReport, config: &Config) -> Result<()> {
    let document = build_json_report(report, config);
    let file = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(file, &document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{BatchedPoint, SweepPoint};
    use crate::strategy::StrategyFamily;

    fn stats(gaps: &[i64]) -> GapStats {
        let mut stats = GapStats::new();
        for &gap in gaps {
            stats.record_rounded(gap);
        }
        stats
    }

    #[test]
    fn test_noise_document() {
        let report = ExperimentReport::Noise(vec![NoiseSweepResult {
            family: StrategyFamily::SigmaNoisy,
            num_bins: 10,
            balls: 100,
            points: vec![SweepPoint { param: 0.5, stats: stats(&[1, 1, 2, 4]) }],
        }]);
        let mut config = Config::default();
        config.runtime.seed = Some(7);

        let doc = build_json_report(&report, &config);
        assert_eq!(doc.kind, ExperimentKind::Noise);
        assert_eq!(doc.seed, Some(7));
        assert_eq!(doc.sweeps.len(), 1);
        assert_eq!(doc.sweeps[0].name, "sigma-noisy");

        let gap = &doc.sweeps[0].points[0].gap;
        assert_eq!(gap.trials, 4);
        assert_eq!(gap.mean, 2.0);
        assert_eq!(gap.histogram.len(), 3);
        assert_eq!(gap.histogram[0].gap, 1);
        assert_eq!(gap.histogram[0].count, 2);
        assert_eq!(gap.histogram[0].percent, 50);
        assert_eq!(doc.series[0].coordinates, vec![(0.5, 2.0)]);
        assert!(chrono::DateTime::parse_from_rfc3339(&doc.timestamp).is_ok());
    }

    #[test]
    fn test_batched_document_written_to_file() {
        let report = ExperimentReport::Batched(BatchedSweepResult {
            num_bins: 10,
            points: vec![BatchedPoint {
                batch_size: 20,
                rounds: 1000,
                one_choice: stats(&[3]),
                two_choice: stats(&[1]),
            }],
        });
        let config = Config::for_kind(ExperimentKind::Batched);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_output(&path, &report, &config).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["kind"], "batched");
        assert!(value.get("seed").is_none());

        let point = &value["sweeps"][0]["points"][0];
        assert_eq!(point["param"], 20.0);
        assert_eq!(point["rounds"], 1000);
        assert_eq!(point["gap"]["mean"], 1.0);
        assert_eq!(point["first_round_gap"]["mean"], 3.0);
        assert_eq!(value["series"][0]["name"], "One-Choice");
    }
}
