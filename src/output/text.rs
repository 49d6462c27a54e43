//! Human- and plot-readable text output
//!
//! Per sweep point a labeled block of histogram lines, then the plot
//! coordinates of every series, one `(x, y)` pair per line.

use crate::experiment::{BatchedSweepResult, ExperimentReport, NoiseSweepResult, Series};
use crate::stats::GapStats;
use crate::Result;
use std::io::Write;

/// How histogram lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistogramStyle {
    /// `<gap> : <pct>%`
    #[default]
    Plain,
    /// `\textbf{<gap>} : <pct>\%`, ready to paste into a LaTeX table
    Latex,
}

impl HistogramStyle {
    pub fn from_latex_flag(latex: bool) -> Self {
        if latex {
            Self::Latex
        } else {
            Self::Plain
        }
    }

    fn line(self, gap: i64, percent: u64) -> String {
        match self {
            Self::Plain => format!("{} : {}%", gap, percent),
            Self::Latex => format!("\\textbf{{{}}} : {}\\%", gap, percent),
        }
    }
}

/// Print a report to stdout
pub fn print_report(report: &ExperimentReport, style: HistogramStyle) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, style)?;
    out.flush()?;
    Ok(())
}

/// Write a report as text
pub fn write_report<W: Write>(out: &mut W, report: &ExperimentReport, style: HistogramStyle) -> Result<()> {
    match report {
        ExperimentReport::Noise(results) => {
            for result in results {
                write_noise_sweep(out, result, style)?;
            }
        }
        ExperimentReport::Batched(result) => write_batched_sweep(out, result, style)?,
    }

    writeln!(out, "=== Coordinates ===")?;
    for series in report.series() {
        write_series(out, &series)?;
    }
    Ok(())
}

fn write_noise_sweep<W: Write>(out: &mut W, result: &NoiseSweepResult, style: HistogramStyle) -> Result<()> {
    writeln!(out, "=== {} ===", result.family)?;
    writeln!(out, "n : {}", result.num_bins)?;
    writeln!(out, "m : {}", result.balls)?;
    writeln!(out)?;

    for point in &result.points {
        writeln!(out, "{} : {}", result.family.param_name(), point.param)?;
        write_histogram(out, &point.stats, style)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_batched_sweep<W: Write>(out: &mut W, result: &BatchedSweepResult, style: HistogramStyle) -> Result<()> {
    writeln!(out, "=== batched two-choice ===")?;
    writeln!(out, "n : {}", result.num_bins)?;
    writeln!(out)?;

    for point in &result.points {
        writeln!(out, "Batch-size (b) : {}", point.batch_size)?;
        writeln!(out, "Rounds : {}", point.rounds)?;
        writeln!(out, "Two-Choice:")?;
        write_histogram(out, &point.two_choice, style)?;
        writeln!(out, "One-Choice:")?;
        write_histogram(out, &point.one_choice, style)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_histogram<W: Write>(out: &mut W, stats: &GapStats, style: HistogramStyle) -> Result<()> {
    for (gap, percent) in stats.percentages() {
        writeln!(out, "{}", style.line(gap, percent))?;
    }
    Ok(())
}

fn write_series<W: Write>(out: &mut W, series: &Series) -> Result<()> {
    writeln!(out, "{}:", series.name)?;
    for &(x, y) in &series.coordinates {
        writeln!(out, "({}, {})", x, y)?;
    }
    Ok(())
}
