//! CSV output formatting
//!
//! One row per plot coordinate, ready for pandas or a spreadsheet:
//! `series,num_bins,param,mean_gap`.

use crate::experiment::ExperimentReport;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: &str = "series,num_bins,param,mean_gap";

/// Write all series of a report as CSV rows
pub fn write_csv<W: Write>(out: &mut W, report: &ExperimentReport) -> Result<()> {
    writeln!(out, "{}", HEADER)?;
    for series in report.series() {
        let name = escape(&series.name);
        for (x, y) in series.coordinates {
            writeln!(out, "{},{},{},{}", name, series.num_bins, x, y)?;
        }
    }
    Ok(())
}

/// Write the CSV rows to a file
pub fn write_csv_output(output_path: &Path, report: &ExperimentReport) -> Result<()> {
    let mut file = BufWriter::new(File::create(output_path)?);
    write_csv(&mut file, report)?;
    file.flush()?;
    Ok(())
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
