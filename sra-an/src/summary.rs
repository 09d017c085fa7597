//! Summary reporting: descriptive statistics and composite indices
//!
//! Reduces each application's correlation block to one summary row, and
//! each mapped table to the instrument's composite indices:
//!
//! - AttrakDiff: Pragmatic Quality and Hedonic Quality (the latter the
//!   mean of its Stimulation and Identity sub-indices).
//! - SCM: Warmth and Competence.
//!
//! Every composite is an unweighted mean of column means, each column
//! mean ignoring missing cells. A missing required column (or one with no
//! data at all) leaves the index uncomputable for that application.

use crate::correlate::CorrelationBlock;
use serde::Serialize;
use sra_common::stats::{mean, mean_abs, median};
use sra_common::{Result, Table};
use std::path::Path;

/// Pragmatic Quality column group
const PRAGMATIC_COLUMNS: [&str; 2] = ["impractical - practical", "complicated - simple"];
/// Hedonic Quality / Stimulation column group
const STIMULATION_COLUMNS: [&str; 2] = ["dull - creative", "boring - exciting"];
/// Hedonic Quality / Identity column group
const IDENTITY_COLUMNS: [&str; 2] = ["tacky - stylish", "amateurish - professional"];
/// Warmth column group
const WARMTH_COLUMNS: [&str; 3] = ["warm", "user-intentioned", "trustworthy"];
/// Competence column group
const COMPETENCE_COLUMNS: [&str; 2] = ["competent", "capable"];

/// One summary row per eligible application
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    pub service: String,
    pub min_correlation: f64,
    pub max_correlation: f64,
    pub mean_correlation: f64,
    pub median_correlation: f64,
    pub abs_mean_correlation: f64,
}

/// Reduce a correlation block to scalar descriptive statistics.
///
/// Undefined (NaN) coefficients are excluded; a block with no finite
/// coefficient at all yields `None`.
pub fn summarize(service: &str, block: &CorrelationBlock) -> Option<SummaryRecord> {
    let values = block.finite_values();
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(SummaryRecord {
        service: service.to_string(),
        min_correlation: min,
        max_correlation: max,
        mean_correlation: mean(&values),
        median_correlation: median(&values),
        abs_mean_correlation: mean_abs(&values),
    })
}

/// Write summary records as one CSV row per application
pub fn write_summary_csv(path: &Path, records: &[SummaryRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(sra_common::Error::from)?;
    Ok(())
}

/// Unweighted mean of the named columns' means.
///
/// `None` when any required column is absent or holds no data.
fn mean_of_column_means(table: &Table, columns: &[&str]) -> Option<f64> {
    let means: Option<Vec<f64>> = columns.iter().map(|c| table.column_mean(c)).collect();
    means.map(|m| mean(&m))
}

/// Pragmatic Quality of a mapped AttrakDiff table
pub fn pragmatic_quality(table: &Table) -> Option<f64> {
    mean_of_column_means(table, &PRAGMATIC_COLUMNS)
}

/// Hedonic Quality of a mapped AttrakDiff table (mean of Stimulation and
/// Identity sub-indices)
pub fn hedonic_quality(table: &Table) -> Option<f64> {
    let stimulation = mean_of_column_means(table, &STIMULATION_COLUMNS)?;
    let identity = mean_of_column_means(table, &IDENTITY_COLUMNS)?;
    Some(mean(&[stimulation, identity]))
}

/// Warmth of a mapped SCM table
pub fn warmth(table: &Table) -> Option<f64> {
    mean_of_column_means(table, &WARMTH_COLUMNS)
}

/// Competence of a mapped SCM table
pub fn competence(table: &Table) -> Option<f64> {
    mean_of_column_means(table, &COMPETENCE_COLUMNS)
}
