//! Alignment and aggregation engine
//!
//! Produces the cross-instrument correlation block for one application
//! from its two mapped tables.
//!
//! Alignment contract: the two tables carry no join key, so row *i* of the
//! AttrakDiff table is taken to be the same respondent as row *i* of the
//! SCM table. Equal row counts are the precondition standing in for "same
//! respondent ordering"; on a mismatch the application must be skipped,
//! never force-aligned.

use sra_common::stats::pearson;
use sra_common::{Error, Result, Table};

/// Cross-instrument Pearson correlation submatrix for one application.
///
/// Rows are SCM columns, columns are AttrakDiff pair columns, both in
/// their original table order. NaN marks an undefined coefficient (fewer
/// than two jointly present values, or zero variance).
#[derive(Debug, Clone)]
pub struct CorrelationBlock {
    /// SCM column names (row axis)
    pub row_labels: Vec<String>,
    /// AttrakDiff column names (column axis)
    pub col_labels: Vec<String>,
    /// values[row][col], NaN = undefined
    pub values: Vec<Vec<f64>>,
}

impl CorrelationBlock {
    /// All finite coefficients as one flat, unordered collection
    pub fn finite_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .collect()
    }
}

/// Compute the correlation block for one application.
///
/// Concatenates the two tables by row position, computes the full pairwise
/// Pearson matrix over all numeric columns, and slices out the submatrix
/// with SCM columns on the row axis and AttrakDiff columns on the column
/// axis. Pass-through text columns never enter the matrix.
///
/// Returns `Error::Shape` when row counts differ; the caller logs the
/// skip and excludes the application from all downstream outputs.
pub fn correlation_block(attrakdiff: &Table, scm: &Table) -> Result<CorrelationBlock> {
    if attrakdiff.n_rows() != scm.n_rows() {
        return Err(Error::Shape(format!(
            "Row count mismatch: attrakdiff has {}, scm has {}",
            attrakdiff.n_rows(),
            scm.n_rows()
        )));
    }

    let combined = attrakdiff.concat_wide(scm)?;

    // Numeric columns of the wide table, in original order. The AttrakDiff
    // columns come first, then the SCM columns.
    let numeric: Vec<usize> = (0..combined.n_cols())
        .filter(|&col| combined.is_numeric_column(col))
        .collect();
    let attrakdiff_count = numeric
        .iter()
        .filter(|&&col| col < attrakdiff.n_cols())
        .count();

    let series: Vec<Vec<Option<f64>>> = numeric
        .iter()
        .map(|&col| combined.numeric_column(col))
        .collect();

    // Full pairwise matrix over all numeric columns
    let n = series.len();
    let mut full = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            full[i][j] = r;
            full[j][i] = r;
        }
    }

    // Cross-instrument slice: SCM rows x AttrakDiff columns
    let values: Vec<Vec<f64>> = (attrakdiff_count..n)
        .map(|row| (0..attrakdiff_count).map(|col| full[row][col]).collect())
        .collect();

    let col_labels = numeric[..attrakdiff_count]
        .iter()
        .map(|&col| combined.columns()[col].clone())
        .collect();
    let row_labels = numeric[attrakdiff_count..]
        .iter()
        .map(|&col| combined.columns()[col].clone())
        .collect();

    Ok(CorrelationBlock {
        row_labels,
        col_labels,
        values,
    })
}
