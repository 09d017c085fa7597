//! Tabular data model for survey responses
//!
//! A [`Table`] is a named-column, rectangular grid of [`Cell`]s. Raw survey
//! tables hold mostly `Text` cells; mapped tables hold `Number` / `Missing`
//! cells in the columns the instrument mapping recognizes. The shape of a
//! table never changes across the mapping step.

use crate::{Error, Result};
use std::path::Path;

/// One table cell.
///
/// CSV cells that parse as a float load as `Number` so that re-running the
/// instrument mapping over an already-numeric table leaves it untouched.
/// Empty cells load as `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Parse one raw CSV field into a cell
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    /// Numeric view of the cell (`None` for text and missing cells)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// Rectangular collection of rows over named, ordered columns
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table, validating that every row matches the header width
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Shape(format!(
                    "Row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Load a table from a CSV file with a header row
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(path)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::parse).collect());
        }

        Table::new(columns, rows)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in original order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by exact name, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    /// Iterate one column's cells top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[col])
    }

    /// One column as numbers, `None` where the cell is text or missing
    pub fn numeric_column(&self, col: usize) -> Vec<Option<f64>> {
        self.column(col).map(Cell::as_number).collect()
    }

    /// A column is numeric when no cell in it is text.
    ///
    /// Unmapped pass-through columns keep their text cells and therefore
    /// stay out of the correlation step.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        !self.column(col).any(|cell| matches!(cell, Cell::Text(_)))
    }

    /// Mean of a named column ignoring missing cells.
    ///
    /// `None` when the column is absent or holds no numeric values.
    pub fn column_mean(&self, name: &str) -> Option<f64> {
        let col = self.column_index(name)?;
        let values: Vec<f64> = self.column(col).filter_map(Cell::as_number).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Rebuild the table by mapping every cell through `f`, which receives
    /// the cell's column name. Shape, column names, and row order are
    /// preserved exactly; columns are independent of each other.
    pub fn map_cells<F>(&self, mut f: F) -> Table
    where
        F: FnMut(&str, &Cell) -> Cell,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.columns)
                    .map(|(cell, column)| f(column, cell))
                    .collect()
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Concatenate two equal-height tables side by side, preserving the
    /// column order of both (self's columns first).
    pub fn concat_wide(&self, other: &Table) -> Result<Table> {
        if self.n_rows() != other.n_rows() {
            return Err(Error::Shape(format!(
                "Cannot concatenate tables with {} and {} rows",
                self.n_rows(),
                other.n_rows()
            )));
        }

        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());

        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| {
                let mut row = a.clone();
                row.extend(b.iter().cloned());
                row
            })
            .collect();

        Table::new(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(columns: &[&str], rows: &[&[Cell]]) -> Table {
        Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| r.to_vec()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_cell_parse_variants() {
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("   "), Cell::Missing);
        assert_eq!(Cell::parse("2"), Cell::Number(2.0));
        assert_eq!(Cell::parse(" -1.5 "), Cell::Number(-1.5));
        assert_eq!(Cell::parse("neutral"), Cell::Text("neutral".to_string()));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Cell::Missing]],
        );
        assert!(matches!(result, Err(Error::Shape(_))));
    }

    #[test]
    fn test_from_csv_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "boring - exciting,extra").unwrap();
        writeln!(file, "exciting,free text").unwrap();
        writeln!(file, "2,").unwrap();
        file.flush().unwrap();

        let table = Table::from_csv_path(file.path()).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.columns(), &["boring - exciting", "extra"]);
        assert_eq!(
            *table.cell(0, 0),
            Cell::Text("exciting".to_string())
        );
        assert_eq!(*table.cell(1, 0), Cell::Number(2.0));
        assert_eq!(*table.cell(1, 1), Cell::Missing);
    }

    #[test]
    fn test_numeric_column_predicate() {
        let t = table(
            &["mapped", "raw"],
            &[
                &[Cell::Number(1.0), Cell::Text("hello".to_string())],
                &[Cell::Missing, Cell::Number(2.0)],
            ],
        );
        assert!(t.is_numeric_column(0));
        assert!(!t.is_numeric_column(1));
    }

    #[test]
    fn test_column_mean_ignores_missing() {
        let t = table(
            &["v"],
            &[&[Cell::Number(2.0)], &[Cell::Missing], &[Cell::Number(1.0)]],
        );
        assert_eq!(t.column_mean("v"), Some(1.5));
        assert_eq!(t.column_mean("absent"), None);
    }

    #[test]
    fn test_column_mean_all_missing_is_none() {
        let t = table(&["v"], &[&[Cell::Missing], &[Cell::Missing]]);
        assert_eq!(t.column_mean("v"), None);
    }

    #[test]
    fn test_map_cells_preserves_shape() {
        let t = table(
            &["a", "b"],
            &[
                &[Cell::Text("x".to_string()), Cell::Number(1.0)],
                &[Cell::Missing, Cell::Text("y".to_string())],
            ],
        );
        let mapped = t.map_cells(|_, _| Cell::Number(0.0));
        assert_eq!(mapped.n_rows(), t.n_rows());
        assert_eq!(mapped.columns(), t.columns());
    }

    #[test]
    fn test_concat_wide_preserves_order() {
        let a = table(&["x"], &[&[Cell::Number(1.0)], &[Cell::Number(2.0)]]);
        let b = table(&["y"], &[&[Cell::Number(3.0)], &[Cell::Number(4.0)]]);
        let wide = a.concat_wide(&b).unwrap();
        assert_eq!(wide.columns(), &["x", "y"]);
        assert_eq!(*wide.cell(1, 1), Cell::Number(4.0));
    }

    #[test]
    fn test_concat_wide_rejects_row_mismatch() {
        let a = table(&["x"], &[&[Cell::Number(1.0)]]);
        let b = table(&["y"], &[&[Cell::Number(1.0)], &[Cell::Number(2.0)]]);
        assert!(matches!(a.concat_wide(&b), Err(Error::Shape(_))));
    }
}
