//! Column-wise application of instrument mapping over a whole table

use crate::instrument::Instrument;
use sra_common::{Cell, Table};

/// Map every relevant cell of a raw table to its numeric scale value.
///
/// Shape-preserving: the result has the same columns (names and order) and
/// the same row count as the input. For AttrakDiff only known bipolar pair
/// columns are mapped; other columns pass through untouched and, still
/// holding text, stay out of the correlation step. For SCM every column is
/// mapped with the shared applicability table.
///
/// Unrecognized text becomes `Missing`, silently. Cells that are already
/// numeric pass through unchanged, so mapping an already-mapped table is a
/// no-op.
pub fn map_table(table: &Table, instrument: Instrument) -> Table {
    table.map_cells(|column, cell| {
        if !instrument.maps_column(column) {
            return cell.clone();
        }
        match cell {
            Cell::Text(raw) => instrument
                .normalize(column, raw)
                .map(Cell::Number)
                .unwrap_or(Cell::Missing),
            Cell::Number(value) => Cell::Number(*value),
            Cell::Missing => Cell::Missing,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn test_attrakdiff_pair_column_mapped() {
        let raw = table(
            &["boring - exciting"],
            vec![
                vec![text(" Quite Exciting ")],
                vec![text("qute exciting")],
                vec![text("garbage")],
            ],
        );
        let mapped = map_table(&raw, Instrument::Attrakdiff);
        assert_eq!(*mapped.cell(0, 0), Cell::Number(1.0));
        assert_eq!(*mapped.cell(1, 0), Cell::Number(1.0));
        assert_eq!(*mapped.cell(2, 0), Cell::Missing);
    }

    #[test]
    fn test_attrakdiff_unknown_column_passes_through() {
        let raw = table(
            &["comments"],
            vec![vec![text("free-form feedback")]],
        );
        let mapped = map_table(&raw, Instrument::Attrakdiff);
        assert_eq!(*mapped.cell(0, 0), text("free-form feedback"));
        assert!(!mapped.is_numeric_column(0));
    }

    #[test]
    fn test_scm_maps_every_column() {
        let raw = table(
            &["warm", "capable"],
            vec![
                vec![text("Highly Applicable"), text("does not apply")],
                vec![text("not applicable"), text("applicable")],
            ],
        );
        let mapped = map_table(&raw, Instrument::Scm);
        assert_eq!(*mapped.cell(0, 0), Cell::Number(2.0));
        assert_eq!(*mapped.cell(0, 1), Cell::Number(-1.0));
        assert_eq!(*mapped.cell(1, 0), Cell::Number(-1.0));
        assert_eq!(*mapped.cell(1, 1), Cell::Number(1.0));
    }

    #[test]
    fn test_shape_preserved() {
        let raw = table(
            &["boring - exciting", "comments"],
            vec![
                vec![text("exciting"), text("great")],
                vec![text("boring"), text("meh")],
            ],
        );
        let mapped = map_table(&raw, Instrument::Attrakdiff);
        assert_eq!(mapped.n_rows(), raw.n_rows());
        assert_eq!(mapped.columns(), raw.columns());
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let raw = table(
            &["warm"],
            vec![vec![text("applicable")], vec![text("unknown token")]],
        );
        let once = map_table(&raw, Instrument::Scm);
        let twice = map_table(&once, Instrument::Scm);
        assert_eq!(*twice.cell(0, 0), Cell::Number(1.0));
        assert_eq!(*twice.cell(1, 0), Cell::Missing);
    }
}
