//! Per-application CSV discovery and loading
//!
//! Each input directory holds one CSV file per application per instrument.
//! The application key is the file stem with the instrument marker removed
//! (e.g. `attrakdiffyoutube.csv` → `youtube`). A file that fails to parse
//! is reported and skipped; the run continues with the remaining files.

use crate::instrument::Instrument;
use sra_common::{Error, Result, Table};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Load all per-application tables of one instrument from a directory.
///
/// Returns an immutable, sorted map keyed by application. A missing
/// directory is an error (the caller treats it as fatal); an unparseable
/// file only removes that application from the returned map.
pub fn load_collection(dir: &Path, instrument: Instrument) -> Result<BTreeMap<String, Table>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!(
            "Input directory not found: {}",
            dir.display()
        )));
    }

    let marker = instrument.file_stem_marker();
    let mut tables = BTreeMap::new();

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let app = stem.replace(marker, "");

        match Table::from_csv_path(&path) {
            Ok(table) => {
                info!(
                    "Loaded {} data for: {} - shape: {} rows x {} cols",
                    marker,
                    app,
                    table.n_rows(),
                    table.n_cols()
                );
                tables.insert(app, table);
            }
            Err(e) => {
                warn!("Error loading {}: {}", path.display(), e);
            }
        }
    }

    Ok(tables)
}
