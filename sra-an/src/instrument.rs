//! Survey instruments and response normalization
//!
//! Two fixed instruments are supported:
//!
//! - **AttrakDiff**: semantic differential items. Each column is one bipolar
//!   adjective pair (e.g. "boring - exciting") answered on a symmetric
//!   5-point scale mapped to {-2, -1, 0, 1, 2}.
//! - **SCM** (Stereotype Content Model): every column shares one 4-point
//!   applicability scale mapped to {-1, 0, 1, 2}.
//!
//! Mapping tables are immutable and built once. Lookup is preceded by
//! trim + lowercase only; there is deliberately no fuzzy matching, so the
//! set of recognized tokens is exactly the table contents (including the
//! typo variants observed in collected data). Unrecognized text yields
//! `None` and becomes a missing value downstream.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Bipolar adjective pairs: (column name, negative anchor, positive anchor)
pub const BIPOLAR_PAIRS: [(&str, &str, &str); 8] = [
    ("impractical - practical", "impractical", "practical"),
    ("complicated - simple", "complicated", "simple"),
    ("dull - creative", "dull", "creative"),
    ("boring - exciting", "boring", "exciting"),
    ("tacky - stylish", "tacky", "stylish"),
    ("amateurish - professional", "amateurish", "professional"),
    ("unpleasant - pleasant", "unpleasant", "pleasant"),
    ("unattractive - attractive", "unattractive", "attractive"),
];

/// Per-pair response tables, keyed by column name
static BIPOLAR_MAPPINGS: Lazy<HashMap<&'static str, HashMap<String, f64>>> = Lazy::new(|| {
    BIPOLAR_PAIRS
        .iter()
        .map(|&(column, neg, pos)| {
            let mut table = HashMap::new();
            table.insert(pos.to_string(), 2.0);
            table.insert(format!("quite {pos}"), 1.0);
            table.insert(format!("somewhat {pos}"), 1.0);
            table.insert("neutral".to_string(), 0.0);
            table.insert(format!("somewhat {neg}"), -1.0);
            table.insert(format!("quite {neg}"), -1.0);
            table.insert(neg.to_string(), -2.0);
            // Typos found in collected data
            table.insert(format!("somwhat {pos}"), 1.0);
            table.insert(format!("qute {pos}"), 1.0);
            table.insert(format!("somwhat {neg}"), -1.0);
            table.insert(format!("qute {neg}"), -1.0);
            table.insert("somewhat impratical".to_string(), -1.0);
            (column, table)
        })
        .collect()
});

/// Shared applicability-scale table.
///
/// "does not apply" and "not applicable" are both observed phrasings of the
/// lowest anchor and intentionally collapse to the same value.
static APPLICABILITY_MAPPING: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("highly applicable", 2.0),
        ("applicable", 1.0),
        ("neutral", 0.0),
        ("does not apply", -1.0),
        ("not applicable", -1.0),
    ])
});

/// Instrument kind of a raw table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Attrakdiff,
    Scm,
}

impl Instrument {
    /// Substring stripped from a CSV file stem to derive the application key
    pub fn file_stem_marker(&self) -> &'static str {
        match self {
            Instrument::Attrakdiff => "attrakdiff",
            Instrument::Scm => "scm",
        }
    }

    /// Whether this instrument maps the named column.
    ///
    /// SCM maps every column; AttrakDiff maps only known bipolar pair
    /// columns and passes the rest through untouched.
    pub fn maps_column(&self, column: &str) -> bool {
        match self {
            Instrument::Attrakdiff => BIPOLAR_MAPPINGS.contains_key(column),
            Instrument::Scm => true,
        }
    }

    /// Normalize one raw response token to its scale value.
    ///
    /// The token is trimmed and lowercased before lookup. `None` means the
    /// token is not recognized (or, for AttrakDiff, the column is not a
    /// known pair); callers turn that into a missing value rather than an
    /// error so one stray response never halts the pipeline.
    pub fn normalize(&self, column: &str, raw: &str) -> Option<f64> {
        let token = raw.trim().to_lowercase();
        match self {
            Instrument::Attrakdiff => BIPOLAR_MAPPINGS.get(column)?.get(&token).copied(),
            Instrument::Scm => APPLICABILITY_MAPPING.get(token.as_str()).copied(),
        }
    }
}
