//! # SRA Common Library
//!
//! Shared code for the Survey Response Analyzer including:
//! - Error types
//! - Configuration resolution
//! - Tabular data model (Cell / Table)
//! - Descriptive statistics primitives

pub mod config;
pub mod error;
pub mod stats;
pub mod table;

pub use error::{Error, Result};
pub use table::{Cell, Table};
