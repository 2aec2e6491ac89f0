//! Guess dataset model, storage and synthesis.
//!
//! # Overview
//!
//! A dataset is a [`Table`](table::Table) of [`Record`](record::Record)s, one
//! per human guess:
//!
//! ```text
//! Table
//! └─ records: Vec<Record>
//!     ├─ response  (bounded integer, e.g. 1..=10)
//!     ├─ category  (A, B, C or D)
//!     └─ timestamp (origin + row × interval)
//! ```
//!
//! Tables are immutable once built. They are produced either by the
//! synthesizer ([`synth::SynthConfig`]) or by loading a delimited text file
//! ([`table::Table::load`]).
//!
//! # Modules
//!
//! - [`record`]: Records, columns and typed cell values
//! - [`table`]: The immutable table and its storage format
//! - [`synth`]: Seeded generation of biased guess datasets

use std::{io, path::PathBuf};

pub mod record;
pub mod synth;
pub mod table;

pub use self::{
    record::{Category, Column, Record, Value},
    synth::SynthConfig,
    table::Table,
};

/// Errors raised while building, loading or saving a dataset.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    #[display("I/O failure on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("column '{name}' not found")]
    ColumnNotFound { name: String },
    #[display("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
}

impl DatasetError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
