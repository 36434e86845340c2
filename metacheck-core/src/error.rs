use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

use crate::extract::SessionState;
use crate::field::FieldKind;

#[derive(Error, Debug)]
pub enum MetacheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reference data error: {0}")]
    Reference(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, MetacheckError>;

/// One field whose extracted value disagrees with the reference row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: FieldKind,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub detail: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {} ({})",
            self.field.name(),
            display_value(self.expected.as_deref()),
            display_value(self.actual.as_deref()),
            self.detail
        )
    }
}

fn display_value(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => "<absent>".to_owned(),
    }
}

/// Reasons a single validation case fails
#[derive(Error, Debug)]
pub enum CaseFailure {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: Utf8PathBuf,
        /// Always `Failed`: the session never opened
        state: SessionState,
        #[source]
        source: MetacheckError,
    },

    #[error("Metadata mismatch:\n{}", format_mismatches(.0))]
    Mismatch(Vec<FieldMismatch>),

    #[error("Sample {label} (row {index}) not present in a table of {rows} rows")]
    MissingSample {
        label: String,
        index: usize,
        rows: usize,
    },
}

impl CaseFailure {
    /// Mismatched fields, empty for open and lookup failures
    pub fn mismatches(&self) -> &[FieldMismatch] {
        match self {
            CaseFailure::Mismatch(mismatches) => mismatches,
            _ => &[],
        }
    }
}

fn format_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches
        .iter()
        .map(|m| format!("  {m}"))
        .collect::<Vec<_>>()
        .join("\n")
}
