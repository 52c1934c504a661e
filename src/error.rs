//! Error types for CSV parsing

use thiserror::Error;

/// Result type alias for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that can surface while pulling records from a CSV source
///
/// Row width mismatches, unterminated quotes and ambiguous dialects are
/// deliberately absent: those are tolerated, not reported.
#[derive(Error, Debug)]
pub enum CsvError {
    /// `next_record` was called after the sequence reported its end
    #[error("CSV sequence is exhausted")]
    Exhausted,

    /// The underlying reader failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A physical line was not valid UTF-8
    #[error("Invalid UTF-8 on line {line}")]
    Encoding { line: u64 },

    /// The effective dialect cannot tokenize anything sensibly
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),
}

impl CsvError {
    /// Check if this error only signals the end of the sequence
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CsvError::Exhausted)
    }
}
