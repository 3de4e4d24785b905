use thiserror::Error;

/// Validation failures that abort a generation run.
///
/// Stages report these as values; only the binary decides process exit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input file '{0}' not found. Please provide a valid input file.")]
    InputNotFound(String),

    #[error("Column '{0}' is missing")]
    MissingColumn(String),

    #[error("Unexpected columns present: {0}")]
    UnexpectedColumns(String),

    #[error("Mandatory field '{0}' contains empty values")]
    EmptyMandatoryField(&'static str),

    #[error("Invalid IP address format for host '{host}' in row {row}")]
    InvalidAddress { host: String, row: usize },

    #[error("Duplicate IP address '{host}' found in row {row}")]
    DuplicateInBatch { host: String, row: usize },

    #[error("Duplicate IP address '{host}' found in the master sheet")]
    DuplicateInMaster { host: String },
}
