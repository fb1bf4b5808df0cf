//! Error types for sheetapi-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the spreadsheet and cell stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No spreadsheet with this id exists
    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    /// Cell address does not match the A1 grammar
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Cell data carries an unrecognized kind or a malformed value
    #[error("Invalid cell data: {0}")]
    InvalidCellData(String),
}

impl Error {
    pub(crate) fn not_found<S: Into<String>>(id: S) -> Self {
        Error::NotFound(id.into())
    }
}
