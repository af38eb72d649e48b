//! The module contains the errors the ledger can throw.
use thiserror::Error;

/// Errors raised while building the CSV export artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv writer flush failed")]
    Flush,
}
