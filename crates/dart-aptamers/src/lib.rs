//! Aptamer table loading and fuzzy lookup by target name.

pub mod database;
pub mod record;

use thiserror::Error;

pub use database::AptamerDatabase;
pub use record::AptamerRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets or no header row")]
    EmptyWorkbook,
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("unsupported table format: {0}")]
    UnsupportedFormat(String),
}
