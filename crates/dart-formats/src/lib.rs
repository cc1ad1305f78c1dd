pub mod buffer;
pub mod detect;
pub mod fasta;
pub mod rnafold;

use thiserror::Error;

pub use buffer::{highest_salt, Salt, SaltConcentration};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

/// Formats an aptamer table can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Workbook,
    Unknown,
}

impl TableFormat {
    /// Field delimiter for delimited text formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            TableFormat::Csv => Some(b','),
            TableFormat::Tsv => Some(b'\t'),
            TableFormat::Workbook | TableFormat::Unknown => None,
        }
    }
}

/// Where an aptamer sequence given on the command line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceInput {
    Fasta,
    Raw,
}
