//! Tabular collaborators of the pipeline
//!
//! The core never touches files itself. Rows come in through a
//! `TransactionSource`, metadata goes out through a `MetadataSink` and is
//! read back through a `MetadataSource` for verification.

pub mod jsonl;
pub mod memory;
pub mod sample;

pub use jsonl::{JsonLinesTable, JsonLinesTransactions};
pub use memory::{MemoryTable, MemoryTransactions};
pub use sample::{SampleConfig, Sampler};

use crate::report::MetadataRecord;
use crate::schema::TransactionRow;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Table I/O errors
#[derive(Error, Debug)]
pub enum TableError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line that is not a valid record
    #[error("Malformed record at {path:?} line {line}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TableResult<T> = Result<T, TableError>;

/// Supplies the transaction rows of one run
pub trait TransactionSource {
    fn load(&mut self) -> TableResult<Vec<TransactionRow>>;
}

/// Receives metadata records; every write replaces the previous contents
pub trait MetadataSink {
    fn overwrite(&mut self, records: &[MetadataRecord]) -> TableResult<()>;
}

/// Reads back what a `MetadataSink` last wrote
pub trait MetadataSource {
    fn load(&self) -> TableResult<Vec<MetadataRecord>>;
}
