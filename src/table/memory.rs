//! In-memory tables, used by tests and embedding callers

use super::{MetadataSink, MetadataSource, TableResult, TransactionSource};
use crate::report::MetadataRecord;
use crate::schema::TransactionRow;

/// Transaction rows held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactions {
    rows: Vec<TransactionRow>,
}

impl MemoryTransactions {
    pub fn new(rows: Vec<TransactionRow>) -> Self {
        Self { rows }
    }
}

impl TransactionSource for MemoryTransactions {
    fn load(&mut self) -> TableResult<Vec<TransactionRow>> {
        Ok(self.rows.clone())
    }
}

/// Metadata table held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    records: Vec<MetadataRecord>,
    writes: usize,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of overwrite calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl MetadataSink for MemoryTable {
    fn overwrite(&mut self, records: &[MetadataRecord]) -> TableResult<()> {
        self.records = records.to_vec();
        self.writes += 1;
        Ok(())
    }
}

impl MetadataSource for MemoryTable {
    fn load(&self) -> TableResult<Vec<MetadataRecord>> {
        Ok(self.records.clone())
    }
}
