//! JSON-lines file tables
//!
//! One JSON object per line. Blank lines are skipped on read.

use super::{MetadataSink, MetadataSource, TableError, TableResult, TransactionSource};
use crate::report::MetadataRecord;
use crate::schema::TransactionRow;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn read_lines<T: DeserializeOwned>(path: &Path) -> TableResult<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| TableError::Malformed {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Write all records to a sibling temp file, then rename it over `path`
fn replace_file<T: Serialize>(path: &Path, records: &[T]) -> TableResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&tmp, path)?;
    debug!("Replaced {:?} with {} records", path, records.len());
    Ok(())
}

/// Transaction rows read from a JSON-lines file
#[derive(Debug, Clone)]
pub struct JsonLinesTransactions {
    path: PathBuf,
}

impl JsonLinesTransactions {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TransactionSource for JsonLinesTransactions {
    fn load(&mut self) -> TableResult<Vec<TransactionRow>> {
        info!("Loading transactions from: {:?}", self.path);
        read_lines(&self.path)
    }
}

/// Metadata table stored as a JSON-lines file
#[derive(Debug, Clone)]
pub struct JsonLinesTable {
    path: PathBuf,
}

impl JsonLinesTable {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSink for JsonLinesTable {
    fn overwrite(&mut self, records: &[MetadataRecord]) -> TableResult<()> {
        replace_file(&self.path, records)
    }
}

impl MetadataSource for JsonLinesTable {
    fn load(&self) -> TableResult<Vec<MetadataRecord>> {
        read_lines(&self.path)
    }
}
