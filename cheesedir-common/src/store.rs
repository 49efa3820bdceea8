//! In-memory record store and CSV import/export
//!
//! The store is an ordered sequence addressed by 0-based position. Removing a
//! record shifts every later record down one position, so positions remembered
//! from before a removal are stale afterwards.

use crate::codec::{decode_source_row, encode, EXPORT_HEADERS};
use crate::record::Record;
use crate::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Ordered, position-addressed collection of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load up to `limit` records from a source-layout CSV file
    ///
    /// The header row is discarded. Any failure to open or parse the file
    /// fails the whole load; there is no partial result.
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open {}: {}", path.display(), e),
            ))
        })?;

        let store = Self::from_reader(file, limit)?;
        info!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Read up to `limit` records from any source-layout CSV reader
    pub fn from_reader<R: Read>(reader: R, limit: usize) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for (row, result) in csv_reader.records().take(limit).enumerate() {
            let fields = result?;
            let fields: Vec<&str> = fields.iter().collect();
            // row numbers count the header as line 1
            let record = decode_source_row(&fields).map_err(|e| match e {
                Error::InvalidInput(msg) => {
                    Error::InvalidInput(format!("line {}: {}", row + 2, msg))
                }
                other => other,
            })?;
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in position order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Record at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Add a record at the end
    pub fn append(&mut self, record: Record) {
        debug!("Appending record {} at position {}", record.cheese_id, self.records.len());
        self.records.push(record);
    }

    /// Replace the record at `index`, returning the previous one
    pub fn replace_at(&mut self, index: usize, record: Record) -> Result<Record> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Remove the record at `index`, shifting later records down by one
    pub fn remove_at(&mut self, index: usize) -> Result<Record> {
        self.check_index(index)?;
        Ok(self.records.remove(index))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(Error::InvalidInput(format!(
                "record position {} out of range (store holds {})",
                index,
                self.records.len()
            )));
        }
        Ok(())
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Write records to `writer` in the export layout, header first
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        csv_writer.write_record(encode(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write records to it in the export layout
pub fn persist_to_file(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, records)?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
