//! Ordered in-memory record store.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::MedicineRecord;

/// Record store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered collection of medicine records with unique ids.
///
/// New records are appended at the tail.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MedicineRecord>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an ordered sequence.
    pub fn from_records(records: Vec<MedicineRecord>) -> StoreResult<Self> {
        let mut store = Self::new();
        store.replace_all(records)?;
        Ok(store)
    }

    /// Append a record. Fails without modifying the store if the id exists.
    pub fn add(&mut self, record: MedicineRecord) -> StoreResult<()> {
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Remove the record with the given id. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// Replace all contents with the given sequence, keeping its order.
    pub fn replace_all(&mut self, records: Vec<MedicineRecord>) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }
        self.records = records;
        Ok(())
    }

    /// Current records in store order.
    pub fn all(&self) -> &[MedicineRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&MedicineRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose batch number equals `code` (trimmed, case-insensitive).
    pub fn find_by_batch(&self, code: &str) -> Option<&MedicineRecord> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.batch_number.trim().eq_ignore_ascii_case(code))
    }

    /// Stable ascending sort by expiry date.
    pub fn sort_by_expiry(&mut self) {
        self.records.sort_by_key(|r| r.expiry_date);
    }
}
