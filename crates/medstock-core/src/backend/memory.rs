//! In-memory backend used for demos and tests.

use std::sync::Mutex;

use chrono::NaiveDate;

use super::{BackendError, BackendResult, InventoryBackend};
use crate::models::MedicineRecord;

/// Backend that keeps records in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<MedicineRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with the given records.
    pub fn with_records(records: Vec<MedicineRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Backend seeded with the sample inventory.
    pub fn demo() -> Self {
        Self::with_records(demo_records())
    }

    fn lock(&self) -> BackendResult<std::sync::MutexGuard<'_, Vec<MedicineRecord>>> {
        self.records
            .lock()
            .map_err(|e| BackendError::Unavailable(format!("Lock poisoned: {}", e)))
    }
}

impl InventoryBackend for MemoryBackend {
    fn load_all(&self) -> BackendResult<Vec<MedicineRecord>> {
        Ok(self.lock()?.clone())
    }

    fn insert_one(&self, record: &MedicineRecord) -> BackendResult<()> {
        self.lock()?.push(record.clone());
        Ok(())
    }

    fn delete_one(&self, id: &str) -> BackendResult<bool> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    fn save_all(&self, records: &[MedicineRecord]) -> BackendResult<()> {
        *self.lock()? = records.to_vec();
        Ok(())
    }
}

/// Sample inventory shown before any real data exists.
pub fn demo_records() -> Vec<MedicineRecord> {
    let sample = [
        ("1", "Paracetamol", "BATCH123", (2025, 5, 10), 20),
        ("2", "Amoxicillin", "AMX456", (2024, 12, 1), 5),
        ("3", "Cetirizine", "CTZ789", (2023, 12, 10), 0),
    ];

    sample
        .into_iter()
        .filter_map(|(id, name, batch, (y, m, d), quantity)| {
            Some(MedicineRecord {
                id: id.to_string(),
                name: name.to_string(),
                batch_number: batch.to_string(),
                expiry_date: NaiveDate::from_ymd_opt(y, m, d)?,
                quantity,
            })
        })
        .collect()
}
