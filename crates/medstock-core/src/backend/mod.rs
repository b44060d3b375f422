//! Persistence backends for the inventory.
//!
//! Every backend hands back the full ordered record list on load; the
//! inventory replaces its store wholesale with that snapshot.

mod json_file;
mod memory;

pub use json_file::*;
pub use memory::*;

use thiserror::Error;

use crate::db::DbError;
use crate::models::MedicineRecord;

/// Backend errors.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Storage collaborator for medicine records.
pub trait InventoryBackend {
    /// Load every record, in display order.
    fn load_all(&self) -> BackendResult<Vec<MedicineRecord>>;

    /// Persist one new record at the tail.
    fn insert_one(&self, record: &MedicineRecord) -> BackendResult<()>;

    /// Delete a record by id. Returns whether a record was deleted.
    fn delete_one(&self, id: &str) -> BackendResult<bool>;

    /// Overwrite the stored list with `records`.
    fn save_all(&self, records: &[MedicineRecord]) -> BackendResult<()>;
}

impl<B: InventoryBackend + ?Sized> InventoryBackend for Box<B> {
    fn load_all(&self) -> BackendResult<Vec<MedicineRecord>> {
        (**self).load_all()
    }

    fn insert_one(&self, record: &MedicineRecord) -> BackendResult<()> {
        (**self).insert_one(record)
    }

    fn delete_one(&self, id: &str) -> BackendResult<bool> {
        (**self).delete_one(id)
    }

    fn save_all(&self, records: &[MedicineRecord]) -> BackendResult<()> {
        (**self).save_all(records)
    }
}
