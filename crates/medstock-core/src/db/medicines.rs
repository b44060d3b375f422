//! Medicine database operations.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{map_constraint, Database, DbError, DbResult};
use crate::backend::{BackendResult, InventoryBackend};
use crate::models::{MedicineRecord, DATE_FORMAT};

const SELECT_COLUMNS: &str = "SELECT id, name, batch_number, expiry_date, quantity FROM medicines";

impl Database {
    /// Insert a medicine at the tail of the display order.
    pub fn insert_medicine(&self, record: &MedicineRecord) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO medicines (id, name, batch_number, expiry_date, quantity, position)
                VALUES (?1, ?2, ?3, ?4, ?5,
                        (SELECT COALESCE(MAX(position), 0) + 1 FROM medicines))
                "#,
                params![
                    record.id,
                    record.name,
                    record.batch_number,
                    record.expiry_date.format(DATE_FORMAT).to_string(),
                    record.quantity,
                ],
            )
            .map_err(map_constraint)?;
        Ok(())
    }

    /// Get a medicine by id.
    pub fn get_medicine(&self, id: &str) -> DbResult<Option<MedicineRecord>> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                [id],
                MedicineRow::from_row,
            )
            .optional()?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Find the first medicine (in display order) with a batch number, ignoring case.
    pub fn find_medicine_by_batch(&self, batch_number: &str) -> DbResult<Option<MedicineRecord>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "{} WHERE batch_number = ? COLLATE NOCASE ORDER BY position LIMIT 1",
                    SELECT_COLUMNS
                ),
                [batch_number.trim()],
                MedicineRow::from_row,
            )
            .optional()?;

        row.map(|r| r.try_into()).transpose()
    }

    /// List all medicines in display order.
    pub fn list_medicines(&self) -> DbResult<Vec<MedicineRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY position", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], MedicineRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Count stored medicines.
    pub fn count_medicines(&self) -> DbResult<u32> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM medicines", [], |row| row.get(0))?;
        u32::try_from(count)
            .map_err(|_| DbError::Sqlite(rusqlite::Error::IntegralValueOutOfRange(0, count)))
    }

    /// Delete a medicine by id.
    pub fn delete_medicine(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medicines WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Replace all medicines, keeping the given order.
    pub fn replace_medicines(&self, records: &[MedicineRecord]) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM medicines", [])?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO medicines (id, name, batch_number, expiry_date, quantity, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for (index, record) in records.iter().enumerate() {
                stmt.execute(params![
                    record.id,
                    record.name,
                    record.batch_number,
                    record.expiry_date.format(DATE_FORMAT).to_string(),
                    record.quantity,
                    index as i64 + 1,
                ])
                .map_err(map_constraint)?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl InventoryBackend for Database {
    fn load_all(&self) -> BackendResult<Vec<MedicineRecord>> {
        Ok(self.list_medicines()?)
    }

    fn insert_one(&self, record: &MedicineRecord) -> BackendResult<()> {
        Ok(self.insert_medicine(record)?)
    }

    fn delete_one(&self, id: &str) -> BackendResult<bool> {
        Ok(self.delete_medicine(id)?)
    }

    fn save_all(&self, records: &[MedicineRecord]) -> BackendResult<()> {
        Ok(self.replace_medicines(records)?)
    }
}

/// Intermediate row struct for database mapping.
struct MedicineRow {
    id: String,
    name: String,
    batch_number: String,
    expiry_date: String,
    quantity: i64,
}

impl MedicineRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            batch_number: row.get(2)?,
            expiry_date: row.get(3)?,
            quantity: row.get(4)?,
        })
    }
}

impl TryFrom<MedicineRow> for MedicineRecord {
    type Error = DbError;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        let expiry_date = NaiveDate::parse_from_str(row.expiry_date.trim(), DATE_FORMAT)
            .map_err(|_| DbError::InvalidRecord {
                id: row.id.clone(),
                reason: format!("malformed expiry date '{}'", row.expiry_date),
            })?;
        let quantity = u32::try_from(row.quantity).map_err(|_| DbError::InvalidRecord {
            id: row.id.clone(),
            reason: format!("quantity out of range: {}", row.quantity),
        })?;

        Ok(MedicineRecord {
            id: row.id,
            name: row.name,
            batch_number: row.batch_number,
            expiry_date,
            quantity,
        })
    }
}
