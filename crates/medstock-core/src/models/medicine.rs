//! Medicine record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format accepted for expiry dates (e.g., "2025-05-10").
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid expiry date: {0}")]
    InvalidDate(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// A single medicine in the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// Medicine name
    pub name: String,
    /// Batch / lot code printed on the package
    pub batch_number: String,
    /// Expiry date (calendar date, no time)
    pub expiry_date: NaiveDate,
    /// Units on hand
    pub quantity: u32,
}

impl MedicineRecord {
    /// Create a record with a fresh id.
    pub fn new(name: String, batch_number: String, expiry_date: NaiveDate, quantity: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            batch_number,
            expiry_date,
            quantity,
        }
    }

    /// Case-insensitive substring match against name or batch number.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_term(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.batch_number.to_lowercase().contains(needle)
    }
}

/// Unvalidated medicine input, as captured by an entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub quantity: String,
}

/// Validated fields of a [`NewMedicine`], ready to become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMedicine {
    pub name: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
}

impl NewMedicine {
    /// Validate and normalize the input fields.
    pub fn validate(&self) -> Result<ValidMedicine, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let batch_number = self.batch_number.trim();
        if batch_number.is_empty() {
            return Err(ValidationError::MissingField("batch_number"));
        }

        let expiry_date = parse_date(&self.expiry_date)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(ValidMedicine {
            name: name.to_string(),
            batch_number: batch_number.to_string(),
            expiry_date,
            quantity,
        })
    }

    /// Validate and assign a fresh id.
    pub fn into_record(self) -> Result<MedicineRecord, ValidationError> {
        let valid = self.validate()?;
        Ok(MedicineRecord::new(
            valid.name,
            valid.batch_number,
            valid.expiry_date,
            valid.quantity,
        ))
    }
}

/// Parse an expiry date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("expiry_date"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parse a non-negative unit count.
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("quantity"));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidQuantity(trimmed.to_string()))
}
