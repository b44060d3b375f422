//! Expiry and stock status classification.
//!
//! Decision order (first match wins):
//! 1. Expiry date in the past: Expired
//! 2. Expiry within `threshold_days` (inclusive): ExpiringSoon
//! 3. Quantity at or below [`LOW_STOCK_LIMIT`]: LowStock
//! 4. Otherwise: Good

use chrono::NaiveDate;

use crate::models::{MedicineRecord, Status, DATE_FORMAT};

/// Default number of days before expiry at which a record is flagged.
pub const DEFAULT_THRESHOLD_DAYS: i64 = 30;

/// Quantity at or below which a record counts as low stock.
pub const LOW_STOCK_LIMIT: u32 = 10;

/// Whole calendar days from `today` until `expiry_date` (negative once expired).
pub fn days_until(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
    (expiry_date - today).num_days()
}

/// Whether a quantity counts as low stock.
pub fn is_low_stock(quantity: u32) -> bool {
    quantity <= LOW_STOCK_LIMIT
}

/// Classify a record's expiry date and quantity.
pub fn classify(expiry_date: NaiveDate, quantity: u32, threshold_days: i64, today: NaiveDate) -> Status {
    classify_days(Some(days_until(expiry_date, today)), quantity, threshold_days)
}

/// Classify a record whose expiry date is still raw text.
///
/// An unparseable date gives no day difference, so neither expiry branch
/// can match and the result depends on quantity alone.
pub fn classify_raw(expiry_date: &str, quantity: u32, threshold_days: i64, today: NaiveDate) -> Status {
    let diff = NaiveDate::parse_from_str(expiry_date.trim(), DATE_FORMAT)
        .ok()
        .map(|date| days_until(date, today));
    classify_days(diff, quantity, threshold_days)
}

fn classify_days(diff_days: Option<i64>, quantity: u32, threshold_days: i64) -> Status {
    if let Some(diff) = diff_days {
        if diff < 0 {
            return Status::Expired;
        }
        if diff <= threshold_days {
            return Status::ExpiringSoon { days_left: diff };
        }
    }
    if is_low_stock(quantity) {
        return Status::LowStock;
    }
    Status::Good
}

/// Classification policy pinned to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    pub threshold_days: i64,
    pub today: NaiveDate,
}

impl Classifier {
    /// Create a classifier for a given reference date.
    pub fn new(threshold_days: i64, today: NaiveDate) -> Self {
        Self { threshold_days, today }
    }

    /// Create a classifier for the local calendar date.
    pub fn current(threshold_days: i64) -> Self {
        Self::new(threshold_days, chrono::Local::now().date_naive())
    }

    /// Classify a single record.
    pub fn classify(&self, record: &MedicineRecord) -> Status {
        classify(record.expiry_date, record.quantity, self.threshold_days, self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusCategory;
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn in_days(days: i64) -> NaiveDate {
        today() + Duration::days(days)
    }

    #[test]
    fn test_expired_precedes_low_stock() {
        let status = classify(in_days(-1), 0, 30, today());
        assert_eq!(status, Status::Expired);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(
            classify(in_days(30), 20, 30, today()),
            Status::ExpiringSoon { days_left: 30 }
        );
        assert_eq!(classify(in_days(31), 20, 30, today()), Status::Good);
    }

    #[test]
    fn test_expires_today_is_expiring_soon() {
        assert_eq!(
            classify(today(), 50, 30, today()),
            Status::ExpiringSoon { days_left: 0 }
        );
    }

    #[test]
    fn test_low_stock_limit_is_inclusive() {
        assert_eq!(classify(in_days(90), 10, 30, today()), Status::LowStock);
        assert_eq!(classify(in_days(90), 11, 30, today()), Status::Good);
    }

    #[test]
    fn test_threshold_is_configurable() {
        assert_eq!(classify(in_days(45), 20, 30, today()), Status::Good);
        assert_eq!(
            classify(in_days(45), 20, 60, today()),
            Status::ExpiringSoon { days_left: 45 }
        );
        assert_eq!(classify(in_days(1), 20, 0, today()), Status::Good);
    }

    #[test]
    fn test_raw_date_falls_through_to_quantity() {
        assert_eq!(classify_raw("not-a-date", 3, 30, today()), Status::LowStock);
        assert_eq!(classify_raw("2024-13-40", 50, 30, today()), Status::Good);
        assert_eq!(classify_raw("2024-06-14", 50, 30, today()), Status::Expired);
    }

    #[test]
    fn test_classifier_uses_record_fields() {
        let classifier = Classifier::new(30, today());
        let record = MedicineRecord::new("Amoxicillin".into(), "AMX456".into(), in_days(10), 5);
        assert_eq!(classifier.classify(&record).category(), StatusCategory::ExpiringSoon);
    }

    proptest! {
        #[test]
        fn prop_past_dates_always_expired(days_ago in 1i64..5000, qty in 0u32..10_000, threshold in 0i64..365) {
            let status = classify(in_days(-days_ago), qty, threshold, today());
            prop_assert_eq!(status, Status::Expired);
        }

        #[test]
        fn prop_within_threshold_is_expiring(offset in 0i64..365, extra in 0i64..365, qty in 0u32..10_000) {
            let threshold = offset + extra;
            let status = classify(in_days(offset), qty, threshold, today());
            prop_assert_eq!(status, Status::ExpiringSoon { days_left: offset });
        }

        #[test]
        fn prop_beyond_threshold_depends_on_quantity(threshold in 0i64..365, beyond in 1i64..1000, qty in 0u32..10_000) {
            let status = classify(in_days(threshold + beyond), qty, threshold, today());
            if qty <= LOW_STOCK_LIMIT {
                prop_assert_eq!(status, Status::LowStock);
            } else {
                prop_assert_eq!(status, Status::Good);
            }
        }
    }
}
