//! Summary counters.

use crate::models::{MedicineRecord, Status, Summary};

use super::{is_low_stock, Classifier};

/// Count totals over a record set.
///
/// `low_stock` is a plain quantity predicate and also counts records whose
/// primary status is expired or expiring soon.
pub fn aggregate<'a, I>(records: I, classifier: &Classifier) -> Summary
where
    I: IntoIterator<Item = &'a MedicineRecord>,
{
    let mut summary = Summary::default();

    for record in records {
        summary.total += 1;
        match classifier.classify(record) {
            Status::Expired => summary.expired += 1,
            Status::ExpiringSoon { .. } => summary.expiring_soon += 1,
            Status::LowStock | Status::Good => {}
        }
        if is_low_stock(record.quantity) {
            summary.low_stock += 1;
        }
    }

    summary
}
