//! Text and status filtering over a record set.

use crate::models::{MedicineRecord, StatusFilter};

use super::Classifier;

/// Filter records by search term and status, preserving input order.
///
/// The term is matched as typed (no trimming), case-insensitively, against
/// name or batch number; an empty term matches every record.
pub fn query<'a>(
    records: &'a [MedicineRecord],
    search_term: &str,
    status_filter: StatusFilter,
    classifier: &Classifier,
) -> Vec<&'a MedicineRecord> {
    let needle = search_term.to_lowercase();

    records
        .iter()
        .filter(|record| record.matches_term(&needle))
        .filter(|record| match status_filter {
            StatusFilter::All => true,
            filter => filter.accepts(classifier.classify(record).category()),
        })
        .collect()
}
