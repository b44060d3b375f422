//! Batch code lookup for the scan flow.
//!
//! Exact matches come from [`RecordStore::find_by_batch`](super::RecordStore::find_by_batch).
//! When a scanned or typed code has no exact match, near misses are
//! ranked by Jaro-Winkler similarity of the batch number.

use strsim::jaro_winkler;

use crate::models::MedicineRecord;

/// Minimum similarity for a batch number to be suggested.
pub const MIN_SUGGESTION_SCORE: f64 = 0.75;

/// A batch number close to the requested code.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSuggestion<'a> {
    pub record: &'a MedicineRecord,
    pub score: f64,
}

/// Rank records whose batch number resembles `code`, best first.
pub fn suggest_batches<'a>(
    records: &'a [MedicineRecord],
    code: &str,
    limit: usize,
) -> Vec<BatchSuggestion<'a>> {
    let code = code.trim().to_uppercase();
    if code.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut suggestions: Vec<BatchSuggestion<'a>> = records
        .iter()
        .map(|record| BatchSuggestion {
            record,
            score: jaro_winkler(&code, &record.batch_number.trim().to_uppercase()),
        })
        .filter(|s| s.score >= MIN_SUGGESTION_SCORE)
        .collect();

    suggestions.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggestions.truncate(limit);
    suggestions
}
