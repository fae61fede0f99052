//! Case-insensitive title filtering and result limiting.
//!
//! Matching always runs over the whole batch before the limit is applied,
//! so `total_matching` never depends on the limit.

use crate::domain::HeadlineRecord;

/// Outcome of one filter+limit pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// First `limit` matches, in feed order
    pub records: Vec<HeadlineRecord>,
    /// Matches across the entire batch
    pub total_matching: usize,
}

/// Lowercased title filter. Only the empty filter matches every record;
/// surrounding whitespace is part of the substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    needle: String,
}

impl TitleFilter {
    pub fn new(filter: &str) -> Self {
        Self {
            needle: filter.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &HeadlineRecord) -> bool {
        self.is_empty() || record.title().to_lowercase().contains(&self.needle)
    }
}

/// Select the first `limit` records whose title contains `filter`,
/// ignoring case, and count every match in `batch`.
pub fn select(batch: &[HeadlineRecord], filter: &str, limit: usize) -> Selection {
    let filter = TitleFilter::new(filter);

    let mut records = Vec::with_capacity(limit.min(batch.len()));
    let mut total_matching = 0;

    for record in batch.iter().filter(|r| filter.matches(r)) {
        if records.len() < limit {
            records.push(record.clone());
        }
        total_matching += 1;
    }

    Selection {
        records,
        total_matching,
    }
}
