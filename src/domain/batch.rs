use std::ops::Deref;

use crate::domain::HeadlineRecord;

/// Headline records from one fetch+parse cycle, in feed document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchBatch {
    records: Vec<HeadlineRecord>,
}

impl FetchBatch {
    pub fn new(records: Vec<HeadlineRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HeadlineRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<HeadlineRecord> {
        self.records
    }
}

impl Deref for FetchBatch {
    type Target = [HeadlineRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl FromIterator<HeadlineRecord> for FetchBatch {
    fn from_iter<I: IntoIterator<Item = HeadlineRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
