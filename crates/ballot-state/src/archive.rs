//! History archive - tally records of past cycles

use ballot_core::TallyRecord;

/// Append-only list of tally records, oldest first
#[derive(Debug, Default, Clone)]
pub struct HistoryArchive {
    records: Vec<TallyRecord>,
}

impl HistoryArchive {
    pub fn new() -> Self {
        HistoryArchive::default()
    }

    pub(crate) fn record(&mut self, entry: TallyRecord) {
        self.records.push(entry);
    }

    pub fn records(&self) -> &[TallyRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&TallyRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
