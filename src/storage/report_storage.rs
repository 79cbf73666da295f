use crate::aggregation::AnalyticsError;
use crate::report::Report;
use crate::storage::{ReportOutcome, Storage};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Concurrent sink for report outcomes written by parallel workers.
pub struct ReportStorage {
    outcomes: DashMap<String, ReportOutcome>
}

impl ReportStorage {
    pub fn new() -> Self {
        Self {
            outcomes: DashMap::new()
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Collects every stored outcome into an ordered [`Report`].
    pub fn to_report(&self, row_count: usize, skipped_records: usize) -> Report {
        let mut report = Report::new(row_count, skipped_records);

        for item in self.outcomes.iter() {
            report.insert(item.key(), item.value().clone());
        }

        report
    }
}

impl Default for ReportStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for ReportStorage {
    fn load(&self, name: &str) -> Option<ReportOutcome> {
        self.outcomes.get(name).map(|item| item.value().clone())
    }

    fn save(&self, name: &str, outcome: ReportOutcome) {
        match self.outcomes.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() = Err(AnalyticsError::duplicate_report(name));
            }
            Entry::Vacant(entry) => {
                entry.insert(outcome);
            }
        }
    }
}
