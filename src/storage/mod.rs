mod report_storage;
#[cfg(test)]
mod tests;

use crate::aggregation::AnalyticsError;
use crate::report::ReportTable;

pub use report_storage::ReportStorage;

pub type ReportOutcome = Result<ReportTable, AnalyticsError>;

pub trait Storage: Send + Sync + 'static {
    fn load(&self, name: &str) -> Option<ReportOutcome>;
    fn save(&self, name: &str, outcome: ReportOutcome);
}
