mod loader;
mod report_engine;

pub use loader::{read_transactions, LoadedTransactions};
pub use report_engine::ReportEngine;
