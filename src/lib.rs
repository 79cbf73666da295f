//! Retail sales analytics: derives calendar and outlier features from retail transactions and
//! computes the dashboard's grouped and ranked reports.

pub mod aggregation;
pub mod engine;
pub mod features;
pub mod models;
pub mod report;
pub mod storage;
pub mod types;
