mod aggregator;
mod errors;
mod top_n;

pub use aggregator::{aggregate, AggregateRow, Metric, MetricOp};
pub use errors::AnalyticsError;
pub use top_n::{top_n, top_n_within, Direction, RankedRow};
