use crate::aggregation::MetricOp;
use crate::models::Field;
use crate::types::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Metric [{op}] is not supported over [{target}]")]
    UnsupportedMetric {
        op: MetricOp,
        target: String
    },
    #[error("Partition [{field}={value}] does not occur in the input")]
    EmptyPartition {
        field: Field,
        value: Value
    },
    #[error("Rows are not grouped by partition key [{field}]")]
    PartitionKeyMismatch {
        field: Field
    },
    #[error("Metric [{name}] is not computed by the aggregate")]
    UnknownMetric {
        name: String
    },
    #[error("Report [{name}] is defined more than once")]
    DuplicateReport {
        name: String
    },
    #[error("Metric [{metric}] overflowed while accumulating")]
    Overflow {
        metric: String
    }
}

impl AnalyticsError {
    pub fn unsupported_metric(op: MetricOp, field: Option<Field>) -> Self {
        Self::UnsupportedMetric {
            op,
            target: field.map(|field| field.name().to_string()).unwrap_or_else(|| "rows".to_string())
        }
    }

    pub fn unknown_metric(name: &str) -> Self {
        Self::UnknownMetric { name: name.to_string() }
    }

    pub fn duplicate_report(name: &str) -> Self {
        Self::DuplicateReport { name: name.to_string() }
    }

    pub fn overflow(metric: &str) -> Self {
        Self::Overflow { metric: metric.to_string() }
    }
}
