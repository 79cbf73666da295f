use crate::aggregation::{Direction, Metric};
use crate::models::Field;

/// Which enriched rows a report reads.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RowFilter {
    All,
    ExcludeOutliers,
    OutliersOnly
}

/// Post-aggregation filter over groups.
#[derive(Debug, Clone, PartialEq)]
pub enum Having {
    /// Keeps groups whose metric is strictly greater than the mean of that metric across all groups.
    AboveAverage {
        metric: String
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub partition_key: Field,
    pub order_by: String,
    pub n: usize,
    pub direction: Direction
}

/// The parameters of one named report: filter, grouping, metrics, and optional ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDefinition {
    pub name: String,
    pub group_keys: Vec<Field>,
    pub metrics: Vec<Metric>,
    pub filter: RowFilter,
    pub having: Option<Having>,
    pub ranking: Option<Ranking>
}

impl ReportDefinition {
    pub fn new(name: &str, group_keys: &[Field]) -> Self {
        Self {
            name: name.to_string(),
            group_keys: group_keys.to_vec(),
            metrics: Vec::new(),
            filter: RowFilter::All,
            having: None,
            ranking: None
        }
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn filtered(mut self, filter: RowFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn having_above_average(mut self, metric: &str) -> Self {
        self.having = Some(Having::AboveAverage { metric: metric.to_string() });
        self
    }

    pub fn ranked(mut self, partition_key: Field, order_by: &str, n: usize, direction: Direction) -> Self {
        self.ranking = Some(Ranking {
            partition_key,
            order_by: order_by.to_string(),
            n,
            direction
        });
        self
    }
}
