use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::aggregation::{AggregateRow, AnalyticsError};
use crate::models::Field;
use crate::types::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Max,
    Min
}

/// An aggregate row picked within its partition. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub rank: usize,
    pub row: AggregateRow
}

/// Selects the best `n` rows of every partition of `rows`.
///
/// Partitions are the distinct values of `partition_key`, in first-occurrence order. Inside a
/// partition rows are ordered by the `order_by` metric in `direction` (null metrics last), and
/// ties are broken by the full grouping-key tuple in ascending order.
pub fn top_n(rows: &[AggregateRow], partition_key: Field, order_by: &str, n: usize, direction: Direction) -> Result<Vec<RankedRow>, AnalyticsError> {
    let mut seen = HashSet::new();
    let mut partitions = Vec::new();

    for row in rows {
        let value = partition_value(row, partition_key)?;

        if seen.insert(value) {
            partitions.push(value.clone());
        }
    }

    top_n_within(rows, partition_key, &partitions, order_by, n, direction)
}

/// Same as [`top_n`] but only for the requested partition values, in the requested order.
///
/// # Errors
/// Returns `AnalyticsError` if:
/// - A requested partition value occurs in no row (`EmptyPartition`).
/// - A row is not grouped by `partition_key` (`PartitionKeyMismatch`).
/// - A row does not carry the `order_by` metric (`UnknownMetric`).
pub fn top_n_within(rows: &[AggregateRow], partition_key: Field, partitions: &[Value], order_by: &str, n: usize, direction: Direction) -> Result<Vec<RankedRow>, AnalyticsError> {
    let mut members = HashMap::<&Value, Vec<&AggregateRow>>::new();

    for row in rows {
        if row.metric(order_by).is_none() {
            return Err(AnalyticsError::unknown_metric(order_by));
        }

        members.entry(partition_value(row, partition_key)?).or_default().push(row);
    }

    let mut ranked = Vec::new();

    for partition in partitions {
        let mut candidates = members.get(partition).cloned().ok_or_else(|| AnalyticsError::EmptyPartition {
            field: partition_key,
            value: partition.clone()
        })?;

        candidates.sort_by(|left, right| compare(left, right, order_by, direction));

        ranked.extend(candidates.into_iter()
            .take(n)
            .enumerate()
            .map(|(index, row)| RankedRow { rank: index + 1, row: row.clone() }));
    }

    Ok(ranked)
}

fn partition_value(row: &AggregateRow, partition_key: Field) -> Result<&Value, AnalyticsError> {
    row.key_value(partition_key)
        .ok_or(AnalyticsError::PartitionKeyMismatch { field: partition_key })
}

fn compare(left: &AggregateRow, right: &AggregateRow, order_by: &str, direction: Direction) -> Ordering {
    let left_metric = left.metric(order_by).unwrap_or(&Value::Null);
    let right_metric = right.metric(order_by).unwrap_or(&Value::Null);

    let by_metric = match (left_metric.is_null(), right_metric.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            Direction::Max => right_metric.cmp(left_metric),
            Direction::Min => left_metric.cmp(right_metric)
        }
    };

    by_metric.then_with(|| left.key_values().cmp(right.key_values()))
}
