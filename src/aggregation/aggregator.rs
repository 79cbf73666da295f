use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use crate::aggregation::AnalyticsError;
use crate::models::{EnrichedTransaction, Field};
use crate::types::{round_half_up, Value, METRIC_DECIMAL_PLACES};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MetricOp {
    /// Sum of non-null values.
    Sum,
    /// Rows when no field is given, otherwise non-null values of the field.
    Count,
    /// Distinct non-null values of the field.
    CountDistinct,
    /// Mean of non-null values, rounded half-up to two places.
    Avg,
    /// The group's sum as a percentage of the sum over every input row.
    Share
}

impl MetricOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricOp::Sum => "sum",
            MetricOp::Count => "count",
            MetricOp::CountDistinct => "count_distinct",
            MetricOp::Avg => "avg",
            MetricOp::Share => "share"
        }
    }
}

impl Display for MetricOp {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One computed column of an aggregate: an op over an optional field, published under `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub op: MetricOp,
    pub field: Option<Field>,
    pub name: String
}

impl Metric {
    pub fn new(op: MetricOp, field: Option<Field>) -> Self {
        let name = match field {
            Some(field) => format!("{op}_{field}"),
            None => op.to_string()
        };

        Self { op, field, name }
    }

    /// Counts rows.
    pub fn count() -> Self {
        Self::new(MetricOp::Count, None)
    }

    pub fn of(op: MetricOp, field: Field) -> Self {
        Self::new(op, Some(field))
    }

    /// One metric per op over the same field.
    pub fn over(field: Field, ops: &[MetricOp]) -> Vec<Self> {
        ops.iter().map(|op| Self::of(*op, field)).collect()
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    fn validate(&self) -> Result<(), AnalyticsError> {
        let supported = match (self.op, self.field) {
            (MetricOp::Count, _) => true,
            (MetricOp::CountDistinct, field) => field.is_some(),
            (MetricOp::Sum | MetricOp::Avg | MetricOp::Share, Some(field)) => field.is_numeric(),
            (MetricOp::Sum | MetricOp::Avg | MetricOp::Share, None) => false
        };

        if supported {
            Ok(())
        } else {
            Err(AnalyticsError::unsupported_metric(self.op, self.field))
        }
    }
}

/// One group of an aggregate: its grouping-key values and its computed metrics, both in definition order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: Vec<(Field, Value)>,
    pub metrics: Vec<(String, Value)>
}

impl AggregateRow {
    pub fn key_value(&self, field: Field) -> Option<&Value> {
        self.key.iter()
            .find(|(key_field, _)| *key_field == field)
            .map(|(_, value)| value)
    }

    pub fn metric(&self, name: &str) -> Option<&Value> {
        self.metrics.iter()
            .find(|(metric_name, _)| metric_name == name)
            .map(|(_, value)| value)
    }

    pub fn key_values(&self) -> impl Iterator<Item = &Value> {
        self.key.iter().map(|(_, value)| value)
    }
}

enum Accumulator {
    Sum { total: Decimal, seen: bool },
    Count(u64),
    Distinct(HashSet<Value>),
    Avg { total: Decimal, count: u64 },
    Share { total: Decimal, grand_total: Decimal }
}

impl Accumulator {
    fn new(metric: &Metric, grand_total: Decimal) -> Self {
        match metric.op {
            MetricOp::Sum => Accumulator::Sum { total: Decimal::ZERO, seen: false },
            MetricOp::Count => Accumulator::Count(0),
            MetricOp::CountDistinct => Accumulator::Distinct(HashSet::new()),
            MetricOp::Avg => Accumulator::Avg { total: Decimal::ZERO, count: 0 },
            MetricOp::Share => Accumulator::Share { total: Decimal::ZERO, grand_total }
        }
    }

    /// Returns `false` when a running total no longer fits in a `Decimal`.
    fn add(&mut self, value: Option<Value>) -> bool {
        match self {
            Accumulator::Count(count) => {
                if value.is_none_or(|value| !value.is_null()) {
                    *count += 1;
                }
            }
            Accumulator::Distinct(seen) => {
                if let Some(value) = value.filter(|value| !value.is_null()) {
                    seen.insert(value);
                }
            }
            Accumulator::Sum { total, seen } => {
                if let Some(amount) = value.and_then(|value| value.as_decimal()) {
                    let Some(sum) = total.checked_add(amount) else {
                        return false;
                    };
                    *total = sum;
                    *seen = true;
                }
            }
            Accumulator::Avg { total, count } => {
                if let Some(amount) = value.and_then(|value| value.as_decimal()) {
                    let Some(sum) = total.checked_add(amount) else {
                        return false;
                    };
                    *total = sum;
                    *count += 1;
                }
            }
            Accumulator::Share { total, .. } => {
                if let Some(amount) = value.and_then(|value| value.as_decimal()) {
                    let Some(sum) = total.checked_add(amount) else {
                        return false;
                    };
                    *total = sum;
                }
            }
        }

        true
    }

    /// Returns `None` when the final division or scaling overflows.
    fn finish(self) -> Option<Value> {
        let value = match self {
            Accumulator::Sum { total, seen } => if seen { Value::Decimal(total) } else { Value::Null },
            Accumulator::Count(count) => Value::Integer(count as i64),
            Accumulator::Distinct(seen) => Value::Integer(seen.len() as i64),
            Accumulator::Avg { total, count } => {
                if count == 0 {
                    Value::Null
                } else {
                    Value::Decimal(round_half_up(total.checked_div(Decimal::from(count))?, METRIC_DECIMAL_PLACES))
                }
            }
            Accumulator::Share { total, grand_total } => {
                if grand_total.is_zero() {
                    Value::Null
                } else {
                    //NOTE: total * 100 can overflow where total / grand_total cannot
                    let share = total.checked_div(grand_total)?.checked_mul(Decimal::ONE_HUNDRED)?;
                    Value::Decimal(round_half_up(share, METRIC_DECIMAL_PLACES))
                }
            }
        };

        Some(value)
    }
}

/// Groups `rows` by `group_keys` and computes `metrics` for each group.
///
/// Returns one row per distinct key tuple, ordered by the first occurrence of that tuple in
/// `rows`. Null key values form their own group. Empty input gives an empty result.
///
/// # Errors
/// Returns `AnalyticsError::UnsupportedMetric` before reading any row if a metric cannot be
/// computed over its field (e.g. summing a text column), and `AnalyticsError::Overflow` if a
/// total grows past what a `Decimal` can hold.
pub fn aggregate(rows: &[EnrichedTransaction], group_keys: &[Field], metrics: &[Metric]) -> Result<Vec<AggregateRow>, AnalyticsError> {
    for metric in metrics {
        metric.validate()?;
    }

    let grand_totals = metrics.iter()
        .map(|metric| match (metric.op, metric.field) {
            (MetricOp::Share, Some(field)) => rows.iter()
                .filter_map(|row| row.value(field).as_decimal())
                .try_fold(Decimal::ZERO, Decimal::checked_add)
                .ok_or_else(|| AnalyticsError::overflow(&metric.name)),
            _ => Ok(Decimal::ZERO)
        })
        .collect::<Result<Vec<Decimal>, AnalyticsError>>()?;

    let mut positions = HashMap::<Vec<Value>, usize>::new();
    let mut groups: Vec<(Vec<Value>, Vec<Accumulator>)> = Vec::new();

    for row in rows {
        let key: Vec<Value> = group_keys.iter().map(|field| row.value(*field)).collect();

        let position = match positions.get(&key) {
            Some(position) => *position,
            None => {
                let accumulators = metrics.iter()
                    .zip(&grand_totals)
                    .map(|(metric, grand_total)| Accumulator::new(metric, *grand_total))
                    .collect();

                groups.push((key.clone(), accumulators));
                positions.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        for (accumulator, metric) in groups[position].1.iter_mut().zip(metrics) {
            if !accumulator.add(metric.field.map(|field| row.value(field))) {
                return Err(AnalyticsError::overflow(&metric.name));
            }
        }
    }

    groups.into_iter()
        .map(|(key, accumulators)| {
            let metrics = metrics.iter()
                .zip(accumulators)
                .map(|(metric, accumulator)| accumulator.finish()
                    .map(|value| (metric.name.clone(), value))
                    .ok_or_else(|| AnalyticsError::overflow(&metric.name)))
                .collect::<Result<Vec<_>, AnalyticsError>>()?;

            Ok(AggregateRow {
                key: group_keys.iter().copied().zip(key).collect(),
                metrics
            })
        })
        .collect()
}
