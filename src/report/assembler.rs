use std::borrow::Cow;

use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::aggregation::{aggregate, top_n, AggregateRow, AnalyticsError};
use crate::features::derive_all;
use crate::models::{EnrichedTransaction, Transaction};
use crate::report::{default_reports, Having, Report, ReportDefinition, ReportTable, RowFilter};

/// Builds every report of the default catalogue.
pub fn build_report(transactions: &[Transaction]) -> Report {
    build_report_with(transactions, &default_reports())
}

/// Derives the enriched rows once, then computes each definition independently.
///
/// A failing definition is recorded in `Report::errors` and does not affect the others.
pub fn build_report_with(transactions: &[Transaction], definitions: &[ReportDefinition]) -> Report {
    let rows = derive_all(transactions);
    let mut report = Report::new(rows.len(), 0);

    for definition in definitions {
        report.insert(&definition.name, compute_report(&rows, definition));
    }

    report
}

/// Runs one definition and logs its failure, so that the caller can record the outcome and move on.
pub fn compute_report(rows: &[EnrichedTransaction], definition: &ReportDefinition) -> Result<ReportTable, AnalyticsError> {
    let outcome = run_definition(rows, definition);

    if let Err(error) = &outcome {
        error!("Report [{}] failed: {error}", definition.name);
    }

    outcome
}

/// Computes a single report: filter rows, aggregate, apply the having clause, then rank.
pub fn run_definition(rows: &[EnrichedTransaction], definition: &ReportDefinition) -> Result<ReportTable, AnalyticsError> {
    let selected: Cow<'_, [EnrichedTransaction]> = match definition.filter {
        RowFilter::All => Cow::Borrowed(rows),
        RowFilter::ExcludeOutliers => Cow::Owned(rows.iter().filter(|row| !row.is_outlier).cloned().collect()),
        RowFilter::OutliersOnly => Cow::Owned(rows.iter().filter(|row| row.is_outlier).cloned().collect())
    };

    let mut aggregates = aggregate(&selected, &definition.group_keys, &definition.metrics)?;

    if let Some(having) = &definition.having {
        aggregates = apply_having(aggregates, having)?;
    }

    let table = match &definition.ranking {
        Some(ranking) => ReportTable::Ranked(top_n(
            &aggregates,
            ranking.partition_key,
            &ranking.order_by,
            ranking.n,
            ranking.direction
        )?),
        None => ReportTable::Aggregates(aggregates)
    };

    debug!("Report [{}] computed [{}] rows from [{}] transactions", definition.name, table.len(), selected.len());

    Ok(table)
}

fn apply_having(aggregates: Vec<AggregateRow>, having: &Having) -> Result<Vec<AggregateRow>, AnalyticsError> {
    match having {
        Having::AboveAverage { metric } => {
            let mut values = Vec::with_capacity(aggregates.len());

            for row in &aggregates {
                let value = row.metric(metric).ok_or_else(|| AnalyticsError::unknown_metric(metric))?;

                if let Some(value) = value.as_decimal() {
                    values.push(value);
                }
            }

            if values.is_empty() {
                return Ok(Vec::new());
            }

            let mean = values.iter()
                .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value))
                .and_then(|total| total.checked_div(Decimal::from(values.len())))
                .ok_or_else(|| AnalyticsError::overflow(metric))?;

            Ok(aggregates.into_iter()
                .filter(|row| row.metric(metric)
                    .and_then(|value| value.as_decimal())
                    .is_some_and(|value| value > mean))
                .collect())
        }
    }
}
