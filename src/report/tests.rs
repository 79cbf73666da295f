use super::{build_report, build_report_with, default_reports, ReportDefinition, ReportTable, RowFilter};

use anyhow::{anyhow, Result};

use crate::aggregation::{AnalyticsError, Direction, Metric, MetricOp};
use crate::models::fixtures::{decimal, sale, timestamp, transaction};
use crate::models::{Field, Gender, PaymentMethod, Transaction};
use crate::types::Value;

fn create_dataset() -> Vec<Transaction> {
    let mut transactions = vec![
        Transaction {
            timestamp: timestamp("2019-01-05 09:15:00"),
            gender: Gender::Male,
            payment: PaymentMethod::Cash,
            ..sale("101", "A", "Electronic accessories", "250")
        },
        Transaction {
            timestamp: timestamp("2019-01-06 12:00:00"),
            ..sale("102", "A", "Electronic accessories", "250")
        },
        Transaction {
            timestamp: timestamp("2019-02-14 15:30:00"),
            rating: Some(decimal("4.2")),
            ..sale("103", "A", "Food and beverages", "500")
        },
        Transaction {
            city: "Mandalay".to_string(),
            timestamp: timestamp("2019-02-20 19:45:00"),
            payment: PaymentMethod::CreditCard,
            ..sale("104", "B", "Sports and travel", "80")
        },
        Transaction {
            city: "Mandalay".to_string(),
            timestamp: timestamp("2019-03-02 10:05:00"),
            gender: Gender::Male,
            rating: None,
            ..sale("105", "B", "Food and beverages", "120")
        }
    ];

    transactions.extend((0..15).map(|index| Transaction {
        city: "Naypyitaw".to_string(),
        quantity: 2,
        ..sale(&format!("2{index:02}"), "C", "Home and lifestyle", "21")
    }));

    transactions
}

fn ranked_values(table: Option<&ReportTable>, field: Field) -> Result<Vec<String>> {
    match table {
        Some(ReportTable::Ranked(rows)) => Ok(rows.iter()
            .filter_map(|ranked| ranked.row.key_value(field))
            .map(|value| value.to_string())
            .collect()),
        other => Err(anyhow!("expected a ranked table, found {other:?}"))
    }
}

#[test]
fn test_default_catalogue_builds_every_report_without_errors() {
    let report = build_report(&create_dataset());

    assert!(report.errors.is_empty(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.tables.len(), default_reports().len());
    assert_eq!(report.row_count, 20);
    assert_eq!(report.skipped_records, 0);
}

#[test]
fn test_build_report_is_idempotent_down_to_the_bytes() -> Result<()> {
    let transactions = create_dataset();

    let first = build_report(&transactions);
    let second = build_report(&transactions);

    let mut first_bytes = Vec::new();
    let mut second_bytes = Vec::new();
    first.write_csv(&mut first_bytes)?;
    second.write_csv(&mut second_bytes)?;

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);

    Ok(())
}

#[test]
fn test_top_product_line_per_branch_breaks_revenue_ties_by_name() -> Result<()> {
    let report = build_report(&create_dataset());
    let table = report.table("top_product_line_per_branch");

    assert_eq!(ranked_values(table, Field::Branch)?, vec!["A", "B", "C"]);
    assert_eq!(ranked_values(table, Field::ProductLine)?, vec!["Electronic accessories", "Food and beverages", "Home and lifestyle"]);

    Ok(())
}

#[test]
fn test_monthly_revenue_counts_distinct_invoices() -> Result<()> {
    let report = build_report(&create_dataset());

    let Some(ReportTable::Aggregates(rows)) = report.table("monthly_revenue") else {
        return Err(anyhow!("monthly_revenue missing"));
    };

    let january = rows.iter()
        .find(|row| row.key_value(Field::SalesMonth) == Some(&Value::Integer(1)))
        .ok_or_else(|| anyhow!("january missing"))?;

    assert_eq!(january.metric("revenue"), Some(&Value::from(decimal("815"))));
    assert_eq!(january.metric("total_transactions"), Some(&Value::Integer(17)));

    Ok(())
}

#[test]
fn test_failing_definition_does_not_block_the_others() {
    let definitions = vec![
        ReportDefinition::new("revenue_by_branch", &[Field::Branch])
            .metric(Metric::of(MetricOp::Sum, Field::Total)),
        ReportDefinition::new("summed_cities", &[Field::Branch])
            .metric(Metric::of(MetricOp::Sum, Field::City)),
        ReportDefinition::new("mismatched_partition", &[Field::Branch])
            .metric(Metric::count())
            .ranked(Field::City, "count", 1, Direction::Max)
    ];

    let report = build_report_with(&create_dataset(), &definitions);

    assert!(report.table("revenue_by_branch").is_some());
    assert!(matches!(report.errors.get("summed_cities"), Some(AnalyticsError::UnsupportedMetric { .. })));
    assert!(matches!(report.errors.get("mismatched_partition"), Some(AnalyticsError::PartitionKeyMismatch { .. })));
}

#[test]
fn test_duplicate_report_names_are_reported() {
    let definitions = vec![
        ReportDefinition::new("revenue", &[Field::Branch]).metric(Metric::count()),
        ReportDefinition::new("revenue", &[Field::City]).metric(Metric::count())
    ];

    let report = build_report_with(&create_dataset(), &definitions);

    assert!(report.tables.is_empty());
    assert!(matches!(report.errors.get("revenue"), Some(AnalyticsError::DuplicateReport { .. })));
}

#[test]
fn test_having_keeps_groups_above_the_average() -> Result<()> {
    let transactions = vec![
        Transaction { quantity: 10, ..sale("1", "A", "Electronics", "1") },
        Transaction { quantity: 2, ..sale("2", "A", "Food", "1") },
        Transaction { quantity: 3, ..sale("3", "A", "Sports", "1") }
    ];

    let definitions = vec![
        ReportDefinition::new("busy_lines", &[Field::ProductLine])
            .metric(Metric::of(MetricOp::Sum, Field::Quantity).named("units"))
            .having_above_average("units")
    ];

    let report = build_report_with(&transactions, &definitions);

    let Some(ReportTable::Aggregates(rows)) = report.table("busy_lines") else {
        return Err(anyhow!("busy_lines missing"));
    };

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key_value(Field::ProductLine), Some(&Value::from("Electronics")));

    Ok(())
}

#[test]
fn test_outlier_filters_select_rows_before_aggregating() -> Result<()> {
    let mut transactions: Vec<Transaction> = (0..20).map(|index| transaction(&index.to_string())).collect();
    transactions.push(Transaction { unit_price: decimal("1000"), total: decimal("5250"), ..transaction("extreme") });

    let definitions = vec![
        ReportDefinition::new("without", &[Field::Branch])
            .metric(Metric::count())
            .filtered(RowFilter::ExcludeOutliers),
        ReportDefinition::new("only", &[Field::Branch])
            .metric(Metric::count())
            .filtered(RowFilter::OutliersOnly),
        ReportDefinition::new("all", &[Field::Branch])
            .metric(Metric::count())
    ];

    let report = build_report_with(&transactions, &definitions);

    let count = |name: &str| -> Option<Value> {
        match report.table(name) {
            Some(ReportTable::Aggregates(rows)) => rows.first().and_then(|row| row.metric("count")).cloned(),
            _ => None
        }
    };

    assert_eq!(count("without"), Some(Value::Integer(20)));
    assert_eq!(count("only"), Some(Value::Integer(1)));
    assert_eq!(count("all"), Some(Value::Integer(21)));

    Ok(())
}

#[test]
fn test_write_csv_renders_long_format_rows() -> Result<()> {
    let transactions = vec![
        sale("1", "A", "Food", "100"),
        sale("2", "A", "Food", "50"),
        sale("3", "B", "Food", "80")
    ];

    let definitions = vec![
        ReportDefinition::new("revenue_by_branch", &[Field::Branch])
            .metric(Metric::of(MetricOp::Sum, Field::Total).named("revenue")),
        ReportDefinition::new("best_line", &[Field::Branch, Field::ProductLine])
            .metric(Metric::of(MetricOp::Sum, Field::Total).named("revenue"))
            .ranked(Field::Branch, "revenue", 1, Direction::Max)
    ];

    let mut output = Vec::new();
    build_report_with(&transactions, &definitions).write_csv(&mut output)?;
    let output = String::from_utf8(output)?;

    assert_eq!(output.lines().collect::<Vec<_>>(), vec![
        "report,rank,group,metric,value",
        "best_line,1,branch=A;product_line=Food,revenue,150",
        "best_line,1,branch=B;product_line=Food,revenue,80",
        "revenue_by_branch,,branch=A,revenue,150",
        "revenue_by_branch,,branch=B,revenue,80"
    ]);

    Ok(())
}

#[test]
fn test_empty_input_builds_empty_tables() {
    let report = build_report(&[]);

    assert!(report.errors.is_empty());
    assert!(report.tables.values().all(|table| table.is_empty()));
    assert_eq!(report.row_count, 0);
}

#[test]
fn test_overflowing_report_is_isolated_from_the_others() {
    let transactions = vec![
        sale("1", "A", "Electronic accessories", "50000000000000000000000000000"),
        sale("2", "A", "Food and beverages", "50000000000000000000000000000")
    ];

    let definitions = vec![
        ReportDefinition::new("lines_above_average_revenue", &[Field::ProductLine])
            .metric(Metric::of(MetricOp::Sum, Field::Total).named("revenue"))
            .having_above_average("revenue"),
        ReportDefinition::new("branch_revenue", &[Field::Branch])
            .metric(Metric::of(MetricOp::Sum, Field::Total).named("revenue")),
        ReportDefinition::new("transactions_per_line", &[Field::ProductLine])
            .metric(Metric::count())
    ];

    let report = build_report_with(&transactions, &definitions);

    assert_eq!(report.errors.get("lines_above_average_revenue"), Some(&AnalyticsError::overflow("revenue")));
    assert_eq!(report.errors.get("branch_revenue"), Some(&AnalyticsError::overflow("revenue")));
    assert!(report.table("transactions_per_line").is_some());
}
