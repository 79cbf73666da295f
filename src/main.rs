use std::io::{stderr, stdout, BufWriter};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use retail_sales_analytics::engine::ReportEngine;
use retail_sales_analytics::report::Report;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: retail-sales-analytics [input].csv [log_level:optional] [reports:optional] > [output].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Reports are a comma separated list of report names (default: all)");
        exit(1);
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let mut engine = ReportEngine::new();

    if let Some(names) = args.get(3) {
        engine = engine.with_reports(parse_report_names(names));
    }

    let timer = Instant::now();
    let report = engine.run(path).await?;
    let duration = timer.elapsed();

    info!(
        "Computed [{}] reports over [{}] transactions in: {duration:?}",
        report.tables.len(),
        report.row_count
    );

    if report.skipped_records > 0 {
        warn!("Skipped [{}] malformed records", report.skipped_records);
    }

    if !report.errors.is_empty() {
        warn!("[{}] reports failed and were left out of the output", report.errors.len());
    }

    write_results_to_stdout(&report)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn parse_report_names(names: &str) -> Vec<String> {
    names.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV output so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(report: &Report) -> Result<()> {
    let output = BufWriter::new(stdout().lock());

    report.write_csv(output)?;

    Ok(())
}
