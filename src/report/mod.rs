mod assembler;
mod catalogue;
mod definition;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::io::Write;

use crate::aggregation::{AggregateRow, AnalyticsError, RankedRow};

pub use assembler::{build_report, build_report_with, compute_report, run_definition};
pub use catalogue::default_reports;
pub use definition::{Having, Ranking, ReportDefinition, RowFilter};

/// The rows of one named report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportTable {
    Aggregates(Vec<AggregateRow>),
    Ranked(Vec<RankedRow>)
}

impl ReportTable {
    pub fn len(&self) -> usize {
        match self {
            ReportTable::Aggregates(rows) => rows.len(),
            ReportTable::Ranked(rows) => rows.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates `(rank, row)` pairs; aggregate tables carry no rank.
    pub fn rows(&self) -> Box<dyn Iterator<Item = (Option<usize>, &AggregateRow)> + '_> {
        match self {
            ReportTable::Aggregates(rows) => Box::new(rows.iter().map(|row| (None, row))),
            ReportTable::Ranked(rows) => Box::new(rows.iter().map(|ranked| (Some(ranked.rank), &ranked.row)))
        }
    }
}

/// Every report of one run, keyed by name, with failed reports kept apart from the successful ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub tables: BTreeMap<String, ReportTable>,
    pub errors: BTreeMap<String, AnalyticsError>,
    /// Enriched rows the reports were computed over.
    pub row_count: usize,
    /// Source rows rejected as malformed before derivation.
    pub skipped_records: usize
}

impl Report {
    pub fn new(row_count: usize, skipped_records: usize) -> Self {
        Self {
            row_count,
            skipped_records,
            ..Self::default()
        }
    }

    /// Records the outcome of one report.
    ///
    /// A name that was already recorded turns into `AnalyticsError::DuplicateReport`, whichever
    /// outcome arrived first.
    pub fn insert(&mut self, name: &str, outcome: Result<ReportTable, AnalyticsError>) {
        if self.tables.remove(name).is_some() || self.errors.contains_key(name) {
            self.errors.insert(name.to_string(), AnalyticsError::duplicate_report(name));
            return;
        }

        match outcome {
            Ok(table) => {
                self.tables.insert(name.to_string(), table);
            }
            Err(error) => {
                self.errors.insert(name.to_string(), error);
            }
        }
    }

    pub fn table(&self, name: &str) -> Option<&ReportTable> {
        self.tables.get(name)
    }

    /// Writes every table as long-format CSV: `report,rank,group,metric,value`.
    ///
    /// Reports appear in name order and rows in table order, so equal reports render to equal bytes.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut output = csv::Writer::from_writer(writer);

        output.write_record(["report", "rank", "group", "metric", "value"])?;

        for (name, table) in &self.tables {
            for (rank, row) in table.rows() {
                let rank = rank.map(|rank| rank.to_string()).unwrap_or_default();
                let group = row.key.iter()
                    .map(|(field, value)| format!("{field}={value}"))
                    .collect::<Vec<_>>()
                    .join(";");

                for (metric, value) in &row.metrics {
                    output.write_record([name.as_str(), rank.as_str(), group.as_str(), metric.as_str(), value.to_string().as_str()])?;
                }
            }
        }

        output.flush()?;

        Ok(())
    }
}
