use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::{bail, Context};
use futures::future::join_all;
use tokio::task::spawn_blocking;
use tracing::info;

use crate::engine::{read_transactions, LoadedTransactions};
use crate::features::derive_all;
use crate::models::Transaction;
use crate::report::{compute_report, default_reports, Report, ReportDefinition};
use crate::storage::{ReportStorage, Storage};

/// Runs report definitions over a CSV source, one blocking worker per report.
pub struct ReportEngine {
    definitions: Vec<ReportDefinition>,
    selected: Option<Vec<String>>
}

impl ReportEngine {
    /// Creates an engine over the default report catalogue.
    pub fn new() -> Self {
        Self {
            definitions: default_reports(),
            selected: None
        }
    }

    pub fn with_definitions(mut self, definitions: Vec<ReportDefinition>) -> Self {
        self.definitions = definitions;
        self
    }

    /// Restricts the run to the named reports.
    pub fn with_reports(mut self, names: Vec<String>) -> Self {
        self.selected = Some(names);
        self
    }

    /// Loads the CSV at `path` and computes every selected report.
    pub async fn run(&self, path: &str) -> anyhow::Result<Report> {
        let path = path.to_string();

        let loaded = spawn_blocking(move || -> anyhow::Result<LoadedTransactions> {
            let file = File::open(&path).with_context(|| format!("Error opening CSV at path: {path}"))?;
            let loaded = read_transactions(BufReader::new(file))
                .with_context(|| format!("Error reading CSV header at path: {path}"))?;
            Ok(loaded)
        }).await??;

        info!("Loaded [{}] transactions, skipped [{}] malformed rows", loaded.transactions.len(), loaded.skipped);

        self.run_transactions(loaded.transactions, loaded.skipped).await
    }

    /// Derives the rows once and computes every selected report in parallel.
    pub async fn run_transactions(&self, transactions: Vec<Transaction>, skipped_records: usize) -> anyhow::Result<Report> {
        let definitions = self.selected_definitions()?;
        let rows = Arc::new(derive_all(&transactions));
        let storage = Arc::new(ReportStorage::new());

        let workers = definitions.into_iter().map(|definition| {
            let rows = rows.clone();
            let storage = storage.clone();

            spawn_blocking(move || storage.save(&definition.name, compute_report(&rows, &definition)))
        });

        for result in join_all(workers).await {
            result.context("A report worker did not finish")?;
        }

        Ok(storage.to_report(rows.len(), skipped_records))
    }

    fn selected_definitions(&self) -> anyhow::Result<Vec<ReportDefinition>> {
        let Some(names) = &self.selected else {
            return Ok(self.definitions.clone());
        };

        let mut definitions = Vec::with_capacity(names.len());

        for name in names {
            match self.definitions.iter().find(|definition| &definition.name == name) {
                Some(definition) => definitions.push(definition.clone()),
                None => bail!("Unknown report [{name}]")
            }
        }

        Ok(definitions)
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}
