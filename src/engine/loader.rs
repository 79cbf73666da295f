use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::models::{RecordError, Transaction, TransactionRecord};

/// Valid transactions read from a source, and how many rows were rejected on the way.
#[derive(Debug, Default)]
pub struct LoadedTransactions {
    pub transactions: Vec<Transaction>,
    pub skipped: usize
}

/// Reads every CSV row from `source`, skipping and counting malformed rows.
///
/// # Errors
/// Returns `csv::Error` only when the header row itself cannot be read.
pub fn read_transactions<R: Read>(source: R) -> Result<LoadedTransactions, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let mut loaded = LoadedTransactions::default();

    for result in reader.records() {
        match parse_row(result, &headers) {
            Ok(transaction) => {
                loaded.transactions.push(transaction);
            }
            Err(error) => {
                warn!("{error}");
                loaded.skipped += 1;
            }
        }
    }

    debug!("Loaded [{}] transactions, skipped [{}] malformed rows", loaded.transactions.len(), loaded.skipped);

    Ok(loaded)
}

fn parse_row(result: Result<StringRecord, csv::Error>, headers: &StringRecord) -> Result<Transaction, RecordError> {
    let row = result.map_err(|error| {
        let line = error.position().map(|position| position.line()).unwrap_or_default();
        RecordError::unreadable(line, &error)
    })?;

    let line = row.position().map(|position| position.line()).unwrap_or_default();
    let record = row.deserialize::<TransactionRecord>(Some(headers))
        .map_err(|error| RecordError::unreadable(line, &error))?;

    Transaction::from_record(record, line)
}
