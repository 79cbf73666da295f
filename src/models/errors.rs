use crate::models::TransactionRecord;
use thiserror::Error;

/// A source row that could not become a [`Transaction`](crate::models::Transaction).
///
/// Malformed rows are skipped and counted by the loader; they never abort the batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record on line [{line}] for invoice [{invoice_id}] is missing required field [{field}]")]
    MissingField {
        line: u64,
        invoice_id: String,
        field: &'static str
    },
    #[error("Record on line [{line}] for invoice [{invoice_id}] has an invalid [{field}]: {reason}")]
    InvalidValue {
        line: u64,
        invoice_id: String,
        field: &'static str,
        reason: String
    },
    #[error("Record on line [{line}] could not be read: {reason}")]
    Unreadable {
        line: u64,
        reason: String
    }
}

impl RecordError {
    pub fn missing_field(line: u64, record: &TransactionRecord, field: &'static str) -> Self {
        Self::MissingField {
            line,
            invoice_id: record.invoice_id.clone(),
            field
        }
    }

    pub fn invalid_value(line: u64, record: &TransactionRecord, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            line,
            invoice_id: record.invoice_id.clone(),
            field,
            reason: reason.into()
        }
    }

    pub fn unreadable(line: u64, error: &csv::Error) -> Self {
        Self::Unreadable {
            line,
            reason: error.to_string()
        }
    }
}
