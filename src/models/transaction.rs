use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{CustomerType, Gender, PaymentMethod, RecordError};
use crate::types::InvoiceId;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
const MAX_RATING: Decimal = Decimal::TEN;

/// Largest accepted difference between the reported total and `unit_price * quantity * (1 + tax_pct / 100)`.
const TOTAL_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Represents a single row from the input CSV file.
///
/// Required numeric columns are optional here so that a blank cell is reported as a
/// missing field by [`Transaction::from_record`] instead of an opaque parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub invoice_id: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub city: String,
    pub customer_type: CustomerType,
    pub gender: Gender,
    #[serde(default)]
    pub product_line: String,
    pub unit_price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub tax_pct: Option<Decimal>,
    pub total: Option<Decimal>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub payment: PaymentMethod,
    pub cogs: Option<Decimal>,
    pub gross_margin_pct: Option<Decimal>,
    pub gross_income: Option<Decimal>,
    pub rating: Option<Decimal>
}

/// A validated sale. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Unique invoice identifier.
    pub invoice_id: InvoiceId,
    /// Short branch code (e.g. `A`).
    pub branch: String,
    pub city: String,
    pub customer_type: CustomerType,
    pub gender: Gender,
    pub product_line: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Tax rate in percent, e.g. `5` for 5%.
    pub tax_pct: Decimal,
    /// Gross amount paid, tax included.
    pub total: Decimal,
    pub timestamp: NaiveDateTime,
    pub payment: PaymentMethod,
    /// Cost of goods sold.
    pub cogs: Decimal,
    pub gross_margin_pct: Option<Decimal>,
    pub gross_income: Option<Decimal>,
    /// Customer rating on a 0 to 10 scale.
    pub rating: Option<Decimal>
}

impl Transaction {
    /// Validates a raw CSV record.
    ///
    /// `line` is the 1-based line of the record in its source and is only used for error reporting.
    ///
    /// # Errors
    /// Returns `RecordError` if:
    /// - A required field is blank.
    /// - `unit_price` or `quantity` is not positive, or `tax_pct` / `cogs` is negative.
    /// - `total` disagrees with price, quantity and tax by more than `0.01`.
    /// - The date or time cannot be parsed.
    /// - `rating` lies outside `[0, 10]`.
    pub fn from_record(record: TransactionRecord, line: u64) -> Result<Self, RecordError> {
        for (value, field) in [
            (&record.invoice_id, "invoice_id"),
            (&record.branch, "branch"),
            (&record.city, "city"),
            (&record.product_line, "product_line"),
            (&record.date, "date"),
            (&record.time, "time")
        ] {
            if value.is_empty() {
                return Err(RecordError::missing_field(line, &record, field));
            }
        }

        let unit_price = required(line, &record, record.unit_price, "unit_price")?;
        if unit_price <= Decimal::ZERO {
            return Err(RecordError::invalid_value(line, &record, "unit_price", "must be positive"));
        }

        let quantity = required(line, &record, record.quantity, "quantity")?;
        if quantity <= 0 {
            return Err(RecordError::invalid_value(line, &record, "quantity", "must be positive"));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| RecordError::invalid_value(line, &record, "quantity", "is out of range"))?;

        let tax_pct = required(line, &record, record.tax_pct, "tax_pct")?;
        if tax_pct < Decimal::ZERO {
            return Err(RecordError::invalid_value(line, &record, "tax_pct", "must not be negative"));
        }

        let total = required(line, &record, record.total, "total")?;
        let expected_total = expected_total(unit_price, quantity, tax_pct)
            .ok_or_else(|| RecordError::invalid_value(line, &record, "total", "overflows"))?;
        let within_tolerance = expected_total.checked_sub(total)
            .is_some_and(|difference| difference.abs() <= TOTAL_TOLERANCE);
        if !within_tolerance {
            return Err(RecordError::invalid_value(
                line,
                &record,
                "total",
                format!("expected {expected_total} from price, quantity and tax but found {total}")
            ));
        }

        let cogs = required(line, &record, record.cogs, "cogs")?;
        if cogs < Decimal::ZERO {
            return Err(RecordError::invalid_value(line, &record, "cogs", "must not be negative"));
        }

        if let Some(rating) = record.rating {
            if rating < Decimal::ZERO || rating > MAX_RATING {
                return Err(RecordError::invalid_value(line, &record, "rating", "must lie between 0 and 10"));
            }
        }

        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
            .map_err(|error| RecordError::invalid_value(line, &record, "date", error.to_string()))?;
        let time = parse_time(&record.time)
            .ok_or_else(|| RecordError::invalid_value(line, &record, "time", "expected HH:MM or HH:MM:SS"))?;

        Ok(Self {
            invoice_id: record.invoice_id,
            branch: record.branch,
            city: record.city,
            customer_type: record.customer_type,
            gender: record.gender,
            product_line: record.product_line,
            unit_price,
            quantity,
            tax_pct,
            total,
            timestamp: date.and_time(time),
            payment: record.payment,
            cogs,
            gross_margin_pct: record.gross_margin_pct,
            gross_income: record.gross_income,
            rating: record.rating
        })
    }

    /// Tax charged on the sale (`unit_price * quantity * tax_pct / 100`), or `None` if it overflows.
    ///
    /// Validated transactions never overflow here since the tax is bounded by their total.
    pub fn tax_amount(&self) -> Option<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))?
            .checked_mul(self.tax_pct / Decimal::ONE_HUNDRED)
    }
}

fn required<T>(line: u64, record: &TransactionRecord, value: Option<T>, field: &'static str) -> Result<T, RecordError> {
    value.ok_or_else(|| RecordError::missing_field(line, record, field))
}

fn expected_total(unit_price: Decimal, quantity: u32, tax_pct: Decimal) -> Option<Decimal> {
    let subtotal = unit_price.checked_mul(Decimal::from(quantity))?;
    let multiplier = Decimal::ONE.checked_add(tax_pct / Decimal::ONE_HUNDRED)?;
    subtotal.checked_mul(multiplier)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}
