use rust_decimal::Decimal;

use crate::models::{DayOfWeek, Field, TimeOfDay, Transaction};
use crate::types::{SalesMonth, Value};

/// A transaction together with the features derived from it.
///
/// Built once by the feature deriver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    /// The source row this enrichment was derived from.
    pub transaction: Transaction,
    /// Calendar month of the sale, 1 to 12.
    pub sales_month: SalesMonth,
    pub day_of_week: DayOfWeek,
    pub time_of_day: TimeOfDay,
    /// Unit price or quantity lies outside three standard deviations of the dataset mean.
    pub is_outlier: bool
}

impl EnrichedTransaction {
    /// Reads a single column as a [`Value`].
    pub fn value(&self, field: Field) -> Value {
        let transaction = &self.transaction;

        match field {
            Field::InvoiceId => Value::from(transaction.invoice_id.as_str()),
            Field::Branch => Value::from(transaction.branch.as_str()),
            Field::City => Value::from(transaction.city.as_str()),
            Field::CustomerType => Value::from(transaction.customer_type.as_str()),
            Field::Gender => Value::from(transaction.gender.as_str()),
            Field::ProductLine => Value::from(transaction.product_line.as_str()),
            Field::UnitPrice => Value::from(transaction.unit_price),
            Field::Quantity => Value::from(Decimal::from(transaction.quantity)),
            Field::TaxPct => Value::from(transaction.tax_pct),
            Field::TaxAmount => Value::from(transaction.tax_amount()),
            Field::Total => Value::from(transaction.total),
            Field::Payment => Value::from(transaction.payment.as_str()),
            Field::Cogs => Value::from(transaction.cogs),
            Field::GrossMarginPct => Value::from(transaction.gross_margin_pct),
            Field::GrossIncome => Value::from(transaction.gross_income),
            Field::Rating => Value::from(transaction.rating),
            Field::SalesMonth => Value::Integer(i64::from(self.sales_month)),
            Field::DayOfWeek => Value::from(self.day_of_week.as_str()),
            Field::TimeOfDay => Value::from(self.time_of_day.as_str()),
            Field::IsOutlier => Value::from(self.is_outlier)
        }
    }
}
