use std::fmt;
use std::fmt::{Display, Formatter};

/// A column of an [`EnrichedTransaction`](crate::models::EnrichedTransaction) that reports can group on or aggregate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    InvoiceId,
    Branch,
    City,
    CustomerType,
    Gender,
    ProductLine,
    UnitPrice,
    Quantity,
    TaxPct,
    TaxAmount,
    Total,
    Payment,
    Cogs,
    GrossMarginPct,
    GrossIncome,
    Rating,
    SalesMonth,
    DayOfWeek,
    TimeOfDay,
    IsOutlier
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::InvoiceId => "invoice_id",
            Field::Branch => "branch",
            Field::City => "city",
            Field::CustomerType => "customer_type",
            Field::Gender => "gender",
            Field::ProductLine => "product_line",
            Field::UnitPrice => "unit_price",
            Field::Quantity => "quantity",
            Field::TaxPct => "tax_pct",
            Field::TaxAmount => "tax_amount",
            Field::Total => "total",
            Field::Payment => "payment",
            Field::Cogs => "cogs",
            Field::GrossMarginPct => "gross_margin_pct",
            Field::GrossIncome => "gross_income",
            Field::Rating => "rating",
            Field::SalesMonth => "sales_month",
            Field::DayOfWeek => "day_of_week",
            Field::TimeOfDay => "time_of_day",
            Field::IsOutlier => "is_outlier"
        }
    }

    /// Whether the field can be summed or averaged.
    ///
    /// `sales_month` is an integer but it is a calendar label, not a measure.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::UnitPrice
                | Field::Quantity
                | Field::TaxPct
                | Field::TaxAmount
                | Field::Total
                | Field::Cogs
                | Field::GrossMarginPct
                | Field::GrossIncome
                | Field::Rating
        )
    }
}

impl Display for Field {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
