use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{CustomerType, Gender, PaymentMethod, Transaction};

pub fn timestamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("fixture timestamp must be valid")
}

pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).expect("fixture decimal must be valid")
}

/// A plausible transaction that tests override with struct update syntax.
pub fn transaction(invoice_id: &str) -> Transaction {
    Transaction {
        invoice_id: invoice_id.to_string(),
        branch: "A".to_string(),
        city: "Yangon".to_string(),
        customer_type: CustomerType::Member,
        gender: Gender::Female,
        product_line: "Health and beauty".to_string(),
        unit_price: decimal("10.00"),
        quantity: 5,
        tax_pct: decimal("5"),
        total: decimal("52.50"),
        timestamp: timestamp("2019-01-05 13:08:00"),
        payment: PaymentMethod::Ewallet,
        cogs: decimal("50.00"),
        gross_margin_pct: Some(decimal("4.7619")),
        gross_income: Some(decimal("2.50")),
        rating: Some(decimal("9.1"))
    }
}

pub fn sale(invoice_id: &str, branch: &str, product_line: &str, total: &str) -> Transaction {
    Transaction {
        branch: branch.to_string(),
        product_line: product_line.to_string(),
        total: decimal(total),
        ..transaction(invoice_id)
    }
}
