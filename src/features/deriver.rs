use chrono::{Datelike, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{EnrichedTransaction, TimeOfDay, Transaction};

const MORNING_END_SECONDS: u32 = 12 * 60 * 60;
const AFTERNOON_END_SECONDS: u32 = 16 * 60 * 60;
const OUTLIER_STD_DEVS: f64 = 3.0;

/// Population mean and standard deviation of one numeric column.
///
/// Kept in `f64` so that squaring large deviations cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub mean: f64,
    pub std_dev: f64
}

impl FieldStats {
    /// An empty column has a mean and deviation of zero.
    pub fn from_values(values: &[Decimal]) -> Self {
        if values.is_empty() {
            return Self { mean: 0.0, std_dev: 0.0 };
        }

        let values: Vec<f64> = values.iter().map(|value| value.to_f64().unwrap_or(0.0)).collect();
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let variance = values.iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>() / count;

        Self {
            mean,
            std_dev: variance.sqrt()
        }
    }

    /// True when `value` lies strictly outside `mean ± 3σ`.
    pub fn is_outlier(&self, value: Decimal) -> bool {
        let distance = (value.to_f64().unwrap_or(0.0) - self.mean).abs();
        distance > OUTLIER_STD_DEVS * self.std_dev
    }
}

/// Dataset-wide statistics that outlier flags are measured against.
///
/// Computed once over the whole input before any row is derived, so that every flag
/// reflects the current dataset rather than the row in isolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBounds {
    pub unit_price: FieldStats,
    pub quantity: FieldStats
}

impl OutlierBounds {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let unit_prices: Vec<Decimal> = transactions.iter().map(|transaction| transaction.unit_price).collect();
        let quantities: Vec<Decimal> = transactions.iter().map(|transaction| Decimal::from(transaction.quantity)).collect();

        let bounds = Self {
            unit_price: FieldStats::from_values(&unit_prices),
            quantity: FieldStats::from_values(&quantities)
        };

        debug!("Outlier bounds over [{}] transactions: {bounds:?}", transactions.len());

        bounds
    }

    pub fn is_outlier(&self, transaction: &Transaction) -> bool {
        self.unit_price.is_outlier(transaction.unit_price)
            || self.quantity.is_outlier(Decimal::from(transaction.quantity))
    }
}

/// Buckets a wall-clock time at whole-second resolution.
///
/// `Morning` runs through `12:00:00` inclusive and `Afternoon` starts at `12:00:01`.
pub fn classify_time_of_day(time: NaiveTime) -> TimeOfDay {
    let seconds = time.num_seconds_from_midnight();

    if seconds <= MORNING_END_SECONDS {
        TimeOfDay::Morning
    } else if seconds <= AFTERNOON_END_SECONDS {
        TimeOfDay::Afternoon
    } else {
        TimeOfDay::Evening
    }
}

/// Derives the calendar, time-of-day and outlier features of a single transaction.
pub fn derive(transaction: &Transaction, bounds: &OutlierBounds) -> EnrichedTransaction {
    let date = transaction.timestamp.date();

    EnrichedTransaction {
        transaction: transaction.clone(),
        //NOTE: month() is always 1..=12 so the narrowing cannot truncate
        sales_month: date.month() as u8,
        day_of_week: date.weekday().into(),
        time_of_day: classify_time_of_day(transaction.timestamp.time()),
        is_outlier: bounds.is_outlier(transaction)
    }
}

/// Computes the outlier bounds once, then derives every transaction in input order.
pub fn derive_all(transactions: &[Transaction]) -> Vec<EnrichedTransaction> {
    let bounds = OutlierBounds::from_transactions(transactions);

    transactions.iter()
        .map(|transaction| derive(transaction, &bounds))
        .collect()
}
