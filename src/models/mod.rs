mod enriched;
mod errors;
mod field;
#[cfg(test)]
pub mod fixtures;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Deserialize;

pub use enriched::EnrichedTransaction;
pub use errors::RecordError;
pub use field::Field;
pub use transaction::{Transaction, TransactionRecord};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub enum CustomerType {
    Member,
    Normal
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub enum Gender {
    Male,
    Female
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit card")]
    CreditCard,
    Ewallet
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday
}

/// Coarse bucket of the hour a sale happened in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Member => "Member",
            CustomerType::Normal => "Normal"
        }
    }
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female"
        }
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::Ewallet => "Ewallet"
        }
    }
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday"
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday
        }
    }
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening"
        }
    }
}

macro_rules! display_as_str {
    ($($kind:ty),*) => {
        $(
            impl Display for $kind {
                fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                    formatter.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(CustomerType, Gender, PaymentMethod, DayOfWeek, TimeOfDay);
