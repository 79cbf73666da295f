mod rounding;
#[cfg(test)]
mod tests;
mod value;

pub use rounding::{round_half_up, METRIC_DECIMAL_PLACES};
pub use value::Value;

pub type InvoiceId = String;
pub type SalesMonth = u8;
