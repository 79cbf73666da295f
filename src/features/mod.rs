mod deriver;

pub use deriver::{classify_time_of_day, derive, derive_all, FieldStats, OutlierBounds};
