//! Shared value types.

pub mod date;
pub mod deadline;

pub use date::{parse_date, parse_naive_date};
pub use deadline::{Deadline, DoneCause};
