//! Calendar-aware interval counting.
//!
//! Fixed-length units can be measured by dividing elapsed time. Months and
//! years cannot, so [`months_between`] and [`years_between`] count calendar
//! boundaries instead.

mod delta;

pub use delta::{months_between, years_between};
