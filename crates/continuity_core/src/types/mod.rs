//! Core time and error types.
//!
//! This module provides:
//! - `time_unit`: The canonical set of schedule units and string normalisation
//! - `time`: The [`Instant`] alias and day/month boundary helpers
//! - `error`: [`ScheduleError`], the single error type of the engine
//!
//! # Re-exports
//!
//! [`TimeUnit`], [`Instant`], [`ScheduleError`] and [`Result`] are re-exported
//! at this module level.

pub mod error;
pub mod time;
pub mod time_unit;

pub use error::{Result, ScheduleError};
pub use time::Instant;
pub use time_unit::{TimeUnit, UnitLength};
