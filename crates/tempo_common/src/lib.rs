//! Shared foundational types used across the tempo clock propagation crates.
//!
//! This crate provides opaque handles into the host design graph and the
//! time-value type used for clock periods and buffer delays.

#![warn(missing_docs)]

pub mod ids;
pub mod period;

pub use ids::{CellId, WireId};
pub use period::{is_half_period, ClockPeriod, ParsePeriodError};
