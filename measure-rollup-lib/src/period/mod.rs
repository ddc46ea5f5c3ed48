//! Comparison periods
//!
//! A period is one comparison baseline (for example "since the previous
//! version") against which value deltas, called variations, are computed. At
//! most [`MAX_NUMBER_OF_PERIODS`] periods can be active at once, and every
//! per-period structure in this crate is a fixed array of that size indexed by
//! `period.index() - 1`.

#[expect(clippy::module_inception, reason = "The period module is named after its primary type")]
mod period;
mod periods_holder;

pub use period::{MAX_NUMBER_OF_PERIODS, Period};
pub use periods_holder::PeriodsHolder;
