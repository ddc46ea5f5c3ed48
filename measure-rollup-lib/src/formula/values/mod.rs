//! Small mutable accumulators used by counters
//!
//! Each holder tracks whether it was ever set alongside its payload, so that
//! "never incremented" stays distinct from "incremented to the default". The
//! per-period variants are fixed arrays of [`MAX_NUMBER_OF_PERIODS`] holders
//! addressed by period.
//!
//! [`MAX_NUMBER_OF_PERIODS`]: crate::period::MAX_NUMBER_OF_PERIODS

mod int_variation_value;
mod period_array;
mod rating_value;

pub use int_variation_value::{IntVariationValue, IntVariationValueArray};
pub use period_array::{PeriodArray, PeriodSlot};
pub use rating_value::{RatingValue, RatingValueArray, RatingVariationValue, RatingVariationValueArray};
