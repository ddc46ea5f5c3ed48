//! The counter/formula engine
//!
//! This module derives measures for every component of a tree from the raw
//! measures of its leaves.
//!
//! # Implementation Model
//!
//! A [`Formula`] is a stateless strategy shared by the whole computation. For
//! each component it hands out a fresh [`Counter`], an accumulator owned by
//! exactly one (formula, component) pair:
//!
//! - On a leaf, the counter is seeded once through [`Counter::initialize`],
//!   which reads the leaf's raw measure from a [`CounterInitializationContext`].
//! - On an internal node, the counter folds in each child's counter through
//!   [`Counter::aggregate`]. Children may be folded in any order, so every
//!   aggregation is associative and commutative.
//!
//! Once a counter is complete, [`Formula::create_measure`] decides whether the
//! component receives a measure and packages the accumulated value.
//!
//! The built-in formulas differ in how they treat missing contributions:
//!
//! - [`SumFormula`] and [`DistributionFormula`] skip children without a value,
//!   and only emit above the leaf level.
//! - [`ImpactSumFormula`] discards the whole subtree's value as soon as one
//!   contributor has no value, and emits on leaves too.
//! - [`MaxRatingFormula`] keeps the worst rating, and only emits above the
//!   leaf level.
//! - [`VariationSumFormula`] sums per-period variations and emits a measure
//!   carrying variations only.
//!
//! [`FormulaExecutor`] walks a tree in post-order and drives the counters of a
//! set of formulas, persisting what they emit into a
//! [`MeasureRepository`](crate::repository::MeasureRepository).

mod contexts;
mod counter;
mod distribution_formula;
pub mod encoding;
mod executor;
mod impact_sum_formula;
mod max_rating_formula;
mod sum_formula;
pub mod values;
mod variation_sum_formula;

const LOG_TARGET: &str = "   formula";

pub use contexts::{CounterInitializationContext, CreateMeasureContext};
pub use counter::{Counter, DynFormula, Formula};
pub use distribution_formula::{DistributionCounter, DistributionFormula};
pub use executor::{ExecutionSummary, FormulaExecutor, FormulaExecutorBuilder};
pub use impact_sum_formula::{ImpactSumCounter, ImpactSumFormula};
pub use max_rating_formula::{MaxRatingCounter, MaxRatingFormula};
pub use sum_formula::{IntSumFormula, LongSumFormula, SumCounter, SumFormula, SumValue};
pub use variation_sum_formula::{VariationSumCounter, VariationSumFormula};

#[cfg(test)]
pub(crate) mod test_support;
