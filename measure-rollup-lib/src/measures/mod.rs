//! Measures, metrics, and ratings
//!
//! A [`Metric`] names a quality dimension (lines of code, issue impacts, a
//! maintainability grade, ...). A [`Measure`] is the value of one metric on one
//! component, optionally accompanied by [`MeasureVariations`], the deltas of
//! that value against each active comparison period.
//!
//! # Implementation Model
//!
//! Measures are immutable once built. New measures are only ever created
//! through [`MeasureBuilder`], which always produces a present value (possibly
//! [`MeasureValue::NoValue`] when the measure only carries variations).
//! "No measure at all" is expressed as `Option<Measure>::None` and is never
//! written to a repository.
//!
//! Metrics are registered once in a [`MetricRepository`] and referenced by
//! their [`MetricKey`]. Keys are validated on construction, so a formula that
//! holds a `MetricKey` is known to be wired to a non-blank key.

mod measure;
mod measure_value;
mod measure_variations;
mod metric;
mod metric_key;
mod metric_repository;
mod metric_type;
mod rating;

pub use measure::{Measure, MeasureBuilder};
pub use measure_value::MeasureValue;
pub use measure_variations::{MeasureVariations, MeasureVariationsBuilder};
pub use metric::Metric;
pub use metric_key::MetricKey;
pub use metric_repository::MetricRepository;
pub use metric_type::MetricType;
pub use rating::Rating;
