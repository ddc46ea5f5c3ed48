use crate::component::Component;
use crate::measures::{Measure, Metric};
use crate::period::Period;

/// What a counter can see while being seeded on a leaf
pub trait CounterInitializationContext {
    fn leaf(&self) -> &Component;

    /// The leaf's raw measure for a metric, if it has one
    fn measure(&self, metric_key: &str) -> Option<&Measure>;

    /// The active periods
    fn periods(&self) -> &[Period];
}

/// What a formula can see while deciding the measure of a component
pub trait CreateMeasureContext {
    fn component(&self) -> &Component;

    /// The metric the measure is requested for
    fn metric(&self) -> &Metric;

    /// The active periods
    fn periods(&self) -> &[Period];
}
