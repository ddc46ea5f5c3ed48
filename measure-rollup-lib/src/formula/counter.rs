use super::executor::Walk;
use super::{CounterInitializationContext, CreateMeasureContext};
use crate::Result;
use crate::measures::{Measure, MetricKey};
use core::fmt::Debug;

/// A per-(formula, component) accumulator.
///
/// A counter is either seeded once with [`initialize`](Self::initialize) (leaf
/// components) or receives zero or more [`aggregate`](Self::aggregate) calls
/// (internal components), never both.
pub trait Counter {
    /// Seed the counter from a leaf's raw measures
    fn initialize(&mut self, context: &dyn CounterInitializationContext);

    /// Fold one child's counter into this one
    fn aggregate(&mut self, other: &Self);
}

/// A stateless strategy producing counters and deciding measure emission
pub trait Formula {
    type Counter: Counter;

    fn create_new_counter(&self) -> Self::Counter;

    /// The measure for the component described by `context`, if it gets one
    fn create_measure(&self, counter: &Self::Counter, context: &dyn CreateMeasureContext) -> Option<Measure>;

    /// The metrics this formula produces measures for
    fn output_metric_keys(&self) -> &[MetricKey];
}

/// A formula with its counter type erased, so formulas of different kinds can
/// be registered together.
///
/// Implemented for every [`Formula`]; see
/// [`FormulaExecutor`](super::FormulaExecutor) for the walk itself.
pub trait DynFormula: Debug {
    /// Same as [`Formula::output_metric_keys`]
    fn metric_keys(&self) -> &[MetricKey];

    #[doc(hidden)]
    fn walk(&self, walk: &mut Walk<'_>) -> Result<usize>;
}

impl<F: Formula + Debug> DynFormula for F {
    fn metric_keys(&self) -> &[MetricKey] {
        self.output_metric_keys()
    }

    fn walk(&self, walk: &mut Walk<'_>) -> Result<usize> {
        walk.run(self)
    }
}
