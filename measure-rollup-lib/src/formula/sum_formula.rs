use super::{Counter, CounterInitializationContext, CreateMeasureContext, Formula, LOG_TARGET};
use crate::Result;
use crate::component::CrawlerDepthLimit;
use crate::measures::{Measure, MetricKey};
use compact_str::CompactString;
use core::fmt::Debug;

/// A numeric payload that [`SumFormula`] can total
pub trait SumValue: Copy + Debug + PartialEq {
    /// Read the payload from a raw measure, `None` if the measure has another type
    fn read(measure: &Measure) -> Option<Self>;

    #[must_use]
    fn add(self, other: Self) -> Self;

    fn to_measure(self) -> Measure;
}

impl SumValue for i32 {
    fn read(measure: &Measure) -> Option<Self> {
        measure.int_value()
    }

    fn add(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn to_measure(self) -> Measure {
        Measure::builder().create_int(self)
    }
}

impl SumValue for i64 {
    fn read(measure: &Measure) -> Option<Self> {
        measure.long_value()
    }

    fn add(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    fn to_measure(self) -> Measure {
        Measure::builder().create_long(self)
    }
}

/// Sums the raw values of one metric over all leaves of a subtree.
///
/// Leaves without a value are skipped unless a default was configured, in
/// which case the default counts as the leaf's value. Measures are only
/// emitted above the leaf level.
#[derive(Debug, Clone)]
pub struct SumFormula<N> {
    output_metric_keys: [MetricKey; 1],
    default_input_value: Option<N>,
}

pub type IntSumFormula = SumFormula<i32>;
pub type LongSumFormula = SumFormula<i64>;

impl<N: SumValue> SumFormula<N> {
    /// # Errors
    ///
    /// Returns an error if `metric_key` is blank
    pub fn new(metric_key: impl Into<CompactString>) -> Result<Self> {
        Ok(Self {
            output_metric_keys: [MetricKey::new(metric_key)?],
            default_input_value: None,
        })
    }

    /// A formula where leaves without a raw value contribute `default_input_value`
    ///
    /// # Errors
    ///
    /// Returns an error if `metric_key` is blank
    pub fn with_default(metric_key: impl Into<CompactString>, default_input_value: N) -> Result<Self> {
        Ok(Self {
            output_metric_keys: [MetricKey::new(metric_key)?],
            default_input_value: Some(default_input_value),
        })
    }

    #[must_use]
    pub const fn metric_key(&self) -> &MetricKey {
        &self.output_metric_keys[0]
    }

    #[must_use]
    pub const fn default_input_value(&self) -> Option<N> {
        self.default_input_value
    }
}

impl<N: SumValue> Formula for SumFormula<N> {
    type Counter = SumCounter<N>;

    fn create_new_counter(&self) -> Self::Counter {
        SumCounter {
            metric_key: self.metric_key().clone(),
            default_input_value: self.default_input_value,
            value: None,
        }
    }

    fn create_measure(&self, counter: &Self::Counter, context: &dyn CreateMeasureContext) -> Option<Measure> {
        if let Some(value) = counter.value
            && CrawlerDepthLimit::LEAVES.is_deeper_than(context.component().component_type())
        {
            return Some(value.to_measure());
        }

        None
    }

    fn output_metric_keys(&self) -> &[MetricKey] {
        &self.output_metric_keys
    }
}

#[derive(Debug, Clone)]
pub struct SumCounter<N> {
    metric_key: MetricKey,
    default_input_value: Option<N>,
    value: Option<N>,
}

impl<N: SumValue> SumCounter<N> {
    /// The running total, `None` until something contributed
    #[must_use]
    pub const fn value(&self) -> Option<N> {
        self.value
    }

    fn add(&mut self, value: N) {
        self.value = Some(self.value.map_or(value, |current| current.add(value)));
    }
}

impl<N: SumValue> Counter for SumCounter<N> {
    fn initialize(&mut self, context: &dyn CounterInitializationContext) {
        let raw = context.measure(self.metric_key.as_str());
        let value = match raw.map(N::read) {
            Some(Some(value)) => Some(value),
            Some(None) => {
                log::debug!(
                    target: LOG_TARGET,
                    "Ignoring measure '{}' on '{}': not a {} value",
                    self.metric_key,
                    context.leaf().key(),
                    core::any::type_name::<N>()
                );
                self.default_input_value
            }
            None => self.default_input_value,
        };

        if let Some(value) = value {
            self.add(value);
        }
    }

    fn aggregate(&mut self, other: &Self) {
        if let Some(value) = other.value {
            self.add(value);
        }
    }
}
