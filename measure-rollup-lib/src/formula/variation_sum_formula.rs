use super::values::{IntVariationValue, IntVariationValueArray};
use super::{Counter, CounterInitializationContext, CreateMeasureContext, Formula};
use crate::Result;
use crate::component::CrawlerDepthLimit;
use crate::measures::{Measure, MeasureVariations, MetricKey};
use compact_str::CompactString;

/// Sums the per-period variations of one metric over all leaves of a subtree.
///
/// Only the active periods are read. The emitted measure has no value of its
/// own, just the variations of the periods some leaf contributed to. Measures
/// are only emitted above the leaf level.
#[derive(Debug, Clone)]
pub struct VariationSumFormula {
    output_metric_keys: [MetricKey; 1],
}

impl VariationSumFormula {
    /// # Errors
    ///
    /// Returns an error if `metric_key` is blank
    pub fn new(metric_key: impl Into<CompactString>) -> Result<Self> {
        Ok(Self {
            output_metric_keys: [MetricKey::new(metric_key)?],
        })
    }

    #[must_use]
    pub const fn metric_key(&self) -> &MetricKey {
        &self.output_metric_keys[0]
    }
}

impl Formula for VariationSumFormula {
    type Counter = VariationSumCounter;

    fn create_new_counter(&self) -> Self::Counter {
        VariationSumCounter {
            metric_key: self.metric_key().clone(),
            values: IntVariationValue::new_array(),
        }
    }

    fn create_measure(&self, counter: &Self::Counter, context: &dyn CreateMeasureContext) -> Option<Measure> {
        if !CrawlerDepthLimit::LEAVES.is_deeper_than(context.component().component_type()) {
            return None;
        }

        let mut variations = MeasureVariations::builder();
        for period in context.periods() {
            let value = counter.values.get(period);
            if value.is_set() {
                let _ = variations.set_variation(period, f64::from(value.value()));
            }
        }

        if variations.is_empty() {
            return None;
        }

        Some(Measure::builder().variations(variations.build()).create_no_value())
    }

    fn output_metric_keys(&self) -> &[MetricKey] {
        &self.output_metric_keys
    }
}

#[derive(Debug, Clone)]
pub struct VariationSumCounter {
    metric_key: MetricKey,
    values: IntVariationValueArray,
}

impl VariationSumCounter {
    #[must_use]
    pub const fn values(&self) -> &IntVariationValueArray {
        &self.values
    }
}

impl Counter for VariationSumCounter {
    #[expect(clippy::cast_possible_truncation, reason = "variations of summed metrics are whole numbers")]
    fn initialize(&mut self, context: &dyn CounterInitializationContext) {
        let Some(variations) = context.measure(self.metric_key.as_str()).and_then(Measure::variations) else {
            return;
        };

        for period in context.periods() {
            if let Some(variation) = variations.variation(period) {
                let _ = self.values.increment(period, variation.round() as i32);
            }
        }
    }

    fn aggregate(&mut self, other: &Self) {
        let _ = self.values.increment_all(&other.values);
    }
}
