use super::encoding::RangeDistributionBuilder;
use super::{Counter, CounterInitializationContext, CreateMeasureContext, Formula, LOG_TARGET};
use crate::Result;
use crate::component::CrawlerDepthLimit;
use crate::measures::{Measure, MetricKey};
use compact_str::CompactString;

/// Merges the encoded histograms of one metric over all leaves of a subtree.
///
/// Like [`SumFormula`](super::SumFormula), leaves without a value are skipped
/// and measures are only emitted above the leaf level.
#[derive(Debug, Clone)]
pub struct DistributionFormula {
    output_metric_keys: [MetricKey; 1],
}

impl DistributionFormula {
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

impl Formula for DistributionFormula {
    type Counter = DistributionCounter;

    fn create_new_counter(&self) -> Self::Counter {
        DistributionCounter {
            metric_key: self.metric_key().clone(),
            distribution: RangeDistributionBuilder::new(),
        }
    }

    fn create_measure(&self, counter: &Self::Counter, context: &dyn CreateMeasureContext) -> Option<Measure> {
        if !CrawlerDepthLimit::LEAVES.is_deeper_than(context.component().component_type()) {
            return None;
        }

        counter.value().map(|data| Measure::builder().create_string(data))
    }

    fn output_metric_keys(&self) -> &[MetricKey] {
        &self.output_metric_keys
    }
}

#[derive(Debug, Clone)]
pub struct DistributionCounter {
    metric_key: MetricKey,
    distribution: RangeDistributionBuilder,
}

impl DistributionCounter {
    /// The merged encoding, `None` if nothing contributed or the inputs disagreed
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.distribution.build()
    }
}

impl Counter for DistributionCounter {
    fn initialize(&mut self, context: &dyn CounterInitializationContext) {
        let Some(measure) = context.measure(self.metric_key.as_str()) else {
            return;
        };

        if let Some(data) = measure.data() {
            let _ = self.distribution.add(data);
        } else {
            log::debug!(target: LOG_TARGET, "Ignoring measure '{}' on '{}': not a distribution", self.metric_key, context.leaf().key());
        }
    }

    fn aggregate(&mut self, other: &Self) {
        if let Some(data) = other.value() {
            let _ = self.distribution.add(&data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use crate::formula::test_support::TestContext;

    const KEY: &str = "complexity_distribution";

    fn leaf_counter(formula: &DistributionFormula, data: Option<&str>) -> DistributionCounter {
        let mut context = TestContext::file(KEY);
        if let Some(data) = data {
            context = context.with_measure(KEY, Measure::builder().create_string(data));
        }

        let mut counter = formula.create_new_counter();
        counter.initialize(&context);
        counter
    }

    #[test]
    fn test_blank_metric_key_is_rejected() {
        let _ = DistributionFormula::new("").unwrap_err();
    }

    #[test]
    fn test_merge_at_parent() {
        let formula = DistributionFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, Some("1=2;5=0;10=1")));
        parent.aggregate(&leaf_counter(&formula, None));
        parent.aggregate(&leaf_counter(&formula, Some("1=1;5=4;10=0")));

        let directory = TestContext::new(ComponentType::Directory, KEY);
        let measure = formula.create_measure(&parent, &directory).unwrap();
        assert_eq!(measure.data(), Some("1=3;5=4;10=1"));
    }

    #[test]
    fn test_leaves_get_no_measure() {
        let formula = DistributionFormula::new(KEY).unwrap();
        let leaf = leaf_counter(&formula, Some("1=2"));
        assert_eq!(leaf.value().as_deref(), Some("1=2"));
        assert!(formula.create_measure(&leaf, &TestContext::file(KEY)).is_none());
    }

    #[test]
    fn test_no_contribution_gets_no_measure() {
        let formula = DistributionFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, None));

        let project = TestContext::new(ComponentType::Project, KEY);
        assert!(formula.create_measure(&parent, &project).is_none());
    }

    #[test]
    fn test_empty_distribution_gets_no_measure() {
        let formula = DistributionFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, Some("")));
        parent.aggregate(&leaf_counter(&formula, Some(";")));

        let project = TestContext::new(ComponentType::Project, KEY);
        assert!(formula.create_measure(&parent, &project).is_none());

        // an empty sibling does not disturb a real one
        parent.aggregate(&leaf_counter(&formula, Some("1=2;5=1")));
        let measure = formula.create_measure(&parent, &project).unwrap();
        assert_eq!(measure.data(), Some("1=2;5=1"));
    }

    #[test]
    fn test_mismatched_bounds_discard_the_distribution() {
        let formula = DistributionFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, Some("1=2;5=0")));
        parent.aggregate(&leaf_counter(&formula, Some("1=2;10=0")));

        let module = TestContext::new(ComponentType::Module, KEY);
        assert!(formula.create_measure(&parent, &module).is_none());
    }

    #[test]
    fn test_aggregation_order_does_not_matter() {
        let formula = DistributionFormula::new(KEY).unwrap();
        let children: Vec<_> = [Some("0=1;2=0"), None, Some("0=0;2=3"), Some("0=5;2=5")]
            .into_iter()
            .map(|data| leaf_counter(&formula, data))
            .collect();

        let mut forward = formula.create_new_counter();
        children.iter().for_each(|child| forward.aggregate(child));

        let mut backward = formula.create_new_counter();
        children.iter().rev().for_each(|child| backward.aggregate(child));

        let mut inner = formula.create_new_counter();
        inner.aggregate(&children[2]);
        inner.aggregate(&children[3]);
        let mut grouped = formula.create_new_counter();
        grouped.aggregate(&children[0]);
        grouped.aggregate(&inner);

        assert_eq!(forward.value().as_deref(), Some("0=6;2=8"));
        assert_eq!(backward.value(), forward.value());
        assert_eq!(grouped.value(), forward.value());
    }
}
