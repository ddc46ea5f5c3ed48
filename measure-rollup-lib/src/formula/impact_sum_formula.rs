use super::encoding::ImpactCounts;
use super::{Counter, CounterInitializationContext, CreateMeasureContext, Formula, LOG_TARGET};
use crate::Result;
use crate::measures::{Measure, MetricKey};
use compact_str::CompactString;

/// Adds up per-severity impact counts over all leaves of a subtree.
///
/// Unlike the other formulas this one is all-or-nothing: a single leaf
/// without an impact measure discards the value of every ancestor. Measures
/// are emitted on every component, leaves included.
#[derive(Debug, Clone)]
pub struct ImpactSumFormula {
    output_metric_keys: [MetricKey; 1],
}

impl ImpactSumFormula {
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

impl Formula for ImpactSumFormula {
    type Counter = ImpactSumCounter;

    fn create_new_counter(&self) -> Self::Counter {
        ImpactSumCounter {
            metric_key: self.metric_key().clone(),
            state: ImpactState::Unset,
        }
    }

    fn create_measure(&self, counter: &Self::Counter, _context: &dyn CreateMeasureContext) -> Option<Measure> {
        counter.value().map(|data| Measure::builder().create_string(data))
    }

    fn output_metric_keys(&self) -> &[MetricKey] {
        &self.output_metric_keys
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImpactState {
    Unset,
    Valid(ImpactCounts),

    /// Some contributor had no value; never leaves this state
    Tainted,
}

#[derive(Debug, Clone)]
pub struct ImpactSumCounter {
    metric_key: MetricKey,
    state: ImpactState,
}

impl ImpactSumCounter {
    /// The encoded counts, present only if every contributor had a value
    #[must_use]
    pub fn value(&self) -> Option<String> {
        match &self.state {
            ImpactState::Valid(counts) => Some(counts.to_string()),
            ImpactState::Unset | ImpactState::Tainted => None,
        }
    }

    /// Whether some contributor had no value
    #[must_use]
    pub const fn is_tainted(&self) -> bool {
        matches!(self.state, ImpactState::Tainted)
    }

    fn merge(&mut self, counts: Option<&ImpactCounts>) {
        self.state = match (&mut self.state, counts) {
            (ImpactState::Tainted, _) | (_, None) => ImpactState::Tainted,
            (ImpactState::Unset, Some(counts)) => ImpactState::Valid(*counts),
            (ImpactState::Valid(current), Some(counts)) => {
                let _ = current.add(counts);
                ImpactState::Valid(*current)
            }
        };
    }
}

impl Counter for ImpactSumCounter {
    fn initialize(&mut self, context: &dyn CounterInitializationContext) {
        let counts = match context.measure(self.metric_key.as_str()).map(Measure::data) {
            Some(Some(data)) => match ImpactCounts::parse(data) {
                Ok(counts) => Some(counts),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Ignoring measure '{}' on '{}': {e}", self.metric_key, context.leaf().key());
                    None
                }
            },
            Some(None) => {
                log::debug!(target: LOG_TARGET, "Ignoring measure '{}' on '{}': not an impact value", self.metric_key, context.leaf().key());
                None
            }
            None => None,
        };

        self.merge(counts.as_ref());
    }

    fn aggregate(&mut self, other: &Self) {
        match &other.state {
            ImpactState::Valid(counts) => self.merge(Some(counts)),
            ImpactState::Unset | ImpactState::Tainted => self.merge(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use crate::formula::encoding::ImpactSeverity;
    use crate::formula::test_support::TestContext;

    const KEY: &str = "reliability_issues";

    fn encoded(high: u64, low: u64) -> String {
        let mut counts = ImpactCounts::default();
        let _ = counts.increment(ImpactSeverity::High, high).increment(ImpactSeverity::Low, low);
        counts.to_string()
    }

    fn leaf_counter(formula: &ImpactSumFormula, data: Option<&str>) -> ImpactSumCounter {
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
        let _ = ImpactSumFormula::new(" ").unwrap_err();
    }

    #[test]
    fn test_sum_at_parent() {
        let formula = ImpactSumFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, Some(&encoded(1, 2))));
        parent.aggregate(&leaf_counter(&formula, Some(&encoded(3, 0))));

        let project = TestContext::new(ComponentType::Project, KEY);
        let measure = formula.create_measure(&parent, &project).unwrap();
        assert_eq!(measure.data(), Some(encoded(4, 2).as_str()));
    }

    #[test]
    fn test_one_missing_leaf_discards_everything() {
        let formula = ImpactSumFormula::new(KEY).unwrap();
        let present = leaf_counter(&formula, Some(&encoded(1, 0)));
        let absent = leaf_counter(&formula, None);
        assert!(absent.is_tainted());

        let mut parent = formula.create_new_counter();
        parent.aggregate(&present);
        parent.aggregate(&absent);
        assert_eq!(parent.value(), None);

        let directory = TestContext::new(ComponentType::Directory, KEY);
        assert!(formula.create_measure(&parent, &directory).is_none());

        // taint survives later valid contributions and propagates upward
        parent.aggregate(&present);
        let mut grandparent = formula.create_new_counter();
        grandparent.aggregate(&leaf_counter(&formula, Some(&encoded(0, 1))));
        grandparent.aggregate(&parent);
        assert!(grandparent.is_tainted());
        assert_eq!(grandparent.value(), None);
    }

    #[test]
    fn test_leaves_get_a_measure() {
        let formula = ImpactSumFormula::new(KEY).unwrap();
        let leaf = leaf_counter(&formula, Some(&encoded(2, 2)));
        let measure = formula.create_measure(&leaf, &TestContext::file(KEY)).unwrap();
        assert_eq!(measure.data(), Some(encoded(2, 2).as_str()));
    }

    #[test]
    fn test_undecodable_leaf_taints() {
        let formula = ImpactSumFormula::new(KEY).unwrap();
        let leaf = leaf_counter(&formula, Some("not json"));
        assert!(leaf.is_tainted());
        assert!(formula.create_measure(&leaf, &TestContext::file(KEY)).is_none());
    }

    #[test]
    fn test_parent_without_children_has_no_value() {
        let formula = ImpactSumFormula::new(KEY).unwrap();
        let parent = formula.create_new_counter();
        assert!(!parent.is_tainted());
        assert_eq!(parent.value(), None);
    }

    #[test]
    fn test_aggregation_order_does_not_matter() {
        let formula = ImpactSumFormula::new(KEY).unwrap();
        let children = [
            leaf_counter(&formula, Some(&encoded(1, 0))),
            leaf_counter(&formula, Some(&encoded(0, 5))),
            leaf_counter(&formula, Some(&encoded(2, 2))),
        ];

        let mut forward = formula.create_new_counter();
        children.iter().for_each(|child| forward.aggregate(child));

        let mut backward = formula.create_new_counter();
        children.iter().rev().for_each(|child| backward.aggregate(child));

        assert_eq!(forward.value(), Some(encoded(3, 7)));
        assert_eq!(backward.value(), forward.value());
    }
}
