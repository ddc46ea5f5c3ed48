use super::{Counter, CounterInitializationContext, CreateMeasureContext, Formula, LOG_TARGET};
use crate::Result;
use crate::component::CrawlerDepthLimit;
use crate::measures::{Measure, MetricKey, Rating};
use compact_str::CompactString;

/// Keeps the worst rating of one metric over all leaves of a subtree.
///
/// Ratings compare by ordinal, so `E` beats `A`. Leaves without a rating are
/// skipped and measures are only emitted above the leaf level.
#[derive(Debug, Clone)]
pub struct MaxRatingFormula {
    output_metric_keys: [MetricKey; 1],
}

impl MaxRatingFormula {
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

impl Formula for MaxRatingFormula {
    type Counter = MaxRatingCounter;

    fn create_new_counter(&self) -> Self::Counter {
        MaxRatingCounter {
            metric_key: self.metric_key().clone(),
            value: None,
        }
    }

    fn create_measure(&self, counter: &Self::Counter, context: &dyn CreateMeasureContext) -> Option<Measure> {
        if !CrawlerDepthLimit::LEAVES.is_deeper_than(context.component().component_type()) {
            return None;
        }

        counter.value.map(|rating| Measure::builder().create_rating(rating))
    }

    fn output_metric_keys(&self) -> &[MetricKey] {
        &self.output_metric_keys
    }
}

#[derive(Debug, Clone)]
pub struct MaxRatingCounter {
    metric_key: MetricKey,
    value: Option<Rating>,
}

impl MaxRatingCounter {
    /// The worst rating seen so far, `None` until something contributed
    #[must_use]
    pub const fn value(&self) -> Option<Rating> {
        self.value
    }

    fn add(&mut self, rating: Rating) {
        self.value = Some(self.value.map_or(rating, |current| current.max(rating)));
    }
}

impl Counter for MaxRatingCounter {
    fn initialize(&mut self, context: &dyn CounterInitializationContext) {
        let Some(measure) = context.measure(self.metric_key.as_str()) else {
            return;
        };

        if let Some(rating) = measure.rating_value() {
            self.add(rating);
        } else {
            log::debug!(target: LOG_TARGET, "Ignoring measure '{}' on '{}': not a rating", self.metric_key, context.leaf().key());
        }
    }

    fn aggregate(&mut self, other: &Self) {
        if let Some(rating) = other.value {
            self.add(rating);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use crate::formula::test_support::TestContext;

    const KEY: &str = "sqale_rating";

    fn leaf_counter(formula: &MaxRatingFormula, rating: Option<Rating>) -> MaxRatingCounter {
        let mut context = TestContext::file(KEY);
        if let Some(rating) = rating {
            context = context.with_measure(KEY, Measure::builder().create_rating(rating));
        }

        let mut counter = formula.create_new_counter();
        counter.initialize(&context);
        counter
    }

    #[test]
    fn test_blank_metric_key_is_rejected() {
        let _ = MaxRatingFormula::new(" ").unwrap_err();
    }

    #[test]
    fn test_worst_rating_wins() {
        let formula = MaxRatingFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, Some(Rating::B)));
        parent.aggregate(&leaf_counter(&formula, None));
        parent.aggregate(&leaf_counter(&formula, Some(Rating::D)));
        parent.aggregate(&leaf_counter(&formula, Some(Rating::A)));
        assert_eq!(parent.value(), Some(Rating::D));

        let directory = TestContext::new(ComponentType::Directory, KEY);
        let measure = formula.create_measure(&parent, &directory).unwrap();
        assert_eq!(measure.rating_value(), Some(Rating::D));
    }

    #[test]
    fn test_leaves_get_no_measure() {
        let formula = MaxRatingFormula::new(KEY).unwrap();
        let leaf = leaf_counter(&formula, Some(Rating::C));
        assert_eq!(leaf.value(), Some(Rating::C));
        assert!(formula.create_measure(&leaf, &TestContext::file(KEY)).is_none());
    }

    #[test]
    fn test_no_contribution_gets_no_measure() {
        let formula = MaxRatingFormula::new(KEY).unwrap();
        let mut parent = formula.create_new_counter();
        parent.aggregate(&leaf_counter(&formula, None));

        let project = TestContext::new(ComponentType::Project, KEY);
        assert!(formula.create_measure(&parent, &project).is_none());
    }

    #[test]
    fn test_non_rating_measure_is_ignored() {
        let formula = MaxRatingFormula::new(KEY).unwrap();
        let context = TestContext::file(KEY).with_measure(KEY, Measure::builder().create_int(9));
        let mut counter = formula.create_new_counter();
        counter.initialize(&context);
        assert_eq!(counter.value(), None);
    }

    #[test]
    fn test_aggregation_order_does_not_matter() {
        let formula = MaxRatingFormula::new(KEY).unwrap();
        let children: Vec<_> = [Some(Rating::C), None, Some(Rating::E), Some(Rating::A)]
            .into_iter()
            .map(|rating| leaf_counter(&formula, rating))
            .collect();

        let mut forward = formula.create_new_counter();
        children.iter().for_each(|child| forward.aggregate(child));

        let mut backward = formula.create_new_counter();
        children.iter().rev().for_each(|child| backward.aggregate(child));

        assert_eq!(forward.value(), Some(Rating::E));
        assert_eq!(backward.value(), forward.value());
    }
}
