use crate::Result;
use crate::component::Component;
use crate::measures::{Measure, MetricKey};
use compact_str::CompactString;
use ohno::app_err;
use std::collections::BTreeMap;

/// Where measures are read from and written to during a computation
pub trait MeasureRepository {
    /// The measure of `metric_key` on `component`, if there is one
    fn raw_measure(&self, component: &Component, metric_key: &str) -> Option<&Measure>;

    /// Store a computed measure
    ///
    /// # Errors
    ///
    /// Returns an error if the component already has a computed measure for the metric
    fn add(&mut self, component: &Component, metric_key: &MetricKey, measure: Measure) -> Result<()>;
}

type MeasuresByMetric = BTreeMap<CompactString, Measure>;

/// A [`MeasureRepository`] holding everything in memory, keyed by component key
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasureRepository {
    raw: BTreeMap<CompactString, MeasuresByMetric>,
    computed: BTreeMap<CompactString, MeasuresByMetric>,
}

impl InMemoryMeasureRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input measure, replacing any previous one for the same pair
    pub fn add_raw(&mut self, component_key: impl Into<CompactString>, metric_key: &MetricKey, measure: Measure) {
        let _ = self
            .raw
            .entry(component_key.into())
            .or_default()
            .insert(CompactString::from(metric_key.as_str()), measure);
    }

    /// The computed measures of one component, by metric key
    pub fn computed_for(&self, component_key: &str) -> impl Iterator<Item = (&str, &Measure)> {
        self.computed
            .get(component_key)
            .into_iter()
            .flat_map(|measures| measures.iter().map(|(metric, measure)| (metric.as_str(), measure)))
    }

    /// Every computed measure as `(component key, metric key, measure)`, ordered by component then metric
    pub fn computed(&self) -> impl Iterator<Item = (&str, &str, &Measure)> {
        self.computed.iter().flat_map(|(component, measures)| {
            measures
                .iter()
                .map(move |(metric, measure)| (component.as_str(), metric.as_str(), measure))
        })
    }

    /// The computed measure of `metric_key` on the component `component_key`
    #[must_use]
    pub fn computed_measure(&self, component_key: &str, metric_key: &str) -> Option<&Measure> {
        self.computed.get(component_key).and_then(|measures| measures.get(metric_key))
    }

    #[must_use]
    pub fn computed_len(&self) -> usize {
        self.computed.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.raw.values().map(BTreeMap::len).sum()
    }
}

impl MeasureRepository for InMemoryMeasureRepository {
    fn raw_measure(&self, component: &Component, metric_key: &str) -> Option<&Measure> {
        self.computed_measure(component.key(), metric_key)
            .or_else(|| self.raw.get(component.key()).and_then(|measures| measures.get(metric_key)))
    }

    fn add(&mut self, component: &Component, metric_key: &MetricKey, measure: Measure) -> Result<()> {
        let measures = self.computed.entry(CompactString::from(component.key())).or_default();
        if measures.contains_key(metric_key.as_str()) {
            return Err(app_err!(
                "a measure for metric '{metric_key}' was already computed for component '{}'",
                component.key()
            ));
        }

        let _ = measures.insert(CompactString::from(metric_key.as_str()), measure);
        Ok(())
    }
}
