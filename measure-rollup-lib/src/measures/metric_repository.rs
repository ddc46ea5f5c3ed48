use super::Metric;
use crate::Result;
use compact_str::CompactString;
use ohno::app_err;
use std::collections::BTreeMap;

/// The registered metrics, looked up by key
#[derive(Debug, Clone, Default)]
pub struct MetricRepository {
    metrics: BTreeMap<CompactString, Metric>,
}

impl MetricRepository {
    /// Register a set of metrics
    ///
    /// # Errors
    ///
    /// Returns an error if two metrics share a key
    pub fn new(metrics: impl IntoIterator<Item = Metric>) -> Result<Self> {
        let mut by_key = BTreeMap::new();
        for metric in metrics {
            let key = CompactString::from(metric.key().as_str());
            if by_key.contains_key(&key) {
                return Err(app_err!("metric '{key}' is registered more than once"));
            }
            let _ = by_key.insert(key, metric);
        }

        Ok(Self { metrics: by_key })
    }

    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Metric> {
        self.metrics.get(key)
    }

    /// Look up a metric that must be registered
    ///
    /// # Errors
    ///
    /// Returns an error if no metric has this key
    pub fn require(&self, key: &str) -> Result<&Metric> {
        self.by_key(key).ok_or_else(|| app_err!("unknown metric '{key}'"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
