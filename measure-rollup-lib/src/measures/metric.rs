use super::{MetricKey, MetricType};
use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    key: MetricKey,
    name: CompactString,
    value_type: MetricType,
}

impl Metric {
    #[must_use]
    pub fn new(key: MetricKey, name: impl Into<CompactString>, value_type: MetricType) -> Self {
        Self {
            key,
            name: name.into(),
            value_type,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &MetricKey {
        &self.key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value_type(&self) -> MetricType {
        self.value_type
    }
}
