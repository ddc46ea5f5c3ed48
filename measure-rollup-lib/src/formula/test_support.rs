use super::{CounterInitializationContext, CreateMeasureContext};
use crate::component::{Component, ComponentType};
use crate::measures::{Measure, Metric, MetricKey, MetricType};
use crate::period::Period;
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

/// A single component with its raw measures, usable as both counter and measure context
#[derive(Debug)]
pub struct TestContext {
    component: Component,
    metric: Metric,
    measures: BTreeMap<String, Measure>,
    periods: Vec<Period>,
}

impl TestContext {
    pub fn new(component_type: ComponentType, metric_key: &str) -> Self {
        Self {
            component: Component::new("test", component_type),
            metric: Metric::new(MetricKey::new(metric_key).unwrap(), metric_key, MetricType::Int),
            measures: BTreeMap::new(),
            periods: Vec::new(),
        }
    }

    pub fn file(metric_key: &str) -> Self {
        Self::new(ComponentType::File, metric_key)
    }

    pub fn with_measure(mut self, metric_key: &str, measure: Measure) -> Self {
        let _ = self.measures.insert(metric_key.to_string(), measure);
        self
    }

    pub fn with_periods(mut self, periods: Vec<Period>) -> Self {
        self.periods = periods;
        self
    }
}

impl CounterInitializationContext for TestContext {
    fn leaf(&self) -> &Component {
        &self.component
    }

    fn measure(&self, metric_key: &str) -> Option<&Measure> {
        self.measures.get(metric_key)
    }

    fn periods(&self) -> &[Period] {
        &self.periods
    }
}

impl CreateMeasureContext for TestContext {
    fn component(&self) -> &Component {
        &self.component
    }

    fn metric(&self) -> &Metric {
        &self.metric
    }

    fn periods(&self) -> &[Period] {
        &self.periods
    }
}

pub fn period(index: usize) -> Period {
    Period::new(index, "previous_version", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()).unwrap()
}
