use crate::component::{Component, ComponentType};
use crate::measures::{Measure, MetricRepository, MetricType};
use crate::repository::InMemoryMeasureRepository;
use compact_str::CompactString;

/// A computed measure together with what is needed to display it
#[derive(Debug, Clone)]
pub struct ReportableMeasure {
    pub metric_key: CompactString,
    pub metric_name: CompactString,
    pub value_type: MetricType,
    pub measure: Measure,
}

/// A component of the tree with its computed measures, ready for reporting.
#[derive(Debug, Clone)]
pub struct ReportableComponent {
    pub key: CompactString,
    pub component_type: ComponentType,

    /// Distance from the root of the tree
    pub depth: usize,

    pub measures: Vec<ReportableMeasure>,
}

impl ReportableComponent {
    /// Flatten a tree into reportable components, parents before children.
    ///
    /// Every component is listed, including those without computed measures,
    /// so the tree shape survives in the reports.
    #[must_use]
    pub fn collect(root: &Component, metrics: &MetricRepository, repository: &InMemoryMeasureRepository) -> Vec<Self> {
        let mut components = Vec::new();
        root.walk_pre_order(&mut |component, depth| {
            let measures = repository
                .computed_for(component.key())
                .map(|(metric_key, measure)| {
                    let metric = metrics.by_key(metric_key);
                    ReportableMeasure {
                        metric_key: CompactString::from(metric_key),
                        metric_name: metric.map_or_else(|| CompactString::from(metric_key), |m| CompactString::from(m.name())),
                        value_type: metric.map_or(MetricType::String, |m| m.value_type()),
                        measure: measure.clone(),
                    }
                })
                .collect();

            components.push(Self {
                key: CompactString::from(component.key()),
                component_type: component.component_type(),
                depth,
                measures,
            });
        });

        components
    }
}
