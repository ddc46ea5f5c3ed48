use super::{Component, ComponentType};
use crate::Result;
use crate::measures::{Measure, MeasureVariations, Metric, MetricRepository, MetricType, Rating};
use crate::repository::InMemoryMeasureRepository;
use compact_str::CompactString;
use core::str::FromStr;
use ohno::{EnrichableExt, IntoAppError, app_err, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

const LOG_TARGET: &str = "    loader";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDoc {
    key: CompactString,

    #[serde(rename = "type")]
    component_type: ComponentType,

    #[serde(default)]
    children: Vec<Self>,

    #[serde(default)]
    measures: BTreeMap<CompactString, MeasureDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeasureDoc {
    #[serde(default)]
    value: Value,

    #[serde(default)]
    variations: BTreeMap<usize, f64>,
}

/// Load a component tree and the raw measures of its components from JSON.
///
/// Each node is an object with a `key`, a `type`, optional `children`, and
/// optional `measures` mapping metric keys to `{ "value": ..., "variations": { "<period>": ... } }`.
/// Values are checked against the declared type of their metric.
///
/// # Errors
///
/// Returns an error if the document is malformed, a component key is used
/// twice, a leaf has children, a child belongs to another family than its
/// parent or sits above it, or a measure names an unknown metric or has a
/// value of the wrong type
pub fn load_tree(text: &str, metrics: &MetricRepository) -> Result<(Component, InMemoryMeasureRepository)> {
    let doc: NodeDoc = serde_json::from_str(text).into_app_err("unable to parse the component tree")?;

    let mut loader = Loader {
        metrics,
        repository: InMemoryMeasureRepository::new(),
        seen: HashSet::new(),
    };

    let root = loader.convert(doc, None)?;

    log::info!(
        target: LOG_TARGET,
        "Loaded {} components with {} raw measures",
        loader.seen.len(),
        loader.repository.raw_len()
    );

    Ok((root, loader.repository))
}

struct Loader<'a> {
    metrics: &'a MetricRepository,
    repository: InMemoryMeasureRepository,
    seen: HashSet<CompactString>,
}

impl Loader<'_> {
    fn convert(&mut self, doc: NodeDoc, parent: Option<ComponentType>) -> Result<Component> {
        let NodeDoc {
            key,
            component_type,
            children,
            measures,
        } = doc;

        if !self.seen.insert(key.clone()) {
            bail!("component '{key}' appears more than once in the tree");
        }

        if let Some(parent) = parent {
            if !component_type.is_same_family(parent) {
                bail!("{component_type} component '{key}' cannot be a child of a {parent} component");
            }

            if component_type.depth() == 0 || component_type.depth() < parent.depth() {
                bail!("{component_type} component '{key}' cannot be nested below a {parent} component");
            }
        }

        if component_type.is_leaf() && !children.is_empty() {
            bail!("{component_type} component '{key}' cannot have children");
        }

        for (metric_key, measure_doc) in measures {
            let (metric, measure) = self
                .metrics
                .require(&metric_key)
                .and_then(|metric| to_measure(metric, measure_doc).map(|measure| (metric, measure)))
                .map_err(|e| e.enrich_with(|| format!("invalid measure on component '{key}'")))?;

            log::trace!(target: LOG_TARGET, "Raw measure '{metric_key}' on '{key}'");
            self.repository.add_raw(key.clone(), metric.key(), measure);
        }

        let children = children
            .into_iter()
            .map(|child| self.convert(child, Some(component_type)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Component::new(key, component_type).with_children(children))
    }
}

fn to_measure(metric: &Metric, doc: MeasureDoc) -> Result<Measure> {
    let mut builder = Measure::builder();
    if !doc.variations.is_empty() {
        builder = builder.variations(MeasureVariations::from_indexed(doc.variations)?);
    }

    let value = doc.value;
    let measure = match (metric.value_type(), &value) {
        (_, Value::Null) => Some(builder.create_no_value()),
        (MetricType::Int, v) => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(|n| builder.create_int(n)),
        (MetricType::Long, v) => v.as_i64().map(|n| builder.create_long(n)),
        (MetricType::Float | MetricType::Percent, v) => v.as_f64().map(|n| builder.create_double(n)),
        (MetricType::Bool, v) => v.as_bool().map(|b| builder.create_bool(b)),
        (MetricType::String | MetricType::Data | MetricType::Distribution, Value::String(s)) => Some(builder.create_string(s.as_str())),
        (MetricType::Data, Value::Object(_)) => Some(builder.create_string(value.to_string())),
        (MetricType::Rating, Value::String(s)) => Rating::from_str(s).ok().map(|r| builder.create_rating(r)),
        (MetricType::Rating, v) => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .and_then(Rating::from_ordinal)
            .map(|r| builder.create_rating(r)),
        (MetricType::String | MetricType::Data | MetricType::Distribution, _) => None,
    };

    measure.ok_or_else(|| app_err!("value {value} is not a valid {} for metric '{}'", metric.value_type(), metric.key()))
}
