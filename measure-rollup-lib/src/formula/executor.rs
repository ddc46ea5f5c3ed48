use super::{Counter, CounterInitializationContext, CreateMeasureContext, DynFormula, Formula};
use crate::Result;
use crate::component::{Component, ComponentType};
use crate::measures::{Measure, Metric, MetricKey, MetricRepository};
use crate::period::{Period, PeriodsHolder};
use crate::repository::MeasureRepository;
use core::fmt;
use ohno::{EnrichableExt, app_err};
use std::collections::BTreeMap;

const LOG_TARGET: &str = "  executor";

/// Configures a [`FormulaExecutor`]
#[derive(Debug)]
pub struct FormulaExecutorBuilder {
    metrics: MetricRepository,
    periods: PeriodsHolder,
}

impl FormulaExecutorBuilder {
    #[must_use]
    pub fn with_periods(mut self, periods: PeriodsHolder) -> Self {
        self.periods = periods;
        self
    }

    /// Validate the formulas against the registered metrics and build the executor
    ///
    /// # Errors
    ///
    /// Returns an error if a formula produces an unregistered metric, or if two
    /// formulas produce the same metric
    pub fn build_for(self, formulas: Vec<Box<dyn DynFormula>>) -> Result<FormulaExecutor> {
        let mut producers: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, formula) in formulas.iter().enumerate() {
            for key in formula.metric_keys() {
                let _ = self
                    .metrics
                    .require(key.as_str())
                    .map_err(|e| e.enrich_with(|| format!("formula #{} produces metric '{key}'", index + 1)))?;

                if let Some(previous) = producers.insert(key.as_str(), index) {
                    return Err(app_err!(
                        "metric '{key}' is produced by both formula #{} and formula #{}",
                        previous + 1,
                        index + 1
                    ));
                }
            }
        }

        Ok(FormulaExecutor {
            metrics: self.metrics,
            periods: self.periods,
            formulas,
        })
    }
}

/// Computes the measures of a component tree by driving a set of formulas.
///
/// Each formula walks the tree in post-order: every leaf gets a fresh counter
/// seeded from its raw measures, and every internal node folds in the
/// counters of its children. An internal node's counter only comes into
/// existence once one of its children reports one, so a subtree without any
/// leaf produces nothing. The measures the formula emits are added to the
/// repository, except on project views, whose measures are always copied
/// from the project they reference.
#[derive(Debug)]
pub struct FormulaExecutor {
    metrics: MetricRepository,
    periods: PeriodsHolder,
    formulas: Vec<Box<dyn DynFormula>>,
}

impl FormulaExecutor {
    #[must_use]
    pub fn builder(metrics: MetricRepository) -> FormulaExecutorBuilder {
        FormulaExecutorBuilder {
            metrics,
            periods: PeriodsHolder::default(),
        }
    }

    #[must_use]
    pub const fn metrics(&self) -> &MetricRepository {
        &self.metrics
    }

    #[must_use]
    pub const fn periods(&self) -> &PeriodsHolder {
        &self.periods
    }

    #[must_use]
    pub fn formulas(&self) -> &[Box<dyn DynFormula>] {
        &self.formulas
    }

    /// Compute every formula over the tree rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if the repository refuses a computed measure
    pub fn execute(&self, root: &Component, repository: &mut dyn MeasureRepository) -> Result<ExecutionSummary> {
        let mut summary = ExecutionSummary::default();

        for formula in &self.formulas {
            let label = formula
                .metric_keys()
                .iter()
                .map(|key| key.as_str())
                .collect::<Vec<_>>()
                .join(",");

            let mut walk = Walk {
                metrics: &self.metrics,
                periods: self.periods.periods(),
                repository: &mut *repository,
                root,
            };

            let added = formula
                .walk(&mut walk)
                .map_err(|e| e.enrich_with(|| format!("could not compute '{label}'")))?;

            log::debug!(target: LOG_TARGET, "Formula for '{label}' added {added} measures");
            summary.added.push((formula.metric_keys().to_vec(), added));
        }

        log::info!(
            target: LOG_TARGET,
            "Computed {} measures with {} formulas over '{}'",
            summary.total(),
            self.formulas.len(),
            root.key()
        );

        Ok(summary)
    }
}

/// How many measures each formula added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    added: Vec<(Vec<MetricKey>, usize)>,
}

impl ExecutionSummary {
    /// `(output metric keys, measures added)` per formula, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&[MetricKey], usize)> {
        self.added.iter().map(|(keys, count)| (keys.as_slice(), *count))
    }

    #[must_use]
    pub fn added_for(&self, metric_key: &str) -> Option<usize> {
        self.iter()
            .find(|(keys, _)| keys.iter().any(|key| key == metric_key))
            .map(|(_, count)| count)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.added.iter().map(|(_, count)| count).sum()
    }
}

/// One formula's pass over a tree
pub struct Walk<'a> {
    metrics: &'a MetricRepository,
    periods: &'a [Period],
    repository: &'a mut dyn MeasureRepository,
    root: &'a Component,
}

impl fmt::Debug for Walk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk")
            .field("periods", &self.periods)
            .field("root", &self.root.key())
            .finish_non_exhaustive()
    }
}

impl Walk<'_> {
    pub(super) fn run<F: Formula>(&mut self, formula: &F) -> Result<usize> {
        let registry = self.metrics;
        let metrics = formula
            .output_metric_keys()
            .iter()
            .map(|key| registry.require(key.as_str()))
            .collect::<Result<Vec<_>>>()?;

        let mut added = 0;
        let _ = self.visit(formula, &metrics, self.root, &mut added)?;
        Ok(added)
    }

    fn visit<F: Formula>(&mut self, formula: &F, metrics: &[&Metric], component: &Component, added: &mut usize) -> Result<Option<F::Counter>> {
        let counter = if component.component_type().is_leaf() {
            let mut counter = formula.create_new_counter();
            counter.initialize(&LeafContext {
                leaf: component,
                repository: &*self.repository,
                periods: self.periods,
            });
            Some(counter)
        } else {
            let mut counter: Option<F::Counter> = None;
            for child in component.children() {
                if let Some(child_counter) = self.visit(formula, metrics, child, added)? {
                    counter
                        .get_or_insert_with(|| formula.create_new_counter())
                        .aggregate(&child_counter);
                }
            }
            counter
        };

        if let Some(counter) = &counter {
            *added += self.emit(formula, counter, metrics, component)?;
        }

        Ok(counter)
    }

    fn emit<F: Formula>(&mut self, formula: &F, counter: &F::Counter, metrics: &[&Metric], component: &Component) -> Result<usize> {
        if component.component_type() == ComponentType::ProjectView {
            return Ok(0);
        }

        let mut added = 0;
        for metric in metrics {
            let context = MeasureContext {
                component,
                metric,
                periods: self.periods,
            };

            if let Some(measure) = formula.create_measure(counter, &context) {
                log::trace!(target: LOG_TARGET, "'{}' on '{}': {:?}", metric.key(), component.key(), measure.value());
                self.repository.add(component, metric.key(), measure)?;
                added += 1;
            }
        }

        Ok(added)
    }
}

struct LeafContext<'a> {
    leaf: &'a Component,
    repository: &'a dyn MeasureRepository,
    periods: &'a [Period],
}

impl CounterInitializationContext for LeafContext<'_> {
    fn leaf(&self) -> &Component {
        self.leaf
    }

    fn measure(&self, metric_key: &str) -> Option<&Measure> {
        self.repository.raw_measure(self.leaf, metric_key)
    }

    fn periods(&self) -> &[Period] {
        self.periods
    }
}

struct MeasureContext<'a> {
    component: &'a Component,
    metric: &'a Metric,
    periods: &'a [Period],
}

impl CreateMeasureContext for MeasureContext<'_> {
    fn component(&self) -> &Component {
        self.component
    }

    fn metric(&self) -> &Metric {
        self.metric
    }

    fn periods(&self) -> &[Period] {
        self.periods
    }
}
