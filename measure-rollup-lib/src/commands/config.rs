use crate::Result;
use crate::formula::{
    DistributionFormula, DynFormula, FormulaExecutor, ImpactSumFormula, IntSumFormula, LongSumFormula, MaxRatingFormula,
    VariationSumFormula,
};
use crate::measures::{Metric, MetricKey, MetricRepository, MetricType};
use crate::period::{Period, PeriodsHolder};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use ohno::{EnrichableExt, IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use strum::Display;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The file looked up in the base directory when no configuration path is given
pub const CONFIG_FILE_NAME: &str = "rollup.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Metrics that can be stored on components
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,

    /// Formulas to run, in order
    #[serde(default)]
    pub formulas: Vec<FormulaConfig>,

    /// Comparison periods whose variations are aggregated
    #[serde(default)]
    pub periods: Vec<PeriodConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub key: CompactString,

    /// Human-readable name, defaults to the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CompactString>,

    #[serde(rename = "type")]
    pub value_type: MetricType,
}

/// The built-in formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FormulaKind {
    IntSum,
    LongSum,
    Distribution,
    ImpactSum,
    MaxRating,
    VariationSum,
}

impl FormulaKind {
    /// Whether a metric of this type can hold what the formula produces
    const fn accepts(self, value_type: MetricType) -> bool {
        match self {
            Self::IntSum => matches!(value_type, MetricType::Int),
            Self::LongSum => matches!(value_type, MetricType::Long),
            Self::Distribution => matches!(value_type, MetricType::Distribution),
            Self::ImpactSum => matches!(value_type, MetricType::Data),
            Self::MaxRating => matches!(value_type, MetricType::Rating),
            Self::VariationSum => matches!(value_type, MetricType::Int | MetricType::Long),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FormulaConfig {
    pub kind: FormulaKind,

    /// The metric the formula reads on leaves and writes on every level
    pub metric: CompactString,

    /// Value used for leaves without a raw measure (sums only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodConfig {
    /// Period slot, 1 to 5
    pub index: usize,

    /// Free-form description of how the period was chosen, e.g. `previous_version`
    pub mode: CompactString,

    /// Snapshot the period compares against, RFC 3339
    pub date: DateTime<Utc>,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config
            .validate()
            .map_err(|e| e.enrich_with(|| format!("validating configuration file '{final_path}'")))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a metric or period is malformed, or if a formula does
    /// not fit the metric it names
    pub fn validate(&self) -> Result<()> {
        let metrics = self.metric_repository()?;
        let _ = self.periods_holder()?;

        for formula in &self.formulas {
            let metric = metrics
                .require(&formula.metric)
                .map_err(|e| e.enrich_with(|| format!("{} formula", formula.kind)))?;

            if !formula.kind.accepts(metric.value_type()) {
                bail!(
                    "{} formula cannot produce metric '{}' of type {}",
                    formula.kind,
                    formula.metric,
                    metric.value_type()
                );
            }

            if let Some(default) = formula.default {
                match formula.kind {
                    FormulaKind::IntSum if i32::try_from(default).is_err() => {
                        bail!("default {default} of metric '{}' does not fit in an int", formula.metric);
                    }
                    FormulaKind::IntSum | FormulaKind::LongSum => {}
                    FormulaKind::Distribution | FormulaKind::ImpactSum | FormulaKind::MaxRating | FormulaKind::VariationSum => {
                        bail!("{} formula of metric '{}' does not take a default", formula.kind, formula.metric);
                    }
                }
            }
        }

        let _ = FormulaExecutor::builder(metrics).build_for(self.formulas()?)?;
        Ok(())
    }

    /// Build the registry of configured metrics
    ///
    /// # Errors
    ///
    /// Returns an error if a key is blank or registered twice
    pub fn metric_repository(&self) -> Result<MetricRepository> {
        let metrics = self
            .metrics
            .iter()
            .map(|m| {
                let key = MetricKey::new(m.key.clone())?;
                let name = m.name.clone().unwrap_or_else(|| m.key.clone());
                Ok(Metric::new(key, name, m.value_type))
            })
            .collect::<Result<Vec<_>>>()?;

        MetricRepository::new(metrics)
    }

    /// Build the set of configured periods
    ///
    /// # Errors
    ///
    /// Returns an error if a period index is out of range or used twice
    pub fn periods_holder(&self) -> Result<PeriodsHolder> {
        let periods = self
            .periods
            .iter()
            .map(|p| Period::new(p.index, p.mode.clone(), p.date))
            .collect::<Result<Vec<_>>>()?;

        PeriodsHolder::new(periods)
    }

    /// Instantiate the configured formulas
    ///
    /// # Errors
    ///
    /// Returns an error if a formula names a blank metric key or carries an
    /// unusable default
    pub fn formulas(&self) -> Result<Vec<Box<dyn DynFormula>>> {
        self.formulas.iter().map(FormulaConfig::instantiate).collect()
    }

    /// Build an executor running every configured formula
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent
    pub fn executor(&self) -> Result<FormulaExecutor> {
        self.validate()?;
        FormulaExecutor::builder(self.metric_repository()?)
            .with_periods(self.periods_holder()?)
            .build_for(self.formulas()?)
    }
}

impl FormulaConfig {
    fn instantiate(&self) -> Result<Box<dyn DynFormula>> {
        let metric = self.metric.clone();
        let formula: Box<dyn DynFormula> = match (self.kind, self.default) {
            (FormulaKind::IntSum, None) => Box::new(IntSumFormula::new(metric)?),
            (FormulaKind::IntSum, Some(default)) => {
                let default = i32::try_from(default).into_app_err_with(|| format!("default {default} does not fit in an int"))?;
                Box::new(IntSumFormula::with_default(metric, default)?)
            }
            (FormulaKind::LongSum, None) => Box::new(LongSumFormula::new(metric)?),
            (FormulaKind::LongSum, Some(default)) => Box::new(LongSumFormula::with_default(metric, default)?),
            (FormulaKind::Distribution, None) => Box::new(DistributionFormula::new(metric)?),
            (FormulaKind::ImpactSum, None) => Box::new(ImpactSumFormula::new(metric)?),
            (FormulaKind::MaxRating, None) => Box::new(MaxRatingFormula::new(metric)?),
            (FormulaKind::VariationSum, None) => Box::new(VariationSumFormula::new(metric)?),
            (kind @ (FormulaKind::Distribution | FormulaKind::ImpactSum | FormulaKind::MaxRating | FormulaKind::VariationSum), Some(_)) => {
                return Err(app_err!("{kind} formula of metric '{}' does not take a default", self.metric));
            }
        };

        Ok(formula)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
