use crate::Result;
use core::fmt;
use ohno::IntoAppError;
use serde::Deserialize;
use strum::{Display, EnumIter};

/// Severity of an issue's impact on a software quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ImpactSeverity {
    Info,
    Low,
    Medium,
    High,
    Blocker,
}

/// Issue counts per impact severity, plus their total.
///
/// Encoded as a JSON object such as
/// `{"INFO":0,"LOW":1,"MEDIUM":2,"HIGH":0,"BLOCKER":0,"total":3}`. Missing
/// keys decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct ImpactCounts {
    info: u64,
    low: u64,
    medium: u64,
    high: u64,
    blocker: u64,
    #[serde(rename = "total")]
    total: u64,
}

impl ImpactCounts {
    /// Decode an impact measure
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not a JSON object of non-negative counts
    pub fn parse(data: &str) -> Result<Self> {
        serde_json::from_str(data).into_app_err_with(|| format!("decoding impact counts '{data}'"))
    }

    #[must_use]
    pub const fn count(&self, severity: ImpactSeverity) -> u64 {
        match severity {
            ImpactSeverity::Info => self.info,
            ImpactSeverity::Low => self.low,
            ImpactSeverity::Medium => self.medium,
            ImpactSeverity::High => self.high,
            ImpactSeverity::Blocker => self.blocker,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    pub const fn increment(&mut self, severity: ImpactSeverity, count: u64) -> &mut Self {
        let slot = match severity {
            ImpactSeverity::Info => &mut self.info,
            ImpactSeverity::Low => &mut self.low,
            ImpactSeverity::Medium => &mut self.medium,
            ImpactSeverity::High => &mut self.high,
            ImpactSeverity::Blocker => &mut self.blocker,
        };
        *slot = slot.wrapping_add(count);
        self.total = self.total.wrapping_add(count);
        self
    }

    /// Add every count of `other` to this one
    pub const fn add(&mut self, other: &Self) -> &mut Self {
        self.info = self.info.wrapping_add(other.info);
        self.low = self.low.wrapping_add(other.low);
        self.medium = self.medium.wrapping_add(other.medium);
        self.high = self.high.wrapping_add(other.high);
        self.blocker = self.blocker.wrapping_add(other.blocker);
        self.total = self.total.wrapping_add(other.total);
        self
    }
}

impl fmt::Display for ImpactCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"INFO":{},"LOW":{},"MEDIUM":{},"HIGH":{},"BLOCKER":{},"total":{}}}"#,
            self.info, self.low, self.medium, self.high, self.blocker, self.total
        )
    }
}
