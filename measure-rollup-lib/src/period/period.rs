use crate::Result;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use ohno::app_err;

/// Size of the period window
pub const MAX_NUMBER_OF_PERIODS: usize = 5;

/// A comparison baseline, addressed by a 1-based index into the period window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    index: usize,
    mode: CompactString,
    snapshot_date: DateTime<Utc>,
}

impl Period {
    /// Create a new period
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is outside `1..=MAX_NUMBER_OF_PERIODS`
    pub fn new(index: usize, mode: impl Into<CompactString>, snapshot_date: DateTime<Utc>) -> Result<Self> {
        if !(1..=MAX_NUMBER_OF_PERIODS).contains(&index) {
            return Err(app_err!("period index must be between 1 and {MAX_NUMBER_OF_PERIODS}, got {index}"));
        }

        Ok(Self {
            index,
            mode: mode.into(),
            snapshot_date,
        })
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[must_use]
    pub const fn snapshot_date(&self) -> DateTime<Utc> {
        self.snapshot_date
    }

    /// Zero-based slot of this period in a per-period array
    pub(crate) const fn slot(&self) -> usize {
        self.index - 1
    }
}
