use crate::Result;
use crate::period::{MAX_NUMBER_OF_PERIODS, Period};
use ohno::app_err;

/// Per-period deltas of a measure, one optional slot per period of the window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasureVariations {
    values: [Option<f64>; MAX_NUMBER_OF_PERIODS],
}

impl MeasureVariations {
    #[must_use]
    pub const fn new(values: [Option<f64>; MAX_NUMBER_OF_PERIODS]) -> Self {
        Self { values }
    }

    /// Build variations from `(period index, value)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if an index is outside `1..=MAX_NUMBER_OF_PERIODS`
    pub fn from_indexed(variations: impl IntoIterator<Item = (usize, f64)>) -> Result<Self> {
        let mut values = [None; MAX_NUMBER_OF_PERIODS];
        for (index, value) in variations {
            let slot = index
                .checked_sub(1)
                .and_then(|slot| values.get_mut(slot))
                .ok_or_else(|| app_err!("variation period index must be between 1 and {MAX_NUMBER_OF_PERIODS}, got {index}"))?;
            *slot = Some(value);
        }

        Ok(Self { values })
    }

    #[must_use]
    pub fn builder() -> MeasureVariationsBuilder {
        MeasureVariationsBuilder::default()
    }

    #[must_use]
    pub const fn variation(&self, period: &Period) -> Option<f64> {
        self.values[period.slot()]
    }

    #[must_use]
    pub const fn has_variation(&self, period: &Period) -> bool {
        self.variation(period).is_some()
    }

    /// Iterate the set variations as `(period index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(slot, value)| value.map(|v| (slot + 1, v)))
    }

    #[must_use]
    pub const fn as_slots(&self) -> &[Option<f64>; MAX_NUMBER_OF_PERIODS] {
        &self.values
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeasureVariationsBuilder {
    values: [Option<f64>; MAX_NUMBER_OF_PERIODS],
}

impl MeasureVariationsBuilder {
    pub const fn set_variation(&mut self, period: &Period, value: f64) -> &mut Self {
        self.values[period.slot()] = Some(value);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    #[must_use]
    pub const fn build(&self) -> MeasureVariations {
        MeasureVariations { values: self.values }
    }
}
