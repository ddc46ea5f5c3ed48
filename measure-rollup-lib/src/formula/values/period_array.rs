use crate::period::{MAX_NUMBER_OF_PERIODS, Period};

/// A holder that can live in a [`PeriodArray`]
pub trait PeriodSlot: Default {
    fn is_set(&self) -> bool;

    /// Fold another holder of the same kind into this one
    fn increment_value(&mut self, other: &Self);
}

/// One holder per period of the window.
///
/// # Panics
///
/// Accessors index slot `period.index() - 1` and panic if that slot is outside
/// the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodArray<T> {
    values: [T; MAX_NUMBER_OF_PERIODS],
}

impl<T: PeriodSlot> PeriodArray<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|_| T::default()),
        }
    }

    #[must_use]
    pub fn get(&self, period: &Period) -> &T {
        &self.values[period.slot()]
    }

    pub fn get_mut(&mut self, period: &Period) -> &mut T {
        &mut self.values[period.slot()]
    }

    /// Fold every set slot of `source` into the matching slot of this array
    pub fn increment_all(&mut self, source: &Self) -> &mut Self {
        for (target, source) in self.values.iter_mut().zip(&source.values) {
            if source.is_set() {
                target.increment_value(source);
            }
        }
        self
    }

    #[must_use]
    pub fn is_any_set(&self) -> bool {
        self.values.iter().any(PeriodSlot::is_set)
    }

    /// The holders in slot order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: PeriodSlot> Default for PeriodArray<T> {
    fn default() -> Self {
        Self::new()
    }
}
