use super::{MAX_NUMBER_OF_PERIODS, Period};
use crate::Result;
use ohno::app_err;

/// The set of periods active for one computation, ordered by index
#[derive(Debug, Clone, Default)]
pub struct PeriodsHolder {
    periods: Vec<Period>,
}

impl PeriodsHolder {
    /// Create a holder from a list of periods
    ///
    /// # Errors
    ///
    /// Returns an error if two periods share an index
    pub fn new(mut periods: Vec<Period>) -> Result<Self> {
        periods.sort_by_key(Period::index);

        if let Some(pair) = periods.windows(2).find(|pair| pair[0].index() == pair[1].index()) {
            return Err(app_err!("period index {} is defined more than once", pair[0].index()));
        }

        // unique indices in 1..=MAX already bound the length
        debug_assert!(periods.len() <= MAX_NUMBER_OF_PERIODS);

        Ok(Self { periods })
    }

    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    #[must_use]
    pub fn period(&self, index: usize) -> Option<&Period> {
        self.periods.iter().find(|period| period.index() == index)
    }

    #[must_use]
    pub fn has_period(&self, index: usize) -> bool {
        self.period(index).is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn period(index: usize) -> Period {
        Period::new(index, "previous_version", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_periods_are_sorted() {
        let holder = PeriodsHolder::new(vec![period(3), period(1)]).unwrap();
        let indices: Vec<_> = holder.periods().iter().map(Period::index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_lookup() {
        let holder = PeriodsHolder::new(vec![period(2)]).unwrap();
        assert!(holder.has_period(2));
        assert!(!holder.has_period(1));
        assert_eq!(holder.period(2).map(Period::index), Some(2));
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let _ = PeriodsHolder::new(vec![period(2), period(2)]).unwrap_err();
    }

    #[test]
    fn test_default_is_empty() {
        assert!(PeriodsHolder::default().is_empty());
    }
}
