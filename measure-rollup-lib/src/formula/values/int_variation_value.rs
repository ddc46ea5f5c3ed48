use super::{PeriodArray, PeriodSlot};
use crate::measures::MeasureVariations;
use crate::period::Period;

/// An integer accumulator that remembers whether it was ever incremented.
///
/// Additions wrap on overflow so that folding stays associative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntVariationValue {
    value: Option<i32>,
}

pub type IntVariationValueArray = PeriodArray<IntVariationValue>;

impl IntVariationValue {
    #[must_use]
    pub fn new_array() -> IntVariationValueArray {
        PeriodArray::new()
    }

    pub fn increment(&mut self, increment: i32) -> &mut Self {
        self.value = Some(self.value.unwrap_or(0).wrapping_add(increment));
        self
    }

    /// The accumulated value, 0 if never incremented
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value.unwrap_or(0)
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl PeriodSlot for IntVariationValue {
    fn is_set(&self) -> bool {
        self.value.is_some()
    }

    fn increment_value(&mut self, other: &Self) {
        if let Some(value) = other.value {
            let _ = self.increment(value);
        }
    }
}

impl PeriodArray<IntVariationValue> {
    pub fn increment(&mut self, period: &Period, value: i32) -> &mut Self {
        let _ = self.get_mut(period).increment(value);
        self
    }

    pub fn increment_value(&mut self, period: &Period, value: &IntVariationValue) -> &mut Self {
        self.get_mut(period).increment_value(value);
        self
    }

    /// Variations for the slots that were set, or `None` if no slot was ever set
    #[must_use]
    pub fn to_measure_variations(&self) -> Option<MeasureVariations> {
        if !self.is_any_set() {
            return None;
        }

        let mut slots = [None; crate::period::MAX_NUMBER_OF_PERIODS];
        for (slot, value) in slots.iter_mut().zip(self.iter()) {
            if value.is_set() {
                *slot = Some(f64::from(value.value()));
            }
        }

        Some(MeasureVariations::new(slots))
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
    fn test_fresh_value_is_unset_zero() {
        let value = IntVariationValue::default();
        assert!(!value.is_set());
        assert_eq!(value.value(), 0);
    }

    #[test]
    fn test_increment_sets() {
        let mut value = IntVariationValue::default();
        let _ = value.increment(0);
        assert!(value.is_set());
        assert_eq!(value.value(), 0);

        let _ = value.increment(7).increment(-2);
        assert_eq!(value.value(), 5);
    }

    #[test]
    fn test_increment_value_skips_unset_source() {
        let mut value = IntVariationValue::default();
        value.increment_value(&IntVariationValue::default());
        assert!(!value.is_set());

        let mut source = IntVariationValue::default();
        let _ = source.increment(4);
        value.increment_value(&source);
        assert!(value.is_set());
        assert_eq!(value.value(), 4);
    }

    #[test]
    fn test_overflow_wraps() {
        let mut value = IntVariationValue::default();
        let _ = value.increment(i32::MAX).increment(1);
        assert_eq!(value.value(), i32::MIN);
    }

    #[test]
    fn test_array_get_addresses_index_minus_one() {
        let mut array = IntVariationValue::new_array();
        let _ = array.increment(&period(2), 10);

        let slots: Vec<_> = array.iter().map(IntVariationValue::is_set).collect();
        assert_eq!(slots, vec![false, true, false, false, false]);
        assert_eq!(array.get(&period(2)).value(), 10);
    }

    #[test]
    fn test_increment_all_only_merges_set_slots() {
        let mut target = IntVariationValue::new_array();
        let _ = target.increment(&period(1), 1).increment(&period(3), 3);

        let mut source = IntVariationValue::new_array();
        let _ = source.increment(&period(3), 30).increment(&period(4), 40);

        let _ = target.increment_all(&source);

        assert_eq!(target.get(&period(1)).value(), 1);
        assert!(!target.get(&period(2)).is_set());
        assert_eq!(target.get(&period(3)).value(), 33);
        assert_eq!(target.get(&period(4)).value(), 40);
        assert!(!target.get(&period(5)).is_set());
    }

    #[test]
    fn test_never_incremented_has_no_variations() {
        assert!(IntVariationValue::new_array().to_measure_variations().is_none());
    }

    #[test]
    fn test_single_increment_produces_single_variation() {
        let mut array = IntVariationValue::new_array();
        let _ = array.increment(&period(3), 10);

        let variations = array.to_measure_variations().unwrap();
        assert_eq!(variations.as_slots(), &[None, None, Some(10.0), None, None]);
    }

    #[test]
    fn test_increment_with_zero_still_produces_variation() {
        let mut array = IntVariationValue::new_array();
        let mut zero = IntVariationValue::default();
        let _ = zero.increment(0);
        let _ = array.increment_value(&period(1), &zero);

        let variations = array.to_measure_variations().unwrap();
        assert_eq!(variations.as_slots(), &[Some(0.0), None, None, None, None]);
    }
}
