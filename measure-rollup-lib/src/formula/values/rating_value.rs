use super::{PeriodArray, PeriodSlot};
use crate::measures::{MeasureVariations, Rating};
use crate::period::{MAX_NUMBER_OF_PERIODS, Period};

// `increment(rating)` only replaces the stored rating when the stored ordinal
// is strictly greater than the incoming one. Holders start at `Rating::A`, so
// on a fresh holder the stored value never moves; only the set flag does.
// Existing call sites depend on this exact comparison.
macro_rules! rating_holder {
    ($(#[$meta:meta])* $name:ident, $array:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name {
            value: Rating,
            set: bool,
        }

        pub type $array = PeriodArray<$name>;

        impl $name {
            #[must_use]
            pub fn new_array() -> $array {
                PeriodArray::new()
            }

            pub fn increment(&mut self, rating: Rating) -> &mut Self {
                if self.value > rating {
                    self.value = rating;
                }
                self.set = true;
                self
            }

            /// The stored rating, `Rating::A` if never incremented
            #[must_use]
            pub const fn value(&self) -> Rating {
                self.value
            }

            #[must_use]
            pub const fn is_set(&self) -> bool {
                self.set
            }
        }

        impl PeriodSlot for $name {
            fn is_set(&self) -> bool {
                self.set
            }

            fn increment_value(&mut self, other: &Self) {
                if other.set {
                    let _ = self.increment(other.value);
                }
            }
        }

        impl PeriodArray<$name> {
            pub fn increment(&mut self, period: &Period, rating: Rating) -> &mut Self {
                let _ = self.get_mut(period).increment(rating);
                self
            }

            pub fn increment_value(&mut self, period: &Period, value: &$name) -> &mut Self {
                self.get_mut(period).increment_value(value);
                self
            }
        }
    };
}

rating_holder!(
    /// A rating accumulator for the measure value itself
    RatingValue,
    RatingValueArray
);

rating_holder!(
    /// A rating accumulator for per-period variations
    RatingVariationValue,
    RatingVariationValueArray
);

impl PeriodArray<RatingVariationValue> {
    /// Variations holding each set slot's rating ordinal, or `None` if no slot was ever set
    #[must_use]
    pub fn to_measure_variations(&self) -> Option<MeasureVariations> {
        if !self.is_any_set() {
            return None;
        }

        let mut slots = [None; MAX_NUMBER_OF_PERIODS];
        for (slot, value) in slots.iter_mut().zip(self.iter()) {
            if value.is_set() {
                *slot = Some(f64::from(value.value().ordinal()));
            }
        }

        Some(MeasureVariations::new(slots))
    }
}
