use super::{MeasureValue, MeasureVariations, Rating};
use compact_str::CompactString;

/// The value of one metric on one component
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    value: MeasureValue,
    variations: Option<MeasureVariations>,
}

impl Measure {
    #[must_use]
    pub const fn builder() -> MeasureBuilder {
        MeasureBuilder { variations: None }
    }

    #[must_use]
    pub const fn value(&self) -> &MeasureValue {
        &self.value
    }

    #[must_use]
    pub const fn int_value(&self) -> Option<i32> {
        match self.value {
            MeasureValue::Int(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn long_value(&self) -> Option<i64> {
        match self.value {
            MeasureValue::Long(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn double_value(&self) -> Option<f64> {
        match self.value {
            MeasureValue::Double(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn bool_value(&self) -> Option<bool> {
        match self.value {
            MeasureValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// The text payload of string, data, and distribution measures
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        match &self.value {
            MeasureValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The rating of a measure whose integer payload is a rating ordinal
    #[must_use]
    pub const fn rating_value(&self) -> Option<Rating> {
        match self.int_value() {
            Some(ordinal) => Rating::from_ordinal(ordinal),
            None => None,
        }
    }

    #[must_use]
    pub const fn variations(&self) -> Option<&MeasureVariations> {
        self.variations.as_ref()
    }
}

/// Creates measures; every `create_*` method yields a present measure.
#[derive(Debug, Clone, Default)]
pub struct MeasureBuilder {
    variations: Option<MeasureVariations>,
}

impl MeasureBuilder {
    #[must_use]
    pub const fn variations(mut self, variations: MeasureVariations) -> Self {
        self.variations = Some(variations);
        self
    }

    #[must_use]
    pub const fn create_no_value(self) -> Measure {
        self.create(MeasureValue::NoValue)
    }

    #[must_use]
    pub const fn create_int(self, value: i32) -> Measure {
        self.create(MeasureValue::Int(value))
    }

    #[must_use]
    pub const fn create_long(self, value: i64) -> Measure {
        self.create(MeasureValue::Long(value))
    }

    #[must_use]
    pub const fn create_double(self, value: f64) -> Measure {
        self.create(MeasureValue::Double(value))
    }

    #[must_use]
    pub const fn create_bool(self, value: bool) -> Measure {
        self.create(MeasureValue::Boolean(value))
    }

    #[must_use]
    pub fn create_string(self, value: impl Into<CompactString>) -> Measure {
        self.create(MeasureValue::String(value.into()))
    }

    #[must_use]
    pub const fn create_rating(self, rating: Rating) -> Measure {
        self.create_int(rating.ordinal())
    }

    const fn create(self, value: MeasureValue) -> Measure {
        Measure {
            value,
            variations: self.variations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_measure() {
        let measure = Measure::builder().create_int(8);
        assert_eq!(measure.int_value(), Some(8));
        assert_eq!(measure.long_value(), None);
        assert_eq!(measure.data(), None);
        assert!(measure.variations().is_none());
    }

    #[test]
    fn test_string_measure() {
        let measure = Measure::builder().create_string("0=1;5=3");
        assert_eq!(measure.data(), Some("0=1;5=3"));
        assert_eq!(measure.int_value(), None);
    }

    #[test]
    fn test_no_value_with_variations() {
        let variations = MeasureVariations::new([Some(1.0), None, None, None, None]);
        let measure = Measure::builder().variations(variations).create_no_value();
        assert!(measure.value().is_no_value());
        assert_eq!(measure.variations(), Some(&variations));
    }

    #[test]
    fn test_rating_measure_stored_as_ordinal() {
        let measure = Measure::builder().create_rating(Rating::C);
        assert_eq!(measure.int_value(), Some(3));
        assert_eq!(measure.rating_value(), Some(Rating::C));
    }

    #[test]
    fn test_rating_value_out_of_range() {
        let measure = Measure::builder().create_int(42);
        assert_eq!(measure.rating_value(), None);
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Measure::builder().create_long(7).long_value(), Some(7));
        assert_eq!(Measure::builder().create_double(1.5).double_value(), Some(1.5));
        assert_eq!(Measure::builder().create_bool(true).bool_value(), Some(true));
    }
}
