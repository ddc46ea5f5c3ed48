//! Common utilities shared across report generators.

use crate::measures::{Measure, MeasureValue, MeasureVariations, MetricType};

/// Format a measure's value as a string using consistent formatting rules.
///
/// Rating measures print as their letter; measures that only carry
/// variations print as an empty string.
pub fn format_measure_value(measure: &Measure, value_type: MetricType) -> String {
    if value_type == MetricType::Rating
        && let Some(rating) = measure.rating_value()
    {
        return rating.to_string();
    }

    match measure.value() {
        MeasureValue::NoValue => String::new(),
        MeasureValue::Int(i) => i.to_string(),
        MeasureValue::Long(l) => l.to_string(),
        MeasureValue::Double(d) => format!("{d:.2}"),
        MeasureValue::Boolean(b) => b.to_string(),
        MeasureValue::String(s) => s.to_string(),
    }
}

/// Format variations as `p<index>=<value>` pairs, with an explicit sign.
///
/// Example: `p1=+6, p3=-2`
pub fn format_variations(variations: &MeasureVariations) -> String {
    variations
        .iter()
        .map(|(index, value)| format!("p{index}={}", format_delta(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_delta(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:+}")
    } else {
        format!("{value:+.2}")
    }
}
