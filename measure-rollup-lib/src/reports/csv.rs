use super::{ReportableComponent, common};
use crate::Result;
use core::fmt::Write;
use std::borrow::Cow;

pub fn generate<W: Write>(components: &[ReportableComponent], writer: &mut W) -> Result<()> {
    writeln!(writer, "Component,Type,Metric,Value,Variations")?;

    for component in components {
        for measure in &component.measures {
            let value = common::format_measure_value(&measure.measure, measure.value_type);
            let variations = measure
                .measure
                .variations()
                .map(common::format_variations)
                .unwrap_or_default();

            writeln!(
                writer,
                "{},{},{},{},{}",
                escape_csv(&component.key),
                component.component_type,
                escape_csv(&measure.metric_key),
                escape_csv(&value),
                escape_csv(&variations)
            )?;
        }
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
