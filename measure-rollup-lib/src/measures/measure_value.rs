use compact_str::CompactString;

/// The payload of a measure
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureValue {
    /// The measure only carries variations
    NoValue,
    Int(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    String(CompactString),
}

impl MeasureValue {
    #[must_use]
    pub const fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }
}
