use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The kind of value a metric carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricType {
    /// 32-bit integer count
    Int,

    /// 64-bit integer, typically an effort in minutes
    Long,

    /// Floating point value
    Float,

    /// Floating point value between 0 and 100
    Percent,

    /// Boolean flag
    Bool,

    /// Short text
    String,

    /// Opaque encoded text, such as an impact breakdown
    Data,

    /// Encoded histogram, `<bound>=<count>;...`
    Distribution,

    /// Letter grade stored as its ordinal
    Rating,
}
