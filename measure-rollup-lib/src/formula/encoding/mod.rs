//! Text encodings of composite measure values
//!
//! Distribution and impact measures are stored as text. Formulas only merge
//! these values and never look inside them beyond what the merge needs.

mod impact_counts;
mod range_distribution;

pub use impact_counts::{ImpactCounts, ImpactSeverity};
pub use range_distribution::RangeDistributionBuilder;
