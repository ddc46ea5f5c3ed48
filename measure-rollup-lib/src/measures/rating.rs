use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A letter grade, from `A` (best) to `E` (worst).
///
/// The derived ordering follows the ordinal, so `Rating::A < Rating::E`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
pub enum Rating {
    #[default]
    A = 1,
    B = 2,
    C = 3,
    D = 4,
    E = 5,
}

impl Rating {
    /// The best possible rating
    pub const BEST: Self = Self::A;

    /// The worst possible rating
    pub const WORST: Self = Self::E;

    /// Numeric ordinal, 1 for `A` through 5 for `E`
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            1 => Some(Self::A),
            2 => Some(Self::B),
            3 => Some(Self::C),
            4 => Some(Self::D),
            5 => Some(Self::E),
            _ => None,
        }
    }
}
