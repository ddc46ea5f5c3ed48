use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Project,
    Module,
    Directory,
    File,
    View,
    Subview,
    ProjectView,
}

impl ComponentType {
    /// Depth of this type within its family, 0 being the root
    #[must_use]
    pub const fn depth(self) -> u8 {
        match self {
            Self::Project | Self::View => 0,
            Self::Module | Self::Subview => 1,
            Self::Directory | Self::ProjectView => 2,
            Self::File => 3,
        }
    }

    #[must_use]
    pub const fn is_report_type(self) -> bool {
        matches!(self, Self::Project | Self::Module | Self::Directory | Self::File)
    }

    #[must_use]
    pub const fn is_views_type(self) -> bool {
        !self.is_report_type()
    }

    /// Whether components of this type are the leaves of their tree
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::File | Self::ProjectView)
    }

    #[must_use]
    pub const fn is_same_family(self, other: Self) -> bool {
        self.is_report_type() == other.is_report_type()
    }
}
