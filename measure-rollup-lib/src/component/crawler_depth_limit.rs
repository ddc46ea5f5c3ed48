use super::ComponentType;
use crate::Result;
use ohno::app_err;

/// A depth bound for each tree family, compared against component types.
///
/// A family without a bound never compares as deeper or higher than any type
/// of that family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlerDepthLimit {
    report_max_depth: Option<ComponentType>,
    views_max_depth: Option<ComponentType>,
}

impl CrawlerDepthLimit {
    pub const PROJECT: Self = Self {
        report_max_depth: Some(ComponentType::Project),
        views_max_depth: Some(ComponentType::View),
    };

    pub const MODULE: Self = Self {
        report_max_depth: Some(ComponentType::Module),
        views_max_depth: Some(ComponentType::Subview),
    };

    pub const DIRECTORY: Self = Self {
        report_max_depth: Some(ComponentType::Directory),
        views_max_depth: Some(ComponentType::Subview),
    };

    /// The leaf level of both families
    pub const LEAVES: Self = Self {
        report_max_depth: Some(ComponentType::File),
        views_max_depth: Some(ComponentType::ProjectView),
    };

    /// Create a limit from per-family bounds
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is not a type of its family, or if both bounds are absent
    pub fn new(report_max_depth: Option<ComponentType>, views_max_depth: Option<ComponentType>) -> Result<Self> {
        if let Some(ty) = report_max_depth
            && !ty.is_report_type()
        {
            return Err(app_err!("{ty} is not a report type"));
        }

        if let Some(ty) = views_max_depth
            && !ty.is_views_type()
        {
            return Err(app_err!("{ty} is not a views type"));
        }

        if report_max_depth.is_none() && views_max_depth.is_none() {
            return Err(app_err!("a depth limit needs at least one bound"));
        }

        Ok(Self {
            report_max_depth,
            views_max_depth,
        })
    }

    #[must_use]
    pub const fn report_max_depth(&self) -> Option<ComponentType> {
        self.report_max_depth
    }

    #[must_use]
    pub const fn views_max_depth(&self) -> Option<ComponentType> {
        self.views_max_depth
    }

    /// Whether the bound is strictly deeper than `ty`, i.e. `ty` sits above it
    #[must_use]
    pub const fn is_deeper_than(&self, ty: ComponentType) -> bool {
        match self.bound_for(ty) {
            Some(bound) => bound.depth() > ty.depth(),
            None => false,
        }
    }

    /// Whether the bound is strictly higher than `ty`, i.e. `ty` sits below it
    #[must_use]
    pub const fn is_higher_than(&self, ty: ComponentType) -> bool {
        match self.bound_for(ty) {
            Some(bound) => bound.depth() < ty.depth(),
            None => false,
        }
    }

    #[must_use]
    pub const fn is_same_as(&self, ty: ComponentType) -> bool {
        match self.bound_for(ty) {
            Some(bound) => bound.depth() == ty.depth(),
            None => false,
        }
    }

    const fn bound_for(&self, ty: ComponentType) -> Option<ComponentType> {
        if ty.is_report_type() {
            self.report_max_depth
        } else {
            self.views_max_depth
        }
    }
}
