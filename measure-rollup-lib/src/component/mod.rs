//! The component tree
//!
//! Components are the nodes measures are attached to. Two families of trees
//! exist: the report tree (project → module → directory → file) and the views
//! tree (view → sub-view → project view). Every [`ComponentType`] has a depth
//! within its family, and [`CrawlerDepthLimit`] compares types against a
//! per-family depth bound.
//!
//! [`load_tree`] reads a JSON document describing a tree and the raw measures
//! of its components.

#[expect(clippy::module_inception, reason = "The component module is named after its primary type")]
mod component;
mod component_type;
mod crawler_depth_limit;
mod loader;

pub use component::Component;
pub use component_type::ComponentType;
pub use crawler_depth_limit::CrawlerDepthLimit;
pub use loader::load_tree;
