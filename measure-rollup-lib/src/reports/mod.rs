//! Report generation for computed measures
//!
//! This module turns the measures computed over a component tree into
//! output for people and for other programs.
//!
//! # Implementation Model
//!
//! Three report generators are provided, each accessed through a `generate` function:
//! - **Console**: Indented tree with ANSI colors and wrapped values
//! - **CSV**: One row per computed measure, with proper escaping
//! - **JSON**: Machine-readable structured data
//!
//! All generators operate on the same input: a slice of `ReportableComponent`
//! listing the components of the tree in pre-order together with their computed
//! measures. `ReportableComponent::collect` builds that slice from a tree and a
//! measure repository.
//!
//! Value and variation formatting is shared through the `common` module.

mod common;
mod console;
mod csv;
mod json;
mod reportable_component;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
pub use reportable_component::{ReportableComponent, ReportableMeasure};
