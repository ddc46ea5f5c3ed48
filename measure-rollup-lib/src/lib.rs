#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for measure-rollup
//!
//! This library derives quality measures for every node of a component tree
//! (file → directory → module → project, or view → sub-view → project view)
//! from the raw measures stored on the leaves.
//!
//! # Module Organization
//!
//! - [`measures`]: Measures, metrics, ratings, and per-period variations
//! - [`period`]: Comparison periods and the fixed period window
//! - [`component`]: The component tree model and the depth gate
//! - [`formula`]: The counter/formula contract, built-in formulas, and the tree walker
//! - [`repository`]: Storage for raw and computed measures
//! - [`commands`]: Command-line interface and orchestration
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod component;
pub mod formula;
pub mod measures;
pub mod period;
pub mod repository;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
