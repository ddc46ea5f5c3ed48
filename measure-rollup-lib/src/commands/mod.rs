//! Command-line interface and orchestration for measure-rollup
//!
//! This module implements the CLI commands and wires the formula engine, the
//! tree loader, and the report generators together. It handles argument
//! parsing, configuration management, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **compute**: Load a component tree with raw leaf measures, run every
//!   configured formula over it, and report the computed measures
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and formula consistency
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. `compute` proceeds as follows:
//!
//! 1. Load the configuration and build a formula executor from it
//! 2. Load the component tree, checking raw values against metric types
//! 3. Execute the formulas over the tree
//! 4. Generate the console, CSV, and JSON reports
//!
//! Configuration is managed through a TOML file with three lists
//! (`metrics`, `formulas`, `periods`). When no file is given, `rollup.toml`
//! in the current directory is used if present, otherwise the embedded
//! default configuration.

mod common;
mod compute;
mod config;
mod host;
mod init;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use compute::{ComputeArgs, compute};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
