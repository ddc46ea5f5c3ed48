//! Storage for raw and computed measures
//!
//! Raw measures are the inputs read from the leaves; computed measures are
//! what the formulas emit. The two are kept apart so a computation can never
//! overwrite its own inputs.

mod measure_repository;

pub use measure_repository::{InMemoryMeasureRepository, MeasureRepository};
