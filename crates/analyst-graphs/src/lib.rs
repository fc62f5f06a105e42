//! # Analyst Graphs
//!
//! Regression scatterplots rendered with plotters into an in-memory
//! bitmap, PNG-compressed and returned as a `data:` URI that stays under a
//! caller-supplied size budget.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod encoding;
pub mod regression;
pub mod renderer;
pub mod sample;
pub mod types;

pub use encoding::*;
pub use regression::*;
pub use renderer::*;
pub use sample::SamplePair;
pub use types::*;
