//! # Analyst Config
//!
//! Type-safe configuration for the data analyst service.
//!
//! This crate provides the YAML schema, defaults, environment overrides
//! and validation used by the server at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
