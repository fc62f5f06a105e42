//! # Analyst Common
//!
//! Shared errors, logging, parsing helpers and table sources for the data
//! analyst agent.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod fetcher;
pub mod logging;
pub mod table;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{AnalystError, Result};
pub use fetcher::{FetcherConfig, HttpTableFetcher, TableFetcher, DEFAULT_USER_AGENT};
#[cfg(any(test, feature = "testing"))]
pub use fetcher::MockTableFetcher;
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use table::Table;
pub use types::{FallbackReason, Outcome};
pub use utils::*;
