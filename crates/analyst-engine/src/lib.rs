//! # Analyst Engine
//!
//! Turns an uploaded questions document into answers.
//!
//! The document is classified as films, court or unclassified; films
//! answers are computed from the scraped highest-grossing films table,
//! court answers are mocked, and every answer set ends with a regression
//! scatterplot rendered by `analyst-graphs`. Anything that cannot be
//! computed is substituted and tagged as a fallback.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod analyst;
pub mod columns;
pub mod court;
pub mod films;
pub mod intent;
pub mod questions;
pub mod report;

pub use analyst::Analyst;
pub use columns::{ColumnRole, ColumnRoles};
pub use films::FilmFacts;
pub use intent::AnalysisKind;
pub use questions::{FilmThresholds, QuestionSet};
pub use report::{error_placeholder, AnalysisReport, CourtAnswers, FilmsAnswers, GenericAnswers};
