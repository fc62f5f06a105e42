//! Answer sets and their JSON shapes.

use crate::court::{PLOT_QUESTION, SLOPE_QUESTION, TOP_COURT_QUESTION};
use crate::intent::AnalysisKind;
use analyst_common::{FallbackReason, Outcome};
use analyst_graphs::PLACEHOLDER_PNG_DATA_URI;
use serde_json::{json, Value};

/// Films answers in response order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmsAnswers {
    pub count: Outcome<u64>,
    pub earliest: Outcome<String>,
    pub correlation: Outcome<f64>,
    pub plot: Outcome<String>,
}

/// Court answers keyed by the three documented questions.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtAnswers {
    pub top_court: Outcome<String>,
    pub regression_slope: Outcome<f64>,
    pub delay_plot: Outcome<String>,
}

/// Answers for documents that match no known analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericAnswers {
    pub status: Outcome<String>,
    pub summary: Outcome<String>,
    pub score: Outcome<f64>,
    pub plot: Outcome<String>,
}

/// The outcome of analysing one questions document.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    Films(FilmsAnswers),
    Court(CourtAnswers),
    Generic(GenericAnswers),
    /// Nothing could be answered; serialised as error placeholders.
    Failed { kind: AnalysisKind, reason: String },
}

impl AnalysisReport {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::Films(_) => AnalysisKind::Films,
            Self::Court(_) => AnalysisKind::Court,
            Self::Generic(_) => AnalysisKind::Unclassified,
            Self::Failed { kind, .. } => *kind,
        }
    }

    fn reasons(&self) -> Vec<Option<&FallbackReason>> {
        match self {
            Self::Films(a) => vec![
                a.count.reason(),
                a.earliest.reason(),
                a.correlation.reason(),
                a.plot.reason(),
            ],
            Self::Court(a) => vec![
                a.top_court.reason(),
                a.regression_slope.reason(),
                a.delay_plot.reason(),
            ],
            Self::Generic(a) => vec![
                a.status.reason(),
                a.summary.reason(),
                a.score.reason(),
                a.plot.reason(),
            ],
            Self::Failed { .. } => Vec::new(),
        }
    }

    /// Reasons of every substituted answer, in response order.
    pub fn fallback_reasons(&self) -> Vec<&FallbackReason> {
        self.reasons().into_iter().flatten().collect()
    }

    /// Number of answers that are placeholders.
    pub fn fallback_count(&self) -> usize {
        match self {
            Self::Failed {
                kind: AnalysisKind::Court,
                ..
            } => 3,
            Self::Failed { .. } => 4,
            _ => self.fallback_reasons().len(),
        }
    }

    /// JSON body returned to the caller.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Films(a) => json!([
                a.count.value(),
                a.earliest.value(),
                a.correlation.value(),
                a.plot.value(),
            ]),
            Self::Court(a) => json!({
                TOP_COURT_QUESTION: a.top_court.value(),
                SLOPE_QUESTION: a.regression_slope.value(),
                PLOT_QUESTION: a.delay_plot.value(),
            }),
            Self::Generic(a) => json!([
                a.status.value(),
                a.summary.value(),
                a.score.value(),
                a.plot.value(),
            ]),
            Self::Failed { kind, .. } => error_placeholder(*kind),
        }
    }
}

/// Schema-valid body used when analysis failed outright.
pub fn error_placeholder(kind: AnalysisKind) -> Value {
    match kind {
        AnalysisKind::Court => json!({
            TOP_COURT_QUESTION: "Error",
            SLOPE_QUESTION: 0,
            PLOT_QUESTION: PLACEHOLDER_PNG_DATA_URI,
        }),
        AnalysisKind::Films | AnalysisKind::Unclassified => {
            json!(["Error", "Error", 0, PLACEHOLDER_PNG_DATA_URI])
        }
    }
}
