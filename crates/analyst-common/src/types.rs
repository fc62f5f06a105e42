//! Common type definitions shared by the analysis crates.

use std::fmt;

/// Why an answer had to be substituted with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The external table could not be fetched or parsed.
    FetchFailure(String),
    /// The table lacked a column the answer depends on.
    MissingColumns(Vec<String>),
    /// Too few usable observations to compute the answer.
    InsufficientData(String),
    /// The chart could not be rendered within budget.
    RenderFailure(String),
    /// The dataset behind the answer is not queried by this service.
    MockedDataset,
    /// The questions did not match a known analysis.
    Unclassified,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailure(detail) => write!(f, "table fetch failed: {detail}"),
            Self::MissingColumns(columns) => {
                write!(f, "missing columns: {}", columns.join(", "))
            }
            Self::InsufficientData(detail) => write!(f, "insufficient data: {detail}"),
            Self::RenderFailure(detail) => write!(f, "render failed: {detail}"),
            Self::MockedDataset => write!(f, "mocked dataset"),
            Self::Unclassified => write!(f, "unclassified questions"),
        }
    }
}

/// An answer that is either computed from real data or a tagged placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Computed from the fetched data.
    Computed(T),
    /// Placeholder value substituted for the stated reason.
    Fallback {
        /// The placeholder answer.
        value: T,
        /// Why the real answer is unavailable.
        reason: FallbackReason,
    },
}

impl<T> Outcome<T> {
    /// Creates a fallback outcome.
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self::Fallback { value, reason }
    }

    /// Borrows the carried value, computed or not.
    pub fn value(&self) -> &T {
        match self {
            Self::Computed(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Unwraps the carried value, computed or not.
    pub fn into_value(self) -> T {
        match self {
            Self::Computed(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Whether the value is a placeholder.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The fallback reason, if any.
    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Computed(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Maps the carried value, keeping the tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Computed(value) => Outcome::Computed(f(value)),
            Self::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}
