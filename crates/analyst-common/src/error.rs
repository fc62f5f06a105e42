//! Error types and utilities for the data analyst agent

use thiserror::Error;

/// Result type alias for analyst operations
pub type Result<T> = std::result::Result<T, AnalystError>;

/// Main error type for analyst operations
#[derive(Error, Debug)]
pub enum AnalystError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (HTTP requests, etc.)
    #[error("Network error: {message}")]
    Network {
        /// Description of the failed operation
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external table source could not be fetched or understood
    #[error("Fetch error: {message}")]
    Fetch {
        /// Description of the failure
        message: String,
        /// Address of the table source
        url: Option<String>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Markup or free-text parsing errors
    #[error("Parse error: {message}")]
    Parse {
        /// What could not be parsed
        message: String,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// Description of the rendering failure
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Nothing left to plot after filtering
    #[error("Empty input: no finite points to plot")]
    EmptyInput,

    /// Even the smallest rendering exceeds the encoded size budget
    #[error("Rendered image too large: {encoded_len} encoded bytes exceeds budget of {budget}")]
    RenderTooLarge {
        /// Data URI length of the smallest attempt
        encoded_len: usize,
        /// Exclusive upper bound on the data URI length
        budget: usize,
    },

    /// A required request input is absent
    #[error("Missing input: {field} is required")]
    InputMissing {
        /// Name of the missing input
        field: String,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// What failed validation
        message: String,
        /// Dotted path of the offending setting, if any
        field: Option<String>,
    },
}

impl AnalystError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new fetch error for a table source
    pub fn fetch(msg: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
            url: Some(url.into()),
            source: None,
        }
    }

    /// Create a new fetch error with source
    pub fn fetch_with_source(
        msg: impl Into<String>,
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: msg.into(),
            url: Some(url.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new missing-input error
    pub fn input_missing(field: impl Into<String>) -> Self {
        Self::InputMissing {
            field: field.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error came from the external table source
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Network { .. })
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to AnalystError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for AnalystError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = AnalystError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let fetch_error = AnalystError::fetch("no tables", "https://example.org");
        assert!(fetch_error.to_string().contains("Fetch error"));
        assert!(fetch_error.is_fetch_failure());

        let validation_error = AnalystError::validation_field("Invalid port", "server.port");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid port"));
        assert!(!validation_error.is_fetch_failure());
    }

    #[test]
    fn test_render_errors_display() {
        let too_large = AnalystError::RenderTooLarge {
            encoded_len: 120_000,
            budget: 100_000,
        };
        assert_eq!(
            too_large.to_string(),
            "Rendered image too large: 120000 encoded bytes exceeds budget of 100000"
        );

        let missing = AnalystError::input_missing("questions.txt");
        assert_eq!(missing.to_string(), "Missing input: questions.txt is required");

        assert!(AnalystError::EmptyInput.to_string().contains("no finite points"));
    }

    #[test]
    fn test_error_with_source() {
        let fetch_error = AnalystError::fetch_with_source(
            "Table request failed",
            "https://example.org",
            io::Error::new(io::ErrorKind::TimedOut, "timed out"),
        );
        assert!(fetch_error.source().is_some());
        assert!(fetch_error.is_fetch_failure());

        let network_error = AnalystError::network_with_source(
            "Failed to create HTTP client",
            io::Error::new(io::ErrorKind::Other, "tls backend"),
        );
        assert!(network_error.is_fetch_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let analyst_error: AnalystError = io_error.into();

        assert!(analyst_error.to_string().contains("I/O error"));
        assert!(analyst_error.source().is_some());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = AnalystError::config_with_source("Middle layer", root_error);
        let top_error = AnalystError::graph_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}
