//! Configuration schema definitions using serde.

use analyst_common::{FetcherConfig, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Main configuration structure for the analyst service.
///
/// Every section falls back to its defaults when omitted, so a YAML file
/// only needs to list the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// External table source configuration.
    pub scrape: ScrapeConfig,
    /// Chart rendering configuration.
    pub plot: PlotSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

/// External table source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Page holding the highest-grossing films table.
    pub films_url: String,
    /// Connect/read timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent sent to the table source.
    pub user_agent: String,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Full-resolution width in pixels.
    pub width: u32,
    /// Full-resolution height in pixels.
    pub height: u32,
    /// Ceiling for the data-URI text length.
    pub max_encoded_bytes: usize,
    /// Scale applied per re-render when over budget.
    pub downscale_factor: f64,
    /// How many reduced-resolution re-renders to try.
    pub max_downscale_attempts: u32,
    /// Background color (`#RRGGBB`).
    pub background_color: String,
    /// Scatter point color (`#RRGGBB`).
    pub point_color: String,
    /// Scatter point radius in pixels at full resolution.
    pub point_radius: u32,
    /// Regression line color when the questions do not name one.
    pub line_color: String,
    /// Regression line pattern (`solid`, `dashed`, `dotted`) when the
    /// questions do not name one.
    pub line_pattern: String,
    /// Whether to draw grid lines.
    pub show_grid: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path.
    pub file_path: Option<String>,
}

impl Config {
    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ScrapeConfig {
    /// Settings for the HTTP table fetcher.
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::default()
            .with_timeout(self.timeout_seconds)
            .with_user_agent(self.user_agent.clone())
    }
}

impl LoggingSettings {
    /// Settings for the tracing subscriber.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}
