//! Default values for every configuration section.

use crate::schema::*;
use analyst_common::{LogFormat, DEFAULT_USER_AGENT};

/// Page scraped for the films analysis.
pub const DEFAULT_FILMS_URL: &str = "https://en.wikipedia.org/wiki/List_of_highest-grossing_films";

/// Data-URI length ceiling accepted by callers.
pub const DEFAULT_MAX_ENCODED_BYTES: usize = 100_000;

/// Smallest accepted encoded budget; the 1×1 error placeholder stays below it.
pub const MIN_ENCODED_BYTES: usize = 1_000;

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            scrape: ScrapeConfig::default(),
            plot: PlotSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            films_url: DEFAULT_FILMS_URL.to_string(),
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_encoded_bytes: DEFAULT_MAX_ENCODED_BYTES,
            downscale_factor: 0.8,
            max_downscale_attempts: 3,
            background_color: "#ffffff".to_string(),
            point_color: "#1f77b4".to_string(),
            point_radius: 4,
            line_color: "#d62728".to_string(),
            line_pattern: "dashed".to_string(),
            show_grid: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
        }
    }
}
