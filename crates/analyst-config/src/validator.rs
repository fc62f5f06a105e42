//! Runtime validation of loaded configuration.

use crate::defaults::MIN_ENCODED_BYTES;
use crate::schema::Config;
use analyst_common::{AnalystError, Result};
use url::Url;

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn check(condition: bool, message: impl Into<String>, field: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(AnalystError::validation_field(message, field))
    }
}

impl Config {
    /// Validates every section, reporting the first offending field.
    pub fn validate(&self) -> Result<()> {
        check(self.server.port != 0, "Port must be non-zero", "server.port")?;
        check(
            !self.server.host.trim().is_empty(),
            "Host cannot be empty",
            "server.host",
        )?;
        check(
            self.server.max_body_bytes > 0,
            "Body limit must be positive",
            "server.max_body_bytes",
        )?;

        let url = Url::parse(&self.scrape.films_url).map_err(|e| {
            AnalystError::validation_field(format!("Invalid films URL: {e}"), "scrape.films_url")
        })?;
        check(
            matches!(url.scheme(), "http" | "https"),
            "Films URL must use http or https",
            "scrape.films_url",
        )?;
        check(
            (1..=300).contains(&self.scrape.timeout_seconds),
            "Timeout must be between 1 and 300 seconds",
            "scrape.timeout_seconds",
        )?;

        let plot = &self.plot;
        check(
            (100..=4000).contains(&plot.width) && (100..=4000).contains(&plot.height),
            "Plot dimensions must be between 100 and 4000 pixels",
            "plot.width",
        )?;
        check(
            plot.max_encoded_bytes >= MIN_ENCODED_BYTES,
            format!("Encoded budget must be at least {MIN_ENCODED_BYTES} bytes"),
            "plot.max_encoded_bytes",
        )?;
        check(
            plot.downscale_factor > 0.0 && plot.downscale_factor < 1.0,
            "Downscale factor must be in (0, 1)",
            "plot.downscale_factor",
        )?;
        check(
            (1..=10).contains(&plot.max_downscale_attempts),
            "Downscale attempts must be between 1 and 10",
            "plot.max_downscale_attempts",
        )?;
        for (field, color) in [
            ("plot.background_color", &plot.background_color),
            ("plot.point_color", &plot.point_color),
            ("plot.line_color", &plot.line_color),
        ] {
            check(
                is_hex_color(color),
                format!("Color '{color}' must be #RRGGBB"),
                field,
            )?;
        }
        check(
            matches!(plot.line_pattern.as_str(), "solid" | "dashed" | "dotted"),
            "Line pattern must be solid, dashed or dotted",
            "plot.line_pattern",
        )?;
        check(
            !self.logging.level.trim().is_empty(),
            "Log level cannot be empty",
            "logging.level",
        )?;

        Ok(())
    }
}
