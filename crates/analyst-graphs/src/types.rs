//! Plot types and data structures

use analyst_common::{AnalystError, Result};
use analyst_config::PlotSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stroke pattern of the regression line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePattern {
    /// Continuous stroke.
    Solid,
    /// Long dashes.
    #[default]
    Dashed,
    /// Short dots.
    Dotted,
}

impl LinePattern {
    /// Dash and gap length in pixels at full resolution, `None` for solid.
    pub fn dash_gap(self) -> Option<(f64, f64)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((12.0, 6.0)),
            Self::Dotted => Some((2.0, 5.0)),
        }
    }
}

impl fmt::Display for LinePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        };
        f.write_str(name)
    }
}

impl FromStr for LinePattern {
    type Err = AnalystError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" | "-" => Ok(Self::Solid),
            "dashed" | "--" => Ok(Self::Dashed),
            "dotted" | ":" => Ok(Self::Dotted),
            other => Err(AnalystError::validation_field(
                format!("Unknown line pattern '{other}'"),
                "line_pattern",
            )),
        }
    }
}

/// Regression line styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionLineStyle {
    /// Hex color of the line.
    pub color: String,
    /// Stroke pattern.
    pub pattern: LinePattern,
    /// Stroke width in pixels at full resolution.
    pub width: u32,
}

impl Default for RegressionLineStyle {
    fn default() -> Self {
        Self {
            color: "#d62728".to_string(),
            pattern: LinePattern::Dashed,
            width: 2,
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 60,
        }
    }
}

/// Styling passed to the renderer at call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub background_color: String,
    pub point_color: String,
    pub point_radius: u32,
    pub show_grid: bool,
    pub regression: RegressionLineStyle,
    pub title_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            point_color: "#1f77b4".to_string(),
            point_radius: 4,
            show_grid: true,
            regression: RegressionLineStyle::default(),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 20,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

/// Everything the renderer needs besides the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    /// Ceiling for the data-URI length.
    pub max_encoded_bytes: usize,
    /// Scale multiplier applied on every re-render.
    pub downscale_factor: f64,
    /// Re-renders attempted after the full-size one.
    pub max_downscale_attempts: u32,
    pub style: StyleConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::from(&PlotSettings::default())
    }
}

impl From<&PlotSettings> for PlotConfig {
    fn from(settings: &PlotSettings) -> Self {
        let pattern = settings.line_pattern.parse().unwrap_or_default();
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            width: settings.width,
            height: settings.height,
            max_encoded_bytes: settings.max_encoded_bytes,
            downscale_factor: settings.downscale_factor,
            max_downscale_attempts: settings.max_downscale_attempts,
            style: StyleConfig {
                background_color: settings.background_color.clone(),
                point_color: settings.point_color.clone(),
                point_radius: settings.point_radius,
                show_grid: settings.show_grid,
                regression: RegressionLineStyle {
                    color: settings.line_color.clone(),
                    pattern,
                    ..RegressionLineStyle::default()
                },
                ..StyleConfig::default()
            },
        }
    }
}

impl PlotConfig {
    /// Sets title and axis labels.
    pub fn with_labels(
        mut self,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.title = title.into();
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Replaces the regression line style.
    pub fn with_regression_style(mut self, style: RegressionLineStyle) -> Self {
        self.style.regression = style;
        self
    }

    /// Replaces the encoded-size ceiling.
    pub fn with_budget(mut self, max_encoded_bytes: usize) -> Self {
        self.max_encoded_bytes = max_encoded_bytes;
        self
    }

    /// Resolution scales tried in order: full size, then one step per attempt.
    pub fn scale_ladder(&self) -> Vec<f64> {
        (0..=self.max_downscale_attempts.max(1))
            .map(|step| self.downscale_factor.powi(step as i32))
            .collect()
    }
}
