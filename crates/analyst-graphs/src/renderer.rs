//! Graph rendering trait and the regression scatter implementation

use crate::encoding::{encode_png, encoded_len, to_data_uri, EncodedImage};
use crate::regression::RegressionFit;
use crate::types::{LinePattern, PlotConfig};
use crate::SamplePair;
use analyst_common::{AnalystError, Result};
use plotters::prelude::*;
use tracing::{debug, warn};

/// Pixel geometry of a single rendering attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    /// Captions, tick labels and axis descriptions are drawn.
    pub with_text: bool,
}

impl Frame {
    /// Frame for `config` at `scale` of its full resolution.
    pub fn scaled(config: &PlotConfig, scale: f64) -> Self {
        Self {
            width: scale_px(config.width, scale),
            height: scale_px(config.height, scale),
            scale,
            with_text: true,
        }
    }

    fn without_text(self) -> Self {
        Self {
            with_text: false,
            ..self
        }
    }

    fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

fn scale_px(value: u32, scale: f64) -> u32 {
    ((f64::from(value) * scale).round() as u32).max(1)
}

/// Trait for renderers that draw into an RGB pixel buffer
pub trait GraphRenderer {
    /// Draw one frame into `buffer` (`width * height * 3` bytes).
    fn draw_frame(&self, config: &PlotConfig, frame: Frame, buffer: &mut [u8]) -> Result<()>;

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &PlotConfig) -> RGBColor {
        if config.style.background_color.is_empty() {
            return RGBColor(255, 255, 255);
        }
        self.parse_color(&config.style.background_color)
    }

    /// Render one frame to PNG bytes.
    ///
    /// Text needs a system font; when drawing with text fails the frame is
    /// drawn again without it.
    fn render_png(&self, config: &PlotConfig, frame: Frame) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; frame.buffer_len()];

        if let Err(error) = self.draw_frame(config, frame, &mut buffer) {
            warn!(%error, "Drawing with text failed, retrying without text");
            buffer.fill(0);
            self.draw_frame(config, frame.without_text(), &mut buffer)?;
        }

        encode_png(&buffer, frame.width, frame.height)
    }

    /// Render the largest frame whose data URI is under the budget.
    fn render(&self, config: &PlotConfig) -> Result<EncodedImage> {
        let budget = config.max_encoded_bytes;
        let mut smallest = usize::MAX;

        for scale in config.scale_ladder() {
            let frame = Frame::scaled(config, scale);
            let png = self.render_png(config, frame)?;
            let length = encoded_len(png.len());

            if length < budget {
                debug!(
                    width = frame.width,
                    height = frame.height,
                    encoded_len = length,
                    "Rendered chart within budget"
                );
                return Ok(EncodedImage {
                    data_uri: to_data_uri(&png),
                    width: frame.width,
                    height: frame.height,
                    png_bytes: png.len(),
                });
            }

            debug!(scale, encoded_len = length, budget, "Chart over budget, stepping down");
            smallest = smallest.min(length);
        }

        Err(AnalystError::RenderTooLarge {
            encoded_len: smallest,
            budget,
        })
    }
}

/// Padded axis bounds: `(x_min, x_max, y_min, y_max)`.
type DataRanges = (f64, f64, f64, f64);

/// Scatter of finite points with an optional least-squares line.
#[derive(Debug, Clone)]
pub struct ScatterRenderer {
    points: Vec<(f64, f64)>,
    fit: Option<RegressionFit>,
    ranges: DataRanges,
}

impl ScatterRenderer {
    /// Prepares `sample` for drawing.
    ///
    /// Fails with `EmptyInput` when no finite point survives, and with a
    /// validation error when the padded axis span is not representable.
    pub fn new(sample: &SamplePair) -> Result<Self> {
        let points = sample.finite_points();
        if points.is_empty() {
            return Err(AnalystError::EmptyInput);
        }
        let mut renderer = Self {
            fit: RegressionFit::fit(&points),
            points,
            ranges: (0.0, 0.0, 0.0, 0.0),
        };
        if renderer.fit.is_some_and(|fit| !renderer.line_ends_finite(fit)) {
            renderer.fit = None;
        }
        renderer.ranges = renderer.calculate_data_ranges()?;
        Ok(renderer)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn fit(&self) -> Option<RegressionFit> {
        self.fit
    }

    fn x_extent(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.0), hi.max(p.0))
            })
    }

    fn line_ends_finite(&self, fit: RegressionFit) -> bool {
        let (lo, hi) = self.x_extent();
        fit.predict(lo).is_finite() && fit.predict(hi).is_finite()
    }

    /// Calculate the padded axis ranges, covering the regression line ends
    fn calculate_data_ranges(&self) -> Result<DataRanges> {
        let (x_min, x_max) = self.x_extent();
        let (mut y_min, mut y_max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.1), hi.max(p.1))
            });

        if let Some(fit) = self.fit {
            for x in [x_min, x_max] {
                let y = fit.predict(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        let (x_min, x_max) = pad_range(x_min, x_max, "x")?;
        let (y_min, y_max) = pad_range(y_min, y_max, "y")?;
        Ok((x_min, x_max, y_min, y_max))
    }
}

fn pad_range(min: f64, max: f64, axis: &str) -> Result<(f64, f64)> {
    let span = max - min;
    let padding = if span > 0.0 {
        span * 0.05
    } else {
        min.abs().max(1.0) * 0.5
    };
    let (lo, hi) = (min - padding, max + padding);
    // The chart coordinate mapping divides by the padded span.
    if (hi - lo).is_finite() {
        Ok((lo, hi))
    } else {
        Err(AnalystError::validation_field(
            format!("{axis} values span more than the plottable range ({min} to {max})"),
            axis,
        ))
    }
}

/// Splits the segment `start..end`, `pixel_len` pixels long on screen, into
/// the visible pieces of `pattern`.
pub fn dash_segments(
    start: (f64, f64),
    end: (f64, f64),
    pixel_len: f64,
    pattern: LinePattern,
    scale: f64,
) -> Vec<[(f64, f64); 2]> {
    let Some((dash, gap)) = pattern.dash_gap() else {
        return vec![[start, end]];
    };
    let dash = (dash * scale).max(1.0);
    let gap = (gap * scale).max(1.0);
    if pixel_len <= dash {
        return vec![[start, end]];
    }

    let lerp = |t: f64| {
        (
            start.0 + (end.0 - start.0) * t,
            start.1 + (end.1 - start.1) * t,
        )
    };

    let mut segments = Vec::new();
    let mut offset = 0.0;
    while offset < pixel_len {
        let stop = (offset + dash).min(pixel_len);
        segments.push([lerp(offset / pixel_len), lerp(stop / pixel_len)]);
        offset += dash + gap;
    }
    segments
}

impl GraphRenderer for ScatterRenderer {
    fn draw_frame(&self, config: &PlotConfig, frame: Frame, buffer: &mut [u8]) -> Result<()> {
        let style = &config.style;
        let root =
            BitMapBackend::with_buffer(buffer, (frame.width, frame.height)).into_drawing_area();
        root.fill(&self.get_background_color(config))?;

        let (x_min, x_max, y_min, y_max) = self.ranges;
        let margin = scale_px(style.margins.top, frame.scale);

        let mut builder = ChartBuilder::on(&root);
        builder.margin(margin);
        if frame.with_text {
            if !config.title.is_empty() {
                builder.caption(
                    &config.title,
                    (
                        style.title_font.family.as_str(),
                        scale_px(style.title_font.size, frame.scale),
                    ),
                );
            }
            builder
                .x_label_area_size(scale_px(style.margins.bottom, frame.scale))
                .y_label_area_size(scale_px(style.margins.left, frame.scale));
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let mut mesh = chart.configure_mesh();
        if !style.show_grid {
            mesh.disable_mesh();
        }
        if frame.with_text {
            mesh.x_desc(config.x_label.as_str())
                .y_desc(config.y_label.as_str())
                .label_style((
                    style.label_font.family.as_str(),
                    scale_px(style.label_font.size, frame.scale),
                ));
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;

        let point_color = self.parse_color(&style.point_color);
        let radius = scale_px(style.point_radius, frame.scale);
        chart.draw_series(
            self.points
                .iter()
                .map(|&point| Circle::new(point, radius, point_color.filled())),
        )?;

        if let Some(fit) = self.fit {
            let (lo, hi) = self.x_extent();
            let start = (lo, fit.predict(lo));
            let end = (hi, fit.predict(hi));

            let (px0, py0) = chart.backend_coord(&start);
            let (px1, py1) = chart.backend_coord(&end);
            let pixel_len = f64::from(px1 - px0).hypot(f64::from(py1 - py0));

            let line_style = self
                .parse_color(&style.regression.color)
                .stroke_width(scale_px(style.regression.width, frame.scale));
            let segments = dash_segments(
                start,
                end,
                pixel_len,
                style.regression.pattern,
                frame.scale,
            );
            chart.draw_series(
                segments
                    .into_iter()
                    .map(|segment| PathElement::new(segment.to_vec(), line_style)),
            )?;
        }

        root.present()?;
        Ok(())
    }
}

/// Renders `sample` as a regression scatter under `config`'s budget.
pub fn render_scatter(sample: &SamplePair, config: &PlotConfig) -> Result<EncodedImage> {
    ScatterRenderer::new(sample)?.render(config)
}

/// Runs [`render_scatter`] on the blocking thread pool.
pub async fn render_scatter_blocking(
    sample: SamplePair,
    config: PlotConfig,
) -> Result<EncodedImage> {
    tokio::task::spawn_blocking(move || render_scatter(&sample, &config))
        .await
        .map_err(|e| AnalystError::graph_with_source("Render task failed", e))?
}
