//! PNG and data-URI encoding of rendered pixel buffers.

use analyst_common::{AnalystError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};

/// Prefix of every image payload returned to callers.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A 1×1 PNG used where no real chart could be produced.
pub const PLACEHOLDER_PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

/// A chart that fits its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
    pub png_bytes: usize,
}

impl EncodedImage {
    /// Length of the data-URI text.
    pub fn len(&self) -> usize {
        self.data_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_uri.is_empty()
    }

    pub fn into_data_uri(self) -> String {
        self.data_uri
    }
}

/// Compresses an RGB buffer as PNG.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new_with_quality(&mut png, CompressionType::Best, FilterType::Adaptive)
        .write_image(rgb, width, height, ColorType::Rgb8)
        .map_err(|e| AnalystError::graph_with_source("PNG encoding failed", e))?;
    Ok(png)
}

/// Wraps PNG bytes in a `data:image/png;base64,` URI.
pub fn to_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut uri);
    uri
}

/// Length of the data URI for `png_len` bytes without building it.
pub fn encoded_len(png_len: usize) -> usize {
    DATA_URI_PREFIX.len() + png_len.div_ceil(3) * 4
}
