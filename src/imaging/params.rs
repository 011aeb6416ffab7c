//! Parameter types for image operations.
//!
//! These structs describe *what* to write, not *how*. The
//! [`operations`](super::operations) module plans them from configuration and
//! source dimensions; the [`backend`](super::backend) does the pixel work.
//! Keeping them plain data lets tests swap in a mock backend.
//!
//! - [`Quality`]: lossy encoding quality (1–100). Clamped on construction.
//! - [`Encoding`]: output codec plus its codec-specific knobs.
//! - [`OutputParams`]: one file to produce: path, exact dimensions, blur, encoding.
//! - [`RenderParams`]: every output for one source image, rendered from a single decode.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Output codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Lossy WebP. `method` is libwebp's effort level (0 = fast, 6 = smallest).
    WebP { quality: Quality, method: u8 },
    /// Baseline JPEG.
    Jpeg { quality: Quality },
}

impl Encoding {
    /// File extension written for this encoding.
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::WebP { .. } => "webp",
            Encoding::Jpeg { .. } => "jpg",
        }
    }

    pub fn quality(&self) -> Quality {
        match self {
            Encoding::WebP { quality, .. } | Encoding::Jpeg { quality } => *quality,
        }
    }
}

/// A single output file derived from the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputParams {
    /// Manifest label (`"1600"`, `"placeholder"`, ...).
    pub label: String,
    pub output: PathBuf,
    /// Final dimensions. Equal to the source dimensions when no resize is needed.
    pub width: u32,
    pub height: u32,
    /// Gaussian blur sigma applied after resizing.
    pub blur: Option<f32>,
    pub encoding: Encoding,
}

/// All outputs for one source image.
///
/// The backend decodes `source` once and renders every entry of `outputs`
/// in order; the first failure aborts the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub source: PathBuf,
    pub outputs: Vec<OutputParams>,
}
