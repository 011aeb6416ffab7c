//! Pure Rust decode/resize backend with libwebp for lossy WebP.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, WebP) | `image` crate decoders, format sniffed from content |
//! | Normalize | `DynamicImage::to_rgb8` (alpha is dropped, not composited) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Blur | `DynamicImage::blur` (Gaussian) |
//! | Encode → WebP | `webp::Encoder::encode_advanced` (lossy, quality + method) |
//! | Encode → JPEG | `jpeg_encoder::Encoder` (optimized Huffman tables) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Encoding, OutputParams, RenderParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;
use tracing::debug;

/// Production backend built on the `image`, `webp` and `jpeg-encoder` crates.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode(format!("{}: {}", path.display(), err))
}

/// Open a source file and sniff its format from the leading bytes.
fn open_reader(
    path: &Path,
) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    ImageReader::open(path)
        .map_err(|e| decode_error(path, e))?
        .with_guessed_format()
        .map_err(|e| decode_error(path, e))
}

/// Decode a source image and flatten it to 8-bit RGB.
fn load_rgb(path: &Path) -> Result<DynamicImage, BackendError> {
    let img = open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))?;
    Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
}

/// Resize (if the planned size differs) and blur one output from the normalized source.
fn prepare(source: &DynamicImage, params: &OutputParams) -> DynamicImage {
    let resized = if (params.width, params.height) == (source.width(), source.height()) {
        source.clone()
    } else {
        source.resize_exact(params.width, params.height, FilterType::Lanczos3)
    };

    match params.blur {
        Some(sigma) => resized.blur(sigma),
        None => resized,
    }
}

fn save_image(img: &DynamicImage, params: &OutputParams) -> Result<(), BackendError> {
    match params.encoding {
        Encoding::WebP { quality, method } => {
            save_webp(img, &params.output, quality.value(), method)
        }
        Encoding::Jpeg { quality } => save_jpeg(img, &params.output, quality.value()),
    }
}

/// Encode lossy WebP through libwebp's advanced config.
fn save_webp(
    img: &DynamicImage,
    path: &Path,
    quality: u32,
    method: u8,
) -> Result<(), BackendError> {
    let encoder = webp::Encoder::from_image(img)
        .map_err(|e| BackendError::Encode(format!("WebP encoder rejected image: {e}")))?;

    let mut config = webp::WebPConfig::new()
        .map_err(|_| BackendError::Encode("cannot initialise WebP config".into()))?;
    config.lossless = 0;
    config.quality = quality as f32;
    config.method = method as i32;

    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| BackendError::Encode(format!("WebP encode failed: {e:?}")))?;
    std::fs::write(path, &*encoded)?;
    Ok(())
}

/// Baseline JPEG with optimized Huffman tables.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let rgb = img.to_rgb8();
    let (width, height) = match (u16::try_from(rgb.width()), u16::try_from(rgb.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(BackendError::Encode(format!(
                "JPEG dimensions {}x{} exceed 65535",
                rgb.width(),
                rgb.height()
            )));
        }
    };

    let writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    let mut encoder = jpeg_encoder::Encoder::new(writer, quality as u8);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| BackendError::Encode(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn render(&self, params: &RenderParams) -> Result<(), BackendError> {
        let source = load_rgb(&params.source)?;

        for output in &params.outputs {
            let prepared = prepare(&source, output);
            save_image(&prepared, output)?;
            debug!(
                output = %output.output.display(),
                width = output.width,
                height = output.height,
                "wrote {}",
                output.label
            );
        }
        Ok(())
    }
}
