//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! configuration and source dimensions, plan every output for one image, and
//! hand the whole plan to the backend in a single `render` call.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_long_edge;
use super::params::{Encoding, OutputParams, Quality, RenderParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Label under which the placeholder is recorded.
pub const PLACEHOLDER_LABEL: &str = "placeholder";

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

/// One responsive variant: a label and the long edge it is fitted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSize {
    pub label: String,
    pub long_edge: u32,
}

/// Configuration for responsive WebP variants.
#[derive(Debug, Clone)]
pub struct VariantConfig {
    /// Rendered in this order.
    pub sizes: Vec<VariantSize>,
    pub quality: Quality,
    /// libwebp effort, 0-6.
    pub method: u8,
}

/// Configuration for the blurred low-quality placeholder.
#[derive(Debug, Clone)]
pub struct PlaceholderConfig {
    pub long_edge: u32,
    pub blur_sigma: f32,
    pub quality: Quality,
}

/// Plan every output for one source image without executing anything.
///
/// Variants come first in declared order, then the placeholder. File names
/// are `<stem>-<label>.<ext>` inside `output_dir`.
pub fn plan_outputs(
    output_dir: &Path,
    filename_stem: &str,
    original: Dimensions,
    variants: &VariantConfig,
    placeholder: &PlaceholderConfig,
) -> Vec<OutputParams> {
    let mut outputs: Vec<OutputParams> = variants
        .sizes
        .iter()
        .map(|size| {
            let encoding = Encoding::WebP {
                quality: variants.quality,
                method: variants.method,
            };
            let (width, height) = fit_long_edge(original.as_tuple(), size.long_edge);
            OutputParams {
                label: size.label.clone(),
                output: output_dir.join(format!(
                    "{}-{}.{}",
                    filename_stem,
                    size.label,
                    encoding.extension()
                )),
                width,
                height,
                blur: None,
                encoding,
            }
        })
        .collect();

    let encoding = Encoding::Jpeg {
        quality: placeholder.quality,
    };
    let (width, height) = fit_long_edge(original.as_tuple(), placeholder.long_edge);
    outputs.push(OutputParams {
        label: PLACEHOLDER_LABEL.to_string(),
        output: output_dir.join(format!(
            "{}-{}.{}",
            filename_stem,
            PLACEHOLDER_LABEL,
            encoding.extension()
        )),
        width,
        height,
        blur: Some(placeholder.blur_sigma),
        encoding,
    });

    outputs
}

/// Create all variants and the placeholder for one source image.
///
/// Returns the executed plan so callers can record paths and dimensions.
pub fn create_outputs(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    filename_stem: &str,
    variants: &VariantConfig,
    placeholder: &PlaceholderConfig,
) -> Result<Vec<OutputParams>> {
    let original = get_dimensions(backend, source)?;
    let outputs = plan_outputs(output_dir, filename_stem, original, variants, placeholder);

    backend.render(&RenderParams {
        source: source.to_path_buf(),
        outputs: outputs.clone(),
    })?;

    Ok(outputs)
}
