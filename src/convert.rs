//! Batch conversion: every resolved source → variants, placeholder, manifest.
//!
//! ## Output Structure
//!
//! ```text
//! images/optimized/
//! ├── manifest.json
//! ├── photo-1600.webp          # Fitted into 1600px on the longer edge
//! ├── photo-900.webp           # Fitted into 900px
//! └── photo-placeholder.jpg    # 40px, blurred, quality 30
//! ```
//!
//! ## Failure Boundary
//!
//! Each source image is all-or-nothing. [`convert_image`] returns an
//! [`ImageOutcome`] instead of an error: any decode, encode or I/O failure
//! turns into `Failed` and the batch moves on. Files already written for a
//! failed image are left behind but never reach the manifest.
//!
//! Only failures outside that boundary abort the run: resolving inputs,
//! creating the output directory, and writing the manifest.
//!
//! Images are processed one at a time; the decoded buffer for an image is
//! dropped before the next one is opened.

use crate::config::{ConfigError, ConvertConfig, ProjectPaths};
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, OutputParams, PlaceholderConfig, VariantConfig,
    create_outputs, get_dimensions, plan_outputs,
};
use crate::inputs::{ResolvedInputs, resolve_inputs};
use crate::manifest::{ConversionEntry, Manifest, ManifestError, write_manifest};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// A fully converted source image.
#[derive(Debug)]
pub struct ConvertedImage {
    pub filename: String,
    pub entry: ConversionEntry,
    /// Every written output with its final dimensions, in render order.
    pub outputs: Vec<OutputParams>,
}

/// Result of converting one source image.
#[derive(Debug)]
pub enum ImageOutcome {
    Converted(ConvertedImage),
    Failed {
        filename: String,
        error: BackendError,
    },
}

impl ImageOutcome {
    pub fn filename(&self) -> &str {
        match self {
            ImageOutcome::Converted(image) => &image.filename,
            ImageOutcome::Failed { filename, .. } => filename,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ImageOutcome::Converted(_))
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct ConvertReport {
    pub manifest: Manifest,
    /// One outcome per resolved input, in input order.
    pub outcomes: Vec<ImageOutcome>,
    pub manifest_path: PathBuf,
}

impl ConvertReport {
    pub fn converted(&self) -> impl Iterator<Item = &ConvertedImage> {
        self.outcomes.iter().filter_map(|o| match o {
            ImageOutcome::Converted(image) => Some(image),
            ImageOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &BackendError)> {
        self.outcomes.iter().filter_map(|o| match o {
            ImageOutcome::Failed { filename, error } => Some((filename.as_str(), error)),
            ImageOutcome::Converted(_) => None,
        })
    }
}

/// Output file stem: the file name without its last extension.
///
/// `photo.jpg` → `photo`, `v1.2.png` → `v1.2`, `.hidden` → `.hidden`.
pub fn output_stem(filename: &str) -> String {
    Path::new(filename)
        .with_extension("")
        .to_string_lossy()
        .into_owned()
}

/// Convert one source image. Never fails the batch.
pub fn convert_image(
    backend: &impl ImageBackend,
    paths: &ProjectPaths,
    variants: &VariantConfig,
    placeholder: &PlaceholderConfig,
    filename: &str,
) -> ImageOutcome {
    let source = paths.source_dir.join(filename);
    let stem = output_stem(filename);

    match create_outputs(
        backend,
        &source,
        &paths.output_dir,
        &stem,
        variants,
        placeholder,
    ) {
        Ok(outputs) => {
            let mut entry = ConversionEntry::new();
            for output in &outputs {
                entry.push(output.label.clone(), paths.manifest_path(&output.output));
            }
            ImageOutcome::Converted(ConvertedImage {
                filename: filename.to_string(),
                entry,
                outputs,
            })
        }
        Err(error) => {
            debug!(file = filename, "conversion failed: {}", error);
            ImageOutcome::Failed {
                filename: filename.to_string(),
                error,
            }
        }
    }
}

/// Build the manifest from outcomes, keeping only fully converted images.
pub fn collect_manifest(outcomes: &[ImageOutcome]) -> Manifest {
    let mut manifest = Manifest::new();
    for outcome in outcomes {
        if let ImageOutcome::Converted(image) = outcome {
            manifest.insert(image.filename.clone(), image.entry.clone());
        }
    }
    manifest
}

/// Run the whole pipeline with the given backend.
///
/// `on_outcome` is called after each image, in input order, so callers can
/// report progress while the batch runs.
pub fn convert_all(
    backend: &impl ImageBackend,
    paths: &ProjectPaths,
    config: &ConvertConfig,
    mut on_outcome: impl FnMut(&ImageOutcome),
) -> Result<ConvertReport, ConvertError> {
    let ResolvedInputs { source, files } = resolve_inputs(paths, config)?;
    debug!(?source, count = files.len(), "resolved inputs");

    std::fs::create_dir_all(&paths.output_dir).map_err(|source| ConvertError::OutputDir {
        path: paths.output_dir.clone(),
        source,
    })?;

    let variants = config.variant_config();
    let placeholder = config.placeholder_config();

    let mut outcomes = Vec::with_capacity(files.len());
    for filename in &files {
        let outcome = convert_image(backend, paths, &variants, &placeholder, filename);
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    let manifest = collect_manifest(&outcomes);
    write_manifest(&manifest, &paths.manifest)?;

    Ok(ConvertReport {
        manifest,
        outcomes,
        manifest_path: paths.manifest.clone(),
    })
}

/// A source image as `check` sees it: identified and planned, nothing written.
#[derive(Debug)]
pub enum PlannedImage {
    Planned {
        filename: String,
        original: Dimensions,
        outputs: Vec<OutputParams>,
    },
    Unreadable {
        filename: String,
        error: BackendError,
    },
}

/// Resolve inputs and plan every output from image headers only.
pub fn plan_all(
    backend: &impl ImageBackend,
    paths: &ProjectPaths,
    config: &ConvertConfig,
) -> Result<Vec<PlannedImage>, ConvertError> {
    let inputs = resolve_inputs(paths, config)?;
    let variants = config.variant_config();
    let placeholder = config.placeholder_config();

    Ok(inputs
        .files
        .into_iter()
        .map(|filename| {
            let source = paths.source_dir.join(&filename);
            match get_dimensions(backend, &source) {
                Ok(original) => PlannedImage::Planned {
                    outputs: plan_outputs(
                        &paths.output_dir,
                        &output_stem(&filename),
                        original,
                        &variants,
                        &placeholder,
                    ),
                    filename,
                    original,
                },
                Err(error) => PlannedImage::Unreadable { filename, error },
            }
        })
        .collect())
}
