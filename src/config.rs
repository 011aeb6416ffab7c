//! Conversion configuration and project layout.
//!
//! Two things live here:
//!
//! - [`ConvertConfig`]: the immutable set of knobs for a run (variant sizes,
//!   placeholder, qualities, accepted source extensions). Stock defaults cover
//!   everything; an optional `respimg.toml` at the project root overrides any
//!   subset.
//! - [`ProjectPaths`]: every path the pipeline touches, resolved once from the
//!   project root and passed down explicitly.
//!
//! ## Project Layout
//!
//! ```text
//! <root>/
//! ├── respimg.toml               # Optional config overrides
//! ├── images.json                # Optional explicit input list
//! └── images/
//!     ├── photo.jpg              # Sources
//!     └── optimized/
//!         ├── manifest.json
//!         ├── photo-1600.webp
//!         ├── photo-900.webp
//!         └── photo-placeholder.jpg
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! variant_quality = 80          # WebP quality (1-100)
//! webp_method = 6               # libwebp effort (0-6)
//! accepted_extensions = ["jpg", "jpeg", "png"]
//!
//! [[sizes]]                     # Rendered in this order
//! label = "1600"
//! long_edge = 1600
//!
//! [[sizes]]
//! label = "900"
//! long_edge = 900
//!
//! [placeholder]
//! long_edge = 40
//! blur_sigma = 1.0
//! quality = 30
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{PlaceholderConfig, Quality, VariantConfig, VariantSize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Invalid input list {}: {source}", path.display())]
    InputList {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Name of the optional config file at the project root.
pub const CONFIG_FILE: &str = "respimg.toml";

/// Resolved locations of every input and output of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    /// `<root>/images`
    pub source_dir: PathBuf,
    /// `<root>/images/optimized`
    pub output_dir: PathBuf,
    /// `<root>/images.json`
    pub input_list: PathBuf,
    /// `<root>/images/optimized/manifest.json`
    pub manifest: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let source_dir = root.join("images");
        let output_dir = source_dir.join("optimized");
        Self {
            input_list: root.join("images.json"),
            manifest: output_dir.join("manifest.json"),
            root,
            source_dir,
            output_dir,
        }
    }

    /// Path relative to the project root with `/` separators, as recorded in the manifest.
    ///
    /// Both paths are normalized lexically first. Paths outside the root climb
    /// out with `..` (`/site` + `/tmp/x.webp` → `../tmp/x.webp`). A path with a
    /// different anchor than the root has no relative form and is returned
    /// whole.
    pub fn manifest_path(&self, path: &Path) -> String {
        let root = lexical_components(&self.root);
        let target = lexical_components(path);

        let common = root
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a == b)
            .count();
        if common == 0 && (is_anchored(&root) || is_anchored(&target)) {
            return path.to_string_lossy().replace('\\', "/");
        }

        std::iter::repeat_n("..".to_string(), root.len() - common)
            .chain(
                target[common..]
                    .iter()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned()),
            )
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_anchored(components: &[Component<'_>]) -> bool {
    matches!(
        components.first(),
        Some(Component::RootDir | Component::Prefix(_))
    )
}

/// Components with `.` dropped and `..` folded into its parent.
fn lexical_components(path: &Path) -> Vec<Component<'_>> {
    let mut out = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Conversion settings for a run.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// WebP quality for every size variant.
    pub variant_quality: u32,
    /// libwebp compression effort (0 = fastest, 6 = smallest output).
    pub webp_method: u8,
    /// Extensions picked up by the directory scan (case-insensitive, no dot).
    pub accepted_extensions: Vec<String>,
    /// Size variants, rendered and recorded in this order.
    pub sizes: Vec<SizeSpec>,
    pub placeholder: PlaceholderSpec,
}

/// A named long-edge target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeSpec {
    pub label: String,
    pub long_edge: u32,
}

/// Placeholder (LQIP) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderSpec {
    pub long_edge: u32,
    /// Gaussian blur sigma applied after resizing.
    pub blur_sigma: f32,
    /// JPEG quality.
    pub quality: u32,
}

impl Default for PlaceholderSpec {
    fn default() -> Self {
        Self {
            long_edge: 40,
            blur_sigma: 1.0,
            quality: 30,
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            variant_quality: 80,
            webp_method: 6,
            accepted_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            sizes: vec![
                SizeSpec {
                    label: "1600".into(),
                    long_edge: 1600,
                },
                SizeSpec {
                    label: "900".into(),
                    long_edge: 900,
                },
            ],
            placeholder: PlaceholderSpec::default(),
        }
    }
}

impl ConvertConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::Validation("sizes must not be empty".into()));
        }
        let mut labels = HashSet::new();
        for size in &self.sizes {
            if size.label.is_empty() {
                return Err(ConfigError::Validation("size labels must not be empty".into()));
            }
            if size.label == crate::imaging::PLACEHOLDER_LABEL {
                return Err(ConfigError::Validation(
                    "size label \"placeholder\" is reserved".into(),
                ));
            }
            if size.long_edge == 0 {
                return Err(ConfigError::Validation(format!(
                    "size \"{}\" must have a non-zero long_edge",
                    size.label
                )));
            }
            if !labels.insert(size.label.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate size label \"{}\"",
                    size.label
                )));
            }
        }
        if self.placeholder.long_edge == 0 {
            return Err(ConfigError::Validation(
                "placeholder.long_edge must be non-zero".into(),
            ));
        }
        if self.placeholder.blur_sigma.is_nan() || self.placeholder.blur_sigma <= 0.0 {
            return Err(ConfigError::Validation(
                "placeholder.blur_sigma must be positive".into(),
            ));
        }
        for (name, quality) in [
            ("variant_quality", self.variant_quality),
            ("placeholder.quality", self.placeholder.quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Validation(format!("{name} must be 1-100")));
            }
        }
        if self.webp_method > 6 {
            return Err(ConfigError::Validation("webp_method must be 0-6".into()));
        }
        if self.accepted_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "accepted_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether a file name has one of the accepted extensions (case-insensitive).
    pub fn accepts(&self, filename: &str) -> bool {
        let name = filename.to_ascii_lowercase();
        self.accepted_extensions.iter().any(|accepted| {
            let suffix = format!(".{}", accepted.trim_start_matches('.').to_ascii_lowercase());
            name.ends_with(&suffix)
        })
    }

    pub fn variant_config(&self) -> VariantConfig {
        VariantConfig {
            sizes: self
                .sizes
                .iter()
                .map(|s| VariantSize {
                    label: s.label.clone(),
                    long_edge: s.long_edge,
                })
                .collect(),
            quality: Quality::new(self.variant_quality),
            method: self.webp_method,
        }
    }

    pub fn placeholder_config(&self) -> PlaceholderConfig {
        PlaceholderConfig {
            long_edge: self.placeholder.long_edge,
            blur_sigma: self.placeholder.blur_sigma,
            quality: Quality::new(self.placeholder.quality),
        }
    }
}

/// Load and validate the run configuration.
///
/// With an explicit path the file must exist. Otherwise `<root>/respimg.toml`
/// is used when present and stock defaults when not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ConvertConfig, ConfigError> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = root.join(CONFIG_FILE);
            if !path.exists() {
                return Ok(ConvertConfig::default());
            }
            path
        }
    };
    let content = fs::read_to_string(&config_path)?;
    let config: ConvertConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `respimg.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# respimg configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# WebP quality for every size variant (1 = worst, 100 = best).
variant_quality = 80

# libwebp compression effort: 0 = fastest, 6 = smallest files.
webp_method = 6

# Extensions picked up from images/ when there is no images.json.
# Matched case-insensitively.
accepted_extensions = ["jpg", "jpeg", "png"]

# ---------------------------------------------------------------------------
# Size variants
# ---------------------------------------------------------------------------
# Each source is fitted into `long_edge` pixels on its longer side and written
# as images/optimized/<name>-<label>.webp. Images are never upscaled.
# Variants are rendered and listed in the manifest in this order.
[[sizes]]
label = "1600"
long_edge = 1600

[[sizes]]
label = "900"
long_edge = 900

# ---------------------------------------------------------------------------
# Placeholder
# ---------------------------------------------------------------------------
# Tiny blurred JPEG for progressive loading:
# images/optimized/<name>-placeholder.jpg
[placeholder]
long_edge = 40
blur_sigma = 1.0
quality = 30
"##
}
