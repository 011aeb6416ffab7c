//! Input resolution: which source files a run converts.
//!
//! Two modes, picked by whether `images.json` exists at the project root:
//!
//! - **Input list**: the file must be a JSON array of strings. It is used
//!   verbatim: order preserved, duplicates kept, no existence checks. Missing
//!   files surface later as per-image decode failures.
//! - **Directory scan**: immediate files of `images/` whose extension is in
//!   [`ConvertConfig::accepted_extensions`], sorted by name.
//!
//! A malformed input list is the one fatal input error; it aborts the run
//! before any image is touched.

use crate::config::{ConfigError, ConvertConfig, ProjectPaths};
use std::fs;
use tracing::{debug, warn};

/// Where the file list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    InputList,
    DirectoryScan,
}

/// Ordered source file names, relative to the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub source: InputSource,
    pub files: Vec<String>,
}

pub fn resolve_inputs(
    paths: &ProjectPaths,
    config: &ConvertConfig,
) -> Result<ResolvedInputs, ConfigError> {
    if paths.input_list.exists() {
        let files = read_input_list(paths)?;
        debug!(
            count = files.len(),
            "using input list {}",
            paths.input_list.display()
        );
        return Ok(ResolvedInputs {
            source: InputSource::InputList,
            files,
        });
    }

    let files = scan_source_dir(paths, config)?;
    debug!(count = files.len(), "scanned {}", paths.source_dir.display());
    Ok(ResolvedInputs {
        source: InputSource::DirectoryScan,
        files,
    })
}

fn read_input_list(paths: &ProjectPaths) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(&paths.input_list)?;
    serde_json::from_str(&content).map_err(|source| ConfigError::InputList {
        path: paths.input_list.clone(),
        source,
    })
}

fn scan_source_dir(
    paths: &ProjectPaths,
    config: &ConvertConfig,
) -> Result<Vec<String>, ConfigError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(&paths.source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!("skipping non UTF-8 file name {:?}", name);
            continue;
        };
        if config.accepts(name) {
            files.push(name.to_string());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> (TempDir, ProjectPaths) {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        fs::create_dir_all(&paths.source_dir).unwrap();
        (tmp, paths)
    }

    fn touch(paths: &ProjectPaths, name: &str) {
        fs::write(paths.source_dir.join(name), b"").unwrap();
    }

    #[test]
    fn scan_filters_by_extension_case_insensitive() {
        let (_tmp, paths) = project();
        for name in ["b.JPG", "a.png", "c.jpeg", "notes.txt", "anim.gif", "noext"] {
            touch(&paths, name);
        }

        let inputs = resolve_inputs(&paths, &ConvertConfig::default()).unwrap();
        assert_eq!(inputs.source, InputSource::DirectoryScan);
        assert_eq!(inputs.files, vec!["a.png", "b.JPG", "c.jpeg"]);
    }

    #[test]
    fn scan_skips_subdirectories() {
        let (_tmp, paths) = project();
        touch(&paths, "photo.jpg");
        fs::create_dir_all(paths.source_dir.join("nested.jpg")).unwrap();
        fs::create_dir_all(&paths.output_dir).unwrap();

        let inputs = resolve_inputs(&paths, &ConvertConfig::default()).unwrap();
        assert_eq!(inputs.files, vec!["photo.jpg"]);
    }

    #[test]
    fn scan_missing_source_dir_errors() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        let result = resolve_inputs(&paths, &ConvertConfig::default());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn input_list_used_verbatim() {
        let (_tmp, paths) = project();
        touch(&paths, "ignored.jpg");
        fs::write(
            &paths.input_list,
            r#"["z.png", "missing.jpg", "z.png", "notes.txt"]"#,
        )
        .unwrap();

        let inputs = resolve_inputs(&paths, &ConvertConfig::default()).unwrap();
        assert_eq!(inputs.source, InputSource::InputList);
        assert_eq!(
            inputs.files,
            vec!["z.png", "missing.jpg", "z.png", "notes.txt"]
        );
    }

    #[test]
    fn input_list_invalid_json_is_config_error() {
        let (_tmp, paths) = project();
        fs::write(&paths.input_list, "[\"a.jpg\", ").unwrap();

        let result = resolve_inputs(&paths, &ConvertConfig::default());
        assert!(matches!(result, Err(ConfigError::InputList { .. })));
    }

    #[test]
    fn input_list_wrong_shape_is_config_error() {
        let (_tmp, paths) = project();
        fs::write(&paths.input_list, r#"{"a.jpg": true}"#).unwrap();
        assert!(matches!(
            resolve_inputs(&paths, &ConvertConfig::default()),
            Err(ConfigError::InputList { .. })
        ));

        fs::write(&paths.input_list, r#"["a.jpg", 3]"#).unwrap();
        assert!(matches!(
            resolve_inputs(&paths, &ConvertConfig::default()),
            Err(ConfigError::InputList { .. })
        ));
    }

    #[test]
    fn input_list_works_without_source_dir() {
        let tmp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(tmp.path());
        fs::write(&paths.input_list, "[]").unwrap();

        let inputs = resolve_inputs(&paths, &ConvertConfig::default()).unwrap();
        assert!(inputs.files.is_empty());
    }
}
