//! CLI output formatting.
//!
//! Each command has `format_*` functions (returning lines, no I/O) and a
//! `print_*` wrapper that writes them to stdout.
//!
//! # Convert
//!
//! ```text
//! Converted photo.jpg -> images/optimized/photo-1600.webp, images/optimized/photo-900.webp, images/optimized/photo-placeholder.jpg
//! Failed to convert ghost.jpg: cannot decode image: images/ghost.jpg: No such file or directory (os error 2)
//!
//! Converted 1 of 2 images
//! Failed:
//!     ghost.jpg: cannot decode image: ...
//! Wrote manifest to images/optimized/manifest.json
//! ```
//!
//! # Check
//!
//! ```text
//! photo.jpg (3200x2400)
//!     1600: images/optimized/photo-1600.webp 1600x1200
//!     900: images/optimized/photo-900.webp 900x675
//!     placeholder: images/optimized/photo-placeholder.jpg 40x30
//! icon.png (200x150)
//!     1600: images/optimized/icon-1600.webp 200x150 (original size)
//! ```

use crate::config::ProjectPaths;
use crate::convert::{ConvertReport, ImageOutcome, PlannedImage};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One line per processed image.
pub fn format_outcome(outcome: &ImageOutcome) -> String {
    match outcome {
        ImageOutcome::Converted(image) => format!(
            "Converted {} -> {}",
            image.filename,
            image.entry.paths().collect::<Vec<_>>().join(", ")
        ),
        ImageOutcome::Failed { filename, error } => {
            format!("Failed to convert {}: {}", filename, error)
        }
    }
}

pub fn print_outcome(outcome: &ImageOutcome) {
    println!("{}", format_outcome(outcome));
}

/// Closing summary: counts, each failure with its reason, then the manifest path.
pub fn format_summary(report: &ConvertReport, paths: &ProjectPaths) -> Vec<String> {
    let total = report.outcomes.len();
    let converted = report.converted().count();

    let mut lines = vec![
        String::new(),
        format!("Converted {} of {} images", converted, total),
    ];

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        lines.push("Failed:".to_string());
        for (filename, error) in failures {
            lines.push(format!("{}{}: {}", indent(1), filename, error));
        }
    }

    lines.push(format!(
        "Wrote manifest to {}",
        paths.manifest_path(&report.manifest_path)
    ));
    lines
}

pub fn print_summary(report: &ConvertReport, paths: &ProjectPaths) {
    for line in format_summary(report, paths) {
        println!("{}", line);
    }
}

/// Planned outputs per image, without encoding anything.
pub fn format_check_output(planned: &[PlannedImage], paths: &ProjectPaths) -> Vec<String> {
    let mut lines = Vec::new();
    let mut unreadable = 0;

    for image in planned {
        match image {
            PlannedImage::Planned {
                filename,
                original,
                outputs,
            } => {
                lines.push(format!(
                    "{} ({}x{})",
                    filename, original.width, original.height
                ));
                for output in outputs {
                    let kept = (output.width, output.height) == original.as_tuple();
                    lines.push(format!(
                        "{}{}: {} {}x{}{}",
                        indent(1),
                        output.label,
                        paths.manifest_path(&output.output),
                        output.width,
                        output.height,
                        if kept { " (original size)" } else { "" }
                    ));
                }
            }
            PlannedImage::Unreadable { filename, error } => {
                unreadable += 1;
                lines.push(format!("{} (unreadable)", filename));
                lines.push(format!("{}{}", indent(1), error));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} images, {} unreadable",
        planned.len(),
        unreadable
    ));
    lines
}

pub fn print_check_output(planned: &[PlannedImage], paths: &ProjectPaths) {
    for line in format_check_output(planned, paths) {
        println!("{}", line);
    }
}
