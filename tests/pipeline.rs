//! End-to-end conversion runs against a temporary project tree.
//!
//! These use the real backend, so they decode, resize and encode actual
//! images. Run with: cargo test --test pipeline

use image::{ImageEncoder, RgbImage, RgbaImage};
use respimg::config::{ConfigError, ConvertConfig, ProjectPaths};
use respimg::convert::{ConvertError, convert_all};
use respimg::imaging::RustBackend;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> (TempDir, ProjectPaths) {
    let tmp = TempDir::new().unwrap();
    let paths = ProjectPaths::new(tmp.path());
    fs::create_dir_all(&paths.source_dir).unwrap();
    (tmp, paths)
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 96])
    });
    let writer = std::io::BufWriter::new(fs::File::create(path).unwrap());
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 90)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, 200, (y % 256) as u8, 128])
    })
    .save(path)
    .unwrap();
}

fn dims(paths: &ProjectPaths, name: &str) -> (u32, u32) {
    image::image_dimensions(paths.output_dir.join(name)).unwrap()
}

fn read_manifest(paths: &ProjectPaths) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(&paths.manifest).unwrap()).unwrap()
}

#[test]
fn large_photo_gets_all_sizes() {
    let (_tmp, paths) = project();
    write_jpeg(&paths.source_dir.join("photo.jpg"), 3200, 2400);

    let report =
        convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {}).unwrap();

    assert_eq!(report.manifest.len(), 1);
    assert_eq!(dims(&paths, "photo-1600.webp"), (1600, 1200));
    assert_eq!(dims(&paths, "photo-900.webp"), (900, 675));
    assert_eq!(dims(&paths, "photo-placeholder.jpg"), (40, 30));

    assert_eq!(
        read_manifest(&paths),
        serde_json::json!({
            "photo.jpg": {
                "1600": "images/optimized/photo-1600.webp",
                "900": "images/optimized/photo-900.webp",
                "placeholder": "images/optimized/photo-placeholder.jpg"
            }
        })
    );
}

#[test]
fn small_png_is_never_upscaled() {
    let (_tmp, paths) = project();
    write_png(&paths.source_dir.join("icon.png"), 200, 150);

    convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {}).unwrap();

    assert_eq!(dims(&paths, "icon-1600.webp"), (200, 150));
    assert_eq!(dims(&paths, "icon-900.webp"), (200, 150));
    assert_eq!(dims(&paths, "icon-placeholder.jpg"), (40, 30));

    // Alpha is flattened away
    let variant = image::open(paths.output_dir.join("icon-900.webp")).unwrap();
    assert!(!variant.color().has_alpha());
}

#[test]
fn listed_missing_file_is_skipped() {
    let (_tmp, paths) = project();
    write_jpeg(&paths.source_dir.join("a.jpg"), 120, 80);
    write_jpeg(&paths.source_dir.join("b.jpg"), 80, 120);
    fs::write(&paths.input_list, r#"["b.jpg", "missing.jpg", "a.jpg"]"#).unwrap();

    let report =
        convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {}).unwrap();

    let failures: Vec<&str> = report.failures().map(|(f, _)| f).collect();
    assert_eq!(failures, vec!["missing.jpg"]);

    // Input-list order is manifest order
    assert_eq!(
        report.manifest.filenames().collect::<Vec<_>>(),
        vec!["b.jpg", "a.jpg"]
    );
    let manifest = read_manifest(&paths);
    assert!(manifest.get("missing.jpg").is_none());
    assert!(!paths.output_dir.join("missing-1600.webp").exists());
}

#[test]
fn corrupt_source_is_skipped() {
    let (_tmp, paths) = project();
    write_jpeg(&paths.source_dir.join("good.jpg"), 64, 48);
    fs::write(paths.source_dir.join("broken.png"), b"not a png at all").unwrap();

    let report =
        convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {}).unwrap();

    assert_eq!(report.manifest.filenames().collect::<Vec<_>>(), vec!["good.jpg"]);
    assert_eq!(report.failures().count(), 1);
}

#[test]
fn invalid_input_list_aborts_without_manifest() {
    let (_tmp, paths) = project();
    write_jpeg(&paths.source_dir.join("photo.jpg"), 64, 48);
    fs::write(&paths.input_list, "{ not json").unwrap();

    let result = convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {});

    assert!(matches!(
        result,
        Err(ConvertError::Config(ConfigError::InputList { .. }))
    ));
    assert!(!paths.manifest.exists());
}

#[test]
fn rerun_yields_same_keys_and_files() {
    let (_tmp, paths) = project();
    write_jpeg(&paths.source_dir.join("one.jpg"), 2000, 1000);
    write_png(&paths.source_dir.join("two.png"), 300, 600);

    let list_outputs = |paths: &ProjectPaths| {
        let mut names: Vec<String> = fs::read_dir(&paths.output_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    };

    convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {}).unwrap();
    let first_manifest = fs::read_to_string(&paths.manifest).unwrap();
    let first_files = list_outputs(&paths);

    convert_all(&RustBackend::new(), &paths, &ConvertConfig::default(), |_| {}).unwrap();
    assert_eq!(fs::read_to_string(&paths.manifest).unwrap(), first_manifest);
    assert_eq!(list_outputs(&paths), first_files);
    assert_eq!(dims(&paths, "one-900.webp"), (900, 450));
    assert_eq!(dims(&paths, "two-placeholder.jpg"), (20, 40));
}
