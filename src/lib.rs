//! # respimg
//!
//! Batch-converts a directory of original images into web-ready derivatives
//! for a static site: WebP variants at fixed long-edge sizes, a tiny blurred
//! JPEG placeholder for progressive loading, and a JSON manifest mapping every
//! source file to its outputs.
//!
//! # Pipeline
//!
//! A run is a single linear pass with no state carried between invocations:
//!
//! ```text
//! 1. Resolve   images.json or images/*.{jpg,jpeg,png}  →  ordered file names
//! 2. Convert   each file → <name>-1600.webp, <name>-900.webp, <name>-placeholder.jpg
//! 3. Write     images/optimized/manifest.json
//! ```
//!
//! Every image is converted in full or not at all: a decode or encode failure
//! is reported and that file is left out of the manifest, while the rest of
//! the batch carries on. Only setup failures (a malformed `images.json`, an
//! output directory that cannot be created, a manifest that cannot be written)
//! stop the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Run settings (`respimg.toml`) and resolved project paths |
//! | [`inputs`] | Input list or directory scan |
//! | [`imaging`] | Fit math, output planning, decode/resize/blur/encode backend |
//! | [`convert`] | Per-image conversion boundary and the batch driver |
//! | [`manifest`] | Ordered manifest model and atomic JSON write |
//! | [`output`] | Console line formatting |
//!
//! # Design Decisions
//!
//! ## Never Upscale
//!
//! Each variant is fitted into its target long edge with
//! `scale = target / max(width, height)` and `floor` on both edges. Sources
//! already within the target are re-encoded at their original size, so a
//! 200×150 icon yields two 200×150 WebP files rather than blurry enlargements.
//!
//! ## Opaque Output
//!
//! Sources are flattened to 8-bit RGB before any resizing. Alpha channels are
//! dropped, not composited: transparent pixels keep their stored colour.

pub mod config;
pub mod convert;
pub mod imaging;
pub mod inputs;
pub mod manifest;
pub mod output;
