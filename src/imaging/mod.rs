//! Image processing: decode, fit, blur, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Variant → WebP** | Lanczos3 + libwebp (quality 80, method 6) |
//! | **Placeholder → JPEG** | Lanczos3 + Gaussian blur + JPEG with optimized Huffman tables (quality 30) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing each output file
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Plan a source image's outputs and execute them on a backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_long_edge;
pub use operations::{
    PLACEHOLDER_LABEL, PlaceholderConfig, VariantConfig, VariantSize, create_outputs,
    get_dimensions, plan_outputs,
};
pub use params::{Encoding, OutputParams, Quality, RenderParams};
pub use rust_backend::RustBackend;
