//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the converter needs:
//! `identify` (header-only dimension probe) and `render` (decode once, write
//! every planned output).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::RenderParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot decode image: {0}")]
    Decode(String),
    #[error("cannot encode image: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &std::path::Path) -> Result<Dimensions, BackendError>;

    /// Decode the source once and write every output in `params`.
    ///
    /// Decoded buffers must not outlive this call.
    fn render(&self, params: &RenderParams) -> Result<(), BackendError>;
}
