//! Error types for shiftdiff.

use thiserror::Error;

/// Result alias for shiftdiff operations.
pub type ShiftDiffResult<T> = std::result::Result<T, ShiftDiffError>;

/// Errors that can occur when building images or running comparisons.
///
/// Differently sized inputs to [`crate::compare`] are not an error; they yield
/// [`crate::Outcome::SizeMismatch`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ShiftDiffError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer holds fewer elements than the layout requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A comparison parameter is outside its valid range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    /// A directional pass was requested on differently sized images.
    #[error("image sizes differ: {source_width}x{source_height} vs {target_width}x{target_height}")]
    SizeMismatch {
        source_width: usize,
        source_height: usize,
        target_width: usize,
        target_height: usize,
    },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
