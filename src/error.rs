//! Error types for `trellis`.

use thiserror::Error;

/// Failures while obtaining pixels to search.
///
/// Failing to find a puzzle or a solution is not an error; both are reported as [`None`].
#[derive(Debug, Error)]
pub enum Error {
    /// A zero-length buffer was given where image bytes were expected.
    #[error("empty input: no image bytes")]
    EmptyInput,

    /// The image could not be read or decoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for fallible `trellis` operations.
pub type Result<T> = std::result::Result<T, Error>;
