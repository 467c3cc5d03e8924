//! Construction errors for the core data model.

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised when constructing core values with invalid shapes.
///
/// Every variant is a contract violation on the caller's side; none of
/// them is recoverable by the library and none is silently corrected.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Kernel weight count does not match `width * width`.
    #[error("kernel has {len} weights, width {width} requires width * width")]
    KernelShape {
        /// Number of weights supplied.
        len: usize,
        /// Requested kernel width.
        width: usize,
    },

    /// Kernel width must be an odd positive integer.
    #[error("kernel width must be odd and positive, got {0}")]
    EvenKernelWidth(usize),

    /// Pass repeat count must be at least 1.
    #[error("pass repeat count must be at least 1")]
    ZeroRepeat,

    /// Pixel buffer length does not match the stated dimensions.
    #[error("buffer size mismatch: expected {expected} values, got {actual}")]
    BufferSizeMismatch {
        /// Values required by width * height * channels.
        expected: usize,
        /// Values actually supplied.
        actual: usize,
    },
}
