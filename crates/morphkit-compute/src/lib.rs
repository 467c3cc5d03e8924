//! Pipeline engine for morphkit: kernel executors and pass runners.
//!
//! Provides the [`KernelExecutor`] backend contract, a rayon-parallel CPU
//! reference backend, and the single-pass / multi-pass pipeline runners
//! that thread an image through chained transform passes.
//!
//! # Architecture
//!
//! ```text
//! run_pipeline / run_single_pass
//!     └── KernelExecutor trait
//!             ├── CpuExecutor (rayon reference backend)
//!             └── <GPU backends plug in here>
//! ```
//!
//! The multi-pass runner owns the central algorithm of the toolkit:
//! double-buffered ("ping-pong") chaining that keeps exactly two buffers
//! in flight regardless of pipeline length, reconciling the result into
//! the caller's destination when the step-count parity leaves it in the
//! scratch buffer.
//!
//! # Example
//!
//! ```
//! use morphkit_core::{ImageBuffer, Kernel, Operation, Pass, Summation};
//! use morphkit_compute::{CpuExecutor, default_offset, run_pipeline};
//!
//! let mut executor = CpuExecutor::new();
//! let source = ImageBuffer::new(16, 16, 1);
//! let mut destination = ImageBuffer::new(16, 16, 1);
//!
//! let ones = Kernel::new(vec![1.0; 9], 3, Summation::Weighted).unwrap();
//! let passes = [
//!     Pass::single(ones.clone(), Operation::Erode),
//!     Pass::single(ones, Operation::Dilate),
//! ];
//!
//! run_pipeline(&mut executor, &source, &mut destination, &passes, default_offset).unwrap();
//! ```

pub mod cpu;
pub mod executor;
pub mod pipeline;

pub use cpu::CpuExecutor;
pub use executor::KernelExecutor;
pub use pipeline::{
    default_offset, process, process_in_place, process_multi, run_pipeline,
    run_pipeline_in_place, run_single_pass,
};

use morphkit_core::ImageBuffer;
use thiserror::Error;

/// Engine operation errors.
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Source and destination extents are incompatible for the configured
    /// operation.
    #[error(
        "dimension mismatch: source {src_width}x{src_height}x{src_channels}, \
         destination {dst_width}x{dst_height}x{dst_channels}"
    )]
    DimensionMismatch {
        /// Source width.
        src_width: u32,
        /// Source height.
        src_height: u32,
        /// Source channel count.
        src_channels: u32,
        /// Destination width.
        dst_width: u32,
        /// Destination height.
        dst_height: u32,
        /// Destination channel count.
        dst_channels: u32,
    },

    /// The execution backend failed to configure or dispatch.
    ///
    /// Never retried internally; the pipeline aborts and propagates.
    #[error("backend error: {0}")]
    Backend(String),
}

impl ComputeError {
    /// Creates a [`ComputeError::DimensionMismatch`] from two buffers.
    #[inline]
    pub fn dimension_mismatch(src: &ImageBuffer, dst: &ImageBuffer) -> Self {
        Self::DimensionMismatch {
            src_width: src.width,
            src_height: src.height,
            src_channels: src.channels,
            dst_width: dst.width,
            dst_height: dst.height,
            dst_channels: dst.channels,
        }
    }
}

/// Result type for engine operations.
pub type ComputeResult<T> = Result<T, ComputeError>;
