//! # morphkit-core
//!
//! Core types for the morphkit image-processing toolkit.
//!
//! This crate provides the data model shared by the pipeline engine and the
//! toolkit operations:
//!
//! - [`ImageBuffer`] - owned f32 pixel buffer with interleaved channels
//! - [`Kernel`] - immutable convolution kernel descriptor
//! - [`Operation`] - convolve / dilate / erode selector
//! - [`Pass`] - one processing step: kernel + operation + repeat count
//! - [`PassConfig`] - pure configuration descriptor handed to an executor
//!
//! ## Crate structure
//!
//! This crate is the foundation of morphkit and has no internal
//! dependencies. The engine and operation crates build on it:
//!
//! ```text
//! morphkit-core (this crate)
//!    ^
//!    |
//!    +-- morphkit-compute (executor trait, pipeline runners)
//!    +-- morphkit-ops     (arithmetic ops, kernel catalog)
//! ```
//!
//! All value types here are immutable once constructed; invalid shapes
//! (mismatched kernel weights, zero repeat counts, short pixel buffers)
//! are rejected at construction with [`CoreError`], never silently fixed.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod kernel;
pub mod pass;

pub use error::{CoreError, CoreResult};
pub use image::ImageBuffer;
pub use kernel::{Kernel, Summation};
pub use pass::{Operation, Pass, PassConfig};
