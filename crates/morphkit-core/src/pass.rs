//! Processing pass: kernel + operation + repeat count.

use crate::kernel::{Kernel, Summation};
use crate::{CoreError, CoreResult};

/// Which executor code path processes the kernel.
///
/// The enum is closed: every executor matches on it exhaustively, so an
/// unrecognized operation is unrepresentable rather than a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Weighted-sum convolution.
    Convolve,
    /// Neighborhood maximum over mask taps (expands bright regions).
    Dilate,
    /// Neighborhood minimum over mask taps (shrinks bright regions).
    Erode,
}

/// One processing step: a kernel, the operation applied with it, and how
/// many times the step repeats.
///
/// Immutable once constructed. The repeat count expands into that many
/// identical executions of the same kernel/operation pair; each execution
/// may receive a different sampling offset from the pipeline runner's
/// offset policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    kernel: Kernel,
    operation: Operation,
    repeat: u32,
}

impl Pass {
    /// Creates a pass. `repeat` must be at least 1.
    pub fn new(kernel: Kernel, operation: Operation, repeat: u32) -> CoreResult<Self> {
        if repeat == 0 {
            return Err(CoreError::ZeroRepeat);
        }
        Ok(Self { kernel, operation, repeat })
    }

    /// Creates a pass that executes once.
    pub fn single(kernel: Kernel, operation: Operation) -> Self {
        Self { kernel, operation, repeat: 1 }
    }

    /// The kernel applied by this pass.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// The operation applied by this pass.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Number of times the pass executes.
    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    /// Packages this pass and a sampling offset into a configuration
    /// descriptor for an executor.
    ///
    /// The descriptor is pure data; the runner applies it via
    /// `KernelExecutor::configure` so the pass itself never touches
    /// backend state.
    pub fn config(&self, offset: i32) -> PassConfig<'_> {
        PassConfig {
            weights: self.kernel.weights(),
            width: self.kernel.width(),
            extent: self.kernel.extent(),
            summation: self.kernel.summation(),
            operation: self.operation,
            offset,
        }
    }
}

/// Configuration descriptor for one dispatch.
///
/// Borrowed view over a [`Pass`] plus the sampling-offset multiplier for
/// this particular execution. Executors copy out what they need.
#[derive(Debug, Clone, Copy)]
pub struct PassConfig<'a> {
    /// Kernel weights, row-major, `width * width` values.
    pub weights: &'a [f32],
    /// Kernel side length.
    pub width: usize,
    /// Per-axis sampling radius (`width / 2`).
    pub extent: usize,
    /// Summation convention for convolve.
    pub summation: Summation,
    /// Operation discriminant.
    pub operation: Operation,
    /// Sampling-offset multiplier applied per tap.
    pub offset: i32,
}
