//! Execution backend abstraction.

use morphkit_core::{ImageBuffer, PassConfig};

use crate::{ComputeError, ComputeResult};

/// Contract between the pipeline runners and an execution backend.
///
/// An executor is an explicit context object the caller constructs and
/// passes into every runner call; it owns whatever backend state a
/// dispatch needs (compiled kernels, device queues, the currently
/// configured pass). Runners never reach for global state.
///
/// The protocol per step is `configure` then `dispatch`: `configure`
/// loads one pass's parameters, `dispatch` runs the configured operation
/// reading `source` and writing the full extent of `destination`. A
/// dispatch is atomic from the runner's perspective: it either completes
/// or fails the whole call, and a backend that queues work asynchronously
/// must still guarantee that dispatch N+1 observes the completed result
/// of dispatch N on the same buffers.
///
/// Scratch buffers obtained from [`alloc_scratch`](Self::alloc_scratch)
/// are returned through [`release`](Self::release), which consumes the
/// buffer — releasing twice is unrepresentable.
pub trait KernelExecutor {
    /// Loads one pass's parameters into backend state.
    fn configure(&mut self, config: &PassConfig<'_>) -> ComputeResult<()>;

    /// Runs the configured operation over `destination`'s extent,
    /// reading `source`.
    ///
    /// Fails with [`ComputeError::DimensionMismatch`] when the buffer
    /// extents are incompatible and [`ComputeError::Backend`] when the
    /// backend is unavailable or no pass has been configured.
    fn dispatch(
        &mut self,
        source: &ImageBuffer,
        destination: &mut ImageBuffer,
    ) -> ComputeResult<()>;

    /// Full-resolution buffer copy.
    fn copy(&mut self, source: &ImageBuffer, destination: &mut ImageBuffer) -> ComputeResult<()> {
        if !source.same_shape(destination) {
            return Err(ComputeError::dimension_mismatch(source, destination));
        }
        destination.data_mut().copy_from_slice(source.data());
        Ok(())
    }

    /// Allocates a working buffer shaped like `like`.
    fn alloc_scratch(&mut self, like: &ImageBuffer) -> ComputeResult<ImageBuffer> {
        Ok(ImageBuffer::new(like.width, like.height, like.channels))
    }

    /// Returns a scratch buffer to the backend.
    fn release(&mut self, scratch: ImageBuffer) {
        drop(scratch);
    }

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;
}
