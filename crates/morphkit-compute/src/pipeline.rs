//! Single-pass and multi-pass pipeline runners.
//!
//! The multi-pass runners chain an ordered sequence of passes across an
//! image with double-buffering: after every dispatch the current source
//! and destination swap roles, so only two buffers are ever in flight
//! regardless of pipeline length. The cost of that economy is the final
//! reconciliation - the parity of the total step count decides whether
//! the last dispatch landed in the caller's destination or in the
//! working buffer, and one full copy fixes up the latter case.

use std::mem;

#[allow(unused_imports)]
use tracing::{debug, trace};

use morphkit_core::{ImageBuffer, Pass};

use crate::executor::KernelExecutor;
use crate::{ComputeError, ComputeResult};

/// Default sampling-offset policy: constant `1` for every step.
///
/// Pass this where no per-step offset progression is wanted; runners take
/// the policy as a required parameter rather than an optional callback.
pub fn default_offset(_step: u32) -> i32 {
    1
}

/// Applies one pass to `source`, writing into `destination`.
///
/// Configures `executor` with the pass and sampling offset, then
/// dispatches over `destination`'s extent. `source` is read-only. A
/// failed configure or dispatch fails the whole call; the dispatch is
/// atomic from the caller's perspective.
pub fn run_single_pass<E>(
    executor: &mut E,
    source: &ImageBuffer,
    destination: &mut ImageBuffer,
    pass: &Pass,
    offset: i32,
) -> ComputeResult<()>
where
    E: KernelExecutor + ?Sized,
{
    trace!(offset, operation = ?pass.operation(), "run_single_pass");
    if !source.same_shape(destination) {
        return Err(ComputeError::dimension_mismatch(source, destination));
    }
    executor.configure(&pass.config(offset))?;
    executor.dispatch(source, destination)
}

/// Chains `passes` over `source`, writing the final result into
/// `destination`.
///
/// Each pass expands into `repeat()` executions; `offset_policy` is
/// queried once per execution with the global step index (zero-based,
/// monotonically increasing across pass boundaries, never reset per
/// pass).
///
/// One scratch buffer shaped like `source` is allocated from the
/// executor and released on every exit path, success or failure. The
/// first dispatch reads `source` into the scratch; thereafter scratch
/// and `destination` ping-pong. An odd total step count leaves the last
/// result in the scratch and a final copy reconciles it into
/// `destination`; an even count needs no copy. `source` is never
/// written.
///
/// An empty pipeline is an identity copy-through: `destination` becomes
/// a copy of `source`.
///
/// Failure at step k aborts immediately without rolling back steps
/// 1..k-1; `destination` contents beyond the last completed step are
/// unspecified. Callers needing atomicity must snapshot `destination`
/// beforehand.
pub fn run_pipeline<E, F>(
    executor: &mut E,
    source: &ImageBuffer,
    destination: &mut ImageBuffer,
    passes: &[Pass],
    mut offset_policy: F,
) -> ComputeResult<()>
where
    E: KernelExecutor + ?Sized,
    F: FnMut(u32) -> i32,
{
    if !source.same_shape(destination) {
        return Err(ComputeError::dimension_mismatch(source, destination));
    }

    let mut scratch = executor.alloc_scratch(source)?;
    let result = drive(
        executor,
        source,
        &mut scratch,
        destination,
        passes,
        &mut offset_policy,
    );
    executor.release(scratch);
    result
}

/// Copy-mode pipeline body; scratch teardown stays in [`run_pipeline`].
fn drive<E>(
    executor: &mut E,
    source: &ImageBuffer,
    scratch: &mut ImageBuffer,
    destination: &mut ImageBuffer,
    passes: &[Pass],
    offset_policy: &mut dyn FnMut(u32) -> i32,
) -> ComputeResult<()>
where
    E: KernelExecutor + ?Sized,
{
    let total: u32 = passes.iter().map(Pass::repeat).sum();
    debug!(passes = passes.len(), steps = total, "run_pipeline");

    if total == 0 {
        // Identity copy-through; documented contract for the empty pipeline.
        return executor.copy(source, destination);
    }

    // After every step `cur_src` holds the latest result and `cur_dst`
    // is the next write target.
    let mut cur_src: &mut ImageBuffer = scratch;
    let mut cur_dst: &mut ImageBuffer = destination;
    let mut result_in_scratch = true;
    let mut step: u32 = 0;

    for pass in passes {
        for _ in 0..pass.repeat() {
            let offset = offset_policy(step);
            executor.configure(&pass.config(offset))?;
            if step == 0 {
                // First dispatch reads the caller's source.
                executor.dispatch(source, cur_src)?;
            } else {
                executor.dispatch(cur_src, cur_dst)?;
                mem::swap(&mut cur_src, &mut cur_dst);
                result_in_scratch = !result_in_scratch;
            }
            step += 1;
        }
    }

    if result_in_scratch {
        // Odd total step count: the last dispatch wrote the scratch.
        executor.copy(cur_src, cur_dst)?;
    }
    Ok(())
}

/// Chains `passes` using the caller's `working` buffer as the
/// intermediate instead of allocating a scratch.
///
/// Zero allocations: the first dispatch reads `working` and writes
/// `destination`, then the two ping-pong. `working` is scribbled over
/// in the process. The parity is the mirror image of [`run_pipeline`]:
/// an even total step count leaves the result in `working` and one copy
/// reconciles it into `destination`.
///
/// An empty pipeline is a complete no-op; neither buffer is touched.
pub fn run_pipeline_in_place<E, F>(
    executor: &mut E,
    working: &mut ImageBuffer,
    destination: &mut ImageBuffer,
    passes: &[Pass],
    mut offset_policy: F,
) -> ComputeResult<()>
where
    E: KernelExecutor + ?Sized,
    F: FnMut(u32) -> i32,
{
    if !working.same_shape(destination) {
        return Err(ComputeError::dimension_mismatch(working, destination));
    }

    let total: u32 = passes.iter().map(Pass::repeat).sum();
    debug!(passes = passes.len(), steps = total, "run_pipeline_in_place");
    if total == 0 {
        return Ok(());
    }

    let mut cur_src: &mut ImageBuffer = working;
    let mut cur_dst: &mut ImageBuffer = destination;
    let mut result_in_destination = false;
    let mut step: u32 = 0;

    for pass in passes {
        for _ in 0..pass.repeat() {
            let offset = offset_policy(step);
            executor.configure(&pass.config(offset))?;
            executor.dispatch(cur_src, cur_dst)?;
            mem::swap(&mut cur_src, &mut cur_dst);
            result_in_destination = !result_in_destination;
            step += 1;
        }
    }

    if !result_in_destination {
        // Even total step count: the last dispatch wrote `working`.
        executor.copy(cur_src, cur_dst)?;
    }
    Ok(())
}

/// Applies one pass to `source`, returning a freshly allocated result.
pub fn process<E>(
    executor: &mut E,
    source: &ImageBuffer,
    pass: &Pass,
    offset: i32,
) -> ComputeResult<ImageBuffer>
where
    E: KernelExecutor + ?Sized,
{
    let mut out = ImageBuffer::new(source.width, source.height, source.channels);
    run_single_pass(executor, source, &mut out, pass, offset)?;
    Ok(out)
}

/// Applies one pass to `image`, writing the result back into it.
///
/// Routes through an executor scratch so the backend never sees aliased
/// source and destination buffers.
pub fn process_in_place<E>(
    executor: &mut E,
    image: &mut ImageBuffer,
    pass: &Pass,
    offset: i32,
) -> ComputeResult<()>
where
    E: KernelExecutor + ?Sized,
{
    let mut scratch = executor.alloc_scratch(image)?;
    let mut result = run_single_pass(executor, image, &mut scratch, pass, offset);
    if result.is_ok() {
        result = executor.copy(&scratch, image);
    }
    executor.release(scratch);
    result
}

/// Chains `passes` over `source`, returning a freshly allocated result.
pub fn process_multi<E, F>(
    executor: &mut E,
    source: &ImageBuffer,
    passes: &[Pass],
    offset_policy: F,
) -> ComputeResult<ImageBuffer>
where
    E: KernelExecutor + ?Sized,
    F: FnMut(u32) -> i32,
{
    let mut out = ImageBuffer::new(source.width, source.height, source.channels);
    run_pipeline(executor, source, &mut out, passes, offset_policy)?;
    Ok(out)
}
