//! Integration tests for morphkit crates.
//!
//! The test suites live in `tests/`; this library provides the shared
//! fixtures: deterministic image builders and instrumented executors
//! that wrap [`CpuExecutor`] to observe the runner's backend traffic.

use morphkit_compute::{ComputeError, ComputeResult, CpuExecutor, KernelExecutor};
use morphkit_core::{ImageBuffer, PassConfig};

/// Builds a single-channel image filled with `value`.
pub fn constant(width: u32, height: u32, value: f32) -> ImageBuffer {
    let data = vec![value; (width * height) as usize];
    ImageBuffer::from_f32(data, width, height, 1).expect("constant image dimensions")
}

/// Builds a single-channel gradient image with distinct pixel values.
pub fn gradient(width: u32, height: u32) -> ImageBuffer {
    let n = width * height;
    let data = (0..n).map(|i| i as f32 / n as f32).collect();
    ImageBuffer::from_f32(data, width, height, 1).expect("gradient image dimensions")
}

/// Sets a rectangle of a single-channel image to `value`.
pub fn fill_rect(img: &mut ImageBuffer, x0: u32, y0: u32, x1: u32, y1: u32, value: f32) {
    let w = img.width as usize;
    for y in y0..y1 {
        for x in x0..x1 {
            img.data_mut()[y as usize * w + x as usize] = value;
        }
    }
}

/// Executor wrapper recording every backend call the runners make.
#[derive(Default)]
pub struct CountingExecutor {
    inner: CpuExecutor,
    /// Sampling offsets seen by `configure`, in call order.
    pub offsets: Vec<i32>,
    /// Number of `dispatch` calls.
    pub dispatches: u32,
    /// Number of `copy` calls.
    pub copies: u32,
    /// Number of `alloc_scratch` calls.
    pub allocs: u32,
    /// Number of `release` calls.
    pub releases: u32,
}

impl CountingExecutor {
    /// Creates a fresh counting executor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KernelExecutor for CountingExecutor {
    fn configure(&mut self, config: &PassConfig<'_>) -> ComputeResult<()> {
        self.offsets.push(config.offset);
        self.inner.configure(config)
    }

    fn dispatch(
        &mut self,
        source: &ImageBuffer,
        destination: &mut ImageBuffer,
    ) -> ComputeResult<()> {
        self.dispatches += 1;
        self.inner.dispatch(source, destination)
    }

    fn copy(&mut self, source: &ImageBuffer, destination: &mut ImageBuffer) -> ComputeResult<()> {
        self.copies += 1;
        self.inner.copy(source, destination)
    }

    fn alloc_scratch(&mut self, like: &ImageBuffer) -> ComputeResult<ImageBuffer> {
        self.allocs += 1;
        self.inner.alloc_scratch(like)
    }

    fn release(&mut self, scratch: ImageBuffer) {
        self.releases += 1;
        self.inner.release(scratch);
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Executor wrapper that injects a backend failure on the nth dispatch.
pub struct FailingExecutor {
    inner: CpuExecutor,
    fail_on: u32,
    dispatched: u32,
    /// Number of `alloc_scratch` calls.
    pub allocs: u32,
    /// Number of `release` calls.
    pub releases: u32,
}

impl FailingExecutor {
    /// Fails the dispatch with zero-based index `fail_on`.
    pub fn new(fail_on: u32) -> Self {
        Self {
            inner: CpuExecutor::new(),
            fail_on,
            dispatched: 0,
            allocs: 0,
            releases: 0,
        }
    }
}

impl KernelExecutor for FailingExecutor {
    fn configure(&mut self, config: &PassConfig<'_>) -> ComputeResult<()> {
        self.inner.configure(config)
    }

    fn dispatch(
        &mut self,
        source: &ImageBuffer,
        destination: &mut ImageBuffer,
    ) -> ComputeResult<()> {
        let index = self.dispatched;
        self.dispatched += 1;
        if index == self.fail_on {
            return Err(ComputeError::Backend("injected backend failure".into()));
        }
        self.inner.dispatch(source, destination)
    }

    fn alloc_scratch(&mut self, like: &ImageBuffer) -> ComputeResult<ImageBuffer> {
        self.allocs += 1;
        self.inner.alloc_scratch(like)
    }

    fn release(&mut self, scratch: ImageBuffer) {
        self.releases += 1;
        self.inner.release(scratch);
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
