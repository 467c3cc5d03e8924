//! CPU reference backend using rayon for parallelization.

use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

use morphkit_core::{ImageBuffer, Operation, PassConfig, Summation};

use crate::executor::KernelExecutor;
use crate::{ComputeError, ComputeResult};

/// Pass parameters copied out of a [`PassConfig`] at configure time.
#[derive(Debug, Clone)]
struct ConfiguredPass {
    weights: Vec<f32>,
    width: usize,
    extent: usize,
    summation: Summation,
    operation: Operation,
    offset: i32,
}

/// Reference executor running kernels on the CPU, parallelized by
/// output row.
///
/// Semantics match what a GPU backend is expected to implement: per tap
/// the sampling coordinate is `p + (tap - extent) * offset` with edge
/// clamping, convolve applies the kernel's summation convention, and
/// dilate/erode take the max/min over taps whose mask weight is positive.
#[derive(Debug, Default)]
pub struct CpuExecutor {
    pass: Option<ConfiguredPass>,
}

impl CpuExecutor {
    /// Creates an executor with no pass configured.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KernelExecutor for CpuExecutor {
    fn configure(&mut self, config: &PassConfig<'_>) -> ComputeResult<()> {
        trace!(
            width = config.width,
            offset = config.offset,
            operation = ?config.operation,
            "configure"
        );
        self.pass = Some(ConfiguredPass {
            weights: config.weights.to_vec(),
            width: config.width,
            extent: config.extent,
            summation: config.summation,
            operation: config.operation,
            offset: config.offset,
        });
        Ok(())
    }

    fn dispatch(
        &mut self,
        source: &ImageBuffer,
        destination: &mut ImageBuffer,
    ) -> ComputeResult<()> {
        let pass = self
            .pass
            .as_ref()
            .ok_or_else(|| ComputeError::Backend("dispatch before configure".into()))?;

        if !source.same_shape(destination) {
            return Err(ComputeError::dimension_mismatch(source, destination));
        }

        match pass.operation {
            Operation::Convolve => convolve_rows(pass, source, destination),
            Operation::Dilate => morph_rows(pass, source, destination, true),
            Operation::Erode => morph_rows(pass, source, destination, false),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}

/// Weighted-sum convolution over the destination extent.
fn convolve_rows(pass: &ConfiguredPass, src: &ImageBuffer, dst: &mut ImageBuffer) {
    let (w, h, c) = src.dimensions();
    let (w, h, c) = (w as usize, h as usize, c as usize);
    let extent = pass.extent as isize;
    let offset = pass.offset as isize;

    let total: f32 = pass.weights.iter().sum();
    let norm = match pass.summation {
        Summation::Normalized if total.abs() > f32::EPSILON => 1.0 / total,
        _ => 1.0,
    };

    let data = src.data();
    dst.data_mut()
        .par_chunks_mut(w * c)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                let mut sums = vec![0.0f32; c];

                for ky in 0..pass.width {
                    for kx in 0..pass.width {
                        let weight = pass.weights[ky * pass.width + kx];
                        let sx = (x as isize + (kx as isize - extent) * offset)
                            .clamp(0, w as isize - 1) as usize;
                        let sy = (y as isize + (ky as isize - extent) * offset)
                            .clamp(0, h as isize - 1) as usize;

                        let idx = (sy * w + sx) * c;
                        for ch in 0..c {
                            sums[ch] += data[idx + ch] * weight;
                        }
                    }
                }

                for ch in 0..c {
                    row[x * c + ch] = sums[ch] * norm;
                }
            }
        });
}

/// Neighborhood max/min over taps selected by the kernel mask.
fn morph_rows(pass: &ConfiguredPass, src: &ImageBuffer, dst: &mut ImageBuffer, is_dilate: bool) {
    let (w, h, c) = src.dimensions();
    let (w, h, c) = (w as usize, h as usize, c as usize);
    let extent = pass.extent as isize;
    let offset = pass.offset as isize;

    let data = src.data();
    dst.data_mut()
        .par_chunks_mut(w * c)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..w {
                for ch in 0..c {
                    let mut best: Option<f32> = None;

                    for ky in 0..pass.width {
                        for kx in 0..pass.width {
                            // Weights act as a mask here, not multipliers.
                            if pass.weights[ky * pass.width + kx] <= 0.0 {
                                continue;
                            }
                            let sx = (x as isize + (kx as isize - extent) * offset)
                                .clamp(0, w as isize - 1) as usize;
                            let sy = (y as isize + (ky as isize - extent) * offset)
                                .clamp(0, h as isize - 1) as usize;

                            let v = data[(sy * w + sx) * c + ch];
                            best = Some(match best {
                                Some(b) if is_dilate => b.max(v),
                                Some(b) => b.min(v),
                                None => v,
                            });
                        }
                    }

                    // An all-zero mask selects no taps; pass the source
                    // pixel through unchanged.
                    row[x * c + ch] = best.unwrap_or(data[(y * w + x) * c + ch]);
                }
            }
        });
}
