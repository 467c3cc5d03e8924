//! Catalog of common convolution kernels and morphology masks.
//!
//! Every function returns a freshly built [`Kernel`] validated by the
//! same invariants as any caller-supplied kernel. Blur kernels that
//! carry unnormalized integer weights use [`Summation::Normalized`] so
//! the executor divides by the total weight.

use morphkit_core::{Kernel, Summation};

fn build(weights: Vec<f32>, width: usize, summation: Summation) -> Kernel {
    Kernel::new(weights, width, summation).expect("catalog kernel weights match width")
}

/// 3x3 gaussian blur (binomial weights, normalized by the executor).
pub fn gaussian_blur_3() -> Kernel {
    build(
        vec![
            1.0, 2.0, 1.0, //
            2.0, 4.0, 2.0, //
            1.0, 2.0, 1.0,
        ],
        3,
        Summation::Normalized,
    )
}

/// 5x5 gaussian blur (binomial weights, normalized by the executor).
pub fn gaussian_blur_5() -> Kernel {
    build(
        vec![
            1.0, 4.0, 6.0, 4.0, 1.0, //
            4.0, 16.0, 24.0, 16.0, 4.0, //
            6.0, 24.0, 36.0, 24.0, 6.0, //
            4.0, 16.0, 24.0, 16.0, 4.0, //
            1.0, 4.0, 6.0, 4.0, 1.0,
        ],
        5,
        Summation::Normalized,
    )
}

/// 3x3 box blur (pre-normalized uniform weights).
pub fn box_blur_3() -> Kernel {
    build(vec![1.0 / 9.0; 9], 3, Summation::Weighted)
}

/// 3x3 Laplacian edge detector.
pub fn laplacian_3() -> Kernel {
    build(
        vec![
            0.0, 1.0, 0.0, //
            1.0, -4.0, 1.0, //
            0.0, 1.0, 0.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 outline edge detector (8-connected Laplacian).
pub fn outline_3() -> Kernel {
    build(
        vec![
            1.0, 1.0, 1.0, //
            1.0, -8.0, 1.0, //
            1.0, 1.0, 1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Sobel edge detector, top edges.
pub fn sobel_top_3() -> Kernel {
    build(
        vec![
            1.0, 2.0, 1.0, //
            0.0, 0.0, 0.0, //
            -1.0, -2.0, -1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Sobel edge detector, bottom edges.
pub fn sobel_bottom_3() -> Kernel {
    build(
        vec![
            -1.0, -2.0, -1.0, //
            0.0, 0.0, 0.0, //
            1.0, 2.0, 1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Sobel edge detector, left edges.
pub fn sobel_left_3() -> Kernel {
    build(
        vec![
            1.0, 0.0, -1.0, //
            2.0, 0.0, -2.0, //
            1.0, 0.0, -1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Sobel edge detector, right edges.
pub fn sobel_right_3() -> Kernel {
    build(
        vec![
            -1.0, 0.0, 1.0, //
            -2.0, 0.0, 2.0, //
            -1.0, 0.0, 1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Prewitt edge detector, top edges.
pub fn prewitt_top_3() -> Kernel {
    build(
        vec![
            1.0, 1.0, 1.0, //
            0.0, 0.0, 0.0, //
            -1.0, -1.0, -1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Prewitt edge detector, bottom edges.
pub fn prewitt_bottom_3() -> Kernel {
    build(
        vec![
            -1.0, -1.0, -1.0, //
            0.0, 0.0, 0.0, //
            1.0, 1.0, 1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Prewitt edge detector, left edges.
pub fn prewitt_left_3() -> Kernel {
    build(
        vec![
            1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0, //
            1.0, 0.0, -1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 Prewitt edge detector, right edges.
pub fn prewitt_right_3() -> Kernel {
    build(
        vec![
            -1.0, 0.0, 1.0, //
            -1.0, 0.0, 1.0, //
            -1.0, 0.0, 1.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 emboss.
pub fn emboss_3() -> Kernel {
    build(
        vec![
            -2.0, -1.0, 0.0, //
            -1.0, 1.0, 1.0, //
            0.0, 1.0, 2.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 sharpen, strength one.
pub fn sharpen_3() -> Kernel {
    build(
        vec![
            0.0, -1.0, 0.0, //
            -1.0, 5.0, -1.0, //
            0.0, -1.0, 0.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 all-ones mask (full square structuring element).
pub fn ones_3() -> Kernel {
    build(vec![1.0; 9], 3, Summation::Weighted)
}

/// 5x5 all-ones mask.
pub fn ones_5() -> Kernel {
    build(vec![1.0; 25], 5, Summation::Weighted)
}

/// 3x3 cross-shaped mask (4-connected structuring element).
pub fn cross_3() -> Kernel {
    build(
        vec![
            0.0, 1.0, 0.0, //
            1.0, 1.0, 1.0, //
            0.0, 1.0, 0.0,
        ],
        3,
        Summation::Weighted,
    )
}

/// 3x3 X-shaped mask (diagonal structuring element).
pub fn x_3() -> Kernel {
    build(
        vec![
            1.0, 0.0, 1.0, //
            0.0, 1.0, 0.0, //
            1.0, 0.0, 1.0,
        ],
        3,
        Summation::Weighted,
    )
}
