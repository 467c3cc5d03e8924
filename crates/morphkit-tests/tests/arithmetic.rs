//! Arithmetic ops combined with the pipeline engine.

use morphkit_compute::{process, CpuExecutor};
use morphkit_core::{Operation, Pass};
use morphkit_ops::{
    arithmetic, kernels, ArithmeticOp, ArithmeticParams, ChannelMask, SkipCondition,
};
use morphkit_tests::{constant, fill_rect};

#[test]
fn morphological_gradient_highlights_edges() {
    // gradient = dilate - erode, assembled from a pipeline pass per side
    // and an arithmetic subtraction.
    let mut exec = CpuExecutor::new();
    let mut src = constant(10, 10, 0.0);
    fill_rect(&mut src, 3, 3, 7, 7, 1.0);

    let dilate = Pass::single(kernels::ones_3(), Operation::Dilate);
    let erode = Pass::single(kernels::ones_3(), Operation::Erode);

    let mut dilated = process(&mut exec, &src, &dilate, 1).unwrap();
    let eroded = process(&mut exec, &src, &erode, 1).unwrap();

    arithmetic(
        &mut dilated,
        &eroded,
        ArithmeticOp::Subtract,
        &ArithmeticParams::default(),
    )
    .unwrap();

    // The blob boundary lights up, interior and far background stay flat.
    assert!((dilated.data()[3 * 10 + 3] - 1.0).abs() < 1e-6); // blob corner
    assert!(dilated.data()[5 * 10 + 5].abs() < 1e-6); // blob interior
    assert!(dilated.data()[0].abs() < 1e-6); // far background
}

#[test]
fn gradient_of_constant_image_is_zero() {
    let mut exec = CpuExecutor::new();
    let src = constant(8, 8, 0.5);

    let dilate = Pass::single(kernels::ones_3(), Operation::Dilate);
    let erode = Pass::single(kernels::ones_3(), Operation::Erode);

    let mut dilated = process(&mut exec, &src, &dilate, 1).unwrap();
    let eroded = process(&mut exec, &src, &erode, 1).unwrap();

    arithmetic(
        &mut dilated,
        &eroded,
        ArithmeticOp::Subtract,
        &ArithmeticParams::default(),
    )
    .unwrap();

    for v in dilated.data() {
        assert!(v.abs() < 1e-6);
    }
}

#[test]
fn masked_max_combines_single_channel() {
    // Single-channel buffers gate on the R bit.
    let mut bg = constant(4, 4, 0.25);
    let fg = constant(4, 4, 0.75);

    let params = ArithmeticParams {
        mask: ChannelMask::R,
        ..Default::default()
    };
    arithmetic(&mut bg, &fg, ArithmeticOp::Max, &params).unwrap();
    assert!(bg.data().iter().all(|v| (v - 0.75).abs() < 1e-6));

    // With the R bit clear nothing is written.
    let mut bg = constant(4, 4, 0.25);
    let params = ArithmeticParams {
        mask: ChannelMask::G,
        ..Default::default()
    };
    arithmetic(&mut bg, &fg, ArithmeticOp::Max, &params).unwrap();
    assert!(bg.data().iter().all(|v| (v - 0.25).abs() < 1e-6));
}

#[test]
fn skip_black_preserves_background_outside_stamp() {
    // A bright stamp on a black foreground only touches where it is lit.
    let mut bg = constant(8, 8, 0.2);
    let mut fg = constant(8, 8, 0.0);
    fill_rect(&mut fg, 2, 2, 4, 4, 0.6);

    let params = ArithmeticParams {
        skip: SkipCondition::BLACK_PIXEL,
        ..Default::default()
    };
    arithmetic(&mut bg, &fg, ArithmeticOp::Add, &params).unwrap();

    assert!((bg.data()[2 * 8 + 2] - 0.8).abs() < 1e-6);
    assert!((bg.data()[0] - 0.2).abs() < 1e-6);
}
