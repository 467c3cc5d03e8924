//! Multi-pass runner behavior: reconciliation parity, offset policy,
//! scratch lifecycle.

use morphkit_compute::{
    default_offset, run_pipeline, run_pipeline_in_place, run_single_pass, ComputeError,
};
use morphkit_core::{ImageBuffer, Kernel, Operation, Pass, Summation};
use morphkit_tests::{gradient, CountingExecutor, FailingExecutor};

/// Kernel whose only tap is the center with weight 2: every dispatch
/// doubles the image, so step counts are observable in the output.
fn doubling() -> Kernel {
    let mut weights = vec![0.0; 9];
    weights[4] = 2.0;
    Kernel::new(weights, 3, Summation::Weighted).unwrap()
}

fn assert_scaled(dst: &ImageBuffer, src: &ImageBuffer, factor: f32) {
    for (out, inp) in dst.data().iter().zip(src.data()) {
        assert!(
            (out - inp * factor).abs() < 1e-4,
            "expected {} * {}, got {}",
            inp,
            factor,
            out
        );
    }
}

#[test]
fn copy_mode_parity_over_step_counts() {
    // Capture runner trace output in the test harness.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    for total in 1..=4u32 {
        let mut exec = CountingExecutor::new();
        let src = gradient(6, 6);
        let mut dst = ImageBuffer::new(6, 6, 1);
        let passes = [Pass::new(doubling(), Operation::Convolve, total).unwrap()];

        run_pipeline(&mut exec, &src, &mut dst, &passes, default_offset).unwrap();

        assert_eq!(exec.dispatches, total);
        // Odd step counts leave the last dispatch in the scratch buffer;
        // exactly one reconciliation copy moves it into the destination.
        let expected_copies = if total % 2 == 1 { 1 } else { 0 };
        assert_eq!(
            exec.copies, expected_copies,
            "total steps {total}: wrong reconciliation count"
        );
        assert_scaled(&dst, &src, (1u32 << total) as f32);
    }
}

#[test]
fn copy_mode_parity_across_pass_boundaries() {
    // [repeat 2, repeat 1] = 3 total steps, odd parity.
    let mut exec = CountingExecutor::new();
    let src = gradient(4, 4);
    let mut dst = ImageBuffer::new(4, 4, 1);
    let passes = [
        Pass::new(doubling(), Operation::Convolve, 2).unwrap(),
        Pass::single(doubling(), Operation::Convolve),
    ];

    run_pipeline(&mut exec, &src, &mut dst, &passes, default_offset).unwrap();

    assert_eq!(exec.dispatches, 3);
    assert_eq!(exec.copies, 1);
    assert_scaled(&dst, &src, 8.0);
}

#[test]
fn in_place_parity_is_mirrored() {
    for total in 1..=4u32 {
        let mut exec = CountingExecutor::new();
        let src = gradient(6, 6);
        let mut working = src.duplicate();
        let mut dst = ImageBuffer::new(6, 6, 1);
        let passes = [Pass::new(doubling(), Operation::Convolve, total).unwrap()];

        run_pipeline_in_place(&mut exec, &mut working, &mut dst, &passes, default_offset)
            .unwrap();

        // First dispatch writes the destination directly, so even step
        // counts need the reconciliation copy here.
        let expected_copies = if total % 2 == 0 { 1 } else { 0 };
        assert_eq!(exec.copies, expected_copies);
        assert_eq!(exec.allocs, 0, "in-place runner must not allocate");
        assert_scaled(&dst, &src, (1u32 << total) as f32);
    }
}

#[test]
fn empty_pipeline_copies_through_in_copy_mode() {
    let mut exec = CountingExecutor::new();
    let src = gradient(5, 5);
    let mut dst = ImageBuffer::new(5, 5, 1);

    run_pipeline(&mut exec, &src, &mut dst, &[], default_offset).unwrap();

    assert_eq!(exec.dispatches, 0);
    assert_eq!(exec.copies, 1);
    assert_eq!(dst.data(), src.data());
}

#[test]
fn empty_pipeline_is_noop_in_place() {
    let mut exec = CountingExecutor::new();
    let src = gradient(5, 5);
    let mut working = src.duplicate();
    let mut dst = ImageBuffer::new(5, 5, 1);

    run_pipeline_in_place(&mut exec, &mut working, &mut dst, &[], default_offset).unwrap();

    assert_eq!(exec.dispatches, 0);
    assert_eq!(exec.copies, 0);
    assert_eq!(working.data(), src.data());
}

#[test]
fn single_step_pipeline_matches_single_pass() {
    let src = gradient(6, 6);
    let pass = Pass::single(doubling(), Operation::Convolve);

    let mut exec = CountingExecutor::new();
    let mut direct = ImageBuffer::new(6, 6, 1);
    run_single_pass(&mut exec, &src, &mut direct, &pass, 1).unwrap();

    let mut piped = ImageBuffer::new(6, 6, 1);
    run_pipeline(
        &mut exec,
        &src,
        &mut piped,
        std::slice::from_ref(&pass),
        default_offset,
    )
    .unwrap();

    assert_eq!(direct.data(), piped.data());
}

#[test]
fn offset_policy_sees_monotonic_global_indices() {
    let mut exec = CountingExecutor::new();
    let src = gradient(4, 4);
    let mut dst = ImageBuffer::new(4, 4, 1);
    let passes = [
        Pass::new(doubling(), Operation::Convolve, 2).unwrap(),
        Pass::single(doubling(), Operation::Convolve),
    ];

    let mut seen = Vec::new();
    run_pipeline(&mut exec, &src, &mut dst, &passes, |step| {
        seen.push(step);
        step as i32 + 1
    })
    .unwrap();

    // The counter is global across pass boundaries, never reset per pass.
    assert_eq!(seen, vec![0, 1, 2]);
    // The executor received the policy's offsets in step order.
    assert_eq!(exec.offsets, vec![1, 2, 3]);
}

#[test]
fn scratch_released_once_on_success() {
    let mut exec = CountingExecutor::new();
    let src = gradient(4, 4);
    let mut dst = ImageBuffer::new(4, 4, 1);
    let passes = [Pass::new(doubling(), Operation::Convolve, 3).unwrap()];

    run_pipeline(&mut exec, &src, &mut dst, &passes, default_offset).unwrap();

    assert_eq!(exec.allocs, 1);
    assert_eq!(exec.releases, 1);
}

#[test]
fn scratch_released_once_on_empty_pipeline() {
    let mut exec = CountingExecutor::new();
    let src = gradient(4, 4);
    let mut dst = ImageBuffer::new(4, 4, 1);

    run_pipeline(&mut exec, &src, &mut dst, &[], default_offset).unwrap();

    assert_eq!(exec.allocs, 1);
    assert_eq!(exec.releases, 1);
}

#[test]
fn scratch_released_once_on_backend_failure() {
    // Fail the second dispatch, mid-pipeline.
    let mut exec = FailingExecutor::new(1);
    let src = gradient(4, 4);
    let mut dst = ImageBuffer::new(4, 4, 1);
    let passes = [Pass::new(doubling(), Operation::Convolve, 4).unwrap()];

    let err = run_pipeline(&mut exec, &src, &mut dst, &passes, default_offset).unwrap_err();

    assert!(matches!(err, ComputeError::Backend(_)));
    assert_eq!(exec.allocs, 1);
    assert_eq!(exec.releases, 1);
}

#[test]
fn dimension_mismatch_fails_before_any_backend_work() {
    let mut exec = CountingExecutor::new();
    let src = gradient(4, 4);
    let mut dst = ImageBuffer::new(8, 8, 1);
    let passes = [Pass::single(doubling(), Operation::Convolve)];

    let err = run_pipeline(&mut exec, &src, &mut dst, &passes, default_offset).unwrap_err();

    assert!(matches!(err, ComputeError::DimensionMismatch { .. }));
    assert_eq!(exec.allocs, 0);
    assert_eq!(exec.releases, 0);
    assert_eq!(exec.dispatches, 0);
}
