//! Kernel behaviour observed through the arena, the way a host drives it.
//!
//! Every call here is addressed with element offsets into a shared arena,
//! and every failure is checked for leaving the arena unchanged.

use isotherm_arena::{Arena, ArenaView};
use isotherm_core::{KernelError, ScalarSlot, Series, Window, ELEMENT_BYTES};
use isotherm_kernel::ops;
use isotherm_test_utils::{
    assert_close, assert_slices_close, constant_series, hourly_temperatures, naive_moving_average,
    noisy_linear, ArenaFixture,
};
use proptest::prelude::*;

fn w(n: usize) -> Window {
    Window::new(n).unwrap()
}

// ── Addressing convention ──────────────────────────────────────

#[test]
fn element_and_byte_offsets_address_the_same_series() {
    let by_element = Series::new(3, 4);
    let by_byte = Series::from_byte_offset(3 * ELEMENT_BYTES, 4).unwrap();
    assert_eq!(by_element, by_byte);
    assert_eq!(by_element.byte_offset(), Some(24));
}

#[test]
fn misaligned_byte_offset_is_rejected() {
    assert!(matches!(
        Series::from_byte_offset(12, 2),
        Err(KernelError::InvalidInput { .. })
    ));
    assert!(matches!(
        ScalarSlot::from_byte_offset(7),
        Err(KernelError::InvalidInput { .. })
    ));
}

#[test]
fn byte_offset_mistaken_for_element_offset_is_an_addressing_error() {
    // 10 samples at element 0, output slot at element 10. A host that
    // passed the byte address 80 would land far past the arena.
    let mut arena = Arena::with_capacity(11);
    arena
        .write_series(Series::new(0, 10), &constant_series(10, 4.0))
        .unwrap();
    let before = arena.as_slice().to_vec();
    let err = ops::mean_into(
        &mut arena.view(),
        Series::new(0, 10),
        ScalarSlot::new(10 * ELEMENT_BYTES),
    )
    .unwrap_err();
    assert!(matches!(err, KernelError::Addressing { offset: 80, .. }));
    assert_eq!(arena.as_slice(), before.as_slice());

    ops::mean_into(&mut arena.view(), Series::new(0, 10), ScalarSlot::new(10)).unwrap();
    assert_eq!(arena.read_scalar(ScalarSlot::new(10)).unwrap(), 4.0);
}

// ── Moving average ─────────────────────────────────────────────

#[test]
fn window_one_applied_twice_is_identity() {
    let samples = hourly_temperatures(3, 5);
    let n = samples.len();
    let mut arena = Arena::from_values(&samples);
    let series = Series::new(0, n);
    ops::moving_average(&mut arena.view(), series, Window::ONE).unwrap();
    ops::moving_average(&mut arena.view(), series, Window::ONE).unwrap();
    for (a, b) in arena.as_slice().iter().zip(&samples) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn window_larger_than_series_averages_prefixes() {
    let mut arena = Arena::from_values(&[2.0, 4.0, 9.0]);
    ops::moving_average(&mut arena.view(), Series::new(0, 3), w(10)).unwrap();
    assert_eq!(arena.as_slice(), &[2.0, 3.0, 5.0]);
}

#[test]
fn smoothing_into_overlapping_later_region() {
    let samples = [1.0, 3.0, 5.0, 7.0, 9.0];
    let expected = naive_moving_average(&samples, 2);
    let mut arena = Arena::with_capacity(7);
    arena.write_series(Series::new(0, 5), &samples).unwrap();
    ops::moving_average_into(&mut arena.view(), Series::new(0, 5), Series::new(2, 5), w(2))
        .unwrap();
    assert_eq!(arena.read_series(Series::new(2, 5)).unwrap(), expected.as_slice());
}

#[test]
fn nan_only_affects_windows_containing_it() {
    let mut arena = Arena::from_values(&[1.0, f64::NAN, 3.0, 5.0, 7.0]);
    ops::moving_average(&mut arena.view(), Series::new(0, 5), w(2)).unwrap();
    let out = arena.as_slice();
    assert_eq!(out[0], 1.0);
    assert!(out[1].is_nan());
    assert!(out[2].is_nan());
    assert_eq!(out[3], 4.0);
    assert_eq!(out[4], 6.0);
}

// ── Mean ───────────────────────────────────────────────────────

#[test]
fn mean_examples() {
    let mut arena = Arena::from_values(&[5.0, 1.0, 2.0, 3.0]);
    let view = arena.view();
    assert_eq!(ops::mean(&view, Series::new(0, 1)).unwrap(), 5.0);
    assert_eq!(ops::mean(&view, Series::new(1, 3)).unwrap(), 2.0);
    assert!(matches!(
        ops::mean(&view, Series::new(4, 0)),
        Err(KernelError::DivisionByZero { .. })
    ));
}

// ── Regression ─────────────────────────────────────────────────

#[test]
fn regression_layout_x_then_y_then_slots() {
    let (mut arena, layout) = ArenaFixture::new()
        .series("x", &[1.0, 2.0, 3.0, 4.0])
        .series("y", &[5.0, 7.0, 9.0, 11.0])
        .scalar("slope")
        .scalar("intercept")
        .build()
        .unwrap();
    assert_eq!(layout.series("y").unwrap().offset(), 4);
    assert_eq!(layout.scalar("slope").unwrap().offset(), 8);

    let fit = ops::linear_regression(
        &mut arena.view(),
        layout.series("x").unwrap(),
        layout.series("y").unwrap(),
        layout.scalar("slope").unwrap(),
        layout.scalar("intercept").unwrap(),
    )
    .unwrap();
    assert_close(fit.slope, 2.0, 1e-12);
    assert_close(fit.intercept, 3.0, 1e-12);
    assert_close(arena.as_slice()[8], 2.0, 1e-12);
    assert_close(arena.as_slice()[9], 3.0, 1e-12);
}

#[test]
fn regression_recovers_noisy_trend() {
    let n = 500;
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y = noisy_linear(n, 0.05, 12.0, 0.5, 99);
    let (mut arena, layout) = ArenaFixture::new()
        .series("x", &x)
        .series("y", &y)
        .scalar("slope")
        .scalar("intercept")
        .build()
        .unwrap();
    let fit = ops::linear_regression(
        &mut arena.view(),
        layout.series("x").unwrap(),
        layout.series("y").unwrap(),
        layout.scalar("slope").unwrap(),
        layout.scalar("intercept").unwrap(),
    )
    .unwrap();
    assert!((fit.slope - 0.05).abs() < 0.01, "slope {}", fit.slope);
    assert!((fit.intercept - 12.0).abs() < 0.5, "intercept {}", fit.intercept);
}

#[test]
fn degenerate_regressions_leave_slots_untouched() {
    let cases: [(&[f64], &[f64]); 3] = [
        (&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
        (&[1.0], &[2.0]),
        (&[], &[]),
    ];
    for (x, y) in cases {
        let (mut arena, layout) = ArenaFixture::new()
            .series("x", x)
            .series("y", y)
            .scalar("slope")
            .scalar("intercept")
            .build()
            .unwrap();
        let slope = layout.scalar("slope").unwrap();
        let intercept = layout.scalar("intercept").unwrap();
        arena.write_scalar(slope, -1.0).unwrap();
        arena.write_scalar(intercept, -1.0).unwrap();
        let err = ops::linear_regression(
            &mut arena.view(),
            layout.series("x").unwrap(),
            layout.series("y").unwrap(),
            slope,
            intercept,
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::DegenerateInput { .. }), "{x:?}");
        assert_eq!(arena.read_scalar(slope).unwrap(), -1.0);
        assert_eq!(arena.read_scalar(intercept).unwrap(), -1.0);
    }
}

// ── Borrowed host memory ───────────────────────────────────────

#[test]
fn view_over_borrowed_buffer_behaves_like_owned_arena() {
    let mut host = vec![0.0; 12];
    host[..4].copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
    host[4..8].copy_from_slice(&[2.0, 4.0, 6.0, 8.0]);
    let mut view = ArenaView::new(&mut host);
    ops::linear_regression(
        &mut view,
        Series::new(0, 4),
        Series::new(4, 4),
        ScalarSlot::new(8),
        ScalarSlot::new(9),
    )
    .unwrap();
    ops::moving_average_into(&mut view, Series::new(4, 2), Series::new(10, 2), w(2)).unwrap();
    assert_close(host[8], 2.0, 1e-12);
    assert_close(host[9], 0.0, 1e-12);
    assert_eq!(&host[10..], &[2.0, 3.0]);
}

// ── Properties ─────────────────────────────────────────────────

fn sample() -> impl Strategy<Value = f64> {
    -1.0e3..1.0e3f64
}

proptest! {
    #[test]
    fn out_of_bounds_calls_change_nothing(
        values in prop::collection::vec(sample(), 1..32),
        extra in 1usize..8,
        window in 1usize..6,
    ) {
        let mut arena = Arena::from_values(&values);
        let n = values.len();
        let series = Series::new(0, n + extra);
        let window = Window::new(window).unwrap();

        let err = ops::moving_average(&mut arena.view(), series, window).unwrap_err();
        prop_assert!(
            matches!(err, KernelError::Addressing { .. }),
            "expected addressing error, got {:?}",
            err
        );
        let err = ops::mean_into(&mut arena.view(), Series::new(0, n), ScalarSlot::new(n)).unwrap_err();
        prop_assert!(
            matches!(err, KernelError::Addressing { .. }),
            "expected addressing error, got {:?}",
            err
        );
        prop_assert_eq!(arena.as_slice(), values.as_slice());
    }

    #[test]
    fn smoothing_region_leaves_neighbours_untouched(
        values in prop::collection::vec(sample(), 3..40),
        window in 1usize..8,
    ) {
        let n = values.len();
        let mut arena = Arena::from_values(&values);
        let inner = Series::new(1, n - 2);
        ops::moving_average(&mut arena.view(), inner, Window::new(window).unwrap()).unwrap();
        prop_assert_eq!(arena.as_slice()[0].to_bits(), values[0].to_bits());
        prop_assert_eq!(arena.as_slice()[n - 1].to_bits(), values[n - 1].to_bits());
        assert_slices_close(
            arena.read_series(inner).unwrap(),
            &naive_moving_average(&values[1..n - 1], window),
            1e-9,
        );
    }

    #[test]
    fn constant_series_smooths_to_itself_and_averages_to_itself(
        v in sample(),
        n in 1usize..50,
        window in 1usize..10,
    ) {
        let mut arena = Arena::from_values(&constant_series(n, v));
        let series = Series::new(0, n);
        ops::moving_average(&mut arena.view(), series, Window::new(window).unwrap()).unwrap();
        for x in arena.as_slice() {
            prop_assert!((x - v).abs() <= 1e-12 * v.abs().max(1.0));
        }
        let m = ops::mean(&arena.view(), series).unwrap();
        prop_assert!((m - v).abs() <= 1e-12 * v.abs().max(1.0));
    }
}
