#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn vt(scale: f64, origin_x: f64, origin_y: f64) -> ViewportTransform {
    ViewportTransform { scale, origin_x, origin_y, ..ViewportTransform::default() }
}

const ANCHORS: [(f64, f64); 5] = [(0.0, 0.0), (50.0, 50.0), (-120.0, 33.5), (800.0, 600.0), (1.25, -999.0)];
const FACTORS: [f64; 6] = [0.5, 0.9, 1.0, 1.1, 2.0, 7.5];

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- Defaults ---

#[test]
fn default_is_identity_with_standard_limits() {
    let t = ViewportTransform::default();
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.origin(), Point::new(0.0, 0.0));
    assert_eq!(t.zoom_factor, 1.1);
    assert_eq!(t.min_scale, 0.1);
    assert_eq!(t.max_scale, 30.0);
}

#[test]
fn with_limits_keeps_identity() {
    let t = ViewportTransform::with_limits(2.0, 0.5, 4.0);
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.zoom_factor, 2.0);
    assert_eq!(t.min_scale, 0.5);
    assert_eq!(t.max_scale, 4.0);
}

// --- screen_to_logical ---

#[test]
fn screen_to_logical_identity() {
    let t = ViewportTransform::default();
    assert!(point_approx_eq(t.screen_to_logical(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_logical_with_scale() {
    let t = vt(4.0, 0.0, 0.0);
    assert!(point_approx_eq(t.screen_to_logical(Point::new(40.0, 80.0)), Point::new(10.0, 20.0)));
}

#[test]
fn screen_to_logical_with_origin() {
    let t = vt(1.0, 100.0, 50.0);
    assert!(point_approx_eq(t.screen_to_logical(Point::new(100.0, 50.0)), Point::new(0.0, 0.0)));
}

#[test]
fn screen_to_logical_with_scale_and_origin() {
    let t = vt(2.0, 50.0, 30.0);
    assert!(point_approx_eq(t.screen_to_logical(Point::new(0.0, 0.0)), Point::new(-25.0, -15.0)));
}

#[test]
fn screen_to_logical_fractional_scale() {
    let t = vt(0.75, 13.7, -42.3);
    assert!(point_approx_eq(t.screen_to_logical(Point::new(13.7, -42.3)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(t.screen_to_logical(Point::new(88.7, 32.7)), Point::new(100.0, 100.0)));
}

// --- zoom_at_point ---

#[test]
fn zoom_keeps_anchor_fixed() {
    let starts = [vt(1.0, 0.0, 0.0), vt(2.5, -40.0, 17.0), vt(0.3, 300.0, -80.0)];
    for start in starts {
        for (ax, ay) in ANCHORS {
            for factor in FACTORS {
                let anchor = Point::new(ax, ay);
                let before = start.screen_to_logical(anchor);
                let after = start.zoom_at_point(anchor, factor).screen_to_logical(anchor);
                assert!(
                    point_approx_eq(before, after),
                    "anchor {anchor:?} factor {factor} moved {before:?} -> {after:?}"
                );
            }
        }
    }
}

#[test]
fn zoom_keeps_anchor_fixed_when_clamped() {
    let start = vt(25.0, 10.0, 10.0);
    let anchor = Point::new(200.0, 120.0);
    let before = start.screen_to_logical(anchor);
    let next = start.zoom_at_point(anchor, 10.0);
    assert_eq!(next.scale, 30.0);
    assert!(point_approx_eq(before, next.screen_to_logical(anchor)));
}

#[test]
fn zoom_clamps_to_max() {
    let next = ViewportTransform::default().zoom_at_point(Point::new(0.0, 0.0), 1000.0);
    assert_eq!(next.scale, 30.0);
}

#[test]
fn zoom_clamps_to_min() {
    let next = ViewportTransform::default().zoom_at_point(Point::new(0.0, 0.0), 0.0001);
    assert_eq!(next.scale, 0.1);
}

#[test]
fn scale_stays_within_limits_across_sequences() {
    let mut t = ViewportTransform::default();
    let steps = [3.0, 5.0, 9.0, 0.01, 0.2, 40.0, 1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 100.0];
    for (i, factor) in steps.iter().enumerate() {
        let anchor = ANCHORS[i % ANCHORS.len()];
        t = t.zoom_at_point(Point::new(anchor.0, anchor.1), *factor);
        assert!(t.scale >= t.min_scale && t.scale <= t.max_scale, "step {i}: scale {}", t.scale);
    }
}

#[test]
fn zoom_preserves_step_and_limits() {
    let start = ViewportTransform::with_limits(1.5, 0.25, 8.0);
    let next = start.zoom_at_point(Point::new(10.0, 10.0), 2.0);
    assert_eq!(next.zoom_factor, 1.5);
    assert_eq!(next.min_scale, 0.25);
    assert_eq!(next.max_scale, 8.0);
}

// --- wheel ---

#[test]
fn wheel_factor_direction() {
    assert!(wheel_factor(-100.0, 0.001) > 1.0);
    assert!(wheel_factor(100.0, 0.001) < 1.0);
    assert_eq!(wheel_factor(0.0, 0.001), 1.0);
}

#[test]
fn wheel_scenario_from_identity() {
    let start = ViewportTransform::default();
    let anchor = Point::new(50.0, 50.0);
    let next = start.zoom_wheel(anchor, -100.0, 0.001);
    assert!(approx_eq(next.scale, 0.1_f64.exp()));
    assert!((next.scale - 1.105).abs() < 1e-3);
    assert!(point_approx_eq(next.screen_to_logical(anchor), Point::new(50.0, 50.0)));
    assert!(approx_eq(next.origin_x, 50.0 - 50.0 * 0.1_f64.exp()));
}

// --- discrete zoom ---

#[test]
fn zoom_in_then_out_returns_to_start() {
    let start = vt(1.0, 12.0, -4.0);
    let center = Point::new(400.0, 300.0);
    let back = start.zoom_in(center).zoom_out(center);
    assert!(approx_eq(back.scale, 1.0));
    assert!(approx_eq(back.origin_x, 12.0));
    assert!(approx_eq(back.origin_y, -4.0));
}

#[test]
fn zoom_in_uses_zoom_factor() {
    let next = ViewportTransform::default().zoom_in(Point::new(400.0, 300.0));
    assert!(approx_eq(next.scale, 1.1));
}

#[test]
fn zoom_out_clamps_to_min() {
    let mut t = ViewportTransform::default();
    for _ in 0..100 {
        t = t.zoom_out(Point::new(400.0, 300.0));
    }
    assert_eq!(t.scale, 0.1);
}

// --- reset ---

#[test]
fn reset_restores_identity_and_keeps_limits() {
    let start = ViewportTransform::with_limits(1.3, 0.2, 5.0).zoom_at_point(Point::new(80.0, 20.0), 3.0);
    let reset = start.reset();
    assert_eq!(reset.scale, 1.0);
    assert_eq!(reset.origin(), Point::new(0.0, 0.0));
    assert_eq!(reset.zoom_factor, 1.3);
    assert_eq!(reset.min_scale, 0.2);
    assert_eq!(reset.max_scale, 5.0);
}

// --- pan ---

#[test]
fn pan_preserves_scale() {
    let start = vt(2.75, 5.0, 5.0);
    for (dx, dy) in ANCHORS {
        let next = start.pan(Point::new(dx, dy), Point::new(-3.0, 9.0));
        assert_eq!(next.scale, 2.75);
    }
}

#[test]
fn pan_is_relative_to_gesture_start() {
    let start = vt(1.0, 100.0, 100.0);
    let at_start = start.origin();
    let moved = start.pan(Point::new(5.0, 5.0), at_start);
    let moved_again = moved.pan(Point::new(12.0, -3.0), at_start);
    assert_eq!(moved_again.origin(), Point::new(112.0, 97.0));
}

// --- percent ---

#[test]
fn percent_rounds() {
    assert_eq!(ViewportTransform::default().percent(), 100);
    assert_eq!(vt(1.106, 0.0, 0.0).percent(), 111);
    assert_eq!(vt(0.994, 0.0, 0.0).percent(), 99);
    assert_eq!(vt(0.1, 0.0, 0.0).percent(), 10);
    assert_eq!(vt(30.0, 0.0, 0.0).percent(), 3000);
}
