//! Camera transform properties.

use scratchpad::camera::{Camera, ZoomLimits};
use scratchpad::geometry::Point;

/// Absolute tolerance near the origin, relative far from it (f32 precision).
fn close(a: Point, b: Point) -> bool {
    let near = |p: f32, q: f32| (p - q).abs() <= 1e-3 + 1e-5 * p.abs().max(q.abs());
    near(a.x, b.x) && near(a.y, b.y)
}

fn cameras() -> Vec<Camera> {
    let mut out = Vec::new();
    for &zoom in &[0.1, 0.5, 1.0, 2.37, 5.0] {
        for &(ox, oy) in &[(0.0, 0.0), (-320.5, 48.0), (1200.0, -900.25)] {
            out.push(Camera {
                offset: Point::new(ox, oy),
                zoom,
                origin: Point::new(64.0, 40.0),
                viewport: (800.0, 600.0),
            });
        }
    }
    out
}

#[test]
fn test_screen_world_invertibility() {
    let points = [Point::new(0.0, 0.0), Point::new(123.5, -77.25), Point::new(-4000.0, 2500.0)];
    for camera in cameras() {
        for p in points {
            let back = camera.screen_to_world(camera.world_to_screen(p));
            assert!(close(back, p), "{camera:?} {p:?} -> {back:?}");
        }
    }
}

#[test]
fn test_viewport_origin_is_subtracted() {
    let camera = Camera {
        origin: Point::new(64.0, 40.0),
        ..Camera::default()
    };

    assert_eq!(camera.screen_to_world(Point::new(64.0, 40.0)), Point::ZERO);
}

#[test]
fn test_zoom_keeps_pivot_fixed() {
    let limits = ZoomLimits::default();
    let pivots = [Point::new(64.0, 40.0), Point::new(400.0, 300.0), Point::new(812.0, 9.0)];

    for mut camera in cameras() {
        for pivot in pivots {
            for delta in [0.25, -0.05, 1.3] {
                let before = camera.screen_to_world(pivot);
                camera.zoom_by(delta, pivot, limits);
                let after = camera.screen_to_world(pivot);
                assert!(close(before, after), "pivot {pivot:?} drifted: {before:?} -> {after:?}");
            }
        }
    }
}

#[test]
fn test_zoom_is_clamped() {
    let limits = ZoomLimits::default();
    let mut camera = Camera::default();

    camera.zoom_by(100.0, Point::ZERO, limits);
    assert_eq!(camera.zoom, 5.0);

    camera.zoom_by(-100.0, Point::ZERO, limits);
    assert_eq!(camera.zoom, 0.1);
}

#[test]
fn test_zoom_at_limit_is_noop() {
    let limits = ZoomLimits::default();
    let mut camera = Camera {
        zoom: 5.0,
        offset: Point::new(10.0, 20.0),
        ..Camera::default()
    };

    assert!(!camera.zoom_by(0.5, Point::new(300.0, 300.0), limits));
    assert_eq!(camera.offset, Point::new(10.0, 20.0));
}

#[test]
fn test_pan_moves_world_under_screen() {
    let mut camera = Camera {
        zoom: 2.0,
        ..Camera::default()
    };

    camera.pan(Point::new(100.0, 0.0));

    // 100 screen px at 2x is 50 world units
    assert_eq!(camera.screen_to_world(Point::new(100.0, 0.0)), Point::ZERO);
    assert_eq!(camera.screen_delta_to_world(Point::new(100.0, 0.0)), Point::new(50.0, 0.0));
}
