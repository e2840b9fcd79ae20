//! Property-based invariant tests for stroke normalization and scoring.
//!
//! 1. Output length always equals the resolution
//! 2. Undoing scale and rotation recovers a stroke starting at the raw start
//! 3. The de-rotated first point lies at angle zero from the centroid
//! 4. Scale factors map the raw bounding box onto the reference square
//! 5. Resampling a straight multi-vertex stroke preserves its length
//! 6. Resampled gaps never exceed the sampling interval
//! 7. A gesture compared with itself scores 100

use dollar_one::{bounding_rect, normalize, path_length, score, Gesture, Point};
use proptest::prelude::*;

const SQUARE: f64 = 100.0;

// ── Strategies ──────────────────────────────────────────────────────────

fn point_strategy() -> impl Strategy<Value = Point> {
    (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| Point::new(x, y))
}

fn stroke_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point_strategy(), 2..24).prop_filter("needs a 2D bounding box", |points| {
        let rect = bounding_rect(points).unwrap();
        rect.width() > 1.0 && rect.height() > 1.0
    })
}

// Collinear points along a diagonal, strictly advancing
fn straight_stroke_strategy() -> impl Strategy<Value = Vec<Point>> {
    (
        point_strategy(),
        0.1f64..1.4,
        prop::collection::vec(1.0f64..80.0, 1..20),
    )
        .prop_map(|(start, angle, steps)| {
            let dir = Point::new(angle.cos(), angle.sin());
            let mut points = vec![start];
            let mut along = 0.0;
            for step in steps {
                along += step;
                points.push(start + dir * along);
            }
            points
        })
}

fn resolution_strategy() -> impl Strategy<Value = usize> {
    2usize..129
}

/// Helper: map normalized points back to the resampled stroke before rotation.
fn resampled_stroke(gesture: &Gesture) -> Vec<Point> {
    let c = gesture.centroid();
    let s = gesture.scale_factor();
    gesture
        .points()
        .iter()
        .map(|p| Point::new(p.x / s.x + c.x, p.y / s.y + c.y))
        .map(|p| p.rotate_about(c, gesture.indicative_angle()))
        .collect()
}

fn wrap_angle(a: f64) -> f64 {
    a.sin().atan2(a.cos())
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn output_has_resolution_points(raw in stroke_strategy(), resolution in resolution_strategy()) {
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        prop_assert_eq!(gesture.points().len(), resolution);
        prop_assert_eq!(gesture.resolution(), resolution);
        prop_assert!(gesture.name().is_none());
    }

    #[test]
    fn undoing_normalization_starts_at_raw_start(raw in stroke_strategy(), resolution in resolution_strategy()) {
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        let resampled = resampled_stroke(&gesture);
        prop_assert!(resampled[0].distance_to(raw[0]) < 1e-6);
        let c = dollar_one::centroid(&resampled);
        prop_assert!(c.distance_to(gesture.centroid()) < 1e-6);
    }

    #[test]
    fn derotated_start_is_at_angle_zero(raw in stroke_strategy(), resolution in resolution_strategy()) {
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        let first = gesture.points()[0];
        prop_assume!(first.magnitude() > 1e-3);
        let angle = (Point::ORIGIN - first).heading();
        prop_assert!(angle.abs() < 1e-6, "angle {}", angle);

        let resampled = resampled_stroke(&gesture);
        let original = (gesture.centroid() - resampled[0]).heading();
        prop_assert!(wrap_angle(original - gesture.indicative_angle()).abs() < 1e-6);
    }

    #[test]
    fn scale_factor_fits_raw_box(raw in stroke_strategy(), resolution in resolution_strategy()) {
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        let rect = bounding_rect(&raw).unwrap();
        prop_assert!((gesture.scale_factor().x * rect.width() - SQUARE).abs() < 1e-9);
        prop_assert!((gesture.scale_factor().y * rect.height() - SQUARE).abs() < 1e-9);
    }

    #[test]
    fn straight_stroke_keeps_its_length(raw in straight_stroke_strategy(), resolution in resolution_strategy()) {
        prop_assume!(raw.len() >= 2);
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        let resampled = resampled_stroke(&gesture);
        let expected = path_length(&raw);
        prop_assert!((path_length(&resampled) - expected).abs() < 1e-6 * expected.max(1.0));
        prop_assert!(resampled[resolution - 1].distance_to(raw[raw.len() - 1]) < 1e-6 * expected.max(1.0));
    }

    #[test]
    fn resampled_gaps_stay_within_interval(raw in stroke_strategy(), resolution in resolution_strategy()) {
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        let resampled = resampled_stroke(&gesture);
        let total = path_length(&raw);
        let interval = total / (resolution - 1) as f64;
        for pair in resampled.windows(2) {
            prop_assert!(pair[0].distance_to(pair[1]) <= interval + 1e-6 * total.max(1.0));
        }
        prop_assert!(path_length(&resampled) <= total + 1e-6 * total.max(1.0));
    }

    #[test]
    fn self_comparison_scores_100(raw in stroke_strategy(), resolution in resolution_strategy()) {
        let gesture = normalize(&raw, resolution, SQUARE).unwrap();
        let value = score(&gesture, &gesture).unwrap();
        prop_assert!((value - 100.0).abs() < 1e-9);
    }
}
