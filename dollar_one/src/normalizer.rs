use super::entities::Gesture;
use super::error::{GestureError, Result};
use super::geometry::{self, Point};
use tracing::debug;

/// Turns raw strokes into normalized [`Gesture`]s of a fixed resolution and
/// reference square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    pub resolution: usize,
    pub reference_square_length: f64,
}

impl Normalizer {
    pub fn new(resolution: usize, reference_square_length: f64) -> Normalizer {
        Normalizer {
            resolution,
            reference_square_length,
        }
    }

    pub fn normalize(&self, raw_points: &[Point]) -> Result<Gesture> {
        normalize(raw_points, self.resolution, self.reference_square_length)
    }
}

/// Normalizes a raw stroke.
///
/// The steps run in a fixed order: resample, centroid, indicative angle,
/// de-rotation about the centroid, then scaling. The scale factor comes from
/// the bounding box of `raw_points` as given, not of the resampled stroke,
/// and the scaled points are left centred on the origin.
pub fn normalize(raw_points: &[Point], resolution: usize, reference_square_length: f64) -> Result<Gesture> {
    if resolution < 2 {
        return Err(GestureError::InvalidConfig {
            reason: format!("resolution must be at least 2, got {}", resolution),
        });
    }
    if raw_points.len() < 2 {
        return Err(GestureError::EmptyInput {
            count: raw_points.len(),
        });
    }
    if let Some(index) = raw_points.iter().position(|p| !p.is_finite()) {
        return Err(GestureError::NonFiniteInput { index });
    }
    // A zero-extent box also means a zero-length path; reject before resampling
    let scale_factor = find_scale_factor(raw_points, reference_square_length)?;

    let resampled = resample(raw_points, resolution);
    let centroid = geometry::centroid(&resampled);
    let indicative_angle = (centroid - resampled[0]).heading();
    let points = resampled
        .iter()
        .map(|p| p.rotate_about(centroid, -indicative_angle))
        .map(|p| (p - centroid).scale(scale_factor))
        .collect();

    Ok(Gesture {
        name: None,
        points,
        centroid,
        indicative_angle,
        scale_factor,
        resolution,
        reference_square_length,
    })
}

// Per-axis factors that stretch the stroke's bounding box onto the reference square
fn find_scale_factor(points: &[Point], reference_square_length: f64) -> Result<Point> {
    let rect = match geometry::bounding_rect(points) {
        Some(rect) => rect,
        None => return Err(GestureError::EmptyInput { count: 0 }),
    };
    let width = rect.width();
    let height = rect.height();
    if width == 0.0 || height == 0.0 {
        return Err(GestureError::DegenerateGesture { width, height });
    }
    Ok(Point::new(reference_square_length / width, reference_square_length / height))
}

// Redistributes the stroke into `resolution` points spaced evenly along its path.
// The first output point is the first input point.
pub(crate) fn resample(points: &[Point], resolution: usize) -> Vec<Point> {
    let total_length = geometry::path_length(points);
    let interval = total_length / (resolution - 1) as f64;
    debug!(total_length, interval, resolution, "resampling stroke");
    resample_with_interval(points, resolution, interval)
}

fn resample_with_interval(points: &[Point], resolution: usize, interval: f64) -> Vec<Point> {
    let mut res: Vec<Point> = Vec::with_capacity(resolution);
    res.push(points[0]);

    // Distance walked since the last emitted point
    let mut traveled = 0.0;
    // Last emitted point, or last input vertex passed since then
    let mut last = points[0];
    let mut next_ix = 1;

    while res.len() < resolution {
        if next_ix == points.len() {
            // Ran out of path through accumulated rounding: keep going along the final segment
            let needed = interval - traveled;
            // Heads along the last non-zero raw segment, not from `last` toward the end vertex
            let q = extrapolate(points, last, needed);
            debug!(x = q.x, y = q.y, needed, "extrapolated resample point");
            res.push(q);
            last = q;
            traveled = 0.0;
            continue;
        }
        let next = points[next_ix];
        let segment = last.distance_to(next);
        if segment > 0.0 && traveled + segment >= interval {
            let q = geometry::lerp(last, next, (interval - traveled) / segment);
            res.push(q);
            last = q;
            traveled = 0.0;
        } else {
            traveled += segment;
            last = next;
            next_ix += 1;
        }
    }
    res
}

// Moves `distance` from `from` in the direction of the stroke's last non-zero segment
fn extrapolate(points: &[Point], from: Point, distance: f64) -> Point {
    let direction = points
        .windows(2)
        .rev()
        .map(|w| w[1] - w[0])
        .find(|d| d.magnitude() > 0.0);
    match direction {
        Some(d) => from + d * (distance / d.magnitude()),
        None => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-6;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance_to(b) < 1e-3, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_resample_corner() {
        let raw = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        let res = resample(&raw, 4);
        assert_eq!(res.len(), 4);
        assert_eq!(res[0], Point::new(0.0, 0.0));
        assert_close(res[1], Point::new(200.0 / 3.0, 0.0));
        assert_close(res[2], Point::new(100.0, 100.0 / 3.0));
        assert_close(res[3], Point::new(100.0, 100.0));
    }

    #[test]
    fn test_resample_skips_repeated_points() {
        let raw = pts(&[(0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let res = resample(&raw, 5);
        assert_eq!(res.len(), 5);
        assert_close(res[1], Point::new(5.0, 0.0));
        assert_close(res[2], Point::new(10.0, 0.0));
        assert_close(res[3], Point::new(10.0, 5.0));
        assert_close(res[4], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_extrapolate_follows_last_segment() {
        let raw = pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 4.0)]);
        let q = extrapolate(&raw, Point::new(3.0, 4.0), 5.0);
        assert_close(q, Point::new(6.0, 8.0));
    }

    #[test]
    fn test_resample_extrapolates_past_the_end() {
        // Path is 20 long; an interval of 8 runs out after two points
        let raw = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let res = resample_with_interval(&raw, 4, 8.0);
        assert_eq!(res.len(), 4);
        assert_close(res[1], Point::new(8.0, 0.0));
        assert_close(res[2], Point::new(10.0, 6.0));
        // 4 left on the path, 4 more along the last segment
        assert_close(res[3], Point::new(10.0, 14.0));
    }

    #[test]
    fn test_resample_extrapolates_several_points() {
        // The walk ends on the last vertex, which is also a repeated point
        let raw = pts(&[(0.0, 0.0), (0.0, 6.0), (0.0, 6.0)]);
        let res = resample_with_interval(&raw, 6, 3.0);
        assert_eq!(res.len(), 6);
        assert_close(res[1], Point::new(0.0, 3.0));
        assert_close(res[2], Point::new(0.0, 6.0));
        assert_close(res[3], Point::new(0.0, 9.0));
        assert_close(res[4], Point::new(0.0, 12.0));
        assert_close(res[5], Point::new(0.0, 15.0));
    }

    #[test]
    fn test_normalize_rejects_non_finite_points() {
        let raw = pts(&[(0.0, 0.0), (f64::NAN, 5.0), (10.0, 10.0)]);
        assert_eq!(normalize(&raw, 8, 100.0), Err(GestureError::NonFiniteInput { index: 1 }));
        let raw = pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, f64::INFINITY)]);
        assert_eq!(normalize(&raw, 8, 100.0), Err(GestureError::NonFiniteInput { index: 2 }));
    }

    #[test]
    fn test_normalize_corner_scenario() {
        let raw = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        let gesture = normalize(&raw, 4, 100.0).unwrap();
        assert_eq!(gesture.points().len(), 4);
        assert_eq!(gesture.scale_factor(), Point::new(1.0, 1.0));
        assert_eq!(gesture.name(), None);
        // centroid of the four resampled points
        assert_close(gesture.centroid(), Point::new(266.6667 / 4.0, 133.3333 / 4.0));
        let expected_angle = (gesture.centroid() - Point::new(0.0, 0.0)).heading();
        assert!((gesture.indicative_angle() - expected_angle).abs() < EPS);
    }

    #[test]
    fn test_normalized_points_are_derotated_and_centred() {
        let raw = pts(&[(10.0, 10.0), (60.0, 30.0), (40.0, 80.0), (5.0, 50.0)]);
        let gesture = normalize(&raw, 32, 100.0).unwrap();
        let first = gesture.points()[0];
        let angle = (Point::ORIGIN - first).heading();
        assert!(angle.abs() < EPS, "angle {}", angle);
        let c = geometry::centroid(gesture.points());
        assert!(c.magnitude() < EPS);
    }

    #[test]
    fn test_scale_uses_raw_bounding_box() {
        let raw = pts(&[(0.0, 0.0), (50.0, 0.0), (50.0, 200.0), (0.0, 200.0)]);
        let gesture = normalize(&raw, 16, 100.0).unwrap();
        assert!((gesture.scale_factor().x - 2.0).abs() < EPS);
        assert!((gesture.scale_factor().y - 0.5).abs() < EPS);
    }

    #[test]
    fn test_normalize_errors() {
        assert_eq!(normalize(&[], 32, 100.0), Err(GestureError::EmptyInput { count: 0 }));
        assert_eq!(normalize(&pts(&[(1.0, 1.0)]), 32, 100.0), Err(GestureError::EmptyInput { count: 1 }));
        let horizontal = pts(&[(0.0, 5.0), (50.0, 5.0), (90.0, 5.0)]);
        assert!(matches!(normalize(&horizontal, 32, 100.0), Err(GestureError::DegenerateGesture { .. })));
        let vertical = pts(&[(5.0, 0.0), (5.0, 90.0)]);
        assert!(matches!(normalize(&vertical, 32, 100.0), Err(GestureError::DegenerateGesture { .. })));
        let dot = pts(&[(5.0, 5.0), (5.0, 5.0)]);
        assert!(matches!(normalize(&dot, 32, 100.0), Err(GestureError::DegenerateGesture { .. })));
    }

    #[test]
    fn test_rotated_stroke_has_same_shape_up_to_angle() {
        let raw = pts(&[(0.0, 0.0), (40.0, 10.0), (70.0, 60.0), (20.0, 90.0)]);
        let turned: Vec<Point> = raw.iter().map(|p| p.rotate_about(Point::ORIGIN, PI / 3.0)).collect();
        let a = normalize(&raw, 32, 100.0).unwrap();
        let b = normalize(&turned, 32, 100.0).unwrap();
        let diff = b.indicative_angle() - a.indicative_angle();
        let diff = diff.sin().atan2(diff.cos());
        assert!((diff - PI / 3.0).abs() < 1e-6);
    }
}
