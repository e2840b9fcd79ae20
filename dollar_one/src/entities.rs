use super::geometry::Point;
use std::sync::Arc;

/// A normalized stroke: resampled to `resolution` points, rotated so the
/// indicative angle is zero, centred on the origin and scaled toward the
/// reference square.
///
/// Gestures are immutable once built. Candidates come out of the
/// normalizer unnamed; templates carry a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub(crate) name: Option<String>,
    pub(crate) points: Vec<Point>,
    // Mean of the resampled points, before rotation
    pub(crate) centroid: Point,
    // Radians, from the first resampled point to the centroid, before rotation
    pub(crate) indicative_angle: f64,
    // Per-axis factors derived from the raw stroke's bounding box
    pub(crate) scale_factor: Point,
    pub(crate) resolution: usize,
    pub(crate) reference_square_length: f64,
}

impl Gesture {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    pub fn indicative_angle(&self) -> f64 {
        self.indicative_angle
    }

    pub fn scale_factor(&self) -> Point {
        self.scale_factor
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn reference_square_length(&self) -> f64 {
        self.reference_square_length
    }

    /// Returns the same gesture labelled `name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Gesture {
        self.name = Some(name.into());
        self
    }
}

/// One scored template.
#[derive(Debug, Clone)]
pub struct Match {
    pub name: String,
    // 100 is a perfect match; negative for very dissimilar shapes
    pub score: f64,
    pub template: Arc<Gesture>,
    // Position in the ranking, 0 = best
    pub rank: usize,
    // Position of the template in its store
    pub index: usize,
}
