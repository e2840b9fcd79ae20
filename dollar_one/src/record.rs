use super::entities::Gesture;
use super::error::{GestureError, Result};
use super::geometry::Point;
use serde_derive::{Deserialize, Serialize};

/// File extension used by stored template records.
pub const GST_EXTENSION: &str = "gst";

/// Persisted form of a template. Field names are the on-disk JSON keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TemplateRecord {
    pub gesture_name: String,
    pub indicative_angle: f64,
    pub gesture_resolution: usize,
    pub reference_square_length: f64,
    pub centroid: [f64; 2],
    pub scale_factor: [f64; 2],
    pub points: Vec<[f64; 2]>,
}

impl TemplateRecord {
    pub fn from_json(json: &str) -> Result<TemplateRecord> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Gesture {
    pub fn to_record(&self) -> TemplateRecord {
        TemplateRecord {
            gesture_name: self.name.clone().unwrap_or_default(),
            indicative_angle: self.indicative_angle,
            gesture_resolution: self.resolution,
            reference_square_length: self.reference_square_length,
            centroid: self.centroid.into(),
            scale_factor: self.scale_factor.into(),
            points: self.points.iter().map(|&p| p.into()).collect(),
        }
    }

    /// Rebuilds a template from its stored fields. The record already holds
    /// normalized data, so nothing is recomputed.
    pub fn from_record(record: &TemplateRecord) -> Result<Gesture> {
        if record.gesture_name.is_empty() {
            return Err(GestureError::malformed("gesture_name is empty"));
        }
        if record.gesture_resolution < 2 {
            return Err(GestureError::malformed(format!(
                "gesture_resolution must be at least 2, got {}",
                record.gesture_resolution
            )));
        }
        if record.points.len() != record.gesture_resolution {
            return Err(GestureError::malformed(format!(
                "expected {} points, got {}",
                record.gesture_resolution,
                record.points.len()
            )));
        }
        if !(record.reference_square_length.is_finite() && record.reference_square_length > 0.0) {
            return Err(GestureError::malformed(format!(
                "reference_square_length must be positive, got {}",
                record.reference_square_length
            )));
        }
        let centroid = Point::from(record.centroid);
        let scale_factor = Point::from(record.scale_factor);
        let points: Vec<Point> = record.points.iter().map(|&p| Point::from(p)).collect();
        if !record.indicative_angle.is_finite()
            || !centroid.is_finite()
            || !scale_factor.is_finite()
            || !points.iter().all(|p| p.is_finite())
        {
            return Err(GestureError::malformed("non-finite coordinate"));
        }
        Ok(Gesture {
            name: Some(record.gesture_name.clone()),
            points,
            centroid,
            indicative_angle: record.indicative_angle,
            scale_factor,
            resolution: record.gesture_resolution,
            reference_square_length: record.reference_square_length,
        })
    }
}

pub fn encode_bundle(records: &[TemplateRecord]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(records)?)
}

pub fn decode_bundle(bytes: &[u8]) -> Result<Vec<TemplateRecord>> {
    // Length prefixes are checked against the slice, never allocated up front
    Ok(bincode::deserialize(bytes)?)
}

/// Picks the name to store a new template under: `<base>_<M+1>` where `M` is
/// the largest numeric suffix among `existing` names of the form
/// `<base>_<digits>`, or `<base>_0` if there are none.
pub fn next_template_name<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut postfix: u64 = 0;
    for name in existing {
        let (stem, digits) = match name.rfind('_') {
            Some(ix) => (&name[..ix], &name[ix + 1..]),
            None => continue,
        };
        if stem != base || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(n) = digits.parse::<u64>() {
            postfix = postfix.max(n.saturating_add(1));
        }
    }
    format!("{}_{}", base, postfix)
}
