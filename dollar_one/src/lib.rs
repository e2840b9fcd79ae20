//! The "$1" single-stroke gesture recognizer.
//!
//! A raw stroke is resampled to a fixed number of points, rotated so that
//! its indicative angle is zero, and scaled toward a reference square. The
//! resulting [`Gesture`] is scored against every template in a
//! [`TemplateStore`] by average pointwise distance.

extern crate bincode;
extern crate serde_derive;
extern crate wasm_bindgen;

mod engine;
mod entities;
mod error;
mod geometry;
mod match_collector;
mod normalizer;
mod record;
mod recognizer;
mod template_store;
mod wasm;

use std::sync::Arc;

pub use engine::{EngineConfig, GestureEngine, DEFAULT_REFERENCE_SQUARE_LENGTH, DEFAULT_RESOLUTION};
pub use entities::{Gesture, Match};
pub use error::{GestureError, Result};
pub use geometry::{bounding_rect, centroid, lerp, path_length, Point, Rect};
pub use normalizer::{normalize, Normalizer};
pub use record::{decode_bundle, encode_bundle, next_template_name, TemplateRecord, GST_EXTENSION};
pub use recognizer::{recognize, recognize_top, score, Recognition};
pub use template_store::TemplateStore;
pub use wasm::WasmRecognizer;

/// Normalizes a raw stroke, names it and adds it to `store`.
pub fn train(store: &TemplateStore, points: &[Point], name: &str, config: EngineConfig) -> Result<Arc<Gesture>> {
    config.validate()?;
    let gesture = normalize(points, config.resolution, config.reference_square_length)?;
    Ok(store.add(gesture, name))
}

/// Rebuilds a stored template and adds it to `store`.
pub fn load(store: &TemplateStore, record: &TemplateRecord) -> Result<Arc<Gesture>> {
    store.load_one(record)
}
