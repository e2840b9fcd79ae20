use super::entities::Gesture;
use super::error::{GestureError, Result};
use super::geometry::Point;
use super::normalizer::Normalizer;
use super::record::TemplateRecord;
use super::recognizer::{self, Recognition};
use super::template_store::TemplateStore;
use serde_derive::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_RESOLUTION: usize = 64;
pub const DEFAULT_REFERENCE_SQUARE_LENGTH: f64 = 100.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    // Points per normalized gesture
    pub resolution: usize,
    // Side of the square gestures are scaled toward
    pub reference_square_length: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            resolution: DEFAULT_RESOLUTION,
            reference_square_length: DEFAULT_REFERENCE_SQUARE_LENGTH,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 {
            return Err(GestureError::InvalidConfig {
                reason: format!("resolution must be at least 2, got {}", self.resolution),
            });
        }
        if !(self.reference_square_length.is_finite() && self.reference_square_length > 0.0) {
            return Err(GestureError::InvalidConfig {
                reason: format!(
                    "reference square length must be positive, got {}",
                    self.reference_square_length
                ),
            });
        }
        Ok(())
    }
}

/// A normalizer and the template store it trains into.
///
/// Every method takes `&self`; wrap the engine in an `Arc` to share it
/// between a recognizing thread and a training one.
#[derive(Debug)]
pub struct GestureEngine {
    normalizer: Normalizer,
    store: TemplateStore,
}

impl GestureEngine {
    pub fn new(config: EngineConfig) -> Result<GestureEngine> {
        config.validate()?;
        Ok(GestureEngine {
            normalizer: Normalizer::new(config.resolution, config.reference_square_length),
            store: TemplateStore::new(),
        })
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            resolution: self.normalizer.resolution,
            reference_square_length: self.normalizer.reference_square_length,
        }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Normalizes a raw stroke into an unnamed candidate.
    pub fn normalize(&self, points: &[Point]) -> Result<Gesture> {
        self.normalizer.normalize(points)
    }

    /// Normalizes `points` and stores the result as a template called `name`.
    pub fn train(&self, points: &[Point], name: &str) -> Result<Arc<Gesture>> {
        let gesture = self.normalize(points)?;
        Ok(self.store.add(gesture, name))
    }

    pub fn load(&self, record: &TemplateRecord) -> Result<Arc<Gesture>> {
        self.store.load_one(record)
    }

    pub fn load_bundle(&self, bytes: &[u8]) -> Result<usize> {
        self.store.load_bundle(bytes)
    }

    pub fn recognize(&self, candidate: &Gesture) -> Result<Recognition> {
        recognizer::recognize(candidate, &self.store)
    }

    pub fn recognize_top(&self, candidate: &Gesture, limit: usize) -> Result<Recognition> {
        recognizer::recognize_top(candidate, &self.store, Some(limit))
    }

    /// Normalizes a raw stroke and recognizes it.
    pub fn recognize_points(&self, points: &[Point]) -> Result<Recognition> {
        let candidate = self.normalize(points)?;
        self.recognize(&candidate)
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        GestureEngine {
            normalizer: Normalizer::new(DEFAULT_RESOLUTION, DEFAULT_REFERENCE_SQUARE_LENGTH),
            store: TemplateStore::new(),
        }
    }
}
