use super::engine::{EngineConfig, GestureEngine};
use super::error::Result;
use super::geometry::Point;
use super::record::TemplateRecord;
use super::recognizer::Recognition;
use serde_derive::{Deserialize, Serialize};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct MatchSummary {
    name: String,
    score: f64,
    rank: usize,
}

// A stroke arrives from JS as an array of [x, y] pairs
fn parse_points(points_json: &str) -> Result<Vec<Point>> {
    let raw: Vec<[f64; 2]> = serde_json::from_str(points_json)?;
    Ok(raw.into_iter().map(Point::from).collect())
}

fn summarize(recognition: &Recognition) -> Result<String> {
    let summary: Vec<MatchSummary> = recognition
        .matches()
        .iter()
        .map(|mc| MatchSummary {
            name: mc.name.clone(),
            score: mc.score,
            rank: mc.rank,
        })
        .collect();
    Ok(serde_json::to_string(&summary)?)
}

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Browser-facing recognizer: strokes and results travel as JSON strings.
#[wasm_bindgen]
pub struct WasmRecognizer {
    engine: GestureEngine,
}

#[wasm_bindgen]
impl WasmRecognizer {
    #[wasm_bindgen(constructor)]
    pub fn new(resolution: usize, reference_square_length: f64) -> std::result::Result<WasmRecognizer, JsValue> {
        let engine = GestureEngine::new(EngineConfig {
            resolution,
            reference_square_length,
        })
        .map_err(to_js)?;
        Ok(WasmRecognizer { engine })
    }

    pub fn train(&self, points_json: &str, name: &str) -> std::result::Result<(), JsValue> {
        let points = parse_points(points_json).map_err(to_js)?;
        self.engine.train(&points, name).map_err(to_js)?;
        Ok(())
    }

    pub fn load_template(&self, gst_json: &str) -> std::result::Result<(), JsValue> {
        let record = TemplateRecord::from_json(gst_json).map_err(to_js)?;
        self.engine.load(&record).map_err(to_js)?;
        Ok(())
    }

    pub fn recognize(&self, points_json: &str, limit: usize) -> std::result::Result<String, JsValue> {
        let points = parse_points(points_json).map_err(to_js)?;
        let candidate = self.engine.normalize(&points).map_err(to_js)?;
        let recognition = self.engine.recognize_top(&candidate, limit).map_err(to_js)?;
        summarize(&recognition).map_err(to_js)
    }

    pub fn template_count(&self) -> usize {
        self.engine.store().size()
    }
}
