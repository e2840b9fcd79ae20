use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use dollar_one::{
    decode_bundle, encode_bundle, next_template_name, Gesture, GestureEngine, Point, TemplateRecord, GST_EXTENSION,
};
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, Result};

pub const DEFAULT_NAME: &str = "NO_NAME";

/// One recorded stroke and the gesture it is meant to be.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sample {
    #[serde(default)]
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl Sample {
    pub fn stroke(&self) -> Vec<Point> {
        self.points.iter().map(|&p| Point::from(p)).collect()
    }

    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_NAME
        } else {
            &self.name
        }
    }
}

// One JSON sample per line; blank lines are skipped
pub fn read_samples(path: &Path) -> Result<Vec<Sample>> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    let mut res: Vec<Sample> = Vec::new();
    for (ix, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| CliError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let sample = serde_json::from_str(&line).map_err(|source| CliError::Sample { line: ix + 1, source })?;
        res.push(sample);
    }
    Ok(res)
}

fn is_template_file(path: &Path) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == GST_EXTENSION)
}

// Template files in `dir`, sorted so load order is stable
pub fn template_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut res: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CliError::io(dir, e))? {
        let path = entry.map_err(|e| CliError::io(dir, e))?.path();
        if is_template_file(&path) {
            res.push(path);
        } else {
            debug!(path = %path.display(), "not a template file");
        }
    }
    res.sort();
    Ok(res)
}

pub fn read_record(path: &Path) -> Result<TemplateRecord> {
    let json = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    TemplateRecord::from_json(&json).map_err(|source| CliError::Template {
        path: path.to_path_buf(),
        source,
    })
}

// Loads every template in `dir`; a bad file is logged and skipped
pub fn load_templates(engine: &GestureEngine, dir: &Path) -> Result<usize> {
    let mut loaded = 0;
    for path in template_files(dir)? {
        match read_record(&path).and_then(|record| {
            engine.load(&record).map_err(|source| CliError::Template {
                path: path.clone(),
                source,
            })
        }) {
            Ok(_) => loaded += 1,
            Err(err) => warn!(%err, "template skipped"),
        }
    }
    info!(loaded, dir = %dir.display(), "templates loaded");
    Ok(loaded)
}

// Writes `gesture` into `dir` under the first free `<name>_<n>.gst`
pub fn save_template(dir: &Path, gesture: &Gesture) -> Result<PathBuf> {
    let base = gesture.name().unwrap_or(DEFAULT_NAME);
    let files = template_files(dir)?;
    let stems: Vec<&str> = files
        .iter()
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
        .collect();
    let file_name = format!("{}.{}", next_template_name(base, stems), GST_EXTENSION);
    let path = dir.join(file_name);

    let json = gesture.to_record().to_json()?;
    let mut file = File::create(&path).map_err(|e| CliError::io(&path, e))?;
    file.write_all(json.as_bytes()).map_err(|e| CliError::io(&path, e))?;
    info!(path = %path.display(), "gesture saved");
    Ok(path)
}

// Packs every template file in `dir` into one bincode bundle
pub fn write_bundle(dir: &Path, out: &Path) -> Result<usize> {
    let records = template_files(dir)?
        .iter()
        .map(|path| read_record(path))
        .collect::<Result<Vec<TemplateRecord>>>()?;
    let bytes = encode_bundle(&records)?;
    fs::write(out, bytes).map_err(|e| CliError::io(out, e))?;
    Ok(records.len())
}

pub fn read_bundle(engine: &GestureEngine, path: &Path) -> Result<usize> {
    let bytes = fs::read(path).map_err(|e| CliError::io(path, e))?;
    engine.load_bundle(&bytes).map_err(|source| CliError::Template {
        path: path.to_path_buf(),
        source,
    })
}

// Sanity check that a bundle decodes, without loading it
pub fn bundle_len(path: &Path) -> Result<usize> {
    let bytes = fs::read(path).map_err(|e| CliError::io(path, e))?;
    Ok(decode_bundle(&bytes)?.len())
}
