use super::entities::{Gesture, Match};
use super::error::{GestureError, Result};
use super::match_collector::MatchCollector;
use super::template_store::TemplateStore;
use std::fmt;
use tracing::warn;

/// Ranked outcome of one recognition pass. Always holds at least one match.
#[derive(Debug, Clone)]
pub struct Recognition {
    matches: Vec<Match>,
    inferred_angle: f64,
}

impl Recognition {
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn best_match(&self) -> &Match {
        &self.matches[0]
    }

    pub fn best_guess(&self) -> &str {
        &self.best_match().name
    }

    pub fn best_score(&self) -> f64 {
        self.best_match().score
    }

    /// Candidate's indicative angle minus the best template's, in radians.
    /// Hints at how the stroke was oriented; not used for scoring.
    pub fn inferred_angle(&self) -> f64 {
        self.inferred_angle
    }

    pub fn top_guesses(&self, amount: usize) -> &[Match] {
        &self.matches[..amount.min(self.matches.len())]
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mc in &self.matches {
            writeln!(f, "Guess {} - {} ({:.2}%)", mc.rank, mc.name, mc.score)?;
        }
        Ok(())
    }
}

// Mean distance between index-paired points
fn average_distance(candidate: &Gesture, template: &Gesture) -> f64 {
    let total: f64 = candidate
        .points
        .iter()
        .zip(&template.points)
        .map(|(a, b)| a.distance_to(*b))
        .sum();
    total / candidate.resolution as f64
}

/// Similarity of two gestures of equal resolution: 100 for identical
/// points, falling linearly with average point distance. Not clamped.
pub fn score(candidate: &Gesture, template: &Gesture) -> Result<f64> {
    if candidate.resolution != template.resolution || template.points.len() != candidate.points.len() {
        return Err(GestureError::ResolutionMismatch {
            expected: candidate.resolution,
            found: template.resolution,
        });
    }
    let side = candidate.reference_square_length;
    let half_diagonal = 0.5 * (side * side + side * side).sqrt();
    Ok((1.0 - average_distance(candidate, template) / half_diagonal) * 100.0)
}

/// Scores `candidate` against every template in `store` and ranks them.
///
/// Templates of a different resolution are skipped. Fails if the store is
/// empty, or if no template could be compared at all.
pub fn recognize(candidate: &Gesture, store: &TemplateStore) -> Result<Recognition> {
    recognize_top(candidate, store, None)
}

/// Like [`recognize`], keeping only the best `limit` matches (at least one).
pub fn recognize_top(candidate: &Gesture, store: &TemplateStore, limit: Option<usize>) -> Result<Recognition> {
    let limit = limit.map(|n| n.max(1));
    let templates = store.list();
    if templates.is_empty() {
        return Err(GestureError::NoTemplates);
    }

    let mut matches: Vec<Match> = Vec::with_capacity(limit.unwrap_or(templates.len()).min(templates.len()));
    let mut collector = MatchCollector::new(&mut matches, limit);
    let mut first_mismatch = None;
    for (index, template) in templates.iter().enumerate() {
        let value = match score(candidate, template) {
            Ok(value) => value,
            Err(err) => {
                warn!(index, name = template.name().unwrap_or(""), %err, "skipping template");
                first_mismatch.get_or_insert(err);
                continue;
            }
        };
        collector.file_match(Match {
            name: template.name().unwrap_or("").to_string(),
            score: value,
            template: template.clone(),
            rank: 0,
            index,
        });
    }
    collector.assign_ranks();

    let inferred_angle = match matches.first() {
        Some(best) => candidate.indicative_angle - best.template.indicative_angle,
        None => return Err(first_mismatch.unwrap_or(GestureError::NoTemplates)),
    };
    Ok(Recognition {
        matches,
        inferred_angle,
    })
}
