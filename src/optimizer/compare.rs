use serde::{Deserialize, Serialize};

use crate::{default_analyzer, Analyzer, PostAnalysis};

pub const SAME_SCORE_TOLERANCE: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Which {
    Original,
    Modified,
    Same,
}

impl Which {
    pub fn from_delta(delta: f64) -> Self {
        if delta.abs() < SAME_SCORE_TOLERANCE {
            Which::Same
        } else if delta > 0.0 {
            Which::Modified
        } else {
            Which::Original
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Which::Original => "original",
            Which::Modified => "modified",
            Which::Same => "same",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub score_a: f64,
    pub score_b: f64,
    pub delta: f64,
    pub which: Which,
    pub differences: Vec<String>,
}

pub fn compare_versions(original: &str, modified: &str) -> VersionComparison {
    compare_with(default_analyzer(), original, modified)
}

pub fn compare_with(analyzer: &Analyzer, original: &str, modified: &str) -> VersionComparison {
    let before = analyzer.analyze(original, 0);
    let after = analyzer.analyze(modified, 0);
    let delta = after.overall_score - before.overall_score;

    VersionComparison {
        score_a: before.overall_score,
        score_b: after.overall_score,
        delta,
        which: Which::from_delta(delta),
        differences: differences(analyzer, &before, &after),
    }
}

fn differences(analyzer: &Analyzer, before: &PostAnalysis, after: &PostAnalysis) -> Vec<String> {
    let length = &analyzer.config().length;
    let old = &before.content_metrics;
    let new = &after.content_metrics;
    let mut differences = Vec::new();

    let question_weight = analyzer.config().content_weights.has_question.abs() * 100.0;
    if new.has_question && !old.has_question {
        differences.push(format!(
            "Added question (+{:.0}% reply potential)",
            question_weight
        ));
    }
    if !new.has_question && old.has_question {
        differences.push(format!(
            "Removed question (-{:.0}% reply potential)",
            question_weight
        ));
    }

    if new.hashtag_count < old.hashtag_count {
        differences.push(format!(
            "Reduced hashtags from {} to {}",
            old.hashtag_count, new.hashtag_count
        ));
    }

    if new.is_thread && !old.is_thread {
        differences.push(format!(
            "Converted to thread format (+{:.0}% dwell time)",
            analyzer.config().content_weights.has_thread.abs() * 100.0
        ));
    }

    if old.character_count < length.min && new.character_count >= length.min {
        differences.push("Length now in optimal range".to_string());
    }
    if old.character_count > length.hard_limit && new.character_count <= length.hard_limit {
        differences.push("Length reduced to within character limit".to_string());
    }

    if after.warnings.len() < before.warnings.len() {
        differences.push(format!(
            "Resolved {} warning(s)",
            before.warnings.len() - after.warnings.len()
        ));
    }

    differences
}
