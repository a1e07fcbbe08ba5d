use crate::config::{AnalyzerConfig, ContentWeights, PatternWeights};
use crate::{clamp01, AlgorithmSignals, ContentMetrics, EngagementScores};

pub const BASE_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
struct Boosts {
    question: f64,
    thread: f64,
    media: f64,
    hook: f64,
    controversy: f64,
    value: f64,
}

#[derive(Debug, Clone)]
pub struct EngagementScorer {
    content_weights: ContentWeights,
    pattern_weights: PatternWeights,
}

impl EngagementScorer {
    pub fn new(content_weights: ContentWeights, pattern_weights: PatternWeights) -> Self {
        Self {
            content_weights,
            pattern_weights,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.content_weights.clone(), config.pattern_weights.clone())
    }

    pub fn base_score(&self, signals: &AlgorithmSignals) -> f64 {
        clamp01(BASE_SCORE + signals.net_score())
    }

    pub fn score(&self, metrics: &ContentMetrics, signals: &AlgorithmSignals) -> EngagementScores {
        let base = self.base_score(signals);
        let boosts = self.boosts(metrics, signals);

        EngagementScores {
            likeability: clamp01(base + boosts.media * 0.5 + boosts.hook * 0.3),
            replyability: clamp01(base + boosts.question + boosts.controversy * 0.5),
            retweetability: clamp01(base + boosts.value + boosts.thread * 0.5),
            quoteability: clamp01(base + boosts.controversy + boosts.hook * 0.3),
            shareability: clamp01(base + boosts.value * 0.8 + boosts.media * 0.3),
            dwell_potential: clamp01(base + boosts.thread + boosts.media * 0.5),
            follow_potential: clamp01(base * 0.7 + boosts.value + boosts.hook * 0.2),
        }
    }

    fn boosts(&self, metrics: &ContentMetrics, signals: &AlgorithmSignals) -> Boosts {
        let content = &self.content_weights;
        let patterns = &self.pattern_weights;
        Boosts {
            question: flag(metrics.has_question, content.has_question),
            thread: flag(metrics.is_thread, content.has_thread),
            media: flag(metrics.has_media, content.has_media),
            hook: flag(signals.has_positive("has_hook"), content.has_hook),
            controversy: flag(signals.has_positive("controversy"), patterns.controversy),
            value: flag(signals.has_positive("value"), patterns.value),
        }
    }
}

fn flag(present: bool, weight: f64) -> f64 {
    if present {
        weight
    } else {
        0.0
    }
}
