mod suggestions;
mod warnings;

use crate::config::{
    AdvisorThresholds, AnalyzerConfig, ContentWeights, LengthConfig, Limits, PatternWeights,
    WarningPenalties,
};

pub const MIN_SUGGESTION_GAIN: f64 = 0.01;

pub const REMOVE_LINKS_GAIN: f64 = 0.03;

#[derive(Debug, Clone)]
pub struct Advisor {
    length: LengthConfig,
    limits: Limits,
    content_weights: ContentWeights,
    pattern_weights: PatternWeights,
    penalties: WarningPenalties,
    thresholds: AdvisorThresholds,
}

impl Advisor {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            length: config.length.clone(),
            limits: config.limits.clone(),
            content_weights: config.content_weights.clone(),
            pattern_weights: config.pattern_weights.clone(),
            penalties: config.warning_penalties.clone(),
            thresholds: config.advisor.clone(),
        }
    }
}

fn gain(weight: f64) -> f64 {
    weight.abs().max(MIN_SUGGESTION_GAIN)
}

fn impact(penalty: f64) -> f64 {
    -penalty.abs()
}
