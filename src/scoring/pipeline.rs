use crate::config::AnalyzerConfig;
use crate::scoring::{EngagementScorer, WeightedScorer};
use crate::{AlgorithmSignals, ContentMetrics, EngagementScores, Warning};

#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    engagement_scorer: EngagementScorer,
    weighted_scorer: WeightedScorer,
}

impl ScoringPipeline {
    pub fn new(engagement_scorer: EngagementScorer, weighted_scorer: WeightedScorer) -> Self {
        Self {
            engagement_scorer,
            weighted_scorer,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(
            EngagementScorer::from_config(config),
            WeightedScorer::new(config.engagement_weights.clone()),
        )
    }

    pub fn engagement(
        &self,
        metrics: &ContentMetrics,
        signals: &AlgorithmSignals,
    ) -> EngagementScores {
        self.engagement_scorer.score(metrics, signals)
    }

    pub fn overall(&self, scores: &EngagementScores, warnings: &[Warning]) -> f64 {
        self.weighted_scorer.score(scores, warnings)
    }
}
