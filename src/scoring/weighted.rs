use crate::config::EngagementWeights;
use crate::{clamp01, EngagementScores, Warning};

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: EngagementWeights,
}

impl WeightedScorer {
    pub fn new(weights: EngagementWeights) -> Self {
        Self { weights }
    }

    pub fn average(&self, scores: &EngagementScores) -> f64 {
        (scores.likeability
            + scores.replyability
            + scores.retweetability
            + scores.quoteability
            + scores.shareability
            + scores.dwell_potential)
            / 6.0
    }

    pub fn weighted_sum(&self, scores: &EngagementScores) -> f64 {
        let mut score = 0.0;

        score += scores.replyability * self.weights.reply;
        score += scores.retweetability * self.weights.retweet;
        score += scores.quoteability * self.weights.quote;
        score += scores.shareability * self.weights.share;
        score += scores.likeability * self.weights.favorite;
        score += scores.dwell_potential * self.weights.dwell;

        score
    }

    pub fn penalty(&self, warnings: &[Warning]) -> f64 {
        warnings.iter().map(|warning| warning.score_impact.abs()).sum()
    }

    pub fn score(&self, scores: &EngagementScores, warnings: &[Warning]) -> f64 {
        let share = clamp01(self.weights.average_share);
        let blended = self.average(scores) * share + self.weighted_sum(scores) * (1.0 - share);
        clamp01(blended - self.penalty(warnings))
    }
}
