pub mod engagement;
pub mod pipeline;
pub mod weighted;

pub use engagement::{EngagementScorer, BASE_SCORE};
pub use pipeline::ScoringPipeline;
pub use weighted::WeightedScorer;
