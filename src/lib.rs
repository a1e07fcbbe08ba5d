pub mod advisor;
pub mod config;
pub mod metrics;
pub mod optimizer;
pub mod scoring;
pub mod signals;
pub mod templates;
pub mod timing;

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use crate::advisor::Advisor;
use crate::config::AnalyzerConfig;
use crate::scoring::ScoringPipeline;
use crate::signals::SignalEvaluator;
use crate::timing::TimingAdvisor;

pub use crate::metrics::extract_metrics;
pub use crate::optimizer::{
    compare_versions, prioritized_actions, quick_optimize, ActionPlan, QuickOptimization,
    QuickOptimizeOptions, VersionComparison, Which,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub reading_time_seconds: usize,
    pub has_media: bool,
    pub media_count: usize,
    pub has_question: bool,
    pub question_count: usize,
    pub has_hashtags: bool,
    pub hashtag_count: usize,
    pub has_mentions: bool,
    pub mention_count: usize,
    pub has_links: bool,
    pub link_count: usize,
    pub has_emojis: bool,
    pub emoji_count: usize,
    #[serde(rename = "hasCTA")]
    pub has_cta: bool,
    pub is_thread: bool,
    pub thread_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScore {
    pub name: String,
    pub score: f64,
    pub weight: f64,
    pub description: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmSignals {
    pub positive_signals: Vec<SignalScore>,
    pub negative_signals: Vec<SignalScore>,
    pub neutral_signals: Vec<SignalScore>,
}

impl AlgorithmSignals {
    pub fn has_positive(&self, name: &str) -> bool {
        self.positive_signals.iter().any(|signal| signal.name == name)
    }

    pub fn has_negative(&self, name: &str) -> bool {
        self.negative_signals.iter().any(|signal| signal.name == name)
    }

    pub fn has_neutral(&self, name: &str) -> bool {
        self.neutral_signals.iter().any(|signal| signal.name == name)
    }

    pub fn net_score(&self) -> f64 {
        self.positive_signals
            .iter()
            .chain(self.negative_signals.iter())
            .map(|signal| signal.score)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.positive_signals.len() + self.negative_signals.len() + self.neutral_signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementScores {
    pub likeability: f64,
    pub replyability: f64,
    pub retweetability: f64,
    pub quoteability: f64,
    pub shareability: f64,
    pub dwell_potential: f64,
    pub follow_potential: f64,
}

impl EngagementScores {
    pub fn values(&self) -> [f64; 7] {
        [
            self.likeability,
            self.replyability,
            self.retweetability,
            self.quoteability,
            self.shareability,
            self.dwell_potential,
            self.follow_potential,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    AddQuestion,
    AddCta,
    AddMedia,
    ReduceLength,
    IncreaseLength,
    AddThread,
    RemoveHashtags,
    AddHook,
    ImproveReadability,
    AddControversy,
    AddValue,
    RemoveLinks,
    FixFormatting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub priority: Priority,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub potential_score_increase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    TooManyHashtags,
    AllCaps,
    TooShort,
    TooLong,
    LinkOnly,
    SpamPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    #[serde(rename = "type")]
    pub warning_type: WarningType,
    pub severity: Severity,
    pub message: String,
    pub score_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAnalysis {
    pub overall_score: f64,
    pub engagement_scores: EngagementScores,
    pub content_metrics: ContentMetrics,
    pub algorithm_signals: AlgorithmSignals,
    pub suggestions: Vec<Suggestion>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    evaluator: SignalEvaluator,
    pipeline: ScoringPipeline,
    advisor: Advisor,
    timing: TimingAdvisor,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let evaluator = SignalEvaluator::new(&config);
        let pipeline = ScoringPipeline::from_config(&config);
        let advisor = Advisor::new(&config);
        let timing = TimingAdvisor::new(&config);
        Self {
            config,
            evaluator,
            pipeline,
            advisor,
            timing,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn timing(&self) -> &TimingAdvisor {
        &self.timing
    }

    pub fn analyze(&self, content: &str, media_count: usize) -> PostAnalysis {
        let content_metrics = extract_metrics(content, media_count);
        let algorithm_signals = self.evaluator.evaluate(content, &content_metrics);
        let engagement_scores = self.pipeline.engagement(&content_metrics, &algorithm_signals);
        let suggestions =
            self.advisor
                .suggestions(&content_metrics, &algorithm_signals, &engagement_scores);
        let warnings = self.advisor.warnings(&content_metrics, &algorithm_signals);
        let overall_score = self.pipeline.overall(&engagement_scores, &warnings);

        debug!(
            characters = content_metrics.character_count,
            positive = algorithm_signals.positive_signals.len(),
            negative = algorithm_signals.negative_signals.len(),
            suggestions = suggestions.len(),
            warnings = warnings.len(),
            overall_score,
            "analyzed post"
        );

        PostAnalysis {
            overall_score,
            engagement_scores,
            content_metrics,
            algorithm_signals,
            suggestions,
            warnings,
        }
    }
}

static DEFAULT_ANALYZER: LazyLock<Analyzer> = LazyLock::new(Analyzer::default);

pub fn analyze(content: &str, media_count: usize) -> PostAnalysis {
    DEFAULT_ANALYZER.analyze(content, media_count)
}

pub fn default_analyzer() -> &'static Analyzer {
    &DEFAULT_ANALYZER
}

pub fn content_id(content: &str) -> String {
    format!("post_{:x}", stable_hash64(content))
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
