use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthConfig {
    pub min: usize,
    pub max: usize,
    pub ideal: usize,
    pub hard_limit: usize,
    pub very_short: usize,
    pub thread_suggestion: usize,
}

impl Default for LengthConfig {
    fn default() -> Self {
        Self {
            min: 80,
            max: 280,
            ideal: 180,
            hard_limit: 280,
            very_short: 30,
            thread_suggestion: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_hashtags: usize,
    pub max_links: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_hashtags: 2,
            max_links: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentWeights {
    pub has_question: f64,
    pub has_thread: f64,
    pub has_media: f64,
    pub optimal_length: f64,
    pub has_cta: f64,
    pub has_hook: f64,
    pub too_many_hashtags: f64,
    pub too_short: f64,
    pub too_long: f64,
    pub multiple_links: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            has_question: 0.12,
            has_thread: 0.10,
            has_media: 0.08,
            optimal_length: 0.06,
            has_cta: 0.08,
            has_hook: 0.10,
            too_many_hashtags: -0.12,
            too_short: -0.06,
            too_long: -0.04,
            multiple_links: 0.02,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternWeights {
    pub question: f64,
    pub thread: f64,
    pub value: f64,
    pub controversy: f64,
    pub listicle: f64,
    pub hashtag_chain: f64,
    pub all_caps: f64,
    pub link_only: f64,
    pub spam: f64,
    pub cta_spam: f64,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            question: 0.12,
            thread: 0.10,
            value: 0.08,
            controversy: 0.10,
            listicle: 0.07,
            hashtag_chain: -0.12,
            all_caps: -0.08,
            link_only: -0.10,
            spam: -0.15,
            cta_spam: -0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
    pub favorite: f64,
    pub reply: f64,
    pub retweet: f64,
    pub quote: f64,
    pub share: f64,
    pub dwell: f64,
    /// Share of the plain sub-score mean in the overall blend; the rest goes to the weighted sum.
    pub average_share: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            favorite: 0.15,
            reply: 0.18,
            retweet: 0.16,
            quote: 0.14,
            share: 0.12,
            dwell: 0.10,
            average_share: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningPenalties {
    pub too_many_hashtags: f64,
    pub all_caps: f64,
    pub too_short: f64,
    pub too_long: f64,
    pub link_only: f64,
    pub spam_pattern: f64,
}

impl Default for WarningPenalties {
    fn default() -> Self {
        Self {
            too_many_hashtags: -0.12,
            all_caps: -0.08,
            too_short: -0.06,
            too_long: -0.10,
            link_only: -0.10,
            spam_pattern: -0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            high: 0.10,
            medium: 0.07,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorThresholds {
    pub low_replyability: f64,
    pub low_quoteability: f64,
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self {
            low_replyability: 0.6,
            low_quoteability: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub weekday_morning: Vec<u8>,
    pub weekday_lunch: Vec<u8>,
    pub weekday_evening: Vec<u8>,
    pub weekend_morning: Vec<u8>,
    pub weekend_afternoon: Vec<u8>,
    pub weekend_evening: Vec<u8>,
    pub day_multipliers: DayMultipliers,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            weekday_morning: vec![7, 8, 9],
            weekday_lunch: vec![12, 13],
            weekday_evening: vec![17, 18, 19, 20],
            weekend_morning: vec![9, 10, 11],
            weekend_afternoon: vec![14, 15, 16],
            weekend_evening: vec![19, 20, 21],
            day_multipliers: DayMultipliers::default(),
        }
    }
}

impl TimingConfig {
    fn all_hours(&self) -> impl Iterator<Item = &u8> {
        self.weekday_morning
            .iter()
            .chain(&self.weekday_lunch)
            .chain(&self.weekday_evening)
            .chain(&self.weekend_morning)
            .chain(&self.weekend_afternoon)
            .chain(&self.weekend_evening)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DayMultipliers {
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
    pub saturday: f64,
    pub sunday: f64,
}

impl Default for DayMultipliers {
    fn default() -> Self {
        Self {
            monday: 0.95,
            tuesday: 1.05,
            wednesday: 1.10,
            thursday: 1.08,
            friday: 0.98,
            saturday: 0.85,
            sunday: 0.88,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub length: LengthConfig,
    pub limits: Limits,
    pub content_weights: ContentWeights,
    pub pattern_weights: PatternWeights,
    pub engagement_weights: EngagementWeights,
    pub warning_penalties: WarningPenalties,
    pub impact: ImpactThresholds,
    pub advisor: AdvisorThresholds,
    pub timing: TimingConfig,
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.unwrap_or_else(default_config_path);
        let (mut config, source) = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            (toml::from_str(&contents)?, Some(config_path))
        } else {
            (AnalyzerConfig::default(), None)
        };

        config.validate()?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok((config, source))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let length = &self.length;
        if length.min > length.max {
            return Err(ConfigError::Invalid(format!(
                "length.min ({}) is greater than length.max ({})",
                length.min, length.max
            )));
        }
        if length.max > length.hard_limit {
            return Err(ConfigError::Invalid(format!(
                "length.max ({}) is greater than length.hard_limit ({})",
                length.max, length.hard_limit
            )));
        }

        let timing = &self.timing;
        if let Some(hour) = timing.all_hours().find(|hour| **hour > 23) {
            return Err(ConfigError::Invalid(format!(
                "timing hour {} is outside 0-23",
                hour
            )));
        }
        let weekday_empty = timing.weekday_morning.is_empty()
            && timing.weekday_lunch.is_empty()
            && timing.weekday_evening.is_empty();
        let weekend_empty = timing.weekend_morning.is_empty()
            && timing.weekend_afternoon.is_empty()
            && timing.weekend_evening.is_empty();
        if weekday_empty || weekend_empty {
            return Err(ConfigError::Invalid(
                "timing needs at least one weekday and one weekend hour".to_string(),
            ));
        }
        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
            }
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(ConfigError::Write)?;
        Ok(())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|value| value.trim().parse::<usize>().ok());

        if let Some(value) = parse("ANALYZER_MAX_HASHTAGS") {
            self.limits.max_hashtags = value;
        }
        if let Some(value) = parse("ANALYZER_MAX_LINKS") {
            self.limits.max_links = value;
        }
        if let Some(value) = parse("ANALYZER_IDEAL_LENGTH") {
            let (low, high) = (
                self.length.min.min(self.length.max),
                self.length.min.max(self.length.max),
            );
            self.length.ideal = value.clamp(low, high);
        }
    }
}

pub fn default_config_path() -> PathBuf {
    env::var("ANALYZER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

