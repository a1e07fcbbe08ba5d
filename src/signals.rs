use regex::Regex;
use std::sync::LazyLock;

use crate::config::{
    AnalyzerConfig, ContentWeights, ImpactThresholds, LengthConfig, Limits, PatternWeights,
};
use crate::metrics::{self, strip_entities};
use crate::{AlgorithmSignals, ContentMetrics, Impact, SignalScore};

pub const HOOK_OPENERS: &[&str] = &[
    "here's",
    "this is",
    "i just",
    "breaking",
    "unpopular opinion",
    "hot take",
    "thread",
    "stop",
    "wait",
];

const ALL_CAPS_MIN_LETTERS: usize = 3;

static VALUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)here's what|this is how|let me explain").unwrap());
static CONTROVERSY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)unpopular opinion|hot take|controversial").unwrap());
static LISTICLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+ (?:things|ways|tips|lessons)").unwrap());
static HASHTAG_CHAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+\s+#\w+\s+#\w+\s+#\w+").unwrap());
static LINK_ONLY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());
static SPAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)follow for follow|f4f|like4like").unwrap());
static CTA_SPAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dm me|link in bio").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

struct PatternRule {
    name: &'static str,
    polarity: Polarity,
    description: &'static str,
    matches: fn(&str) -> bool,
    weight: fn(&PatternWeights) -> f64,
}

const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        name: "question",
        polarity: Polarity::Positive,
        description: "Post ends with a question, boosting reply engagement",
        matches: |text| text.trim_end().ends_with('?'),
        weight: |weights| weights.question,
    },
    PatternRule {
        name: "thread",
        polarity: Polarity::Positive,
        description: "Thread indicator detected, increases dwell time",
        matches: metrics::is_thread,
        weight: |weights| weights.thread,
    },
    PatternRule {
        name: "value",
        polarity: Polarity::Positive,
        description: "Value-signaling language detected (educational content)",
        matches: |text| VALUE_PATTERN.is_match(text),
        weight: |weights| weights.value,
    },
    PatternRule {
        name: "controversy",
        polarity: Polarity::Positive,
        description: "Controversial framing detected, increases quotes and replies",
        matches: |text| CONTROVERSY_PATTERN.is_match(text),
        weight: |weights| weights.controversy,
    },
    PatternRule {
        name: "listicle",
        polarity: Polarity::Positive,
        description: "Listicle format detected, easy to consume",
        matches: |text| LISTICLE_PATTERN.is_match(text),
        weight: |weights| weights.listicle,
    },
    PatternRule {
        name: "hashtag_chain",
        polarity: Polarity::Negative,
        description: "Run of consecutive hashtags triggers spam detection",
        matches: |text| HASHTAG_CHAIN_PATTERN.is_match(text),
        weight: |weights| weights.hashtag_chain,
    },
    PatternRule {
        name: "all_caps",
        polarity: Polarity::Negative,
        description: "All caps text appears aggressive, reduces engagement",
        matches: is_all_caps,
        weight: |weights| weights.all_caps,
    },
    PatternRule {
        name: "link_only",
        polarity: Polarity::Negative,
        description: "Link-only posts have very low engagement",
        matches: |text| LINK_ONLY_PATTERN.is_match(text.trim()),
        weight: |weights| weights.link_only,
    },
    PatternRule {
        name: "spam",
        polarity: Polarity::Negative,
        description: "Spam pattern detected, severely penalized",
        matches: |text| SPAM_PATTERN.is_match(text),
        weight: |weights| weights.spam,
    },
    PatternRule {
        name: "cta_spam",
        polarity: Polarity::Negative,
        description: "Promotional CTA detected, minor penalty",
        matches: |text| CTA_SPAM_PATTERN.is_match(text),
        weight: |weights| weights.cta_spam,
    },
];

pub fn is_all_caps(text: &str) -> bool {
    let prose = strip_entities(text);
    let mut upper = 0usize;
    for ch in prose.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            upper += 1;
        }
    }
    upper >= ALL_CAPS_MIN_LETTERS
}

pub fn has_hook(text: &str) -> bool {
    let opening = text.trim_start().to_lowercase().replace('\u{2019}', "'");
    HOOK_OPENERS.iter().any(|hook| opening.starts_with(hook))
}

#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    length: LengthConfig,
    limits: Limits,
    content_weights: ContentWeights,
    pattern_weights: PatternWeights,
    impact: ImpactThresholds,
}

impl SignalEvaluator {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            length: config.length.clone(),
            limits: config.limits.clone(),
            content_weights: config.content_weights.clone(),
            pattern_weights: config.pattern_weights.clone(),
            impact: config.impact.clone(),
        }
    }

    pub fn evaluate(&self, content: &str, metrics: &ContentMetrics) -> AlgorithmSignals {
        let mut signals = AlgorithmSignals::default();

        for rule in PATTERN_RULES {
            if !(rule.matches)(content) {
                continue;
            }
            let score = (rule.weight)(&self.pattern_weights);
            let signal = self.signal(rule.name, score, score.abs(), rule.description);
            match rule.polarity {
                Polarity::Positive => signals.positive_signals.push(signal),
                Polarity::Negative => signals.negative_signals.push(signal),
            }
        }

        let weights = &self.content_weights;
        let length_score = self.length_score(metrics.character_count);
        if length_score > 0.0 {
            signals.positive_signals.push(self.signal(
                "optimal_length",
                length_score,
                weights.optimal_length.abs(),
                &format!(
                    "Post length is within optimal range ({}-{} chars)",
                    self.length.min, self.length.max
                ),
            ));
        } else if length_score < 0.0 {
            let description = if metrics.character_count < self.length.min {
                format!("Post is too short (under {} chars)", self.length.min)
            } else {
                "Post exceeds optimal length".to_string()
            };
            signals.negative_signals.push(self.signal(
                "suboptimal_length",
                length_score,
                length_score.abs(),
                &description,
            ));
        }

        if metrics.has_question {
            signals.positive_signals.push(self.signal(
                "has_question",
                weights.has_question,
                weights.has_question.abs(),
                "Question increases reply probability",
            ));
        }

        if metrics.is_thread {
            signals.positive_signals.push(self.signal(
                "is_thread",
                weights.has_thread,
                weights.has_thread.abs(),
                "Thread format increases dwell time",
            ));
        }

        if metrics.has_media {
            signals.positive_signals.push(self.signal(
                "has_media",
                weights.has_media,
                weights.has_media.abs(),
                "Media increases engagement and dwell time",
            ));
        }

        if metrics.has_cta {
            signals.positive_signals.push(self.signal(
                "has_cta",
                weights.has_cta,
                weights.has_cta.abs(),
                "Call-to-action encourages specific engagement",
            ));
        }

        if has_hook(content) {
            signals.positive_signals.push(self.signal(
                "has_hook",
                weights.has_hook,
                weights.has_hook.abs(),
                "Strong opening hook captures attention",
            ));
        }

        if metrics.hashtag_count > self.limits.max_hashtags {
            signals.negative_signals.push(self.signal(
                "too_many_hashtags",
                weights.too_many_hashtags,
                weights.too_many_hashtags.abs(),
                &format!(
                    "{} hashtags exceeds recommended max of {}",
                    metrics.hashtag_count, self.limits.max_hashtags
                ),
            ));
        }

        if metrics.link_count > self.limits.max_links {
            signals.neutral_signals.push(self.signal(
                "multiple_links",
                0.0,
                weights.multiple_links.abs(),
                "Multiple links may reduce engagement",
            ));
        }

        signals
    }

    /// Peaks at `ideal` and loses `optimal_length / (max - min)` per character of distance.
    /// Above `max` it is 0 until the hard limit, where the `too_long` weight takes over.
    pub fn length_score(&self, character_count: usize) -> f64 {
        let length = &self.length;
        let weights = &self.content_weights;
        if character_count < length.min {
            return weights.too_short;
        }
        if character_count > length.hard_limit {
            return weights.too_long;
        }
        if character_count > length.max {
            return 0.0;
        }
        let span = length.max.saturating_sub(length.min).max(1) as f64;
        let distance = (character_count as f64 - length.ideal as f64).abs();
        weights.optimal_length * (1.0 - distance / span)
    }

    pub fn classify(&self, weight: f64) -> Impact {
        let magnitude = weight.abs();
        if magnitude >= self.impact.high {
            Impact::High
        } else if magnitude >= self.impact.medium {
            Impact::Medium
        } else {
            Impact::Low
        }
    }

    fn signal(&self, name: &str, score: f64, weight: f64, description: &str) -> SignalScore {
        SignalScore {
            name: name.to_string(),
            score,
            weight,
            description: description.to_string(),
            impact: self.classify(weight),
        }
    }
}
