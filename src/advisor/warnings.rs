use super::{impact, Advisor};
use crate::{AlgorithmSignals, ContentMetrics, Severity, Warning, WarningType};

impl Advisor {
    pub fn warnings(&self, metrics: &ContentMetrics, signals: &AlgorithmSignals) -> Vec<Warning> {
        let penalties = &self.penalties;
        let max_hashtags = self.limits.max_hashtags;
        let mut warnings = Vec::new();

        if metrics.hashtag_count > max_hashtags {
            let severity = if metrics.hashtag_count > max_hashtags.saturating_mul(2) {
                Severity::Critical
            } else {
                Severity::Warning
            };
            warnings.push(Warning {
                warning_type: WarningType::TooManyHashtags,
                severity,
                message: format!(
                    "{} hashtags will trigger spam detection",
                    metrics.hashtag_count
                ),
                score_impact: impact(penalties.too_many_hashtags),
            });
        }

        if signals.has_negative("all_caps") {
            warnings.push(Warning {
                warning_type: WarningType::AllCaps,
                severity: Severity::Warning,
                message: "All caps text appears aggressive and reduces engagement".to_string(),
                score_impact: impact(penalties.all_caps),
            });
        }

        if metrics.character_count < self.length.very_short {
            warnings.push(Warning {
                warning_type: WarningType::TooShort,
                severity: Severity::Warning,
                message: "Post is very short and may not provide enough value".to_string(),
                score_impact: impact(penalties.too_short),
            });
        }

        if metrics.character_count > self.length.hard_limit {
            warnings.push(Warning {
                warning_type: WarningType::TooLong,
                severity: Severity::Critical,
                message: format!(
                    "Post exceeds the {} character limit and cannot be posted",
                    self.length.hard_limit
                ),
                score_impact: impact(penalties.too_long),
            });
        }

        if signals.has_negative("link_only") {
            warnings.push(Warning {
                warning_type: WarningType::LinkOnly,
                severity: Severity::Critical,
                message: "Link-only posts have extremely low engagement".to_string(),
                score_impact: impact(penalties.link_only),
            });
        }

        if signals.has_negative("spam") {
            warnings.push(Warning {
                warning_type: WarningType::SpamPattern,
                severity: Severity::Critical,
                message: "Spam patterns detected. This content may be suppressed".to_string(),
                score_impact: impact(penalties.spam_pattern),
            });
        }

        warnings.sort_by_key(|warning| warning.severity.rank());
        warnings
    }
}
