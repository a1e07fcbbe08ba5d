use super::{gain, Advisor, REMOVE_LINKS_GAIN};
use crate::{
    AlgorithmSignals, ContentMetrics, EngagementScores, Priority, Suggestion, SuggestionType,
};

impl Advisor {
    pub fn suggestions(
        &self,
        metrics: &ContentMetrics,
        signals: &AlgorithmSignals,
        scores: &EngagementScores,
    ) -> Vec<Suggestion> {
        let weights = &self.content_weights;
        let length = &self.length;
        let mut suggestions = Vec::new();

        if !metrics.has_question && scores.replyability < self.thresholds.low_replyability {
            suggestions.push(suggestion(
                SuggestionType::AddQuestion,
                Priority::High,
                "Add a question to boost reply engagement".to_string(),
                "End your post with an open-ended question that invites discussion",
                gain(weights.has_question),
            ));
        }

        if !metrics.has_cta {
            suggestions.push(suggestion(
                SuggestionType::AddCta,
                Priority::Medium,
                "Add a call-to-action to guide engagement".to_string(),
                "Include a specific ask (like, retweet, follow, comment)",
                gain(weights.has_cta),
            ));
        }

        if !metrics.has_media {
            suggestions.push(suggestion(
                SuggestionType::AddMedia,
                Priority::Medium,
                "Adding an image or video can increase engagement".to_string(),
                "Include relevant visual content to capture attention",
                gain(weights.has_media),
            ));
        }

        if metrics.character_count < length.min {
            suggestions.push(suggestion(
                SuggestionType::IncreaseLength,
                Priority::High,
                format!(
                    "Post is too short ({} chars). Aim for {}-{} characters",
                    metrics.character_count, length.min, length.max
                ),
                "Add more context, examples, or a hook to reach optimal length",
                gain(weights.too_short),
            ));
        }

        if metrics.character_count > length.hard_limit {
            suggestions.push(suggestion(
                SuggestionType::ReduceLength,
                Priority::High,
                format!(
                    "Post exceeds {} characters ({}). Consider a thread",
                    length.hard_limit, metrics.character_count
                ),
                "Shorten the post or convert to a thread format",
                gain(weights.too_long),
            ));
        }

        if metrics.character_count > length.thread_suggestion && !metrics.is_thread {
            suggestions.push(suggestion(
                SuggestionType::AddThread,
                Priority::High,
                "Long content would perform better as a thread".to_string(),
                "Break content into multiple posts with a thread indicator (1/n)",
                gain(weights.has_thread),
            ));
        }

        if metrics.hashtag_count > self.limits.max_hashtags {
            suggestions.push(suggestion(
                SuggestionType::RemoveHashtags,
                Priority::High,
                format!(
                    "{} hashtags is too many. Use {} or fewer",
                    metrics.hashtag_count, self.limits.max_hashtags
                ),
                "Remove excess hashtags to avoid the spam penalty",
                gain(weights.too_many_hashtags),
            ));
        }

        if !signals.has_positive("has_hook") {
            suggestions.push(suggestion(
                SuggestionType::AddHook,
                Priority::Medium,
                "Add a strong opening hook to capture attention".to_string(),
                "Start with phrases like 'Here's what...', 'Stop doing...', or a bold statement",
                gain(weights.has_hook),
            ));
        }

        if scores.quoteability < self.thresholds.low_quoteability
            && !signals.has_positive("controversy")
        {
            suggestions.push(suggestion(
                SuggestionType::AddControversy,
                Priority::Low,
                "A stronger opinion could increase quote posts".to_string(),
                "Consider adding 'unpopular opinion' or taking a clearer stance",
                gain(self.pattern_weights.controversy),
            ));
        }

        if !signals.has_positive("value") {
            suggestions.push(suggestion(
                SuggestionType::AddValue,
                Priority::Medium,
                "Add value-signaling language to increase reposts".to_string(),
                "Use phrases like 'Here's what I learned', 'X tips for...', or share insights",
                gain(self.pattern_weights.value),
            ));
        }

        if metrics.link_count > self.limits.max_links {
            suggestions.push(suggestion(
                SuggestionType::RemoveLinks,
                Priority::Low,
                "Multiple links can reduce engagement".to_string(),
                "Keep to one link maximum, or move additional links to replies",
                gain(REMOVE_LINKS_GAIN),
            ));
        }

        suggestions.sort_by_key(|suggestion| suggestion.priority.rank());
        suggestions
    }
}

fn suggestion(
    suggestion_type: SuggestionType,
    priority: Priority,
    message: String,
    action: &str,
    potential_score_increase: f64,
) -> Suggestion {
    Suggestion {
        suggestion_type,
        priority,
        message,
        action: Some(action.to_string()),
        potential_score_increase,
    }
}
