use serde::{Deserialize, Serialize};

use crate::{
    default_analyzer, Analyzer, Priority, Severity, Suggestion, SuggestionType, Warning,
    WarningType,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub must_fix: Vec<Suggestion>,
    pub should_improve: Vec<Suggestion>,
    pub nice_to_have: Vec<Suggestion>,
    pub overall_score: f64,
}

impl ActionPlan {
    pub fn len(&self) -> usize {
        self.must_fix.len() + self.should_improve.len() + self.nice_to_have.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn prioritized_actions(content: &str) -> ActionPlan {
    prioritized_actions_with(default_analyzer(), content, 0)
}

pub fn prioritized_actions_with(analyzer: &Analyzer, content: &str, media_count: usize) -> ActionPlan {
    let analysis = analyzer.analyze(content, media_count);

    let mut must_fix: Vec<Suggestion> = analysis
        .warnings
        .iter()
        .filter(|warning| warning.severity == Severity::Critical)
        .map(warning_fix)
        .collect();
    let mut should_improve = Vec::new();
    let mut nice_to_have = Vec::new();

    for suggestion in analysis.suggestions {
        match suggestion.priority {
            Priority::High => must_fix.push(suggestion),
            Priority::Medium => should_improve.push(suggestion),
            Priority::Low => nice_to_have.push(suggestion),
        }
    }

    ActionPlan {
        must_fix,
        should_improve,
        nice_to_have,
        overall_score: analysis.overall_score,
    }
}

fn warning_fix(warning: &Warning) -> Suggestion {
    Suggestion {
        suggestion_type: fix_type(warning.warning_type),
        priority: Priority::High,
        message: warning.message.clone(),
        action: Some(fix_action(warning.warning_type).to_string()),
        potential_score_increase: warning.score_impact.abs(),
    }
}

pub fn fix_type(warning_type: WarningType) -> SuggestionType {
    match warning_type {
        WarningType::TooManyHashtags => SuggestionType::RemoveHashtags,
        WarningType::AllCaps | WarningType::SpamPattern => SuggestionType::FixFormatting,
        WarningType::TooShort => SuggestionType::IncreaseLength,
        WarningType::TooLong => SuggestionType::ReduceLength,
        WarningType::LinkOnly => SuggestionType::AddValue,
    }
}

pub fn fix_action(warning_type: WarningType) -> &'static str {
    match warning_type {
        WarningType::TooManyHashtags => "Remove excess hashtags",
        WarningType::AllCaps => "Convert to sentence case",
        WarningType::TooShort => "Add more context or value",
        WarningType::TooLong => "Shorten or convert to thread",
        WarningType::LinkOnly => "Add commentary to the link",
        WarningType::SpamPattern => "Remove spam-like language",
    }
}
