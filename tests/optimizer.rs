use post_scorer::optimizer::actions::{fix_action, fix_type};
use post_scorer::{
    compare_versions, default_analyzer, prioritized_actions, Priority, SuggestionType,
    WarningType, Which,
};

#[test]
fn critical_warnings_lead_must_fix() {
    let plan = prioritized_actions("FOLLOW FOR FOLLOW #a #b #c #d #e");
    let leading: Vec<SuggestionType> = plan
        .must_fix
        .iter()
        .take(2)
        .map(|suggestion| suggestion.suggestion_type)
        .collect();
    assert_eq!(
        leading,
        vec![SuggestionType::RemoveHashtags, SuggestionType::FixFormatting]
    );
    assert!((plan.must_fix[0].potential_score_increase - 0.12).abs() < 1e-9);
    assert!((plan.must_fix[1].potential_score_increase - 0.15).abs() < 1e-9);
    assert!(plan
        .must_fix
        .iter()
        .all(|suggestion| suggestion.priority == Priority::High));
}

#[test]
fn buckets_follow_priority() {
    let plan = prioritized_actions("just a thought");
    assert!(plan
        .should_improve
        .iter()
        .all(|suggestion| suggestion.priority == Priority::Medium));
    assert!(plan
        .nice_to_have
        .iter()
        .all(|suggestion| suggestion.priority == Priority::Low));
    assert_eq!(plan.len(), default_analyzer().analyze("just a thought", 0).suggestions.len());
}

#[test]
fn overall_score_matches_analysis() {
    let text = "Here's what I learned shipping a Rust CLI. What would you add?";
    let plan = prioritized_actions(text);
    assert_eq!(plan.overall_score, default_analyzer().analyze(text, 0).overall_score);
}

#[test]
fn every_warning_type_has_a_fix() {
    for warning_type in [
        WarningType::TooManyHashtags,
        WarningType::AllCaps,
        WarningType::TooShort,
        WarningType::TooLong,
        WarningType::LinkOnly,
        WarningType::SpamPattern,
    ] {
        assert!(!fix_action(warning_type).is_empty());
    }
    assert_eq!(fix_type(WarningType::LinkOnly), SuggestionType::AddValue);
}

#[test]
fn identical_versions_tie() {
    for text in ["", "Ship it", "FOLLOW FOR FOLLOW #a #b #c #d"] {
        let comparison = compare_versions(text, text);
        assert_eq!(comparison.delta, 0.0);
        assert_eq!(comparison.which, Which::Same);
        assert!(comparison.differences.is_empty());
    }
}

#[test]
fn tolerance_band() {
    assert_eq!(Which::from_delta(0.019), Which::Same);
    assert_eq!(Which::from_delta(-0.019), Which::Same);
    assert_eq!(Which::from_delta(0.02), Which::Modified);
    assert_eq!(Which::from_delta(-0.05), Which::Original);
}

#[test]
fn reports_question_and_hashtag_changes() {
    let comparison = compare_versions(
        "Rewrote our build cache in Rust #rust #cache #build #perf #infra",
        "Rewrote our build cache in Rust #rust. Would you do the same?",
    );
    assert!(comparison
        .differences
        .contains(&"Added question (+12% reply potential)".to_string()));
    assert!(comparison
        .differences
        .contains(&"Reduced hashtags from 5 to 1".to_string()));
    assert!(comparison
        .differences
        .iter()
        .any(|difference| difference.starts_with("Resolved")));
    assert_eq!(comparison.which, Which::Modified);
    assert!(comparison.delta > 0.0);
}

#[test]
fn reports_length_fixes() {
    let comparison = compare_versions("Too short", &"Long enough now. ".repeat(6));
    assert!(comparison
        .differences
        .contains(&"Length now in optimal range".to_string()));

    let comparison = compare_versions(&"word ".repeat(70), "A compact version of the post.");
    assert!(comparison
        .differences
        .contains(&"Length reduced to within character limit".to_string()));
}

#[test]
fn which_serializes_lowercase() {
    let json = serde_json::to_string(&Which::Modified).unwrap();
    assert_eq!(json, "\"modified\"");
}
