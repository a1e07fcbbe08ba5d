use post_scorer::config::AnalyzerConfig;
use post_scorer::{analyze, Analyzer, Priority, Severity, SuggestionType, WarningType};

fn types(text: &str, media: usize) -> Vec<SuggestionType> {
    analyze(text, media)
        .suggestions
        .iter()
        .map(|suggestion| suggestion.suggestion_type)
        .collect()
}

#[test]
fn short_plain_post_gets_the_basics() {
    let found = types("just a thought", 0);
    assert!(found.contains(&SuggestionType::AddQuestion));
    assert!(found.contains(&SuggestionType::AddCta));
    assert!(found.contains(&SuggestionType::AddMedia));
    assert!(found.contains(&SuggestionType::IncreaseLength));
    assert!(found.contains(&SuggestionType::AddHook));
    assert!(found.contains(&SuggestionType::AddValue));
    assert!(found.contains(&SuggestionType::AddControversy));
    assert!(!found.contains(&SuggestionType::ReduceLength));
    assert!(!found.contains(&SuggestionType::RemoveLinks));
}

#[test]
fn high_priority_first_in_rule_order() {
    let analysis = analyze("just a thought", 0);
    let priorities: Vec<Priority> = analysis
        .suggestions
        .iter()
        .map(|suggestion| suggestion.priority)
        .collect();
    assert!(priorities.windows(2).all(|pair| pair[0].rank() <= pair[1].rank()));

    let found: Vec<SuggestionType> = analysis
        .suggestions
        .iter()
        .map(|suggestion| suggestion.suggestion_type)
        .collect();
    assert_eq!(
        &found[..2],
        &[SuggestionType::AddQuestion, SuggestionType::IncreaseLength]
    );
    assert_eq!(
        &found[2..6],
        &[
            SuggestionType::AddCta,
            SuggestionType::AddMedia,
            SuggestionType::AddHook,
            SuggestionType::AddValue,
        ]
    );
    assert_eq!(found[6], SuggestionType::AddControversy);
}

#[test]
fn long_unthreaded_post_should_become_a_thread() {
    let text = "Performance work is mostly measurement. ".repeat(15);
    let found = types(&text, 0);
    assert!(found.contains(&SuggestionType::ReduceLength));
    assert!(found.contains(&SuggestionType::AddThread));

    let threaded = format!("{text} 1/4");
    assert!(!types(&threaded, 0).contains(&SuggestionType::AddThread));
}

#[test]
fn question_and_value_suppress_their_suggestions() {
    let found = types("Here's what I learned shipping a Rust CLI. What would you add?", 0);
    assert!(!found.contains(&SuggestionType::AddQuestion));
    assert!(!found.contains(&SuggestionType::AddValue));
    assert!(!found.contains(&SuggestionType::AddHook));
}

#[test]
fn links_over_limit() {
    let found = types("Docs https://a.dev and code https://b.dev", 0);
    assert!(found.contains(&SuggestionType::RemoveLinks));
}

#[test]
fn gains_are_positive() {
    for text in ["", "x", "FOLLOW FOR FOLLOW #a #b #c #d", "Why not?"] {
        for suggestion in analyze(text, 0).suggestions {
            assert!(suggestion.potential_score_increase > 0.0);
        }
    }
}

fn find(text: &str, warning_type: WarningType) -> Option<Severity> {
    analyze(text, 0)
        .warnings
        .iter()
        .find(|warning| warning.warning_type == warning_type)
        .map(|warning| warning.severity)
}

#[test]
fn hashtag_severity_scales_with_excess() {
    let base = "Working on the new release notes for the scheduler rewrite";
    assert_eq!(find(&format!("{base} #a #b"), WarningType::TooManyHashtags), None);
    assert_eq!(
        find(&format!("{base} #a #b #c"), WarningType::TooManyHashtags),
        Some(Severity::Warning)
    );
    assert_eq!(
        find(&format!("{base} #a #b #c #d"), WarningType::TooManyHashtags),
        Some(Severity::Warning)
    );
    assert_eq!(
        find(&format!("{base} #a #b #c #d #e"), WarningType::TooManyHashtags),
        Some(Severity::Critical)
    );
}

#[test]
fn spam_caps_and_hashtags() {
    let analysis = analyze("FOLLOW FOR FOLLOW #a #b #c #d", 0);
    let found: Vec<WarningType> = analysis
        .warnings
        .iter()
        .map(|warning| warning.warning_type)
        .collect();
    assert!(found.contains(&WarningType::SpamPattern));
    assert!(found.contains(&WarningType::AllCaps));
    assert!(found.contains(&WarningType::TooManyHashtags));
    assert_eq!(analysis.warnings[0].warning_type, WarningType::SpamPattern);
    assert_eq!(analysis.warnings[0].severity, Severity::Critical);
    let first_warning = analysis
        .warnings
        .iter()
        .position(|warning| warning.severity == Severity::Warning)
        .unwrap();
    let last_critical = analysis
        .warnings
        .iter()
        .rposition(|warning| warning.severity == Severity::Critical)
        .unwrap();
    assert!(last_critical < first_warning);
}

#[test]
fn length_warnings() {
    assert_eq!(find("tiny", WarningType::TooShort), Some(Severity::Warning));
    let long = "word ".repeat(60);
    assert_eq!(find(&long, WarningType::TooLong), Some(Severity::Critical));
    assert_eq!(find(&long, WarningType::TooShort), None);
}

#[test]
fn link_only_is_critical() {
    assert_eq!(
        find("https://example.com/a/b", WarningType::LinkOnly),
        Some(Severity::Critical)
    );
}

#[test]
fn impacts_come_from_the_penalty_table() {
    let mut config = AnalyzerConfig::default();
    config.warning_penalties.too_short = -0.2;
    let analyzer = Analyzer::new(config);
    let analysis = analyzer.analyze("tiny", 0);
    let warning = analysis
        .warnings
        .iter()
        .find(|warning| warning.warning_type == WarningType::TooShort)
        .unwrap();
    assert!((warning.score_impact + 0.2).abs() < 1e-9);

    for warning in analyze("FOLLOW FOR FOLLOW #a #b #c #d #e", 0).warnings {
        assert!(warning.score_impact <= 0.0);
    }
}

#[test]
fn clean_post_has_no_warnings() {
    let analysis = analyze(
        "Here's what I learned after a year of maintaining an open source Rust crate. What would you do differently?",
        1,
    );
    assert!(analysis.warnings.is_empty());
}
