use post_scorer::config::{AnalyzerConfig, EngagementWeights};
use post_scorer::metrics::extract_metrics;
use post_scorer::scoring::{EngagementScorer, ScoringPipeline, WeightedScorer, BASE_SCORE};
use post_scorer::signals::SignalEvaluator;
use post_scorer::{AlgorithmSignals, Analyzer, EngagementScores, Severity, Warning, WarningType};

fn flat_scores(value: f64) -> EngagementScores {
    EngagementScores {
        likeability: value,
        replyability: value,
        retweetability: value,
        quoteability: value,
        shareability: value,
        dwell_potential: value,
        follow_potential: value,
    }
}

fn warning(warning_type: WarningType, score_impact: f64) -> Warning {
    Warning {
        warning_type,
        severity: Severity::Warning,
        message: String::new(),
        score_impact,
    }
}

fn scores(text: &str, media: usize) -> EngagementScores {
    let config = AnalyzerConfig::default();
    let metrics = extract_metrics(text, media);
    let signals = SignalEvaluator::new(&config).evaluate(text, &metrics);
    EngagementScorer::from_config(&config).score(&metrics, &signals)
}

#[test]
fn weighted_scorer_blends_average_and_weighted_sum() {
    let scorer = WeightedScorer::new(EngagementWeights::default());
    let scores = flat_scores(1.0);

    assert!((scorer.average(&scores) - 1.0).abs() < 1e-9);
    assert!((scorer.weighted_sum(&scores) - 0.85).abs() < 1e-9);
    let expected = 0.4 * 1.0 + 0.6 * 0.85;
    assert!((scorer.score(&scores, &[]) - expected).abs() < 1e-9);
}

#[test]
fn weighted_scorer_ignores_follow_potential() {
    let scorer = WeightedScorer::new(EngagementWeights::default());
    let mut scores = flat_scores(0.5);
    let before = scorer.score(&scores, &[]);
    scores.follow_potential = 1.0;
    let after = scorer.score(&scores, &[]);

    assert!((before - after).abs() < 1e-6);
}

#[test]
fn weighted_scorer_subtracts_warning_penalties() {
    let scorer = WeightedScorer::new(EngagementWeights::default());
    let scores = flat_scores(0.5);
    let clean = scorer.score(&scores, &[]);
    let penalized = scorer.score(
        &scores,
        &[
            warning(WarningType::TooShort, -0.06),
            warning(WarningType::AllCaps, -0.08),
        ],
    );

    assert!((clean - penalized - 0.14).abs() < 1e-6);
}

#[test]
fn weighted_scorer_clamps_to_zero() {
    let scorer = WeightedScorer::new(EngagementWeights::default());
    let warnings: Vec<Warning> = (0..10)
        .map(|_| warning(WarningType::SpamPattern, -0.15))
        .collect();

    assert_eq!(scorer.score(&flat_scores(0.2), &warnings), 0.0);
}

#[test]
fn heavy_weights_clamp_to_one() {
    let heavy = EngagementWeights {
        reply: 5.0,
        ..EngagementWeights::default()
    };
    let scorer = WeightedScorer::new(heavy);
    assert_eq!(scorer.score(&flat_scores(1.0), &[]), 1.0);
}

#[test]
fn average_share_controls_the_blend() {
    let mut weights = EngagementWeights::default();
    weights.average_share = 1.0;
    let scorer = WeightedScorer::new(weights);
    let scores = EngagementScores {
        likeability: 0.2,
        replyability: 0.4,
        retweetability: 0.6,
        quoteability: 0.8,
        shareability: 1.0,
        dwell_potential: 0.0,
        follow_potential: 0.9,
    };

    assert!((scorer.score(&scores, &[]) - 0.5).abs() < 1e-6);
}

#[test]
fn pipeline_matches_analyzer() {
    let config = AnalyzerConfig::default();
    let text = "Here's what I learned after a year of on-call. What would you add?";
    let metrics = extract_metrics(text, 1);
    let signals = SignalEvaluator::new(&config).evaluate(text, &metrics);

    let pipeline = ScoringPipeline::from_config(&config);
    let scores = pipeline.engagement(&metrics, &signals);
    let analysis = Analyzer::new(config).analyze(text, 1);

    assert_eq!(scores, analysis.engagement_scores);
    assert!(
        (pipeline.overall(&scores, &analysis.warnings) - analysis.overall_score).abs() < 1e-6
    );
}

#[test]
fn signal_free_post_sits_at_the_base_score() {
    let config = AnalyzerConfig::default();
    let scorer = EngagementScorer::from_config(&config);
    let text = "ok";
    let metrics = extract_metrics(text, 0);
    let signals = SignalEvaluator::new(&config).evaluate(text, &metrics);

    // Only the short-length penalty applies.
    assert!((scorer.base_score(&signals) - (BASE_SCORE - 0.06)).abs() < 1e-6);
}

#[test]
fn base_score_is_clamped() {
    let scorer = EngagementScorer::from_config(&AnalyzerConfig::default());
    assert!((scorer.base_score(&AlgorithmSignals::default()) - BASE_SCORE).abs() < 1e-9);

    let text = "FOLLOW FOR FOLLOW F4F LIKE4LIKE #a #b #c #d #e #f";
    let metrics = extract_metrics(text, 0);
    let signals = SignalEvaluator::new(&AnalyzerConfig::default()).evaluate(text, &metrics);
    assert!(scorer.base_score(&signals) >= 0.0);
}

#[test]
fn media_lifts_like_and_dwell() {
    let text = "Shipped the new renderer today, frame times are down across the board";
    let without = scores(text, 0);
    let with = scores(text, 1);
    assert!(with.likeability > without.likeability);
    assert!(with.dwell_potential > without.dwell_potential);
}

#[test]
fn question_lifts_replyability() {
    let statement = "Rust compile times have improved a lot this year";
    let question = "Have Rust compile times improved for you this year?";
    assert!(scores(question, 0).replyability > scores(statement, 0).replyability);
}

#[test]
fn thread_lifts_dwell() {
    let plain = "Notes from migrating our service to async Rust";
    let thread = "Notes from migrating our service to async Rust 1/5";
    assert!(scores(thread, 0).dwell_potential > scores(plain, 0).dwell_potential);
}

#[test]
fn every_score_is_bounded() {
    for text in [
        "",
        "Here's what I learned. Hot take: 3 things matter. Thread 1/4. Follow for more?",
        "FOLLOW FOR FOLLOW #a #b #c #d",
    ] {
        for value in scores(text, 2).values() {
            assert!((0.0..=1.0).contains(&value), "{text}: {value}");
        }
    }
}
