mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use post_scorer::config::{default_config_path, AnalyzerConfig};
use post_scorer::templates::{default_templates, find_template};
use post_scorer::timing::{PostingMoment, Weekday};
use post_scorer::optimizer::{
    compare_with, prioritized_actions_with, quick_optimize_with, RandomHookSelector,
};
use post_scorer::{format_float, format_percent, Analyzer, QuickOptimizeOptions, Suggestion};

#[derive(Parser)]
#[command(name = "post-scorer", about = "Post engagement scorer")]
struct Cli {
    /// Config file, defaults to config/analyzer.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Compare(CompareArgs),
    Optimize(OptimizeArgs),
    Actions(ActionsArgs),
    Timing(TimingArgs),
    Templates(TemplatesArgs),
    InitConfig(InitConfigArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long, default_value_t = 0)]
    media: usize,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    #[arg(long)]
    original: String,
    #[arg(long)]
    modified: String,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct OptimizeArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    add_question: bool,
    #[arg(long)]
    add_hook: bool,
    #[arg(long)]
    keep_hashtags: bool,
    #[arg(long)]
    keep_length: bool,
}

#[derive(Args, Debug, Clone)]
struct ActionsArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct TimingArgs {
    #[arg(long, default_value = "UTC")]
    timezone: String,
    /// Day to evaluate instead of today (UTC)
    #[arg(long)]
    day: Option<Weekday>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..24))]
    hour: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..60))]
    minute: Option<u8>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct TemplatesArgs {
    /// Template to render, e.g. default-0
    #[arg(long)]
    id: Option<String>,
    /// Placeholder value as key=value, repeatable
    #[arg(long = "set", value_parser = parse_key_value)]
    values: Vec<(String, String)>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long)]
    path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if let Command::InitConfig(args) = &cli.command {
        return init_config(args.path.clone().or(cli.config.clone()));
    }

    let (config, source) = AnalyzerConfig::load(cli.config).map_err(|err| err.to_string())?;
    match &source {
        Some(path) => info!(path = %path.display(), "loaded analyzer config"),
        None => info!("using built-in analyzer config"),
    }
    let analyzer = Analyzer::new(config);

    match cli.command {
        Command::Analyze(args) => run_analyze(&analyzer, args),
        Command::Compare(args) => run_compare(&analyzer, args),
        Command::Optimize(args) => run_optimize(&analyzer, args),
        Command::Actions(args) => run_actions(&analyzer, args),
        Command::Timing(args) => run_timing(&analyzer, args),
        Command::Templates(args) => run_templates(args),
        Command::Serve(args) => server::serve(args, analyzer).await,
        Command::InitConfig(_) => Ok(()),
    }
}

fn run_analyze(analyzer: &Analyzer, args: AnalyzeArgs) -> Result<(), String> {
    let text = read_text(args.text)?;
    let analysis = analyzer.analyze(&text, args.media);

    if args.json {
        return print_json(&analysis);
    }

    println!("Overall score: {}", format_percent(analysis.overall_score));
    let scores = &analysis.engagement_scores;
    println!(
        "Engagement: like {} | reply {} | retweet {} | quote {} | share {} | dwell {} | follow {}",
        format_float(scores.likeability, 2),
        format_float(scores.replyability, 2),
        format_float(scores.retweetability, 2),
        format_float(scores.quoteability, 2),
        format_float(scores.shareability, 2),
        format_float(scores.dwell_potential, 2),
        format_float(scores.follow_potential, 2)
    );

    if args.details {
        let metrics = &analysis.content_metrics;
        println!(
            "\nMetrics: {} chars | {} words | {} sentences | ~{}s read",
            metrics.character_count,
            metrics.word_count,
            metrics.sentence_count,
            metrics.reading_time_seconds
        );
        println!(
            "  hashtags {} | mentions {} | links {} | emojis {} | media {}",
            metrics.hashtag_count,
            metrics.mention_count,
            metrics.link_count,
            metrics.emoji_count,
            metrics.media_count
        );
        if metrics.is_thread {
            println!("  thread of {}", metrics.thread_length);
        }

        println!("\nSignals:");
        let signals = &analysis.algorithm_signals;
        for (sign, list) in [
            ("+", &signals.positive_signals),
            ("-", &signals.negative_signals),
            ("~", &signals.neutral_signals),
        ] {
            for signal in list {
                println!(
                    "  {} {} {} ({}): {}",
                    sign,
                    signal.name,
                    format_float(signal.score, 3),
                    signal.impact.label(),
                    signal.description
                );
            }
        }
    }

    if !analysis.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &analysis.warnings {
            println!(
                "- [{}] {} ({})",
                warning.severity.label(),
                warning.message,
                format_float(warning.score_impact, 2)
            );
        }
    }

    if !analysis.suggestions.is_empty() {
        println!("\nSuggestions:");
        print_suggestions(&analysis.suggestions);
    }

    Ok(())
}

fn run_compare(analyzer: &Analyzer, args: CompareArgs) -> Result<(), String> {
    let comparison = compare_with(analyzer, &args.original, &args.modified);
    if args.json {
        return print_json(&comparison);
    }

    println!(
        "Original {} -> modified {} (delta {})",
        format_percent(comparison.score_a),
        format_percent(comparison.score_b),
        format_float(comparison.delta, 3)
    );
    println!("Better version: {}", comparison.which.label());
    for difference in &comparison.differences {
        println!("- {}", difference);
    }
    Ok(())
}

fn run_optimize(analyzer: &Analyzer, args: OptimizeArgs) -> Result<(), String> {
    let text = read_text(args.text)?;
    let options = QuickOptimizeOptions {
        remove_excess_hashtags: !args.keep_hashtags,
        add_question: args.add_question,
        optimize_length: !args.keep_length,
        add_hook: args.add_hook,
    };
    let optimized = quick_optimize_with(&text, &options, analyzer.config(), &mut RandomHookSelector);

    println!("{}", optimized.content);
    if optimized.changes_applied.is_empty() {
        eprintln!("\nNo changes applied");
    } else {
        eprintln!("\nChanges:");
        for change in &optimized.changes_applied {
            eprintln!("- {}", change);
        }
    }
    Ok(())
}

fn run_actions(analyzer: &Analyzer, args: ActionsArgs) -> Result<(), String> {
    let text = read_text(args.text)?;
    let plan = prioritized_actions_with(analyzer, &text, 0);
    if args.json {
        return print_json(&plan);
    }

    println!("Overall score: {}", format_percent(plan.overall_score));
    for (title, bucket) in [
        ("Must fix", &plan.must_fix),
        ("Should improve", &plan.should_improve),
        ("Nice to have", &plan.nice_to_have),
    ] {
        if bucket.is_empty() {
            continue;
        }
        println!("\n{}:", title);
        print_suggestions(bucket);
    }
    Ok(())
}

fn run_timing(analyzer: &Analyzer, args: TimingArgs) -> Result<(), String> {
    let now = server::current_moment();
    let moment = PostingMoment::new(
        args.day.unwrap_or(now.day),
        args.hour.unwrap_or(now.hour),
        args.minute.unwrap_or(now.minute),
    );
    let advisor = analyzer.timing();
    let recommendation = advisor.recommend(&args.timezone, moment.day);
    let analysis = advisor.at(moment, &args.timezone);

    if args.json {
        return print_json(&serde_json::json!({
            "recommendation": recommendation,
            "now": analysis,
        }));
    }

    println!(
        "{} {:02}:{:02} ({}): score {} | {}",
        moment.day,
        moment.hour,
        moment.minute,
        analysis.timezone,
        analysis.current_score,
        analysis.recommendation
    );
    if !analysis.is_optimal_time {
        println!(
            "Next optimal slot: {} {:02}:00 (score {})",
            analysis.next_optimal_time.day,
            analysis.next_optimal_time.hour,
            analysis.next_optimal_score
        );
    }

    println!("\nBest hours today:");
    for hour in &recommendation.optimal_hours {
        println!(
            "- {:02}:00 {} (score {}, x{})",
            hour.hour,
            hour.audience_activity.label(),
            hour.score,
            format_float(hour.engagement_multiplier, 2)
        );
    }

    println!("\nBy day:");
    for day in &recommendation.day_of_week {
        println!("- {:<9} {:>3}  {}", day.day.label(), day.overall_score, day.reasoning);
    }
    Ok(())
}

fn run_templates(args: TemplatesArgs) -> Result<(), String> {
    let Some(id) = args.id else {
        if args.json {
            return print_json(&default_templates());
        }
        for template in default_templates() {
            println!(
                "{:<10} {:<15} {} (expected score {})",
                template.id, template.name, template.description, template.expected_score
            );
        }
        return Ok(());
    };

    let template = find_template(&id).map_err(|err| err.to_string())?;
    if args.values.is_empty() {
        return print_json(template);
    }
    let values: HashMap<String, String> = args.values.into_iter().collect();
    let rendered = template.render(&values).map_err(|err| err.to_string())?;
    println!("{}", rendered);
    Ok(())
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn init_config(path: Option<PathBuf>) -> Result<(), String> {
    let path = path.unwrap_or_else(default_config_path);
    if path.exists() {
        return Err(format!("config already exists: {}", path.display()));
    }
    AnalyzerConfig::default()
        .write(&path)
        .map_err(|err| err.to_string())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn print_suggestions(suggestions: &[Suggestion]) {
    for suggestion in suggestions {
        println!(
            "- [{}] {} (+{})",
            suggestion.priority.label(),
            suggestion.message,
            format_float(suggestion.potential_score_increase, 2)
        );
        if let Some(action) = &suggestion.action {
            println!("    {}", action);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to encode json: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing post text: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
