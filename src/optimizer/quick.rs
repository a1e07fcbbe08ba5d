use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::default_analyzer;
use crate::metrics::{char_count, hashtag_spans};
use crate::signals::has_hook;

pub const HOOK_PHRASES: &[&str] = &[
    "Here's the thing: ",
    "Hot take: ",
    "Real talk: ",
    "Most people don't know this: ",
];

pub const CLOSING_QUESTION: &str = "What do you think?";

pub const QUESTION_ROOM: usize = 250;

pub trait HookSelector {
    /// Returns an index in `0..choices`; `choices` is never zero.
    fn select(&mut self, choices: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomHookSelector;

impl HookSelector for RandomHookSelector {
    fn select(&mut self, choices: usize) -> usize {
        rand::thread_rng().gen_range(0..choices)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedHookSelector(pub usize);

impl HookSelector for FixedHookSelector {
    fn select(&mut self, choices: usize) -> usize {
        self.0 % choices
    }
}

#[derive(Debug, Clone)]
pub struct SeededHookSelector {
    rng: StdRng,
}

impl SeededHookSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl HookSelector for SeededHookSelector {
    fn select(&mut self, choices: usize) -> usize {
        self.rng.gen_range(0..choices)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickOptimizeOptions {
    pub remove_excess_hashtags: bool,
    pub add_question: bool,
    pub optimize_length: bool,
    pub add_hook: bool,
}

impl Default for QuickOptimizeOptions {
    fn default() -> Self {
        Self {
            remove_excess_hashtags: true,
            add_question: false,
            optimize_length: true,
            add_hook: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickOptimization {
    pub content: String,
    pub changes_applied: Vec<String>,
}

pub fn quick_optimize(content: &str, options: &QuickOptimizeOptions) -> QuickOptimization {
    quick_optimize_with(
        content,
        options,
        default_analyzer().config(),
        &mut RandomHookSelector,
    )
}

pub fn quick_optimize_with(
    content: &str,
    options: &QuickOptimizeOptions,
    config: &AnalyzerConfig,
    selector: &mut dyn HookSelector,
) -> QuickOptimization {
    let limit = config.length.hard_limit;
    let mut result = content.to_string();
    let mut changes_applied = Vec::new();

    if options.remove_excess_hashtags {
        let (trimmed, removed) = remove_excess_hashtags(&result, config.limits.max_hashtags);
        if removed > 0 {
            result = trimmed;
            changes_applied.push(format!("Removed {} excess hashtag(s)", removed));
        }
    }

    if options.optimize_length && char_count(&result) > limit {
        let (shortened, dropped) = drop_trailing_sentences(&result, limit);
        if dropped > 0 {
            result = shortened;
            changes_applied.push(format!(
                "Shortened post by removing {} sentence(s)",
                dropped
            ));
        }
    }

    if options.add_question && !result.contains('?') && char_count(&result) < QUESTION_ROOM {
        result = append_question(&result);
        changes_applied.push("Added engaging question".to_string());
    }

    if options.add_hook && !opens_with_hook(&result) {
        let hook = HOOK_PHRASES[selector.select(HOOK_PHRASES.len()) % HOOK_PHRASES.len()];
        let body = result.trim_start();
        if char_count(body) + char_count(hook) <= limit {
            result = format!("{}{}", hook, lowercase_first(body));
            changes_applied.push("Added attention-grabbing hook".to_string());
        }
    }

    QuickOptimization {
        content: result.trim().to_string(),
        changes_applied,
    }
}

pub fn remove_excess_hashtags(text: &str, keep: usize) -> (String, usize) {
    let spans = hashtag_spans(text);
    if spans.len() <= keep {
        return (text.to_string(), 0);
    }

    let mut result = text.to_string();
    for &(start, end) in spans[keep..].iter().rev() {
        let start = text[..start].trim_end().len();
        result.replace_range(start..end, "");
    }
    (result, spans.len() - keep)
}

/// Drops whole sentences from the end until the text fits. Text that cannot be brought under
/// `limit` while keeping at least one sentence is returned unchanged.
pub fn drop_trailing_sentences(text: &str, limit: usize) -> (String, usize) {
    if char_count(text) <= limit {
        return (text.to_string(), 0);
    }
    let ends = sentence_ends(text);
    for kept in (1..ends.len()).rev() {
        let candidate = text[..ends[kept - 1]].trim();
        if char_count(candidate) <= limit {
            return (candidate.to_string(), ends.len() - kept);
        }
    }
    (text.to_string(), 0)
}

// Byte offsets just past each sentence: `.`, `!` or `?` followed by whitespace, or the end
// of the text.
fn sentence_ends(text: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                ends.push(index + ch.len_utf8());
            }
        }
    }

    let tail_start = ends.last().copied().unwrap_or(0);
    if !text[tail_start..].trim().is_empty() {
        ends.push(text.len());
    }
    ends
}

fn append_question(text: &str) -> String {
    let mut result = text.trim_end().to_string();
    if result.is_empty() {
        return CLOSING_QUESTION.to_string();
    }
    if !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }
    result.push(' ');
    result.push_str(CLOSING_QUESTION);
    result
}

fn opens_with_hook(text: &str) -> bool {
    if has_hook(text) {
        return true;
    }
    let opening = text.trim_start().to_lowercase();
    HOOK_PHRASES
        .iter()
        .any(|phrase| opening.starts_with(phrase.trim_end_matches(": ").to_lowercase().as_str()))
}

fn lowercase_first(text: &str) -> String {
    let first_word = text.split_whitespace().next().unwrap_or_default();
    let shouting = first_word.chars().any(char::is_alphabetic)
        && first_word
            .chars()
            .filter(|ch| ch.is_alphabetic())
            .all(char::is_uppercase);
    if shouting {
        return text.to_string();
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
