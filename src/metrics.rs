use regex::Regex;
use std::sync::LazyLock;

use crate::ContentMetrics;

pub const WORDS_PER_MINUTE: usize = 200;

/// Thread length assumed when a post is marked as a thread but carries no `N/M` numbering.
pub const DEFAULT_THREAD_LENGTH: usize = 3;

pub const THREAD_EMOJI: char = '\u{1F9F5}';

static HASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());
static MENTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
static QUESTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?(?:\s|$)").unwrap());
static THREAD_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)/(\d+)").unwrap());
static THREAD_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)thread").unwrap());
static CTA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)link in bio|check out|follow|like|retweet|share|comment|subscribe|link|tap|click|\bdms?\b",
    )
    .unwrap()
});

pub fn extract_metrics(content: &str, media_count: usize) -> ContentMetrics {
    let word_count = content.split_whitespace().count();
    let hashtag_count = count_hashtags(content);
    let mention_count = MENTION_PATTERN.find_iter(content).count();
    let link_count = count_links(content);
    let emoji_count = content.chars().filter(|ch| is_emoji(*ch)).count();
    let question_count = QUESTION_PATTERN.find_iter(content).count();
    let is_thread = is_thread(content);

    ContentMetrics {
        character_count: char_count(content),
        word_count,
        sentence_count: sentence_count(content),
        reading_time_seconds: reading_time_seconds(word_count),
        has_media: media_count > 0,
        media_count,
        has_question: question_count > 0,
        question_count,
        has_hashtags: hashtag_count > 0,
        hashtag_count,
        has_mentions: mention_count > 0,
        mention_count,
        has_links: link_count > 0,
        link_count,
        has_emojis: emoji_count > 0,
        emoji_count,
        has_cta: CTA_PATTERN.is_match(content),
        is_thread,
        thread_length: estimate_thread_length(content, is_thread),
    }
}

/// Length as every limit in the crate measures it: Unicode scalar values.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

pub fn count_hashtags(text: &str) -> usize {
    HASHTAG_PATTERN.find_iter(text).count()
}

pub fn count_links(text: &str) -> usize {
    LINK_PATTERN.find_iter(text).count()
}

pub fn hashtag_spans(text: &str) -> Vec<(usize, usize)> {
    HASHTAG_PATTERN
        .find_iter(text)
        .map(|found| (found.start(), found.end()))
        .collect()
}

pub fn strip_entities(text: &str) -> String {
    let without_links = LINK_PATTERN.replace_all(text, " ");
    let without_tags = HASHTAG_PATTERN.replace_all(&without_links, " ");
    MENTION_PATTERN.replace_all(&without_tags, " ").into_owned()
}

pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
        .max(1)
}

pub fn reading_time_seconds(word_count: usize) -> usize {
    (word_count * 60).div_ceil(WORDS_PER_MINUTE)
}

pub fn is_emoji(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1F300..=0x1FAFF | 0x2600..=0x26FF | 0x2700..=0x27BF
    )
}

pub fn is_thread(text: &str) -> bool {
    THREAD_KEYWORD.is_match(text) || text.contains(THREAD_EMOJI) || THREAD_NUMBERING.is_match(text)
}

fn estimate_thread_length(text: &str, is_thread: bool) -> usize {
    if !is_thread {
        return 0;
    }
    THREAD_NUMBERING
        .captures(text)
        .and_then(|captures| captures[2].parse::<usize>().ok())
        .unwrap_or(DEFAULT_THREAD_LENGTH)
}
