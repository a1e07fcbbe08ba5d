use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Question,
    ThreadStarter,
    HotTake,
    Story,
    ValueBomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplatePlaceholder {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: PlaceholderKind,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    pub template: &'static str,
    pub placeholders: &'static [TemplatePlaceholder],
    pub expected_score: u32,
    pub target_engagement: &'static [&'static str],
    pub examples: &'static [&'static str],
    pub tips: &'static [&'static str],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("missing value for placeholder `{0}`")]
    MissingValue(&'static str),
}

const fn text(key: &'static str, label: &'static str, description: &'static str) -> TemplatePlaceholder {
    TemplatePlaceholder {
        key,
        label,
        description,
        kind: PlaceholderKind::Text,
        required: true,
    }
}

const fn number(
    key: &'static str,
    label: &'static str,
    description: &'static str,
) -> TemplatePlaceholder {
    TemplatePlaceholder {
        key,
        label,
        description,
        kind: PlaceholderKind::Number,
        required: true,
    }
}

pub static DEFAULT_TEMPLATES: [PostTemplate; 5] = [
    PostTemplate {
        id: "default-0",
        name: "Question Hook",
        description: "Drives replies with an engaging open-ended question",
        category: TemplateCategory::Question,
        template: "What if I told you that {{topic}} is completely wrong?\n\n{{supporting_point}}\n\nWhat do you think?",
        placeholders: &[
            text("topic", "Topic", "The controversial topic"),
            text(
                "supporting_point",
                "Supporting Point",
                "A point that backs up your claim",
            ),
        ],
        expected_score: 75,
        target_engagement: &["replies", "quotes"],
        examples: &["What if I told you that working 60+ hours a week actually makes you LESS productive?"],
        tips: &["Keep the question open-ended", "Make it slightly controversial"],
    },
    PostTemplate {
        id: "default-1",
        name: "Thread Starter",
        description: "Perfect hook for educational threads",
        category: TemplateCategory::ThreadStarter,
        template: "I spent {{time_period}} studying {{topic}}.\n\nHere are {{number}} things nobody talks about:\n\n(A thread)",
        placeholders: &[
            text("time_period", "Time Period", "How long you studied"),
            text("topic", "Topic", "What you studied"),
            number("number", "Number of Items", "How many insights"),
        ],
        expected_score: 82,
        target_engagement: &["retweets", "likes"],
        examples: &["I spent 3 years studying the X algorithm. Here are 7 things nobody talks about:"],
        tips: &["Use specific numbers", "Promise insider knowledge"],
    },
    PostTemplate {
        id: "default-2",
        name: "Hot Take",
        description: "Sparks debate and quote tweets",
        category: TemplateCategory::HotTake,
        template: "Unpopular opinion: {{opinion}}\n\n{{reason}}\n\nChange my mind.",
        placeholders: &[
            text("opinion", "Opinion", "Your controversial stance"),
            text("reason", "Reason", "Why you hold this opinion"),
        ],
        expected_score: 78,
        target_engagement: &["quotes", "replies"],
        examples: &["Unpopular opinion: Most productivity advice is just procrastination with extra steps."],
        tips: &["Be bold but not offensive", "Back it up with reason"],
    },
    PostTemplate {
        id: "default-3",
        name: "Value Bomb",
        description: "Provides immediate actionable value",
        category: TemplateCategory::ValueBomb,
        template: "{{number}} {{item_type}} that will {{benefit}}:\n\n{{items}}\n\nBookmark this.",
        placeholders: &[
            number("number", "Number", "How many items"),
            text("item_type", "Item Type", "e.g., tools, tips, strategies"),
            text("benefit", "Benefit", "What the reader gains"),
            text("items", "Items", "The list of items (numbered)"),
        ],
        expected_score: 80,
        target_engagement: &["retweets", "likes", "shares"],
        examples: &["5 free AI tools that will save you 10+ hours per week:"],
        tips: &["Be specific about the benefit", "List format works well"],
    },
    PostTemplate {
        id: "default-4",
        name: "Story Hook",
        description: "Personal narrative that builds connection",
        category: TemplateCategory::Story,
        template: "{{time_reference}}, I {{situation}}.\n\n{{turning_point}}\n\n{{lesson}}",
        placeholders: &[
            text(
                "time_reference",
                "Time Reference",
                "e.g., 2 years ago, Last week",
            ),
            text("situation", "Situation", "What happened to you"),
            text("turning_point", "Turning Point", "What changed"),
            text("lesson", "Lesson", "What you learned"),
        ],
        expected_score: 76,
        target_engagement: &["likes", "shares"],
        examples: &["3 years ago, I was broke and depressed. Then I discovered one simple habit that changed everything."],
        tips: &["Be vulnerable", "End with universal lesson"],
    },
];

pub fn default_templates() -> &'static [PostTemplate] {
    &DEFAULT_TEMPLATES
}

pub fn find_template(id: &str) -> Result<&'static PostTemplate, TemplateError> {
    DEFAULT_TEMPLATES
        .iter()
        .find(|template| template.id == id)
        .ok_or_else(|| TemplateError::NotFound(id.to_string()))
}

impl PostTemplate {
    /// Fills `{{key}}` placeholders. Unknown keys in the text are left untouched.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        for placeholder in self.placeholders {
            let filled = values
                .get(placeholder.key)
                .is_some_and(|value| !value.trim().is_empty());
            if placeholder.required && !filled {
                return Err(TemplateError::MissingValue(placeholder.key));
            }
        }

        let rendered = PLACEHOLDER_RE.replace_all(self.template, |caps: &Captures| {
            values
                .get(&caps[1])
                .map(|value| value.trim().to_string())
                .unwrap_or_else(|| caps[0].to_string())
        });
        Ok(rendered.into_owned())
    }
}
