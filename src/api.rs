use serde::{Deserialize, Serialize};
use thiserror::Error;

use post_scorer::metrics::char_count;
use post_scorer::templates::TemplateError;
use post_scorer::timing::{PostingMoment, Weekday, DEFAULT_TIMEZONE};
use post_scorer::{content_id, PostAnalysis, QuickOptimizeOptions};

pub const MAX_CONTENT_CHARS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} too long ({length} chars, max {max})")]
    TooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },
    #[error("{field} must be below {limit}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u8,
        limit: u8,
    },
    #[error("{0}")]
    Invalid(String),
}

fn require_content(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    let length = char_count(&value);
    if length == 0 {
        return Err(ValidationError::Missing(field));
    }
    if length > MAX_CONTENT_CHARS {
        return Err(ValidationError::TooLong {
            field,
            length,
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(value)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub content: Option<String>,
    pub has_media: Option<bool>,
    pub media_count: Option<usize>,
}

impl AnalyzeRequest {
    pub fn into_parts(self) -> Result<(String, usize), ValidationError> {
        let content = require_content("content", self.content)?;
        let media_count = match (self.media_count, self.has_media) {
            (Some(count), _) => count,
            (None, Some(true)) => 1,
            _ => 0,
        };
        Ok((content, media_count))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub original: Option<String>,
    pub modified: Option<String>,
}

impl CompareRequest {
    pub fn into_parts(self) -> Result<(String, String), ValidationError> {
        let original = require_content("original", self.original)?;
        let modified = require_content("modified", self.modified)?;
        Ok((original, modified))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub options: QuickOptimizeOptions,
}

impl OptimizeRequest {
    pub fn into_parts(self) -> Result<(String, QuickOptimizeOptions), ValidationError> {
        let content = require_content("content", self.content)?;
        Ok((content, self.options))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsRequest {
    pub content: Option<String>,
}

impl ActionsRequest {
    pub fn into_content(self) -> Result<String, ValidationError> {
        require_content("content", self.content)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TimingQuery {
    pub timezone: Option<String>,
    pub day: Option<String>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
}

impl TimingQuery {
    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }

    /// Fills the fields the query leaves out from `now`.
    pub fn moment(&self, now: PostingMoment) -> Result<PostingMoment, ValidationError> {
        let day = match self.day.as_deref() {
            Some(day) => day
                .parse::<Weekday>()
                .map_err(|err| ValidationError::Invalid(err.to_string()))?,
            None => now.day,
        };
        let hour = bounded("hour", self.hour, 24)?.unwrap_or(now.hour);
        let minute = bounded("minute", self.minute, 60)?.unwrap_or(now.minute);
        Ok(PostingMoment::new(day, hour, minute))
    }
}

fn bounded(field: &'static str, value: Option<u8>, limit: u8) -> Result<Option<u8>, ValidationError> {
    match value {
        Some(value) if value >= limit => Err(ValidationError::OutOfRange {
            field,
            value,
            limit,
        }),
        other => Ok(other),
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub content_id: String,
    #[serde(flatten)]
    pub analysis: PostAnalysis,
}

impl AnalysisResponse {
    pub fn from_analysis(content: &str, analysis: PostAnalysis) -> Self {
        Self {
            content_id: content_id(content),
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_validation() {
        let request = AnalyzeRequest {
            content: Some(String::new()),
            has_media: None,
            media_count: None,
        };
        assert_eq!(
            request.into_parts(),
            Err(ValidationError::Missing("content"))
        );

        let request = AnalyzeRequest {
            content: Some("x".repeat(MAX_CONTENT_CHARS + 1)),
            has_media: None,
            media_count: None,
        };
        assert!(matches!(
            request.into_parts(),
            Err(ValidationError::TooLong { length: 10_001, .. })
        ));

        let request = AnalyzeRequest {
            content: Some("é".repeat(MAX_CONTENT_CHARS)),
            has_media: Some(true),
            media_count: None,
        };
        let (_, media_count) = request.into_parts().unwrap();
        assert_eq!(media_count, 1);
    }

    #[test]
    fn explicit_media_count_wins() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"content":"hi","hasMedia":true,"mediaCount":3}"#).unwrap();
        assert_eq!(request.into_parts().unwrap(), ("hi".to_string(), 3));
    }

    #[test]
    fn optimize_request_defaults() {
        let request: OptimizeRequest = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        let (_, options) = request.into_parts().unwrap();
        assert_eq!(options, QuickOptimizeOptions::default());

        let request: OptimizeRequest =
            serde_json::from_str(r#"{"content":"hi","options":{"addHook":true}}"#).unwrap();
        let (_, options) = request.into_parts().unwrap();
        assert!(options.add_hook);
        assert!(options.remove_excess_hashtags);
    }

    #[test]
    fn compare_request_names_missing_field() {
        let request = CompareRequest {
            original: Some("a".to_string()),
            modified: None,
        };
        let err = request.into_parts().unwrap_err();
        assert_eq!(err.to_string(), "modified is required");
    }

    #[test]
    fn analysis_response_is_flat() {
        let analysis = post_scorer::analyze("Ship it", 0);
        let response = ApiResponse::ok(AnalysisResponse::from_analysis("Ship it", analysis));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["data"]["contentId"].as_str().unwrap().starts_with("post_"));
        assert!(json["data"].get("overallScore").is_some());
    }

    #[test]
    fn timing_query_fills_gaps_from_now() {
        let now = PostingMoment::new(Weekday::Monday, 6, 30);

        let query = TimingQuery::default();
        assert_eq!(query.moment(now).unwrap(), now);
        assert_eq!(query.timezone(), "UTC");

        let query = TimingQuery {
            timezone: Some("Europe/Paris".to_string()),
            day: Some("Wed".to_string()),
            hour: Some(18),
            minute: None,
        };
        assert_eq!(
            query.moment(now).unwrap(),
            PostingMoment::new(Weekday::Wednesday, 18, 30)
        );
        assert_eq!(query.timezone(), "Europe/Paris");
    }

    #[test]
    fn timing_query_rejects_bad_values() {
        let now = PostingMoment::new(Weekday::Monday, 6, 30);
        let query = TimingQuery {
            hour: Some(24),
            ..TimingQuery::default()
        };
        assert_eq!(
            query.moment(now),
            Err(ValidationError::OutOfRange {
                field: "hour",
                value: 24,
                limit: 24,
            })
        );

        let query = TimingQuery {
            day: Some("someday".to_string()),
            ..TimingQuery::default()
        };
        assert!(matches!(query.moment(now), Err(ValidationError::Invalid(_))));
    }
}
