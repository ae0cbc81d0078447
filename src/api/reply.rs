//! Classification of Messages API response bodies.
//!
//! The HTTP status is not consulted: a body is a reply, an error, or neither.

use serde_json::Value;

/// Shown instead of the upstream text when the API reports a rate or quota limit.
pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait a moment before sending another message.";

/// Used when an error object carries no usable message.
pub const API_FAILURE_MESSAGE: &str = "API request failed";

/// Stored when a body is neither a reply nor an error.
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected API response format";

const RATE_LIMIT_TYPES: &[&str] = &["exceeded_limit", "rate_limit_error"];

/// What an upstream response body amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    /// First text block of the `content` array.
    Content(String),
    /// An explicit `error` object.
    Error(ApiError),
    /// Anything else.
    Unexpected,
}

/// The parts of an upstream error object the session cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: Option<String>,
    pub error_type: Option<String>,
    pub response_type: Option<String>,
}

impl ApiReply {
    pub fn classify(body: &Value) -> Self {
        if let Some(text) = first_text(body) {
            return Self::Content(text.to_string());
        }

        match body.get("error") {
            Some(error) if is_present(error) => Self::Error(ApiError {
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(String::from),
                error_type: error.get("type").and_then(Value::as_str).map(String::from),
                response_type: body.get("type").and_then(Value::as_str).map(String::from),
            }),
            _ => Self::Unexpected,
        }
    }
}

impl ApiError {
    pub fn is_rate_limited(&self) -> bool {
        [&self.response_type, &self.error_type]
            .into_iter()
            .flatten()
            .any(|t| RATE_LIMIT_TYPES.contains(&t.as_str()))
    }

    /// The text shown to the user for this error.
    pub fn user_message(&self) -> String {
        if self.is_rate_limited() {
            return RATE_LIMIT_MESSAGE.to_string();
        }
        self.message
            .clone()
            .unwrap_or_else(|| API_FAILURE_MESSAGE.to_string())
    }
}

/// `null`, `false`, `0` and `""` do not count as an error field.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_text(body: &Value) -> Option<&str> {
    body.get("content")?
        .as_array()?
        .iter()
        .find_map(|block| block.get("text").and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_content() {
        let body = json!({"content": [{"type": "text", "text": "hi"}]});
        assert_eq!(ApiReply::classify(&body), ApiReply::Content("hi".to_string()));
    }

    #[test]
    fn test_classify_content_skips_non_text_blocks() {
        let body = json!({"content": [{"type": "tool_use", "id": "t1"}, {"text": "second"}]});
        assert_eq!(
            ApiReply::classify(&body),
            ApiReply::Content("second".to_string())
        );
    }

    #[test]
    fn test_classify_empty_content_falls_through() {
        assert_eq!(ApiReply::classify(&json!({"content": []})), ApiReply::Unexpected);

        let body = json!({"content": [], "error": {"message": "nope"}});
        assert!(matches!(ApiReply::classify(&body), ApiReply::Error(_)));
    }

    #[test]
    fn test_content_wins_over_error() {
        let body = json!({"content": [{"text": "ok"}], "error": {"message": "ignored"}});
        assert_eq!(ApiReply::classify(&body), ApiReply::Content("ok".to_string()));
    }

    #[test]
    fn test_classify_error_message() {
        let body = json!({"type": "error", "error": {"type": "authentication_error", "message": "bad key"}});
        let ApiReply::Error(error) = ApiReply::classify(&body) else {
            panic!("expected an error reply");
        };
        assert!(!error.is_rate_limited());
        assert_eq!(error.user_message(), "bad key");
    }

    #[test]
    fn test_error_without_message_uses_fallback() {
        for body in [json!({"error": {}}), json!({"error": {"message": ""}}), json!({"error": "oops"})] {
            let ApiReply::Error(error) = ApiReply::classify(&body) else {
                panic!("expected an error reply for {body}");
            };
            assert_eq!(error.user_message(), API_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_rate_limit_from_response_type() {
        let body = json!({"type": "exceeded_limit", "error": {"message": "too many"}});
        let ApiReply::Error(error) = ApiReply::classify(&body) else {
            panic!("expected an error reply");
        };
        assert!(error.is_rate_limited());
        assert_eq!(error.user_message(), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_rate_limit_from_error_type() {
        let body = json!({"type": "error", "error": {"type": "rate_limit_error", "message": "slow down"}});
        let ApiReply::Error(error) = ApiReply::classify(&body) else {
            panic!("expected an error reply");
        };
        assert_eq!(error.user_message(), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_classify_unexpected() {
        assert_eq!(ApiReply::classify(&json!({})), ApiReply::Unexpected);
        assert_eq!(ApiReply::classify(&json!({"error": null})), ApiReply::Unexpected);
        assert_eq!(ApiReply::classify(&json!({"error": false})), ApiReply::Unexpected);
        assert_eq!(ApiReply::classify(&json!({"error": ""})), ApiReply::Unexpected);
        assert_eq!(ApiReply::classify(&json!({"error": 0})), ApiReply::Unexpected);
        assert_eq!(ApiReply::classify(&json!({"content": "text"})), ApiReply::Unexpected);
        assert_eq!(ApiReply::classify(&json!([1, 2])), ApiReply::Unexpected);
    }
}
