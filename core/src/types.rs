use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request to Gemini API to generate content
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A request whose only content is the given prompt.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(prompt.to_string())],
            }],
        }
    }
}

/// Content structure for requests and responses
#[derive(Serialize, Clone, Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Part structure for a piece of content
#[derive(Serialize, Clone, Debug, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: String) -> Self {
        Self { text: Some(text) }
    }
}

/// Response from Gemini API.
///
/// Only the text path is typed. A `null` or missing `candidates` member
/// decodes as no candidates.
#[derive(Deserialize, Debug, Serialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<Candidate>,
}

/// Candidate in the response
#[derive(Deserialize, Debug, Serialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Candidate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Candidate>>::deserialize(deserializer)?.unwrap_or_default())
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Message of the `error` member of a payload.
///
/// The API reports `{"error": {"message": ..}}` while the gateway answers
/// `{"error": ".."}`. Other shapes fall back to their JSON text.
pub fn api_error_message(payload: &Value) -> Option<String> {
    let error = payload.get("error")?;
    let message = match error {
        Value::Null => return None,
        Value::String(message) => message.clone(),
        other => match other.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => other.to_string(),
        },
    };
    Some(message)
}

/// Whether a payload carries a non-empty `candidates` array.
pub fn has_candidates(payload: &Value) -> bool {
    payload
        .get("candidates")
        .and_then(Value::as_array)
        .map_or(false, |candidates| !candidates.is_empty())
}

/// Body accepted by the gateway's `/generate` route
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Error body returned by the gateway
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::from_prompt("three video ideas");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "contents": [{ "parts": [{ "text": "three video ideas" }] }] })
        );
    }

    #[test]
    fn test_first_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Idea1---Idea2" }], "role": "model" } }]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("Idea1---Idea2"));
    }

    #[test]
    fn test_null_candidates_decode_as_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": null, "promptFeedback": {} })).unwrap();
        assert!(response.candidates.is_empty());
        assert_eq!(response.first_text(), None);
        assert_eq!(GenerateContentResponse::default().first_text(), None);
    }

    #[test]
    fn test_api_error_message_shapes() {
        assert_eq!(
            api_error_message(&json!({ "error": { "code": 400, "message": "API key not valid" } })),
            Some("API key not valid".to_string())
        );
        assert_eq!(
            api_error_message(&json!({ "error": { "code": "BAD", "message": "bad thing" } })),
            Some("bad thing".to_string())
        );
        assert_eq!(
            api_error_message(&json!({ "error": "Unauthorized" })),
            Some("Unauthorized".to_string())
        );
        assert_eq!(
            api_error_message(&json!({ "error": { "code": 500 } })),
            Some(r#"{"code":500}"#.to_string())
        );
        assert_eq!(api_error_message(&json!({ "error": null })), None);
        assert_eq!(api_error_message(&json!(["no", "object"])), None);
    }

    #[test]
    fn test_has_candidates() {
        assert!(has_candidates(&json!({ "candidates": [{}] })));
        assert!(!has_candidates(&json!({ "candidates": [] })));
        assert!(!has_candidates(&json!({ "candidates": null })));
        assert!(!has_candidates(&json!({})));
    }

    #[test]
    fn test_generate_request_missing_prompt() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.prompt, "");
    }

    #[test]
    fn test_error_body_omits_missing_details() {
        let body = serde_json::to_value(ErrorBody::new("Unauthorized")).unwrap();
        assert_eq!(body, json!({ "error": "Unauthorized" }));

        let body = serde_json::to_value(ErrorBody::new("failed").with_details("timeout")).unwrap();
        assert_eq!(body, json!({ "error": "failed", "details": "timeout" }));
    }
}
