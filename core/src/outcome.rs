//! Decoding of generation replies into a single sum type.
//!
//! The gateway either passes the Gemini payload through or answers with an
//! [`ErrorBody`](crate::types::ErrorBody). Callers decode the reply once with
//! [`GenerationOutcome::from_reply`] instead of probing the JSON themselves.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{api_error_message, GenerateContentResponse};

/// Literal token the prompts ask the model to put between ideas.
pub const IDEA_SEPARATOR: &str = "---";

/// Shown when a reply carries neither text nor an error.
pub const GENERIC_FAILURE_MESSAGE: &str = "Sorry, I couldn't get a response. Please try again.";

/// Result of one generation round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The model produced at least one non-empty idea.
    Success { ideas: Vec<String> },
    /// The reply described an error.
    Failure { message: String },
    /// The reply had no usable text.
    Empty,
}

impl GenerationOutcome {
    /// Decode a reply body from the gateway.
    pub fn from_reply(reply: &Value) -> Self {
        let ideas = GenerateContentResponse::deserialize(reply)
            .ok()
            .and_then(|response| response.first_text().map(split_ideas))
            .unwrap_or_default();

        if !ideas.is_empty() {
            return GenerationOutcome::Success { ideas };
        }

        match api_error_message(reply) {
            Some(message) => GenerationOutcome::Failure {
                message: format!("Error from API: {}", message),
            },
            None => GenerationOutcome::Empty,
        }
    }

    /// The single message to show when there are no ideas.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success { .. } => None,
            GenerationOutcome::Failure { message } => Some(message),
            GenerationOutcome::Empty => Some(GENERIC_FAILURE_MESSAGE),
        }
    }
}

/// Split a model answer on [`IDEA_SEPARATOR`], trimming each fragment and
/// dropping the empty ones.
pub fn split_ideas(text: &str) -> Vec<String> {
    text.split(IDEA_SEPARATOR)
        .map(str::trim)
        .filter(|idea| !idea.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_drops_blank_fragments() {
        assert_eq!(
            split_ideas("Idea1---Idea2---   ---Idea3"),
            vec!["Idea1", "Idea2", "Idea3"]
        );
        assert!(split_ideas(" --- \n---").is_empty());
        assert_eq!(split_ideas("\n**Title**\nBody\n"), vec!["**Title**\nBody"]);
    }

    #[test]
    fn test_success_reply() {
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": "A\n---\nB" }] } }]
        });
        assert_eq!(
            GenerationOutcome::from_reply(&reply),
            GenerationOutcome::Success {
                ideas: vec!["A".to_string(), "B".to_string()]
            }
        );
    }

    #[test]
    fn test_gateway_error_string() {
        let reply = json!({ "error": "The model did not return a response. This might be due to a safety filter." });
        let outcome = GenerationOutcome::from_reply(&reply);
        assert_eq!(
            outcome.failure_message(),
            Some("Error from API: The model did not return a response. This might be due to a safety filter.")
        );
    }

    #[test]
    fn test_api_error_object() {
        let reply = json!({ "error": { "code": 429, "message": "Quota exceeded" } });
        assert_eq!(
            GenerationOutcome::from_reply(&reply),
            GenerationOutcome::Failure {
                message: "Error from API: Quota exceeded".to_string()
            }
        );
    }

    #[test]
    fn test_no_text_is_empty() {
        let reply = json!({ "candidates": [{ "content": { "parts": [] } }] });
        let outcome = GenerationOutcome::from_reply(&reply);
        assert_eq!(outcome, GenerationOutcome::Empty);
        assert_eq!(outcome.failure_message(), Some(GENERIC_FAILURE_MESSAGE));

        let separators_only = json!({
            "candidates": [{ "content": { "parts": [{ "text": "---   ---" }] } }]
        });
        assert_eq!(
            GenerationOutcome::from_reply(&separators_only),
            GenerationOutcome::Empty
        );
    }

    #[test]
    fn test_unexpected_shapes_are_empty() {
        let outcome = GenerationOutcome::from_reply(&json!(["unexpected"]));
        assert_eq!(outcome, GenerationOutcome::Empty);
        assert_eq!(outcome.failure_message(), Some(GENERIC_FAILURE_MESSAGE));

        let null_candidates = json!({ "candidates": null });
        assert_eq!(
            GenerationOutcome::from_reply(&null_candidates),
            GenerationOutcome::Empty
        );
    }

    #[test]
    fn test_error_object_with_odd_code() {
        let reply = json!({ "candidates": null, "error": { "code": "BAD", "message": "bad thing" } });
        assert_eq!(
            GenerationOutcome::from_reply(&reply),
            GenerationOutcome::Failure {
                message: "Error from API: bad thing".to_string()
            }
        );
    }
}
