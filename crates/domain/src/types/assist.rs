//! AI assist types
//!
//! Generation happens entirely backend-side; the client only names the kind
//! of content it wants and supplies the prompt context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_ASSIST_PROMPT_CHARS;

/// Content category the backend can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistKind {
    Bio,
    JobPost,
    BlogPost,
    CandidateMatch,
    Contract,
}

/// Generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistRequest {
    pub kind: AssistKind,
    pub prompt: String,
    /// Structured context the backend may fold into the prompt
    /// (job fields, profile excerpts, match criteria)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl AssistRequest {
    /// Builds a request, trimming the prompt to the server-side limit.
    pub fn new(kind: AssistKind, prompt: impl Into<String>) -> Self {
        let mut prompt = prompt.into();
        if prompt.len() > MAX_ASSIST_PROMPT_CHARS {
            // Back off to a char boundary so truncate cannot split a code point
            let mut end = MAX_ASSIST_PROMPT_CHARS;
            while !prompt.is_char_boundary(end) {
                end -= 1;
            }
            prompt.truncate(end);
        }
        Self { kind, prompt, context: None }
    }

    #[must_use]
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Generated content returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistResponse {
    pub kind: AssistKind,
    pub content: String,
    pub model: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_oversized_prompts() {
        let req = AssistRequest::new(AssistKind::Bio, "x".repeat(MAX_ASSIST_PROMPT_CHARS + 100));
        assert_eq!(req.prompt.len(), MAX_ASSIST_PROMPT_CHARS);
    }

    #[test]
    fn trim_respects_char_boundaries() {
        // 'é' is two bytes; an odd limit would land mid-char without the
        // boundary backoff
        let req = AssistRequest::new(AssistKind::Bio, "é".repeat(MAX_ASSIST_PROMPT_CHARS));
        assert!(req.prompt.len() <= MAX_ASSIST_PROMPT_CHARS);
        assert!(req.prompt.is_char_boundary(req.prompt.len()));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&AssistKind::CandidateMatch).unwrap();
        assert_eq!(json, "\"candidate_match\"");
    }
}
