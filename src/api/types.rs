//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::faq::Outcome;
use crate::faq::Reply;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Ask request
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Ask response
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl From<Reply> for AskResponse {
    fn from(reply: Reply) -> Self {
        match reply.outcome {
            Outcome::Matched { question, score } => Self {
                answer: reply.text,
                outcome: "matched".to_string(),
                matched_question: Some(question),
                score: Some(score),
            },
            Outcome::Generated => Self {
                answer: reply.text,
                outcome: "generated".to_string(),
                matched_question: None,
                score: None,
            },
        }
    }
}

/// Corpus statistics response
#[derive(Debug, Serialize)]
pub struct CorpusResponse {
    pub questions: usize,
}
