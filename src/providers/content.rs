use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::domain::{Difficulty, Question};

/// The two ways quiz content can be requested. Mirrors the two entry points
/// of the product: a typed topic, or text extracted from a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRequest {
    Topic {
        topic: String,
        num_questions: u8,
        difficulty: Difficulty,
    },
    Document {
        extracted_text: String,
    },
}

impl ContentRequest {
    /// The topic label known before generation. Document requests resolve
    /// theirs during generation.
    pub fn requested_topic(&self) -> Option<&str> {
        match self {
            ContentRequest::Topic { topic, .. } => Some(topic),
            ContentRequest::Document { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    /// Resolved by the provider for document requests; `None` for topic
    /// requests, where the caller already knows the topic.
    pub topic: Option<String>,
    pub questions: Vec<Question>,
}

/// Opaque source of quiz content. Fails as a unit: a failure means no quiz
/// and no session. Anything honoring this contract can stand in for the
/// model call (a static bank, a different model, a rule-based generator).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate(&self, request: &ContentRequest) -> AppResult<GeneratedContent>;

    /// Main themes of a text sample, for suggesting quiz topics from an
    /// uploaded document.
    async fn suggest_topics(&self, text: &str) -> AppResult<Vec<String>>;
}
