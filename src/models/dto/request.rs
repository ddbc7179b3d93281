use serde::Deserialize;
use validator::Validate;

use crate::constants::DEFAULT_NUM_QUESTIONS;
use crate::models::domain::Difficulty;
use crate::providers::ContentRequest;

/// Body of `POST /api/quizzes`. The two modes mirror the two ways a quiz can
/// originate: a typed topic, or text extracted from an uploaded document
/// (extraction happens client-side; this service never sees the PDF).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CreateQuizRequest {
    Topic(TopicQuizRequest),
    Document(DocumentQuizRequest),
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TopicQuizRequest {
    #[validate(length(min = 2, max = 200))]
    pub topic: String,

    #[serde(default = "default_num_questions")]
    #[validate(range(min = 1, max = 20))]
    pub num_questions: u8,

    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DocumentQuizRequest {
    #[validate(length(min = 1, max = 200_000))]
    pub extracted_text: String,
}

fn default_num_questions() -> u8 {
    DEFAULT_NUM_QUESTIONS
}

impl CreateQuizRequest {
    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            CreateQuizRequest::Topic(request) => request.validate(),
            CreateQuizRequest::Document(request) => request.validate(),
        }
    }
}

impl From<CreateQuizRequest> for ContentRequest {
    fn from(request: CreateQuizRequest) -> Self {
        match request {
            CreateQuizRequest::Topic(r) => ContentRequest::Topic {
                topic: r.topic,
                num_questions: r.num_questions,
                difficulty: r.difficulty,
            },
            CreateQuizRequest::Document(r) => ContentRequest::Document {
                extracted_text: r.extracted_text,
            },
        }
    }
}

/// Body of `POST /api/sessions/{id}/answers`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub option: String,
}

/// Body of `POST /api/topics`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SuggestTopicsRequest {
    #[validate(length(min = 1, max = 200_000))]
    pub extracted_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_topic_request_defaults() {
        let request: CreateQuizRequest =
            serde_json::from_str(r#"{"mode":"topic","topic":"Rust ownership"}"#)
                .expect("topic request should parse");

        let CreateQuizRequest::Topic(topic) = &request else {
            panic!("expected topic mode");
        };
        assert_eq!(topic.num_questions, 10);
        assert_eq!(topic.difficulty, Difficulty::Medium);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_topic_request_explicit_fields() {
        let request: CreateQuizRequest = serde_json::from_str(
            r#"{"mode":"topic","topic":"The French Revolution","num_questions":5,"difficulty":"hard"}"#,
        )
        .expect("topic request should parse");

        let CreateQuizRequest::Topic(topic) = &request else {
            panic!("expected topic mode");
        };
        assert_eq!(topic.num_questions, 5);
        assert_eq!(topic.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_topic_too_short() {
        let request: CreateQuizRequest =
            serde_json::from_str(r#"{"mode":"topic","topic":"a"}"#).expect("should parse");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_num_questions_out_of_range() {
        let request: CreateQuizRequest =
            serde_json::from_str(r#"{"mode":"topic","topic":"Biology","num_questions":50}"#)
                .expect("should parse");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_document_request() {
        let request: CreateQuizRequest = serde_json::from_str(
            r#"{"mode":"document","extracted_text":"The mitochondria is the powerhouse of the cell."}"#,
        )
        .expect("document request should parse");

        assert!(request.validate().is_ok());
        let converted: ContentRequest = request.into();
        assert!(matches!(converted, ContentRequest::Document { .. }));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let parsed = serde_json::from_str::<CreateQuizRequest>(r#"{"mode":"url","url":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_answer_option_fails_validation() {
        let request = SubmitAnswerRequest {
            option: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_suggest_topics_request_requires_text() {
        let request = SuggestTopicsRequest {
            extracted_text: String::new(),
        };
        assert!(request.validate().is_err());

        let request = SuggestTopicsRequest {
            extracted_text: "Chapter 1: Thermodynamics".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
