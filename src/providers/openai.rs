use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use log::debug;
use schemars::JsonSchema;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::prompts;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, ResultBreakdown};
use crate::providers::content::{ContentProvider, ContentRequest, GeneratedContent};
use crate::providers::summary::SummaryProvider;

/// Wire shape of one generated question. Field names match what the prompts
/// instruct the model to emit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct QuestionPayload {
    /// The quiz question.
    pub question: String,
    /// The four possible answers.
    pub options: Vec<String>,
    /// The correct answer; must match one of the options exactly.
    pub answer: String,
}

/// Reply shape for topic-mode generation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TopicQuizPayload {
    pub quiz: Vec<QuestionPayload>,
}

/// Reply shape for document-mode generation; the model also resolves the
/// document's main topic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DocumentQuizPayload {
    pub topic: String,
    pub quiz: Vec<QuestionPayload>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TopicListPayload {
    pub topics: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SummaryPayload {
    pub summary: String,
}

impl From<QuestionPayload> for Question {
    fn from(payload: QuestionPayload) -> Self {
        Question {
            text: payload.question,
            options: payload.options,
            correct_option: payload.answer,
        }
    }
}

fn build_client(config: &Config) -> Client<OpenAIConfig> {
    let mut openai_config =
        OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
    if let Some(api_base) = &config.openai_api_base {
        openai_config = openai_config.with_api_base(api_base);
    }
    Client::with_config(openai_config)
}

/// One structured chat completion: system prompt, one user message, and a
/// JSON-schema response format derived from the expected payload type.
async fn request_json<T>(
    client: &Client<OpenAIConfig>,
    model: &str,
    schema_name: &str,
    system_prompt: &str,
    user_message: String,
) -> AppResult<T>
where
    T: serde::de::DeserializeOwned + JsonSchema,
{
    let schema = serde_json::to_value(schemars::schema_for!(T)).map_err(|e| {
        AppError::InternalError(format!("response schema did not serialize: {}", e))
    })?;

    let messages = vec![
        ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()?,
        ),
        ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?,
        ),
    ];

    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .response_format(ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: schema_name.to_string(),
                schema: Some(schema),
                strict: Some(true),
            },
        })
        .build()?;

    debug!("requesting chat completion, model: {}", model);
    let response = client.chat().create(request).await?;

    let content = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .ok_or_else(|| {
            AppError::ContentUnavailable("model returned an empty response".to_string())
        })?;

    serde_json::from_str(content.trim()).map_err(|e| {
        AppError::ContentUnavailable(format!("model returned malformed JSON: {}", e))
    })
}

pub struct OpenAiContentProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiContentProvider {
    pub fn new(config: &Config) -> Self {
        OpenAiContentProvider {
            client: build_client(config),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl ContentProvider for OpenAiContentProvider {
    async fn generate(&self, request: &ContentRequest) -> AppResult<GeneratedContent> {
        match request {
            ContentRequest::Topic {
                topic,
                num_questions,
                difficulty,
            } => {
                debug!(
                    "generating quiz, topic: '{}', questions: {}, difficulty: {}",
                    topic, num_questions, difficulty
                );
                let user_message = format!(
                    "Topic: {}\nNumber of questions: {}\nDifficulty: {}",
                    topic, num_questions, difficulty
                );
                let payload: TopicQuizPayload = request_json(
                    &self.client,
                    &self.model,
                    "topic_quiz",
                    prompts::QUIZ_FROM_TOPIC_PROMPT,
                    user_message,
                )
                .await?;

                Ok(GeneratedContent {
                    topic: None,
                    questions: payload.quiz.into_iter().map(Question::from).collect(),
                })
            }
            ContentRequest::Document { extracted_text } => {
                debug!(
                    "generating quiz from document text, {} chars",
                    extracted_text.len()
                );
                let user_message =
                    format!("Document text:\n\"\"\"\n{}\n\"\"\"", extracted_text);
                let payload: DocumentQuizPayload = request_json(
                    &self.client,
                    &self.model,
                    "document_quiz",
                    prompts::QUIZ_FROM_DOCUMENT_PROMPT,
                    user_message,
                )
                .await?;

                Ok(GeneratedContent {
                    topic: Some(payload.topic),
                    questions: payload.quiz.into_iter().map(Question::from).collect(),
                })
            }
        }
    }

    async fn suggest_topics(&self, text: &str) -> AppResult<Vec<String>> {
        debug!("suggesting topics from {} chars of text", text.len());
        let user_message = format!("Text:\n\"{}\"", text);
        let payload: TopicListPayload = request_json(
            &self.client,
            &self.model,
            "topic_list",
            prompts::TOPIC_SUGGESTION_PROMPT,
            user_message,
        )
        .await?;
        Ok(payload.topics)
    }
}

pub struct OpenAiSummaryProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSummaryProvider {
    pub fn new(config: &Config) -> Self {
        OpenAiSummaryProvider {
            client: build_client(config),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl SummaryProvider for OpenAiSummaryProvider {
    async fn summarize(&self, results: &ResultBreakdown) -> AppResult<String> {
        debug!(
            "summarizing results, topic: '{}', {}/{} correct",
            results.topic, results.correct_count, results.total
        );
        let user_message = format!(
            "Topic: {}\nScore: {}%\nTotal questions: {}\nCorrect answers: {}\nIncorrect answers: {}",
            results.topic,
            results.score_percent,
            results.total,
            results.correct_count,
            results.incorrect_count
        );
        let payload: SummaryPayload = request_json(
            &self.client,
            &self.model,
            "results_summary",
            prompts::RESULTS_SUMMARY_PROMPT,
            user_message,
        )
        .await?;
        Ok(payload.summary)
    }
}
