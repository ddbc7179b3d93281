use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::TOPIC_SAMPLE_MAX_CHARS;
use crate::errors::{AppError, AppResult};
use crate::providers::ContentProvider;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex compiles"));

/// Suggests quiz topics from document text: normalizes the text to a small
/// sample and delegates to the content provider.
pub struct TopicService {
    content_provider: Arc<dyn ContentProvider>,
}

impl TopicService {
    pub fn new(content_provider: Arc<dyn ContentProvider>) -> Self {
        Self { content_provider }
    }

    pub async fn suggest_topics(&self, extracted_text: &str) -> AppResult<Vec<String>> {
        let sample = sample_text(extracted_text)?;
        debug!("suggesting topics from a {}-char sample", sample.chars().count());
        self.content_provider.suggest_topics(&sample).await
    }
}

/// Collapses whitespace runs to single spaces and keeps only the head of the
/// document, so the prompt stays small regardless of upload size. Text that
/// is blank after trimming is rejected.
fn sample_text(text: &str) -> AppResult<String> {
    let collapsed = WHITESPACE.replace_all(text.trim(), " ");
    if collapsed.is_empty() {
        return Err(AppError::ValidationError(
            "document text is empty".to_string(),
        ));
    }
    Ok(collapsed.chars().take(TOPIC_SAMPLE_MAX_CHARS).collect())
}
