use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::domain::ResultBreakdown;

/// Best-effort source of the natural-language results recap. Callers must
/// recover from failure with a fallback string; a broken summary provider
/// never blocks showing the score.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summarize(&self, results: &ResultBreakdown) -> AppResult<String>;
}
