use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::{
    config::Config,
    providers::{ContentProvider, OpenAiContentProvider, OpenAiSummaryProvider, SummaryProvider},
    services::{CelebrateEvent, QuizService, TopicService},
    store::{spawn_sweeper, SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub topic_service: Arc<TopicService>,
    pub config: Arc<Config>,
    pub celebrations: broadcast::Sender<CelebrateEvent>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let content_provider: Arc<dyn ContentProvider> =
            Arc::new(OpenAiContentProvider::new(&config));
        let summary_provider: Arc<dyn SummaryProvider> =
            Arc::new(OpenAiSummaryProvider::new(&config));
        Self::with_providers(config, content_provider, summary_provider)
    }

    /// Wires the services around injected providers; tests pass scripted
    /// fakes here and production passes the OpenAI-backed ones.
    pub fn with_providers(
        config: Config,
        content_provider: Arc<dyn ContentProvider>,
        summary_provider: Arc<dyn SummaryProvider>,
    ) -> Self {
        let store = Arc::new(SessionStore::new(
            config.session_ttl_seconds,
            config.max_sessions,
        ));
        spawn_sweeper(&store);

        let (celebrations, _) = broadcast::channel(64);

        let quiz_service = Arc::new(QuizService::new(
            Arc::clone(&content_provider),
            summary_provider,
            store,
            celebrations.clone(),
            Duration::from_millis(config.advance_delay_ms),
        ));
        let topic_service = Arc::new(TopicService::new(content_provider));

        Self {
            quiz_service,
            topic_service,
            config: Arc::new(config),
            celebrations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
