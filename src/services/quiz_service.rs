use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::broadcast;

use crate::constants::FALLBACK_SUMMARY;
use crate::errors::AppResult;
use crate::models::domain::{AdvanceOutcome, Quiz, QuizSession, ResultBreakdown, SelectOutcome};
use crate::models::dto::response::{AnswerResponse, ResultsResponse, SessionView};
use crate::providers::{ContentProvider, ContentRequest, SummaryProvider};
use crate::store::{SessionStore, StoredSession, SummaryState};

/// Emitted when an answer is correct, for the presentation layer's reward
/// cue. Fire-and-forget: sends are never awaited and a send with no
/// receivers is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CelebrateEvent {
    pub session_id: String,
    pub question_index: usize,
}

/// Async shell around the `QuizSession` state machine: obtains content from
/// the provider, applies selects under the session's lock, schedules the
/// timed advance, and orchestrates the post-completion summary fetch.
pub struct QuizService {
    content_provider: Arc<dyn ContentProvider>,
    summary_provider: Arc<dyn SummaryProvider>,
    store: Arc<SessionStore>,
    celebrations: broadcast::Sender<CelebrateEvent>,
    advance_delay: Duration,
}

impl QuizService {
    pub fn new(
        content_provider: Arc<dyn ContentProvider>,
        summary_provider: Arc<dyn SummaryProvider>,
        store: Arc<SessionStore>,
        celebrations: broadcast::Sender<CelebrateEvent>,
        advance_delay: Duration,
    ) -> Self {
        Self {
            content_provider,
            summary_provider,
            store,
            celebrations,
            advance_delay,
        }
    }

    /// Generates a quiz via the content provider and opens a session on it.
    /// Provider failures surface whole and leave no partial session behind;
    /// zero generated questions are rejected by the session constructor as
    /// the distinct empty-content condition.
    pub async fn create_session(&self, request: ContentRequest) -> AppResult<SessionView> {
        let requested_topic = request.requested_topic().map(str::to_string);
        let content = self.content_provider.generate(&request).await?;

        let topic = content
            .topic
            .or(requested_topic)
            .unwrap_or_else(|| "General knowledge".to_string());
        let quiz = Quiz::new(&topic, content.questions);

        for (index, question) in quiz.questions.iter().enumerate() {
            if !question.is_well_formed() {
                warn!(
                    "quiz {}: question {} has a correct option absent from its options; \
                     it will grade false on every choice",
                    quiz.id, index
                );
            }
        }

        let session = QuizSession::new(quiz)?;
        let view_source = session.clone();
        let session_id = self.store.insert(session).await;
        info!(
            "session {} opened, topic '{}', {} question(s)",
            session_id,
            view_source.quiz().topic,
            view_source.total()
        );

        Ok(SessionView::new(&session_id, &view_source))
    }

    pub async fn session_view(&self, session_id: &str) -> AppResult<SessionView> {
        let slot = self.store.get(session_id).await?;
        let stored = slot.lock().await;
        Ok(SessionView::new(session_id, &stored.session))
    }

    /// Applies one option selection. An out-of-phase or unknown-option
    /// select is answered `recorded: false` with the session untouched;
    /// a recorded select schedules the timed advance and, when correct,
    /// emits a celebrate event.
    pub async fn answer(&self, session_id: &str, option: &str) -> AppResult<AnswerResponse> {
        let slot = self.store.get(session_id).await?;
        let mut stored = slot.lock().await;

        match stored.session.select(option) {
            SelectOutcome::Ignored => {
                debug!("session {}: ignored select of '{}'", session_id, option);
                Ok(AnswerResponse {
                    recorded: false,
                    celebrate: false,
                    session: SessionView::new(session_id, &stored.session),
                })
            }
            SelectOutcome::Recorded { is_correct, .. } => {
                if is_correct {
                    if let Some((question_index, _)) = stored.session.current_question() {
                        // No receivers is fine; the cue never affects state.
                        let _ = self.celebrations.send(CelebrateEvent {
                            session_id: session_id.to_string(),
                            question_index,
                        });
                    }
                }
                self.schedule_advance(session_id, &mut stored);
                Ok(AnswerResponse {
                    recorded: true,
                    celebrate: is_correct,
                    session: SessionView::new(session_id, &stored.session),
                })
            }
        }
    }

    /// Completed sessions only: the breakdown, the summary (or its pending
    /// flag while the fetch is in flight), and the full review.
    pub async fn results(&self, session_id: &str) -> AppResult<ResultsResponse> {
        let slot = self.store.get(session_id).await?;
        let stored = slot.lock().await;

        let review = stored.session.review()?;
        let breakdown = stored.session.breakdown();
        let summary = match &stored.summary {
            SummaryState::Ready(text) => Some(text.clone()),
            SummaryState::Pending => None,
        };
        Ok(ResultsResponse::new(breakdown, summary, review))
    }

    pub async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        self.store.remove(session_id).await?;
        info!("session {} discarded", session_id);
        Ok(())
    }

    pub fn subscribe_celebrations(&self) -> broadcast::Receiver<CelebrateEvent> {
        self.celebrations.subscribe()
    }

    pub async fn live_sessions(&self) -> usize {
        self.store.len().await
    }

    /// Schedules the reveal-to-next transition as an abortable task. The
    /// task re-finds the session by id and carries the revision it was
    /// scheduled at, so firing after deletion or a newer transition does
    /// nothing.
    fn schedule_advance(&self, session_id: &str, stored: &mut StoredSession) {
        if let Some(previous) = stored.pending_advance.take() {
            previous.abort();
        }

        let delay = self.advance_delay;
        let expected_revision = stored.session.revision();
        let store = Arc::clone(&self.store);
        let summary_provider = Arc::clone(&self.summary_provider);
        let session_id = session_id.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            apply_due_advance(store, summary_provider, session_id, expected_revision).await;
        });
        stored.pending_advance = Some(handle.abort_handle());
    }
}

async fn apply_due_advance(
    store: Arc<SessionStore>,
    summary_provider: Arc<dyn SummaryProvider>,
    session_id: String,
    expected_revision: u64,
) {
    let Ok(slot) = store.get(&session_id).await else {
        // The session was discarded while the timer was pending.
        return;
    };
    let mut stored = slot.lock().await;
    stored.pending_advance = None;

    match stored.session.advance_due(expected_revision) {
        AdvanceOutcome::Stale => {
            debug!("session {}: stale advance ignored", session_id);
        }
        AdvanceOutcome::Advanced => {
            debug!("session {}: advanced to the next question", session_id);
        }
        AdvanceOutcome::Completed(breakdown) => {
            info!(
                "session {} completed, {}/{} correct ({}%)",
                session_id, breakdown.correct_count, breakdown.total, breakdown.score_percent
            );
            drop(stored);
            spawn_summary_fetch(store, summary_provider, session_id, breakdown);
        }
    }
}

/// Fetches the summary in its own task so a slow or failing provider never
/// delays the results view. Failure is recovered with the fixed fallback
/// string; the text attaches once to the already-terminal session.
fn spawn_summary_fetch(
    store: Arc<SessionStore>,
    summary_provider: Arc<dyn SummaryProvider>,
    session_id: String,
    breakdown: ResultBreakdown,
) {
    tokio::spawn(async move {
        let summary = match summary_provider.summarize(&breakdown).await {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    "session {}: summary fetch failed ({}), using fallback",
                    session_id, err
                );
                FALLBACK_SUMMARY.to_string()
            }
        };

        let Ok(slot) = store.get(&session_id).await else {
            return;
        };
        let mut stored = slot.lock().await;
        if stored.summary == SummaryState::Pending {
            stored.summary = SummaryState::Ready(summary);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::domain::{Difficulty, Question};
    use crate::providers::content::MockContentProvider;
    use crate::providers::summary::MockSummaryProvider;
    use crate::providers::GeneratedContent;

    fn make_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                text: format!("Question {}?", i + 1),
                options: vec![
                    format!("A{}", i),
                    format!("B{}", i),
                    format!("C{}", i),
                    format!("D{}", i),
                ],
                correct_option: format!("A{}", i),
            })
            .collect()
    }

    fn make_service(
        content_provider: MockContentProvider,
        summary_provider: MockSummaryProvider,
    ) -> QuizService {
        let (celebrations, _) = broadcast::channel(16);
        QuizService::new(
            Arc::new(content_provider),
            Arc::new(summary_provider),
            Arc::new(SessionStore::new(3600, 100)),
            celebrations,
            Duration::from_millis(0),
        )
    }

    fn topic_request(topic: &str) -> ContentRequest {
        ContentRequest::Topic {
            topic: topic.to_string(),
            num_questions: 3,
            difficulty: Difficulty::Medium,
        }
    }

    #[tokio::test]
    async fn create_session_keeps_the_requested_topic() {
        let mut content = MockContentProvider::new();
        content.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                topic: None,
                questions: make_questions(3),
            })
        });
        let service = make_service(content, MockSummaryProvider::new());

        let view = service
            .create_session(topic_request("Rust lifetimes"))
            .await
            .expect("session should open");

        assert_eq!(view.topic, "Rust lifetimes");
        assert_eq!(view.total_questions, 3);
        assert_eq!(view.state, "presenting");
    }

    #[tokio::test]
    async fn create_session_prefers_the_provider_resolved_topic() {
        let mut content = MockContentProvider::new();
        content.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                topic: Some("Photosynthesis".to_string()),
                questions: make_questions(2),
            })
        });
        let service = make_service(content, MockSummaryProvider::new());

        let view = service
            .create_session(ContentRequest::Document {
                extracted_text: "chlorophyll absorbs light".to_string(),
            })
            .await
            .expect("session should open");

        assert_eq!(view.topic, "Photosynthesis");
    }

    #[tokio::test]
    async fn create_session_rejects_zero_questions_as_empty_content() {
        let mut content = MockContentProvider::new();
        content.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                topic: None,
                questions: vec![],
            })
        });
        let service = make_service(content, MockSummaryProvider::new());

        let err = service
            .create_session(topic_request("Obscurities"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyContent(_)));
        assert_eq!(service.live_sessions().await, 0);
    }

    #[tokio::test]
    async fn create_session_surfaces_provider_failure_whole() {
        let mut content = MockContentProvider::new();
        content
            .expect_generate()
            .returning(|_| Err(AppError::ContentUnavailable("model offline".to_string())));
        let service = make_service(content, MockSummaryProvider::new());

        let err = service
            .create_session(topic_request("Anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ContentUnavailable(_)));
        assert_eq!(service.live_sessions().await, 0);
    }

    #[tokio::test]
    async fn answer_to_unknown_session_is_not_found() {
        let service = make_service(MockContentProvider::new(), MockSummaryProvider::new());

        let err = service.answer("no-such-session", "A0").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn correct_answer_celebrates_and_schedules_completion() {
        let mut content = MockContentProvider::new();
        content.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                topic: None,
                questions: make_questions(1),
            })
        });
        let mut summary = MockSummaryProvider::new();
        summary
            .expect_summarize()
            .returning(|_| Ok("Nice work!".to_string()));
        let service = make_service(content, summary);

        let mut celebrations = service.subscribe_celebrations();
        let view = service
            .create_session(topic_request("Geography"))
            .await
            .expect("session should open");

        let response = service
            .answer(&view.session_id, "A0")
            .await
            .expect("answer should apply");
        assert!(response.recorded);
        assert!(response.celebrate);
        assert_eq!(response.session.state, "revealed");

        let event = celebrations.recv().await.expect("celebrate event expected");
        assert_eq!(event.session_id, view.session_id);
        assert_eq!(event.question_index, 0);

        // Zero delay: the advance and the summary fetch settle quickly.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let results = service
            .results(&view.session_id)
            .await
            .expect("results should be ready");
        assert_eq!(results.score_percent, 100);
        assert_eq!(results.summary.as_deref(), Some("Nice work!"));
        assert!(!results.summary_pending);
    }

    #[tokio::test]
    async fn incorrect_answer_does_not_celebrate() {
        let mut content = MockContentProvider::new();
        content.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                topic: None,
                questions: make_questions(2),
            })
        });
        let service = make_service(content, MockSummaryProvider::new());

        let mut celebrations = service.subscribe_celebrations();
        let view = service
            .create_session(topic_request("History"))
            .await
            .expect("session should open");

        let response = service
            .answer(&view.session_id, "B0")
            .await
            .expect("answer should apply");
        assert!(response.recorded);
        assert!(!response.celebrate);
        assert!(matches!(
            celebrations.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn timer_firing_after_delete_mutates_nothing() {
        let mut content = MockContentProvider::new();
        content.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                topic: None,
                questions: make_questions(2),
            })
        });
        let service = make_service(content, MockSummaryProvider::new());

        let view = service
            .create_session(topic_request("Astronomy"))
            .await
            .expect("session should open");
        service
            .answer(&view.session_id, "A0")
            .await
            .expect("answer should apply");
        service
            .delete_session(&view.session_id)
            .await
            .expect("delete should succeed");

        // Give any dangling timer a chance to fire against the gone session.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let err = service.session_view(&view.session_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
