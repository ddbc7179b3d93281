use serde::Serialize;

use crate::models::domain::{AnswerRecord, Phase, QuizSession, ResultBreakdown};

/// The question as shown to the user. Never carries the correct option;
/// that surfaces only in reveal and review views.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<String>,
}

/// Correctness feedback for the answer just recorded.
#[derive(Debug, Clone, Serialize)]
pub struct RevealView {
    pub chosen_option: String,
    pub is_correct: bool,
    pub correct_option: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub topic: String,
    pub total_questions: usize,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<RevealView>,
}

impl SessionView {
    pub fn new(session_id: &str, session: &QuizSession) -> Self {
        let question = session.current_question().map(|(index, q)| QuestionView {
            index,
            total: session.total(),
            text: q.text.clone(),
            options: q.options.clone(),
        });

        let (state, reveal) = match session.phase() {
            Phase::Presenting(_) => ("presenting", None),
            Phase::Revealed(_) => (
                "revealed",
                session.last_answer().map(|a| RevealView {
                    chosen_option: a.chosen_option.clone(),
                    is_correct: a.is_correct,
                    correct_option: a.correct_option.clone(),
                }),
            ),
            Phase::Completed => ("completed", None),
        };

        SessionView {
            session_id: session_id.to_string(),
            topic: session.quiz().topic.clone(),
            total_questions: session.total(),
            state: state.to_string(),
            question,
            reveal,
        }
    }
}

/// Outcome of one answer submission. `recorded` is false when the select
/// was ignored (wrong phase or unknown option) and the session is unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub recorded: bool,
    pub celebrate: bool,
    pub session: SessionView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntryView {
    pub question: String,
    pub chosen_option: String,
    pub correct_option: String,
    pub is_correct: bool,
}

impl From<&AnswerRecord> for ReviewEntryView {
    fn from(record: &AnswerRecord) -> Self {
        ReviewEntryView {
            question: record.question_text.clone(),
            chosen_option: record.chosen_option.clone(),
            correct_option: record.correct_option.clone(),
            is_correct: record.is_correct,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub topic: String,
    pub total: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub score_percent: u8,
    /// Present once the summary provider answered (or the fallback was
    /// applied); `summary_pending` covers the in-flight window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub summary_pending: bool,
    pub review: Vec<ReviewEntryView>,
}

impl ResultsResponse {
    pub fn new(
        breakdown: ResultBreakdown,
        summary: Option<String>,
        review: &[AnswerRecord],
    ) -> Self {
        ResultsResponse {
            topic: breakdown.topic,
            total: breakdown.total,
            correct_count: breakdown.correct_count,
            incorrect_count: breakdown.incorrect_count,
            score_percent: breakdown.score_percent,
            summary_pending: summary.is_none(),
            summary,
            review: review.iter().map(ReviewEntryView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteSessionResponse {
    pub message: String,
}
