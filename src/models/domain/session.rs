use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz::{Question, Quiz};
use crate::models::domain::results::ResultBreakdown;

/// Tri-state phase of one attempt. The question index is 0-based and only
/// ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Question `i` is shown, no answer chosen yet.
    Presenting(usize),
    /// An answer to question `i` was just recorded; correctness is visible
    /// and the timed advance is pending.
    Revealed(usize),
    /// All questions answered. Terminal.
    Completed,
}

/// Created exactly once per question, at the moment an option is chosen.
/// Immutable afterwards; appended in question order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question_text: String,
    pub chosen_option: String,
    pub correct_option: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Recorded {
        is_correct: bool,
        correct_option: String,
    },
    /// Out-of-phase or unknown-option selects are expected input races
    /// (double clicks), answered by ignoring them, not by erroring.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to presenting the next question.
    Advanced,
    /// The final question's reveal elapsed; the breakdown is computed here,
    /// on the one transition into `Completed`.
    Completed(ResultBreakdown),
    /// The revision fence or phase did not match; nothing changed.
    Stale,
}

/// State machine for one quiz attempt. Purely synchronous: timers, locking,
/// events, and summary fetching live in the service layer on top of it.
///
/// Transitions are `select` (user picks an option while presenting) and
/// `advance_due` (the timed move out of a reveal). Each applied transition
/// bumps `revision`; a scheduled advance carries the revision it was
/// scheduled at and is refused if the session has moved since, which is what
/// makes a dangling timer harmless.
#[derive(Clone, Debug)]
pub struct QuizSession {
    quiz: Quiz,
    phase: Phase,
    answers: Vec<AnswerRecord>,
    revision: u64,
}

impl QuizSession {
    /// A zero-question quiz never enters `Presenting`: scoring against zero
    /// questions is undefined, so it is rejected as a distinct terminal
    /// condition rather than treated as an instantly-completed attempt.
    pub fn new(quiz: Quiz) -> AppResult<Self> {
        if quiz.is_empty() {
            return Err(AppError::EmptyContent(format!(
                "the generated quiz for '{}' contains no questions",
                quiz.topic
            )));
        }

        Ok(QuizSession {
            quiz,
            phase: Phase::Presenting(0),
            answers: Vec::new(),
            revision: 0,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    /// The question currently presented or revealed, with its index.
    /// `None` once completed.
    pub fn current_question(&self) -> Option<(usize, &Question)> {
        match self.phase {
            Phase::Presenting(i) | Phase::Revealed(i) => Some((i, &self.quiz.questions[i])),
            Phase::Completed => None,
        }
    }

    /// The answer just recorded, for the reveal view.
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.answers.last()
    }

    /// Records the user's choice for the current question and moves to the
    /// reveal. No-ops (`Ignored`) outside `Presenting` and for options that
    /// are not part of the current question, leaving state untouched.
    ///
    /// Correctness is literal string equality against `correct_option`. A
    /// malformed question whose correct option is absent from its options
    /// list therefore grades false on every choice; that is deliberate, not
    /// repaired here.
    pub fn select(&mut self, option: &str) -> SelectOutcome {
        let index = match self.phase {
            Phase::Presenting(i) => i,
            Phase::Revealed(_) | Phase::Completed => return SelectOutcome::Ignored,
        };

        let question = &self.quiz.questions[index];
        if !question.options.iter().any(|o| o == option) {
            return SelectOutcome::Ignored;
        }

        let is_correct = option == question.correct_option;
        self.answers.push(AnswerRecord {
            question_text: question.text.clone(),
            chosen_option: option.to_string(),
            correct_option: question.correct_option.clone(),
            is_correct,
        });
        self.phase = Phase::Revealed(index);
        self.revision += 1;

        SelectOutcome::Recorded {
            is_correct,
            correct_option: question.correct_option.clone(),
        }
    }

    /// Applies the timed advance out of a reveal. Only acts when the phase
    /// is still `Revealed` and the session has not moved past the revision
    /// the advance was scheduled at; anything else is `Stale` and leaves the
    /// session untouched.
    pub fn advance_due(&mut self, expected_revision: u64) -> AdvanceOutcome {
        let index = match self.phase {
            Phase::Revealed(i) if self.revision == expected_revision => i,
            _ => return AdvanceOutcome::Stale,
        };

        self.revision += 1;
        if index + 1 < self.quiz.len() {
            self.phase = Phase::Presenting(index + 1);
            AdvanceOutcome::Advanced
        } else {
            self.phase = Phase::Completed;
            AdvanceOutcome::Completed(self.breakdown())
        }
    }

    /// Aggregate of the answers so far. Pure and idempotent; the completed
    /// breakdown is the same value the final `advance_due` returned.
    pub fn breakdown(&self) -> ResultBreakdown {
        ResultBreakdown::new(&self.quiz.topic, self.score(), self.total())
    }

    /// The full ordered answer sequence, available only once completed.
    pub fn review(&self) -> AppResult<&[AnswerRecord]> {
        match self.phase {
            Phase::Completed => Ok(&self.answers),
            _ => Err(AppError::NotCompleted(
                "results are available once all questions are answered".to_string(),
            )),
        }
    }
}
