pub mod quiz;
pub mod results;
pub mod session;
pub use quiz::{Difficulty, Question, Quiz};
pub use results::ResultBreakdown;
pub use session::{AdvanceOutcome, AnswerRecord, Phase, QuizSession, SelectOutcome};
