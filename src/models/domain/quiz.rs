use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated quiz: an ordered, non-empty list of questions tagged with
/// the topic it was generated for. For document-origin quizzes the topic is
/// the label the content provider resolved from the text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub topic: String,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>, // four distinct options in well-formed content
    pub correct_option: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl Quiz {
    pub fn new(topic: &str, questions: Vec<Question>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Question {
    /// Well-formed content has `correct_option` equal to exactly one entry of
    /// `options`. The provider owns this invariant; here it is only observed
    /// (for logging), never repaired. A violating question simply grades
    /// false on every choice that doesn't match by string equality.
    pub fn is_well_formed(&self) -> bool {
        self.options
            .iter()
            .filter(|o| *o == &self.correct_option)
            .count()
            == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_question(correct: &str) -> Question {
        Question {
            text: "Which planet is known as the red planet?".to_string(),
            options: vec![
                "Venus".to_string(),
                "Mars".to_string(),
                "Jupiter".to_string(),
                "Saturn".to_string(),
            ],
            correct_option: correct.to_string(),
        }
    }

    #[test]
    fn question_with_matching_correct_option_is_well_formed() {
        assert!(make_question("Mars").is_well_formed());
    }

    #[test]
    fn question_with_absent_correct_option_is_not_well_formed() {
        assert!(!make_question("Pluto").is_well_formed());
    }

    #[test]
    fn question_with_duplicated_correct_option_is_not_well_formed() {
        let mut question = make_question("Mars");
        question.options[3] = "Mars".to_string();
        assert!(!question.is_well_formed());
    }

    #[test]
    fn quiz_new_assigns_unique_ids() {
        let a = Quiz::new("Astronomy", vec![make_question("Mars")]);
        let b = Quiz::new("Astronomy", vec![make_question("Mars")]);
        assert_ne!(a.id, b.id);
        assert_eq!(a.len(), 1);
        assert!(!a.is_empty());
    }

    #[test]
    fn difficulty_round_trip_serialization() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let json = serde_json::to_string(&difficulty).expect("difficulty should serialize");
            let parsed: Difficulty =
                serde_json::from_str(&json).expect("difficulty should deserialize");
            assert_eq!(difficulty, parsed);
        }
    }

    #[test]
    fn difficulty_uses_lowercase_wire_format() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).expect("should serialize"),
            "\"medium\""
        );
        assert!(serde_json::from_str::<Difficulty>("\"Extreme\"").is_err());
    }
}
