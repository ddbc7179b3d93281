pub mod quiz_service;
pub mod topic_service;

pub use quiz_service::{CelebrateEvent, QuizService};
pub use topic_service::TopicService;
