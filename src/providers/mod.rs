pub mod content;
pub mod openai;
pub mod summary;

pub use content::{ContentProvider, ContentRequest, GeneratedContent};
pub use openai::{OpenAiContentProvider, OpenAiSummaryProvider};
pub use summary::SummaryProvider;
