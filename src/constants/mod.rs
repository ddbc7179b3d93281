pub mod prompts;

/// Shown in place of a generated summary when the summary provider fails.
pub const FALLBACK_SUMMARY: &str =
    "Sorry, we couldn't generate a summary for your results right now.";

/// Topic suggestion only reads the head of the document to keep prompts small.
pub const TOPIC_SAMPLE_MAX_CHARS: usize = 5000;

pub const DEFAULT_NUM_QUESTIONS: u8 = 10;
