pub mod gemini;
pub mod prompt;

pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::{question_prompt, question_schema, tier_description};
