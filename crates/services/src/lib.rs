#![forbid(unsafe_code)]

pub mod ai;
pub mod error;
pub mod sessions;
pub mod source;

pub use satprep_core::Clock;

pub use ai::{GeminiClient, GeminiConfig};
pub use error::SourceError;
pub use sessions::SessionController;
pub use source::{GeminiQuestionSource, QuestionSource, ScriptedQuestionSource};
