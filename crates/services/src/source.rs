use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use satprep_core::Difficulty;
use satprep_core::model::QuestionDraft;
use tracing::debug;

use crate::ai::{GeminiClient, question_prompt, question_schema};
use crate::error::SourceError;

/// Produces one question per call for a target difficulty.
///
/// Calls are independent: no caching, no retry. Any failure means no question.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_question(&self, difficulty: Difficulty) -> Result<QuestionDraft, SourceError>;
}

//
// ─── GEMINI ────────────────────────────────────────────────────────────────────
//

/// Question source backed by the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiQuestionSource {
    client: GeminiClient,
}

impl GeminiQuestionSource {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.client.enabled()
    }
}

#[async_trait]
impl QuestionSource for GeminiQuestionSource {
    async fn fetch_question(&self, difficulty: Difficulty) -> Result<QuestionDraft, SourceError> {
        let prompt = question_prompt(difficulty);
        let text = self.client.generate_json(&prompt, &question_schema()).await?;
        debug!(bytes = text.len(), "received question payload");
        Ok(serde_json::from_str(strip_code_fence(&text))?)
    }
}

/// Models occasionally wrap JSON in a markdown fence despite the mime type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

//
// ─── SCRIPTED ──────────────────────────────────────────────────────────────────
//

/// In-memory source that replays queued replies and records every request.
///
/// Once the queue is empty every call fails with `SourceError::EmptyResponse`.
#[derive(Clone, Default)]
pub struct ScriptedQuestionSource {
    replies: Arc<Mutex<VecDeque<Result<QuestionDraft, SourceError>>>>,
    requests: Arc<Mutex<Vec<Difficulty>>>,
}

impl ScriptedQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_question(&self, draft: QuestionDraft) {
        self.push_reply(Ok(draft));
    }

    pub fn push_failure(&self, error: SourceError) {
        self.push_reply(Err(error));
    }

    fn push_reply(&self, reply: Result<QuestionDraft, SourceError>) {
        if let Ok(mut guard) = self.replies.lock() {
            guard.push_back(reply);
        }
    }

    /// Difficulties of every request made so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<Difficulty> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl QuestionSource for ScriptedQuestionSource {
    async fn fetch_question(&self, difficulty: Difficulty) -> Result<QuestionDraft, SourceError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(difficulty);
        }
        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut guard| guard.pop_front());
        reply.unwrap_or(Err(SourceError::EmptyResponse))
    }
}
