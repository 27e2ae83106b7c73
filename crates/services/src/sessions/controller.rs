use std::fmt;
use std::sync::Arc;

use satprep_core::model::{
    AnswerOutcome, FetchTicket, OptionIndex, Question, QuestionId, SessionPhase, SessionState,
    SessionStats,
};
use satprep_core::{Clock, Difficulty};
use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::source::QuestionSource;

/// Drives one quiz session: owns the state and makes the source calls.
///
/// Every entry into `Loading` is followed by exactly one `fetch_question`
/// call whose result ends the loading phase. A failed call leaves the session
/// in `Error` for good; start a new controller to recover.
pub struct SessionController {
    source: Arc<dyn QuestionSource>,
    clock: Clock,
    state: SessionState,
}

impl SessionController {
    /// Start a session and load its first question at the initial rating.
    pub async fn start(source: Arc<dyn QuestionSource>, clock: Clock) -> Self {
        let (state, ticket) = SessionState::start();
        let mut controller = Self {
            source,
            clock,
            state,
        };
        controller.load(ticket).await;
        controller
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<OptionIndex> {
        self.state.selected_option()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty()
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.state.streak()
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.state.stats()
    }

    /// Select an option; ignored unless a question is active.
    pub fn select_option(&mut self, index: OptionIndex) -> bool {
        self.state.select_option(index)
    }

    /// Score the selected option. `None` when nothing is selected or not active.
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        let outcome = self.state.submit()?;
        info!(
            question = %outcome.question_id,
            correct = outcome.is_correct,
            streak = outcome.streak,
            difficulty = %outcome.difficulty_after,
            "answer scored"
        );
        Some(outcome)
    }

    /// Load the next question after review. Returns whether a request was made.
    pub async fn next(&mut self) -> bool {
        match self.state.next() {
            Some(ticket) => {
                self.load(ticket).await;
                true
            }
            None => false,
        }
    }

    /// Load a new question without scoring. Returns whether a request was made.
    pub async fn skip(&mut self) -> bool {
        match self.state.skip() {
            Some(ticket) => {
                debug!(difficulty = %self.state.difficulty(), "question skipped");
                self.load(ticket).await;
                true
            }
            None => false,
        }
    }

    async fn load(&mut self, ticket: FetchTicket) {
        let difficulty = ticket.difficulty();
        debug!(%difficulty, tier = %difficulty.tier(), seq = ticket.seq(), "requesting question");

        let accepted = self
            .source
            .fetch_question(difficulty)
            .await
            .and_then(|draft| {
                draft
                    .validate(QuestionId::generate(), difficulty, self.clock.now())
                    .map_err(SourceError::from)
            });

        match accepted {
            Ok(question) => {
                info!(
                    question = %question.id(),
                    topic = question.topic(),
                    %difficulty,
                    "question received"
                );
                self.state.accept_question(ticket, question);
            }
            Err(err) => self.fail(ticket, &err),
        }
    }

    fn fail(&mut self, ticket: FetchTicket, err: &SourceError) {
        let kind = err.kind();
        warn!(?kind, error = %err, "question request failed");
        self.state.fail(ticket, kind);
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("clock", &self.clock)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
