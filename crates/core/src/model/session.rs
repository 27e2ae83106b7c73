use std::fmt;

use uuid::Uuid;

use crate::difficulty::Difficulty;
use crate::model::{OptionIndex, Question, QuestionId};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the session is in the answer/review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Waiting on the single outstanding question request.
    Loading,
    /// A question is shown and the user is choosing an option.
    Active,
    /// The answer was scored and the explanation is shown.
    Review,
    /// A request failed. Terminal; the caller has to start a new session.
    Error,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "loading",
            Self::Active => "active",
            Self::Review => "review",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Why a question request ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The call itself failed (network, auth, quota, disabled source).
    SourceUnavailable,
    /// The call succeeded but the content broke the question contract.
    MalformedResponse,
}

//
// ─── FETCH TICKET ──────────────────────────────────────────────────────────────
//

/// The one outstanding question request of a session.
///
/// Only [`SessionState`] hands these out, and only when it enters `Loading`.
/// A ticket is not `Clone`: resolving it consumes it, so each entry into
/// `Loading` pairs with exactly one source call. Tickets are bound to the
/// session that issued them.
#[derive(Debug, PartialEq)]
#[must_use = "a fetch ticket must be resolved with exactly one source call"]
pub struct FetchTicket {
    session: Uuid,
    seq: u64,
    difficulty: Difficulty,
}

impl FetchTicket {
    /// Rating the question should be generated at.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

//
// ─── ANSWERS & STATS ───────────────────────────────────────────────────────────
//

/// Result of scoring one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
    pub question_id: QuestionId,
    pub selected: OptionIndex,
    pub correct: OptionIndex,
    pub is_correct: bool,
    pub difficulty_before: Difficulty,
    pub difficulty_after: Difficulty,
    pub streak: u32,
}

/// Running totals for the session. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: u32,
    pub correct: u32,
}

impl SessionStats {
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.answered.saturating_sub(self.correct)
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Mutable quiz state for one session and the transitions between phases.
///
/// Every operation is a no-op (returning `false` / `None`) when the current
/// phase does not allow it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    phase: SessionPhase,
    current_question: Option<Question>,
    selected_option: Option<OptionIndex>,
    difficulty: Difficulty,
    streak: u32,
    stats: SessionStats,
    last_answer: Option<AnswerOutcome>,
    failure: Option<FailureKind>,
    session: Uuid,
    pending: Option<u64>,
    next_seq: u64,
}

impl SessionState {
    /// Fresh session at the initial rating, already `Loading` its first question.
    pub fn start() -> (Self, FetchTicket) {
        let mut state = Self {
            phase: SessionPhase::Loading,
            current_question: None,
            selected_option: None,
            difficulty: Difficulty::initial(),
            streak: 0,
            stats: SessionStats::default(),
            last_answer: None,
            failure: None,
            session: Uuid::new_v4(),
            pending: None,
            next_seq: 0,
        };
        let ticket = state.enter_loading();
        (state, ticket)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<OptionIndex> {
        self.selected_option
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Outcome of the answer currently under review.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerOutcome> {
        match self.phase {
            SessionPhase::Review => self.last_answer.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Select an option. Overwrites any earlier selection; ignored outside `Active`.
    pub fn select_option(&mut self, index: OptionIndex) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.selected_option = Some(index);
        true
    }

    /// Score the selected option and move to `Review`.
    ///
    /// Returns `None` without touching any state when not `Active` or when
    /// nothing is selected.
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let selected = self.selected_option?;
        let question = self.current_question.as_ref()?;

        let is_correct = question.is_correct(selected);
        let difficulty_before = self.difficulty;
        self.difficulty = difficulty_before.after_answer(is_correct);
        self.streak = if is_correct { self.streak.saturating_add(1) } else { 0 };
        self.stats.answered = self.stats.answered.saturating_add(1);
        if is_correct {
            self.stats.correct = self.stats.correct.saturating_add(1);
        }

        let outcome = AnswerOutcome {
            question_id: question.id(),
            selected,
            correct: question.correct_index(),
            is_correct,
            difficulty_before,
            difficulty_after: self.difficulty,
            streak: self.streak,
        };
        self.last_answer = Some(outcome);
        self.phase = SessionPhase::Review;
        Some(outcome)
    }

    /// Request the next question after reviewing an answer.
    pub fn next(&mut self) -> Option<FetchTicket> {
        match self.phase {
            SessionPhase::Review => Some(self.enter_loading()),
            _ => None,
        }
    }

    /// Request a new question without scoring. Allowed from `Active` and `Review`.
    ///
    /// Streak, difficulty and stats are left alone.
    pub fn skip(&mut self) -> Option<FetchTicket> {
        match self.phase {
            SessionPhase::Active | SessionPhase::Review => Some(self.enter_loading()),
            _ => None,
        }
    }

    /// Resolve the outstanding request with a validated question.
    ///
    /// A ticket that is not the pending one of this session is dropped and
    /// `false` returned.
    pub fn accept_question(&mut self, ticket: FetchTicket, question: Question) -> bool {
        if !self.take_pending(&ticket) {
            return false;
        }
        self.current_question = Some(question);
        self.selected_option = None;
        self.last_answer = None;
        self.phase = SessionPhase::Active;
        true
    }

    /// Resolve the outstanding request as failed. The session ends in `Error`.
    pub fn fail(&mut self, ticket: FetchTicket, kind: FailureKind) -> bool {
        if !self.take_pending(&ticket) {
            return false;
        }
        self.failure = Some(kind);
        self.phase = SessionPhase::Error;
        true
    }

    fn enter_loading(&mut self) -> FetchTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(seq);
        self.phase = SessionPhase::Loading;
        FetchTicket {
            session: self.session,
            seq,
            difficulty: self.difficulty,
        }
    }

    fn take_pending(&mut self, ticket: &FetchTicket) -> bool {
        if self.phase != SessionPhase::Loading
            || ticket.session != self.session
            || self.pending != Some(ticket.seq)
        {
            return false;
        }
        self.pending = None;
        true
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
