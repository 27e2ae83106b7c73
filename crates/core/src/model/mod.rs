mod ids;
mod question;
mod session;

pub use ids::QuestionId;
pub use question::{OPTION_COUNT, OptionIndex, OptionIndexError, Question, QuestionDraft, QuestionError};
pub use session::{
    AnswerOutcome, FailureKind, FetchTicket, SessionPhase, SessionState, SessionStats,
};
