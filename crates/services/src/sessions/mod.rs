mod controller;

// Public API of the session subsystem.
pub use controller::SessionController;
pub use satprep_core::model::{AnswerOutcome, FailureKind, SessionPhase, SessionState, SessionStats};
