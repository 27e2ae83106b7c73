use std::fmt;

use satprep_core::model::{OptionIndex, SessionPhase};
use thiserror::Error;

/// One line of user input in the quiz loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(OptionIndex),
    /// Bare Enter: check in Active, next in Review.
    Continue,
    Check,
    Next,
    Skip,
    ShowDiagrams,
    Restart,
    Help,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(index) => write!(f, "Selecting {index}"),
            Self::Continue => f.write_str("Enter"),
            Self::Check => f.write_str("Check"),
            Self::Next => f.write_str("Next"),
            Self::Skip => f.write_str("Skip"),
            Self::ShowDiagrams => f.write_str("Diagrams"),
            Self::Restart => f.write_str("Restart"),
            Self::Help => f.write_str("Help"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// What the quiz loop does with a command in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    ShowDiagrams,
    Restart,
    Select(OptionIndex),
    Check,
    Next,
    Skip,
    Unavailable {
        command: Command,
        phase: SessionPhase,
    },
}

/// Decide which action a command triggers in `phase`.
///
/// Quit, help and diagrams work everywhere. Enter checks in `Active` and
/// advances in `Review`; restart is only offered after an error.
#[must_use]
pub fn dispatch(phase: SessionPhase, command: Command) -> Action {
    match (phase, command) {
        (_, Command::Quit) => Action::Quit,
        (_, Command::Help) => Action::Help,
        (_, Command::ShowDiagrams) => Action::ShowDiagrams,
        (SessionPhase::Error, Command::Restart) => Action::Restart,
        (SessionPhase::Active, Command::Select(index)) => Action::Select(index),
        (SessionPhase::Active, Command::Continue | Command::Check) => Action::Check,
        (SessionPhase::Review, Command::Continue | Command::Next) => Action::Next,
        (SessionPhase::Active | SessionPhase::Review, Command::Skip) => Action::Skip,
        (phase, command) => Action::Unavailable { command, phase },
    }
}

/// Message shown for a command the current phase does not accept.
#[must_use]
pub fn unavailable_message(command: Command, phase: SessionPhase) -> String {
    let screen = match phase {
        SessionPhase::Loading => "loading",
        SessionPhase::Active => "question",
        SessionPhase::Review => "review",
        SessionPhase::Error => "error",
    };
    format!("{command} is not available on the {screen} screen.")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unrecognized input: {0:?} (type h for help)")]
    Unknown(String),
}

/// # Errors
///
/// Returns `InputError::Unknown` for anything that is not a command.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let trimmed = line.trim().to_ascii_lowercase();
    let command = match trimmed.as_str() {
        "" => Command::Continue,
        "check" | "ok" => Command::Check,
        "n" | "next" => Command::Next,
        "s" | "skip" => Command::Skip,
        "v" | "svg" => Command::ShowDiagrams,
        "r" | "restart" => Command::Restart,
        "h" | "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => OptionIndex::from_letter(letter)
                    .map(Command::Select)
                    .map_err(|_| InputError::Unknown(line.trim().to_string()))?,
                _ => return Err(InputError::Unknown(line.trim().to_string())),
            }
        }
    };
    Ok(command)
}
