use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::difficulty::Difficulty;
use crate::model::ids::QuestionId;

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Contract violations found while accepting a question from the source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected 4 options, got {count}")]
    WrongOptionCount { count: usize },

    #[error("correct index {index} is outside 0..4")]
    CorrectIndexOutOfRange { index: i64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionIndexError {
    #[error("option index must be in 0..4, got {0}")]
    OutOfRange(usize),
    #[error("unknown option label: {0}")]
    UnknownLabel(char),
}

//
// ─── OPTION INDEX ──────────────────────────────────────────────────────────────
//

/// Position of an answer option, always in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// # Errors
    ///
    /// Returns `OptionIndexError::OutOfRange` for values outside `0..4`.
    pub fn new(index: usize) -> Result<Self, OptionIndexError> {
        u8::try_from(index)
            .ok()
            .filter(|value| usize::from(*value) < OPTION_COUNT)
            .map(Self)
            .ok_or(OptionIndexError::OutOfRange(index))
    }

    /// Parses an `A`-`D` label, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `OptionIndexError::UnknownLabel` for any other character.
    pub fn from_letter(letter: char) -> Result<Self, OptionIndexError> {
        match letter.to_ascii_uppercase() {
            'A' => Ok(Self(0)),
            'B' => Ok(Self(1)),
            'C' => Ok(Self(2)),
            'D' => Ok(Self(3)),
            _ => Err(OptionIndexError::UnknownLabel(letter)),
        }
    }

    #[must_use]
    pub fn value(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + self.0)
    }

    /// All four indices in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..OPTION_COUNT as u8).map(Self)
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw question shape as returned by the source.
///
/// Required fields are non-optional so a missing one fails deserialization;
/// the option count and index range are checked by [`QuestionDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub stem: String,
    pub options: Vec<String>,
    pub correct_index: i64,
    pub explanation: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_svg: Option<String>,
}

impl QuestionDraft {
    /// Check the question invariants and stamp receipt metadata.
    ///
    /// Blank diagram strings are treated as absent. Nothing else is repaired.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::WrongOptionCount` unless there are exactly four options.
    /// Returns `QuestionError::CorrectIndexOutOfRange` if `correct_index` is outside `0..4`.
    pub fn validate(
        self,
        id: QuestionId,
        difficulty: Difficulty,
        received_at: DateTime<Utc>,
    ) -> Result<Question, QuestionError> {
        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|options: Vec<String>| QuestionError::WrongOptionCount {
                count: options.len(),
            })?;

        let correct_index = usize::try_from(self.correct_index)
            .ok()
            .and_then(|index| OptionIndex::new(index).ok())
            .ok_or(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
            })?;

        Ok(Question {
            id,
            stem: self.stem,
            options,
            correct_index,
            explanation: self.explanation,
            topic: self.topic,
            difficulty_level: difficulty,
            svg: non_blank(self.svg),
            explanation_svg: non_blank(self.explanation_svg),
            received_at,
        })
    }
}

fn non_blank(markup: Option<String>) -> Option<String> {
    markup.filter(|value| !value.trim().is_empty())
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    stem: String,
    options: [String; OPTION_COUNT],
    correct_index: OptionIndex,
    explanation: String,
    topic: String,
    difficulty_level: Difficulty,
    svg: Option<String>,
    explanation_svg: Option<String>,
    received_at: DateTime<Utc>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.value()]
    }

    #[must_use]
    pub fn correct_index(&self) -> OptionIndex {
        self.correct_index
    }

    #[must_use]
    pub fn is_correct(&self, selected: OptionIndex) -> bool {
        selected == self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Rating the question was requested at.
    #[must_use]
    pub fn difficulty_level(&self) -> Difficulty {
        self.difficulty_level
    }

    #[must_use]
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    #[must_use]
    pub fn explanation_svg(&self) -> Option<&str> {
        self.explanation_svg.as_deref()
    }

    #[must_use]
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
