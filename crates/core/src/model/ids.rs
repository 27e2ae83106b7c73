use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a received Question.
///
/// Assigned by the session when a question arrives, never by the source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Creates a fresh random `QuestionId`
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(QuestionId::generate(), QuestionId::generate());
    }

    #[test]
    fn display_is_the_bare_uuid() {
        let id = QuestionId::generate();
        let shown = id.to_string();
        assert_eq!(shown.len(), 36);
        assert_eq!(format!("{id:?}"), format!("QuestionId({shown})"));
    }
}
