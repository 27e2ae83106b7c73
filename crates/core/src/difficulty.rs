use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

/// Rating every session starts at ("hard" start, roughly SAT Q18+).
pub const INITIAL_DIFFICULTY: f64 = 8.0;

/// Upper bound of the rating scale.
pub const MAX_DIFFICULTY: f64 = 10.0;

/// A wrong answer never lowers the rating below this value.
pub const WRONG_ANSWER_FLOOR: f64 = 4.0;

/// Increase applied after a correct answer.
pub const CORRECT_STEP: f64 = 0.5;

/// Decrease applied after an incorrect answer.
pub const INCORRECT_STEP: f64 = 1.0;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Real-valued proxy (1-10) for question hardness.
///
/// The rating only moves through [`Difficulty::after_answer`], which applies the
/// asymmetric adjustment: `+0.5` capped at 10 for a correct answer and `-1`
/// floored at 4 for an incorrect one.
///
/// # Examples
///
/// ```
/// # use satprep_core::difficulty::Difficulty;
/// let start = Difficulty::initial();
/// assert_eq!(start.value(), 8.0);
/// assert_eq!(start.after_answer(true).value(), 8.5);
/// assert_eq!(start.after_answer(false).value(), 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Difficulty(f64);

impl Difficulty {
    /// Wraps a raw rating without clamping.
    ///
    /// Used for provenance (the rating a question was requested at) and for
    /// tests that start from an arbitrary point.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn initial() -> Self {
        Self(INITIAL_DIFFICULTY)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Prompt tier this rating falls into.
    #[must_use]
    pub fn tier(self) -> DifficultyTier {
        DifficultyTier::from_rating(self.0)
    }

    /// Rating after scoring one answer.
    #[must_use]
    pub fn after_answer(self, is_correct: bool) -> Self {
        if is_correct {
            Self((self.0 + CORRECT_STEP).min(MAX_DIFFICULTY))
        } else {
            Self((self.0 - INCORRECT_STEP).max(WRONG_ANSWER_FLOOR))
        }
    }

    /// Number of filled segments on a ten-segment gauge.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn filled_segments(self) -> usize {
        // Bounded to 0..=10 by the clamp.
        self.0.clamp(0.0, MAX_DIFFICULTY).ceil() as usize
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

//
// ─── TIERS ─────────────────────────────────────────────────────────────────────
//

/// Coarse buckets used to steer question generation.
///
/// Every rating maps to exactly one tier: `>= 9`, `>= 7`, `>= 5`, everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyTier {
    ExtremelyHard,
    VeryHard,
    Hard,
    MediumHard,
}

impl DifficultyTier {
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 9.0 {
            Self::ExtremelyHard
        } else if rating >= 7.0 {
            Self::VeryHard
        } else if rating >= 5.0 {
            Self::Hard
        } else {
            Self::MediumHard
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtremelyHard => "extremely hard",
            Self::VeryHard => "very hard",
            Self::Hard => "hard",
            Self::MediumHard => "medium-hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_bucket_each_rating_once() {
        assert_eq!(DifficultyTier::from_rating(10.0), DifficultyTier::ExtremelyHard);
        assert_eq!(DifficultyTier::from_rating(9.0), DifficultyTier::ExtremelyHard);
        assert_eq!(DifficultyTier::from_rating(8.99), DifficultyTier::VeryHard);
        assert_eq!(DifficultyTier::from_rating(7.0), DifficultyTier::VeryHard);
        assert_eq!(DifficultyTier::from_rating(6.5), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_rating(5.0), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::from_rating(4.99), DifficultyTier::MediumHard);
        assert_eq!(DifficultyTier::from_rating(1.0), DifficultyTier::MediumHard);
    }

    #[test]
    fn initial_rating_is_eight() {
        assert_eq!(Difficulty::initial().value(), 8.0);
        assert_eq!(Difficulty::default(), Difficulty::initial());
        assert_eq!(Difficulty::initial().tier(), DifficultyTier::VeryHard);
    }

    #[test]
    fn consecutive_correct_answers_step_up_until_cap() {
        let mut rating = Difficulty::new(6.0);
        for n in 1..=4_u8 {
            rating = rating.after_answer(true);
            assert_eq!(rating.value(), 6.0 + 0.5 * f64::from(n));
        }

        let mut capped = Difficulty::new(9.5);
        capped = capped.after_answer(true).after_answer(true);
        assert_eq!(capped.value(), MAX_DIFFICULTY);
    }

    #[test]
    fn wrong_answers_never_drop_below_floor() {
        let mut rating = Difficulty::new(6.0);
        for _ in 0..10 {
            rating = rating.after_answer(false);
            assert!(rating.value() >= WRONG_ANSWER_FLOOR);
        }
        assert_eq!(rating.value(), WRONG_ANSWER_FLOOR);

        assert_eq!(Difficulty::new(4.5).after_answer(false).value(), 4.0);
    }

    #[test]
    fn gauge_segments_round_up() {
        assert_eq!(Difficulty::new(8.0).filled_segments(), 8);
        assert_eq!(Difficulty::new(8.5).filled_segments(), 9);
        assert_eq!(Difficulty::new(10.0).filled_segments(), 10);
        assert_eq!(Difficulty::new(12.0).filled_segments(), 10);
    }

    #[test]
    fn display_uses_one_decimal() {
        assert_eq!(Difficulty::new(8.5).to_string(), "8.5");
        assert_eq!(DifficultyTier::MediumHard.to_string(), "medium-hard");
    }
}
