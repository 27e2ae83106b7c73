#![forbid(unsafe_code)]

pub mod difficulty;
pub mod model;
pub mod time;

pub use difficulty::{Difficulty, DifficultyTier};
pub use time::Clock;
