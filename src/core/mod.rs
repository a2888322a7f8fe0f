//! Core domain types
//!
//! Words and feedback patterns. Everything here is pure and deterministic.

mod pattern;
mod word;

pub use pattern::{Mark, Pattern, PatternError};
pub use word::{MAX_WORD_LENGTH, Word, WordError};
