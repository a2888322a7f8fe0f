//! Solving engine
//!
//! The compendium indexes every pair of dictionary words by the pattern they
//! produce; narrowing, entropy ranking and suggestions all read from it.

pub mod autoplay;
mod compendium;
pub mod entropy;
pub mod letters;
pub mod pool;
pub mod suggestion;
mod workers;

pub use autoplay::{Choice, choose_guess};
pub use compendium::{Compendium, WordPair};
pub use entropy::{PatternHistogram, RankedWord, rank_words};
pub use letters::LetterExtractor;
pub use pool::{CandidatePool, Narrowed, narrow, remaining_information};
pub use suggestion::{PoolLetters, Suggestions, suggest};
pub use workers::WorkerConfig;
