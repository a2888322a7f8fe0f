//! Entropy ranking engine
//!
//! A `PatternHistogram` is derived from the compendium once per pool, then
//! every pool word is scored in parallel.

mod calculator;
mod histogram;
mod selector;

pub use calculator::{calculate_entropy, safe_log2, shannon_entropy, word_entropy};
pub use histogram::PatternHistogram;
pub use selector::{RankedWord, rank_words};
