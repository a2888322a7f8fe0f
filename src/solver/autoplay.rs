//! Guess policy for self-play
//!
//! Plays the top entropy word, except when the previous pattern already
//! fixed most positions and a suggestion tests many unknown letters at once.

use super::entropy::RankedWord;
use super::suggestion::Suggestions;
use crate::core::{Pattern, Word};

/// The next guess and whether it came from the suggestion buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub guess: Word,
    pub used_suggestion: bool,
}

/// Exact marks needed before a suggestion may replace the entropy pick
#[must_use]
pub const fn suggestion_threshold(word_length: usize) -> usize {
    word_length % 2 + word_length / 2
}

/// Choose the next guess; `None` only when `pool_ranking` is empty
#[must_use]
pub fn choose_guess(
    pool_ranking: &[RankedWord],
    last_pattern: Pattern,
    suggestions: &Suggestions,
    word_length: usize,
) -> Option<Choice> {
    let top = pool_ranking.first()?;
    let entropy_pick = Choice {
        guess: top.word.clone(),
        used_suggestion: false,
    };

    if pool_ranking.len() <= 2 {
        return Some(entropy_pick);
    }

    let threshold = suggestion_threshold(word_length);
    let wide_coverage = suggestions
        .best_bucket()
        .is_some_and(|bucket| bucket > word_length - threshold);

    if wide_coverage && last_pattern.count_exact() >= threshold {
        if let Some(best) = suggestions.best() {
            return Some(Choice {
                guess: best.word.clone(),
                used_suggestion: true,
            });
        }
    }

    Some(entropy_pick)
}
