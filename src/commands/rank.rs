//! Opening ranking command
//!
//! Ranks the whole dictionary by entropy to find the best opening guesses.

use crate::error::{Error, Result};
use crate::registry::Language;
use crate::solver::RankedWord;
use crate::wordlists::normalize_entry;

/// Result of ranking openings
pub struct RankResult {
    pub dictionary: String,
    pub word_length: usize,
    pub total_words: usize,
    /// Highest-entropy openings, best first
    pub top: Vec<RankedWord>,
    /// Requested word with its 1-based rank
    pub focus: Option<(usize, RankedWord)>,
    /// Bits needed to single out one dictionary word
    pub information: f64,
}

/// Rank the best `count` openings of `language`
///
/// # Errors
///
/// Returns an error if:
/// - The opening table cannot be computed or loaded
/// - `focus` is given but is not a dictionary word
pub fn rank_openings(language: &Language, count: usize, focus: Option<&str>) -> Result<RankResult> {
    let ranking = language.word_information()?;
    let dictionary = language.dictionary();

    let focus = focus
        .map(|text| {
            let normalized = normalize_entry(text);
            ranking
                .iter()
                .position(|ranked| ranked.word.text() == normalized)
                .map(|index| (index + 1, ranking[index].clone()))
                .ok_or_else(|| Error::InvalidInput(format!("'{text}' is not in dictionary {}", dictionary.name())))
        })
        .transpose()?;

    Ok(RankResult {
        dictionary: dictionary.name().to_string(),
        word_length: dictionary.word_length(),
        total_words: dictionary.len(),
        top: ranking.iter().take(count).cloned().collect(),
        focus,
        information: crate::solver::remaining_information(dictionary.len()),
    })
}
