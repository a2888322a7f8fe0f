//! Candidate pool narrowing
//!
//! The pool only ever shrinks: each observed (guess, pattern) keeps the pool
//! words the compendium pairs with the guess under that pattern.

use super::compendium::Compendium;
use super::entropy::{PatternHistogram, RankedWord, rank_words, safe_log2};
use super::workers::WorkerConfig;
use crate::core::{Pattern, Word};
use crate::error::{Error, Result};
use crate::wordlists::{Dictionary, WordId};
use rustc_hash::FxHashSet;

/// Bits still needed to single out one word of a pool of `pool_size`
#[must_use]
pub fn remaining_information(pool_size: usize) -> f64 {
    safe_log2(pool_size as f64)
}

/// Result of one successful narrowing step
#[derive(Debug, Clone)]
pub struct Narrowed {
    /// Surviving words, in dictionary order
    pub pool: Vec<WordId>,
    /// Surviving words ranked by entropy over the new pool
    pub ranking: Vec<RankedWord>,
    pub information: f64,
}

/// Narrow `pool` to the words consistent with `guess` producing `pattern`
///
/// # Errors
/// - `Error::InvalidInput` if the guess has the wrong length or is not in
///   the dictionary, or if the pattern has the wrong length
/// - `Error::PoolExhausted` if no pool word survives
/// - `Error::ComputeFailure` if re-ranking fails
pub fn narrow(
    dictionary: &Dictionary,
    compendium: &Compendium,
    pool: &[WordId],
    guess: &Word,
    pattern: Pattern,
    workers: &WorkerConfig,
) -> Result<Narrowed> {
    let length = dictionary.word_length();

    if guess.len() != length {
        return Err(Error::InvalidInput(format!(
            "guess '{guess}' has {} letters, expected {length}",
            guess.len()
        )));
    }

    let Some(guess_id) = dictionary.id_of(guess) else {
        return Err(Error::InvalidInput(format!(
            "'{guess}' is not in dictionary {}",
            dictionary.name()
        )));
    };

    if pattern.len() != length {
        return Err(Error::InvalidInput(format!(
            "pattern {pattern} has {} marks, expected {length}",
            pattern.len()
        )));
    }

    let witnesses: FxHashSet<WordId> = compendium.witnesses(guess_id, pattern).collect();
    let survivors: Vec<WordId> = pool
        .iter()
        .copied()
        .filter(|id| witnesses.contains(id))
        .collect();

    if survivors.is_empty() {
        return Err(Error::PoolExhausted {
            guess: guess.to_string(),
            pattern: pattern.to_string(),
        });
    }

    let histogram = PatternHistogram::build(compendium, &survivors, workers)?;
    let ranking = rank_words(dictionary, &survivors, &histogram, workers)?;
    let information = remaining_information(survivors.len());

    Ok(Narrowed {
        pool: survivors,
        ranking,
        information,
    })
}

/// Live candidate pool of one game
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool {
    members: Vec<WordId>,
    information: f64,
}

impl CandidatePool {
    /// Pool holding the whole dictionary
    #[must_use]
    pub fn new(dictionary: &Dictionary) -> Self {
        let members = dictionary.ids();
        let information = remaining_information(members.len());
        Self {
            members,
            information,
        }
    }

    /// Narrow in place; on error the pool is left as it was
    ///
    /// # Errors
    /// See [`narrow`].
    pub fn apply(
        &mut self,
        dictionary: &Dictionary,
        compendium: &Compendium,
        guess: &Word,
        pattern: Pattern,
        workers: &WorkerConfig,
    ) -> Result<Vec<RankedWord>> {
        let narrowed = narrow(dictionary, compendium, &self.members, guess, pattern, workers)?;
        self.members = narrowed.pool;
        self.information = narrowed.information;
        Ok(narrowed.ranking)
    }

    #[must_use]
    pub fn members(&self) -> &[WordId] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub const fn information(&self) -> f64 {
        self.information
    }

    pub fn words<'a>(&'a self, dictionary: &'a Dictionary) -> impl Iterator<Item = &'a Word> + 'a {
        self.members.iter().map(|&id| dictionary.word(id))
    }
}
