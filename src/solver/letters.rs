//! Letters confirmed present or absent across a session's guesses

use crate::core::{Mark, Pattern, Word};
use std::collections::{BTreeMap, BTreeSet};

/// Running record of confirmed-included and confirmed-excluded letters
///
/// `included` maps a letter to the minimum number of times the secret is
/// known to contain it. A letter may be both included and excluded: the
/// secret then holds exactly `included[letter]` copies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterExtractor {
    included: BTreeMap<u8, usize>,
    excluded: BTreeSet<u8>,
}

impl LetterExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters revealed by a single guess
    ///
    /// Every non-miss mark adds one to the letter's included count; a miss
    /// marks the letter excluded.
    #[must_use]
    pub fn from_guess(guess: &Word, pattern: Pattern) -> Self {
        let mut extractor = Self::default();

        for (&letter, mark) in guess.letters().iter().zip(pattern.marks()) {
            if mark == Mark::Miss {
                extractor.excluded.insert(letter);
            } else {
                *extractor.included.entry(letter).or_insert(0) += 1;
            }
        }

        extractor
    }

    /// Fold a newer extractor into this one; nothing is ever removed
    pub fn merge(&mut self, other: &Self) {
        for (&letter, &count) in &other.included {
            let entry = self.included.entry(letter).or_insert(0);
            *entry = (*entry).max(count);
        }
        self.excluded.extend(other.excluded.iter().copied());
    }

    /// Confirmed minimum count of `letter`
    #[must_use]
    pub fn included_count(&self, letter: u8) -> usize {
        self.included.get(&letter).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_excluded(&self, letter: u8) -> bool {
        self.excluded.contains(&letter)
    }

    pub fn included(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.included.iter().map(|(&letter, &count)| (letter, count))
    }

    pub fn excluded(&self) -> impl Iterator<Item = u8> + '_ {
        self.excluded.iter().copied()
    }

    pub fn clear(&mut self) {
        self.included.clear();
        self.excluded.clear();
    }
}
