//! Letter-coverage suggestions
//!
//! A secondary ranking: candidates are bucketed by how many still-unknown pool
//! letters they would test, and ordered by entropy within each bucket.

use super::entropy::RankedWord;
use super::letters::LetterExtractor;
use crate::core::Word;
use std::collections::{BTreeMap, BTreeSet};

/// Letters seen across a pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolLetters {
    letters: BTreeSet<u8>,
    /// Letters occurring more than once in some pool word, with their
    /// highest in-word count
    duplicates: BTreeMap<u8, usize>,
}

impl PoolLetters {
    #[must_use]
    pub fn gather<'a>(pool: impl IntoIterator<Item = &'a Word>) -> Self {
        let mut gathered = Self::default();

        for word in pool {
            let counts = word.letter_counts();
            for (offset, &count) in counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let letter = b'a' + offset as u8;
                gathered.letters.insert(letter);

                if count > 1 {
                    let max = gathered.duplicates.entry(letter).or_insert(0);
                    *max = (*max).max(usize::from(count));
                }
            }
        }

        gathered
    }

    pub fn letters(&self) -> impl Iterator<Item = u8> + '_ {
        self.letters.iter().copied()
    }

    /// Highest in-word count of `letter`, or 0 if it never repeats
    #[must_use]
    pub fn max_duplicates(&self, letter: u8) -> usize {
        self.duplicates.get(&letter).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Pool letters nothing more can be learned about
    fn is_known(&self, letter: u8, extractor: &LetterExtractor) -> bool {
        if extractor.is_excluded(letter) {
            return true;
        }

        let confirmed = extractor.included_count(letter);
        confirmed > 0 && confirmed >= self.max_duplicates(letter)
    }
}

/// Candidates bucketed by number of distinct unknown letters they contain
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestions {
    unknown: BTreeSet<u8>,
    buckets: Vec<Vec<RankedWord>>,
}

impl Suggestions {
    /// Bucket `candidates` against the unknown letters of the pool
    ///
    /// Buckets are indexed `0..=word_length`. Each bucket keeps the
    /// candidates' relative order for equal entropies.
    #[must_use]
    pub fn build(
        word_length: usize,
        candidates: &[RankedWord],
        pool: &PoolLetters,
        extractor: &LetterExtractor,
    ) -> Self {
        let unknown: BTreeSet<u8> = pool
            .letters()
            .filter(|&letter| !pool.is_known(letter, extractor))
            .collect();

        let mut buckets = vec![Vec::new(); word_length + 1];

        for candidate in candidates {
            let distinct: BTreeSet<u8> = candidate.word.letters().iter().copied().collect();
            let coverage = distinct.intersection(&unknown).count().min(word_length);
            buckets[coverage].push(candidate.clone());
        }

        for bucket in &mut buckets {
            bucket.sort_by(|a: &RankedWord, b: &RankedWord| b.entropy.total_cmp(&a.entropy));
        }

        Self { unknown, buckets }
    }

    pub fn unknown_letters(&self) -> impl Iterator<Item = u8> + '_ {
        self.unknown.iter().copied()
    }

    #[must_use]
    pub fn bucket(&self, coverage: usize) -> &[RankedWord] {
        self.buckets.get(coverage).map_or(&[], Vec::as_slice)
    }

    /// Highest coverage with at least one candidate
    #[must_use]
    pub fn best_bucket(&self) -> Option<usize> {
        self.buckets.iter().rposition(|bucket| !bucket.is_empty())
    }

    /// Top candidate of the best bucket
    #[must_use]
    pub fn best(&self) -> Option<&RankedWord> {
        self.best_bucket().and_then(|index| self.buckets[index].first())
    }
}

/// Suggestions drawn from the pool's own ranking
///
/// `pool_ranking` is both the candidate list and the source of pool letters.
#[must_use]
pub fn suggest(word_length: usize, pool_ranking: &[RankedWord], extractor: &LetterExtractor) -> Suggestions {
    let pool = PoolLetters::gather(pool_ranking.iter().map(|ranked| &ranked.word));
    Suggestions::build(word_length, pool_ranking, &pool, extractor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;

    fn ranked(text: &str, entropy: f64) -> RankedWord {
        RankedWord {
            word: Word::new(text).unwrap(),
            entropy,
        }
    }

    fn words(texts: &[&str]) -> Vec<Word> {
        texts.iter().map(|t| Word::new(*t).unwrap()).collect()
    }

    #[test]
    fn gathers_letters_and_duplicates() {
        let pool = words(&["geese", "speed", "crane"]);
        let letters = PoolLetters::gather(&pool);

        let all: String = letters.letters().map(char::from).collect();
        assert_eq!(all, "acdegnprs");
        assert_eq!(letters.max_duplicates(b'e'), 3);
        assert_eq!(letters.max_duplicates(b'a'), 0);
        assert_eq!(letters.duplicate_count(), 1);
    }

    #[test]
    fn nothing_known_without_feedback() {
        let candidates = [ranked("abc", 1.0), ranked("xyz", 2.0)];
        let suggestions = suggest(3, &candidates, &LetterExtractor::new());

        assert_eq!(suggestions.unknown_letters().count(), 6);
        assert_eq!(suggestions.bucket(3).len(), 2);
        assert_eq!(suggestions.best_bucket(), Some(3));
        assert_eq!(suggestions.best().unwrap().word.text(), "xyz");
    }

    #[test]
    fn known_letters_lower_coverage() {
        let guess = Word::new("abc").unwrap();
        let secret = Word::new("abd").unwrap();
        let extractor = LetterExtractor::from_guess(&guess, Pattern::calculate(&guess, &secret));

        // a and b are confirmed, c is excluded: only d, e, x, y, z remain unknown
        let candidates = [ranked("abd", 0.5), ranked("abe", 0.9), ranked("xyz", 0.1)];
        let suggestions = suggest(3, &candidates, &extractor);

        let unknown: String = suggestions.unknown_letters().map(char::from).collect();
        assert_eq!(unknown, "dexyz");

        let ones: Vec<&str> = suggestions.bucket(1).iter().map(|r| r.word.text()).collect();
        assert_eq!(ones, ["abe", "abd"]);
        assert_eq!(suggestions.best_bucket(), Some(3));
        assert_eq!(suggestions.best().unwrap().word.text(), "xyz");
    }

    #[test]
    fn included_letter_stays_unknown_while_duplicates_possible() {
        let guess = Word::new("crane").unwrap();
        let secret = Word::new("geese").unwrap();
        let extractor = LetterExtractor::from_guess(&guess, Pattern::calculate(&guess, &secret));
        assert_eq!(extractor.included_count(b'e'), 1);

        let pool = PoolLetters::gather(&words(&["geese", "sense"]));
        let candidates = [ranked("geese", 1.0), ranked("sense", 1.0)];
        let suggestions = Suggestions::build(5, &candidates, &pool, &extractor);

        assert!(suggestions.unknown_letters().any(|letter| letter == b'e'));
        assert!(!suggestions.unknown_letters().any(|letter| letter == b'n'));
    }

    #[test]
    fn candidates_need_not_come_from_pool() {
        let pool = PoolLetters::gather(&words(&["abc", "abd"]));
        let candidates = [ranked("cdx", 0.0), ranked("qrs", 3.0)];
        let suggestions = Suggestions::build(3, &candidates, &pool, &LetterExtractor::new());

        assert_eq!(suggestions.bucket(2)[0].word.text(), "cdx");
        assert_eq!(suggestions.bucket(0)[0].word.text(), "qrs");
        assert_eq!(suggestions.best_bucket(), Some(2));
    }

    #[test]
    fn equal_entropy_keeps_candidate_order() {
        let candidates = [ranked("abc", 1.0), ranked("abd", 1.0), ranked("abe", 1.0)];
        let suggestions = suggest(3, &candidates, &LetterExtractor::new());

        let order: Vec<&str> = suggestions.bucket(3).iter().map(|r| r.word.text()).collect();
        assert_eq!(order, ["abc", "abd", "abe"]);
    }

    #[test]
    fn empty_candidates_have_no_best_bucket() {
        let suggestions = suggest(5, &[], &LetterExtractor::new());
        assert_eq!(suggestions.best_bucket(), None);
        assert!(suggestions.best().is_none());
    }
}
