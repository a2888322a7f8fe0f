//! Exhaustive pattern compendium
//!
//! For every pivot word `W` and every word `X` of the dictionary, the pair
//! `{W, X}` is filed under `Pattern::calculate(W, X)`, i.e. with the pivot as
//! the guess. Since each member of a pair is a pivot once, a pair sits under
//! one pattern when both directions agree and under two when they differ.
//! Each word is also filed with itself under the all-exact pattern.
//!
//! Narrowing and entropy both read this index instead of recomputing patterns.

use super::workers::WorkerConfig;
use crate::core::Pattern;
use crate::error::Result;
use crate::wordlists::{Dictionary, WordId};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Unordered pair of dictionary words, stored as `(low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordPair {
    low: WordId,
    high: WordId,
}

impl WordPair {
    #[must_use]
    pub fn new(a: WordId, b: WordId) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    #[must_use]
    pub const fn low(self) -> WordId {
        self.low
    }

    #[must_use]
    pub const fn high(self) -> WordId {
        self.high
    }

    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.low == self.high
    }

    #[must_use]
    pub const fn contains(self, id: WordId) -> bool {
        self.low == id || self.high == id
    }

    /// The member paired with `id`, or `None` if `id` is not in the pair
    #[must_use]
    pub const fn other(self, id: WordId) -> Option<WordId> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }
}

type Buckets = FxHashMap<Pattern, Vec<WordPair>>;

/// Pattern → word pairs index over one dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compendium {
    word_length: usize,
    word_count: usize,
    buckets: Buckets,
}

impl Compendium {
    /// Build the compendium for every pair of dictionary words
    ///
    /// Pivots are split across workers; each worker fills a partial map and
    /// the partial maps are merged pairwise. Buckets are sorted afterwards so
    /// the result does not depend on scheduling.
    ///
    /// # Errors
    /// Returns `Error::ComputeFailure` if a worker panics.
    ///
    /// # Examples
    /// ```
    /// use wordle_compendium::core::Pattern;
    /// use wordle_compendium::solver::{Compendium, WorkerConfig};
    /// use wordle_compendium::wordlists::Dictionary;
    ///
    /// let dictionary = Dictionary::from_slice("demo", 3, &["abc", "abd", "xyz"]).unwrap();
    /// let compendium = Compendium::build(&dictionary, &WorkerConfig::default()).unwrap();
    ///
    /// let pattern = Pattern::parse("220", 3).unwrap();
    /// assert_eq!(compendium.pairs(pattern).len(), 1);
    /// ```
    pub fn build(dictionary: &Dictionary, workers: &WorkerConfig) -> Result<Self> {
        let words = dictionary.words();
        let pb = workers.progress_bar(words.len() as u64, "Building pattern compendium");

        let buckets = workers.run(|| {
            let mut buckets = (0..words.len())
                .into_par_iter()
                .fold(Buckets::default, |mut acc, pivot| {
                    let pivot_word = &words[pivot];

                    // Pairs below the pivot were filed when their own pivot ran
                    for (other, other_word) in words.iter().enumerate().skip(pivot) {
                        let pair = WordPair::new(pivot as WordId, other as WordId);
                        let forward = Pattern::calculate(pivot_word, other_word);
                        acc.entry(forward).or_default().push(pair);

                        if other != pivot {
                            let backward = Pattern::calculate(other_word, pivot_word);
                            if backward != forward {
                                acc.entry(backward).or_default().push(pair);
                            }
                        }
                    }

                    pb.inc(1);
                    acc
                })
                .reduce(Buckets::default, merge_buckets);

            buckets
                .par_iter_mut()
                .for_each(|(_, pairs)| pairs.sort_unstable());
            buckets
        });

        pb.finish_and_clear();

        Ok(Self {
            word_length: dictionary.word_length(),
            word_count: words.len(),
            buckets: buckets?,
        })
    }

    /// Reassemble a compendium from persisted buckets, without validation
    pub(crate) fn from_buckets(
        word_length: usize,
        word_count: usize,
        buckets: impl IntoIterator<Item = (Pattern, Vec<WordPair>)>,
    ) -> Self {
        Self {
            word_length,
            word_count,
            buckets: buckets.into_iter().collect(),
        }
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[must_use]
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of distinct patterns observed
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total stored pairs across all buckets
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Pairs filed under `pattern` (empty if the pattern never occurs)
    #[must_use]
    pub fn pairs(&self, pattern: Pattern) -> &[WordPair] {
        self.buckets.get(&pattern).map_or(&[], Vec::as_slice)
    }

    /// Iterate buckets in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (Pattern, &[WordPair])> {
        self.buckets
            .iter()
            .map(|(&pattern, pairs)| (pattern, pairs.as_slice()))
    }

    /// Buckets sorted by pattern, for reproducible serialisation
    #[must_use]
    pub fn sorted_buckets(&self) -> Vec<(Pattern, &[WordPair])> {
        let mut buckets: Vec<_> = self.iter().collect();
        buckets.sort_unstable_by_key(|&(pattern, _)| pattern);
        buckets
    }

    /// Words paired with `guess` under `pattern`
    ///
    /// The identity pair yields `guess` itself.
    pub fn witnesses(&self, guess: WordId, pattern: Pattern) -> impl Iterator<Item = WordId> + '_ {
        self.pairs(pattern)
            .iter()
            .filter_map(move |pair| pair.other(guess))
    }

    /// Structural validation used when loading a persisted compendium
    ///
    /// Checks pattern lengths, id ranges, bucket ordering and that every
    /// unordered pair, identity pairs included, is filed at least once.
    ///
    /// # Errors
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let n = self.word_count;
        let expected_pairs = n * (n + 1) / 2;
        let mut seen = vec![0u64; expected_pairs.div_ceil(64)];
        let mut covered = 0usize;

        for (pattern, pairs) in self.iter() {
            if pattern.len() != self.word_length {
                return Err(format!(
                    "pattern {pattern} has length {}, expected {}",
                    pattern.len(),
                    self.word_length
                ));
            }

            if 3u64
                .checked_pow(pattern.len() as u32)
                .is_some_and(|bound| pattern.value() >= bound)
            {
                return Err(format!("pattern value {} out of range", pattern.value()));
            }

            if !pairs.windows(2).all(|w| w[0] < w[1]) {
                return Err(format!("bucket {pattern} is not sorted and unique"));
            }

            for pair in pairs {
                let high = pair.high() as usize;
                if high >= n {
                    return Err(format!("pair {pair:?} out of range for {n} words"));
                }
                if pair.low() > pair.high() {
                    return Err(format!("pair {pair:?} is not ordered"));
                }
                if pair.is_identity() && !pattern.is_perfect() {
                    return Err(format!("identity pair {pair:?} filed under {pattern}"));
                }

                let slot = high * (high + 1) / 2 + pair.low() as usize;
                let (word, bit) = (slot / 64, 1u64 << (slot % 64));
                if seen[word] & bit == 0 {
                    seen[word] |= bit;
                    covered += 1;
                }
            }
        }

        if covered == expected_pairs {
            Ok(())
        } else {
            Err(format!(
                "{covered} of {expected_pairs} word pairs present"
            ))
        }
    }
}

fn merge_buckets(mut left: Buckets, mut right: Buckets) -> Buckets {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }

    for (pattern, pairs) in right {
        left.entry(pattern).or_default().extend(pairs);
    }

    left
}
