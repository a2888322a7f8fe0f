//! Per-pattern word counts derived from the compendium
//!
//! For each pattern, counts how many pairs of the bucket contain each word,
//! keeping only pairs whose two members are in the pool. Entropy lookups then
//! cost one hash probe per pattern instead of a bucket scan. Patterns are kept
//! sorted so entropy sums always run in the same order.

use crate::core::Pattern;
use crate::error::Result;
use crate::solver::compendium::Compendium;
use crate::solver::workers::WorkerConfig;
use crate::wordlists::WordId;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Pattern → (word → occurrence count) over one pool
#[derive(Debug, Clone)]
pub struct PatternHistogram {
    pool_size: usize,
    counts: Vec<(Pattern, FxHashMap<WordId, u32>)>,
}

impl PatternHistogram {
    /// Count word occurrences per pattern, restricted to `pool`
    ///
    /// An identity pair counts once for its word.
    ///
    /// # Errors
    /// Returns `Error::ComputeFailure` if a worker panics.
    pub fn build(compendium: &Compendium, pool: &[WordId], workers: &WorkerConfig) -> Result<Self> {
        let mut in_pool = vec![false; compendium.word_count()];
        for &id in pool {
            if let Some(slot) = in_pool.get_mut(id as usize) {
                *slot = true;
            }
        }
        let pool_size = in_pool.iter().filter(|&&member| member).count();

        let buckets = compendium.sorted_buckets();

        let counts = workers.run(|| {
            buckets
                .par_iter()
                .filter_map(|&(pattern, pairs)| {
                    let mut word_counts: FxHashMap<WordId, u32> = FxHashMap::default();

                    for pair in pairs {
                        if !(in_pool[pair.low() as usize] && in_pool[pair.high() as usize]) {
                            continue;
                        }

                        *word_counts.entry(pair.low()).or_insert(0) += 1;
                        if !pair.is_identity() {
                            *word_counts.entry(pair.high()).or_insert(0) += 1;
                        }
                    }

                    (!word_counts.is_empty()).then_some((pattern, word_counts))
                })
                .collect::<Vec<_>>()
        })?;

        Ok(Self { pool_size, counts })
    }

    /// Number of distinct pool words the histogram was built over
    #[must_use]
    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Number of patterns with at least one pool pair
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.counts.len()
    }

    /// Occurrences of `word` under `pattern`
    #[must_use]
    pub fn count(&self, pattern: Pattern, word: WordId) -> u32 {
        self.counts
            .binary_search_by_key(&pattern, |&(p, _)| p)
            .ok()
            .and_then(|index| self.counts[index].1.get(&word))
            .copied()
            .unwrap_or(0)
    }

    /// Non-zero occurrence counts of `word`, in pattern order
    pub fn counts_for(&self, word: WordId) -> impl Iterator<Item = u32> + '_ {
        self.counts
            .iter()
            .filter_map(move |(_, words)| words.get(&word).copied())
    }
}
