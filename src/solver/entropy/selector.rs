//! Parallel entropy ranking
//!
//! Ranks every pool word by the entropy of the pattern distribution it would
//! induce over the pool.

use super::calculator::word_entropy;
use super::histogram::PatternHistogram;
use crate::core::Word;
use crate::error::Result;
use crate::solver::workers::WorkerConfig;
use crate::wordlists::{Dictionary, WordId};
use rayon::prelude::*;

/// A word with its entropy in bits
#[derive(Debug, Clone, PartialEq)]
pub struct RankedWord {
    pub word: Word,
    pub entropy: f64,
}

/// Rank `pool` by entropy, highest first
///
/// The pool is cut into one chunk per worker; each chunk yields its own
/// result batch and the batches are concatenated in chunk order before a
/// stable sort. Equal entropies therefore keep their pool order, and the
/// ranking is identical for identical inputs.
///
/// # Errors
/// Returns `Error::ComputeFailure` if any worker panics; no partial ranking
/// is ever returned.
pub fn rank_words(
    dictionary: &Dictionary,
    pool: &[WordId],
    histogram: &PatternHistogram,
    workers: &WorkerConfig,
) -> Result<Vec<RankedWord>> {
    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = pool.len().div_ceil(workers.worker_count());
    let pb = workers.progress_bar(pool.len() as u64, "Ranking words");

    let batches: Vec<Vec<(WordId, f64)>> = workers.run(|| {
        pool.par_chunks(chunk_size)
            .map(|chunk| {
                let batch: Vec<(WordId, f64)> = chunk
                    .iter()
                    .map(|&id| (id, word_entropy(histogram, id)))
                    .collect();
                pb.inc(chunk.len() as u64);
                batch
            })
            .collect()
    })?;

    pb.finish_and_clear();

    let mut ranking: Vec<RankedWord> = batches
        .into_iter()
        .flatten()
        .map(|(id, entropy)| RankedWord {
            word: dictionary.word(id).clone(),
            entropy,
        })
        .collect();

    ranking.sort_by(|a, b| b.entropy.total_cmp(&a.entropy));

    Ok(ranking)
}
