//! Shannon entropy calculation for pattern distributions
//!
//! `word_entropy` is the fast path fed by a `PatternHistogram`;
//! `calculate_entropy` recomputes every pattern directly and serves as the
//! reference the fast path is checked against.

use super::histogram::PatternHistogram;
use crate::core::{Pattern, Word};
use crate::wordlists::WordId;
use rustc_hash::FxHashMap;

/// `log2(x)`, with `log2(0)` taken as 0
#[inline]
#[must_use]
pub fn safe_log2(x: f64) -> f64 {
    if x > 0.0 { x.log2() } else { 0.0 }
}

/// Entropy of `word` over the pool the histogram was built for
///
/// `H(w) = Σ p·(−log₂ p)` with `p = histogram[pattern][w] / |pool|`. Patterns
/// the word never produces contribute nothing.
#[must_use]
pub fn word_entropy(histogram: &PatternHistogram, word: WordId) -> f64 {
    let pool_size = histogram.pool_size() as f64;

    if pool_size == 0.0 {
        return 0.0;
    }

    histogram
        .counts_for(word)
        .map(|count| {
            let p = f64::from(count) / pool_size;
            -p * safe_log2(p)
        })
        .sum()
}

/// Calculate Shannon entropy for a guess against candidates, pattern by pattern
///
/// # Formula
/// H(X) = -Σ p(x) * log₂(p(x))
///
/// Candidates whose length differs from the guess are ignored.
///
/// # Examples
/// ```
/// use wordle_compendium::core::Word;
/// use wordle_compendium::solver::entropy::calculate_entropy;
///
/// let guess = Word::new("slate").unwrap();
/// let candidates = vec![Word::new("slate").unwrap(), Word::new("zzzzz").unwrap()];
/// let candidate_refs: Vec<&Word> = candidates.iter().collect();
///
/// let entropy = calculate_entropy(&guess, &candidate_refs);
/// assert!((entropy - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn calculate_entropy(guess: &Word, candidates: &[&Word]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }

    let mut pattern_counts: FxHashMap<Pattern, usize> = FxHashMap::default();
    for &candidate in candidates.iter().filter(|c| c.len() == guess.len()) {
        *pattern_counts
            .entry(Pattern::calculate(guess, candidate))
            .or_insert(0) += 1;
    }

    shannon_entropy(&pattern_counts)
}

/// Calculate Shannon entropy from a pattern distribution
///
/// # Properties
/// - Returns 0.0 for certain outcome (one pattern with p=1)
/// - Maximized for uniform distribution
/// - Always in range [0, log₂(n)] for n patterns
#[must_use]
pub fn shannon_entropy<S>(pattern_counts: &std::collections::HashMap<Pattern, usize, S>) -> f64
where
    S: std::hash::BuildHasher,
{
    let total = pattern_counts.values().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    pattern_counts
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::compendium::Compendium;
    use crate::solver::workers::WorkerConfig;
    use crate::wordlists::Dictionary;

    fn histogram_for(words: &[&str]) -> (Dictionary, PatternHistogram) {
        let dictionary = Dictionary::from_slice("test", words[0].len(), words).unwrap();
        let workers = WorkerConfig::new(2);
        let compendium = Compendium::build(&dictionary, &workers).unwrap();
        let histogram = PatternHistogram::build(&compendium, &dictionary.ids(), &workers).unwrap();
        (dictionary, histogram)
    }

    #[test]
    fn safe_log2_of_zero() {
        assert!(safe_log2(0.0).abs() < f64::EPSILON);
        assert!((safe_log2(8.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shannon_entropy_uniform_distribution() {
        let mut counts = FxHashMap::default();
        for text in ["00", "01", "02", "10"] {
            counts.insert(Pattern::parse(text, 2).unwrap(), 1);
        }

        assert!((shannon_entropy(&counts) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn shannon_entropy_certain_outcome() {
        let mut counts = FxHashMap::default();
        counts.insert(Pattern::perfect(5), 10);
        assert!(shannon_entropy(&counts).abs() < 1e-9);
    }

    #[test]
    fn shannon_entropy_empty() {
        let counts: FxHashMap<Pattern, usize> = FxHashMap::default();
        assert!(shannon_entropy(&counts).abs() < f64::EPSILON);
    }

    #[test]
    fn word_entropy_perfect_separation_is_log2_pool() {
        // abc tells every word of this pool apart
        let (dictionary, histogram) = histogram_for(&["abc", "abd", "xyz"]);
        let abc = dictionary.lookup("abc").unwrap();

        assert!((word_entropy(&histogram, abc) - 3f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn word_entropy_shared_outcome() {
        // abd and abe both answer "220" to abc: outcomes {abc}, {abd, abe}, {xyz}
        let (dictionary, histogram) = histogram_for(&["abc", "abd", "xyz", "abe"]);
        let abc = dictionary.lookup("abc").unwrap();

        assert!((word_entropy(&histogram, abc) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn word_entropy_matches_reference_on_symmetric_pool() {
        // No pair here yields different patterns in the two directions
        let words = ["abc", "abd", "abe", "xbc", "xyz", "qrs"];
        let (dictionary, histogram) = histogram_for(&words);
        let refs: Vec<&Word> = dictionary.words().iter().collect();

        for (id, word) in dictionary.words().iter().enumerate() {
            let fast = word_entropy(&histogram, id as WordId);
            let reference = calculate_entropy(word, &refs);
            assert!((fast - reference).abs() < 1e-9, "{word}: {fast} vs {reference}");
        }
    }

    #[test]
    fn word_entropy_bounded_by_log2_pool_when_symmetric() {
        let words = ["abc", "abd", "abe", "xbc", "xyz", "qrs"];
        let (dictionary, histogram) = histogram_for(&words);
        let bound = (dictionary.len() as f64).log2();

        for id in dictionary.ids() {
            assert!(word_entropy(&histogram, id) <= bound + 1e-9);
        }
    }

    #[test]
    fn word_entropy_single_word_is_zero() {
        let (_, histogram) = histogram_for(&["abc"]);
        assert!(word_entropy(&histogram, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn calculate_entropy_all_same_pattern() {
        let guess = Word::new("zzzzz").unwrap();
        let candidates = [
            Word::new("aaaaa").unwrap(),
            Word::new("bbbbb").unwrap(),
            Word::new("ccccc").unwrap(),
        ];
        let candidate_refs: Vec<&Word> = candidates.iter().collect();

        assert!(calculate_entropy(&guess, &candidate_refs).abs() < 1e-9);
    }

    #[test]
    fn calculate_entropy_ignores_other_lengths() {
        let guess = Word::new("abc").unwrap();
        let candidates = [
            Word::new("abc").unwrap(),
            Word::new("xyz").unwrap(),
            Word::new("abcde").unwrap(),
        ];
        let candidate_refs: Vec<&Word> = candidates.iter().collect();

        assert!((calculate_entropy(&guess, &candidate_refs) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn calculate_entropy_empty_candidates() {
        let guess = Word::new("crane").unwrap();
        assert!(calculate_entropy(&guess, &[]).abs() < f64::EPSILON);
    }
}
