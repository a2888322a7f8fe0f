//! Precompute command
//!
//! Loads (or builds and caches) the compendium of a dictionary, and with
//! `--best-opening` its word-information table.

use crate::registry::Language;

/// What was loaded or built for a language
pub struct BuildSummary {
    pub dictionary: String,
    pub word_length: usize,
    pub words: usize,
    pub patterns: usize,
    pub pairs: usize,
    pub best_opening: Option<String>,
}

#[must_use]
pub fn summarize(language: &Language) -> BuildSummary {
    let dictionary = language.dictionary();
    let compendium = language.compendium();

    BuildSummary {
        dictionary: dictionary.name().to_string(),
        word_length: dictionary.word_length(),
        words: dictionary.len(),
        patterns: compendium.pattern_count(),
        pairs: compendium.pair_count(),
        best_opening: language
            .best_opening()
            .and_then(|ranking| ranking.first())
            .map(|ranked| ranked.word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, RegistryConfig};
    use crate::solver::WorkerConfig;
    use crate::test_support::TempDir;
    use std::fs;

    #[test]
    fn summary_counts_compendium() {
        let dir = TempDir::new("build-summary");
        let path = dir.path().join("tiny.txt");
        fs::write(&path, "abc\nabd\nxyz\n").unwrap();

        let registry = Registry::new(RegistryConfig {
            best_opening: true,
            workers: WorkerConfig::new(1),
            ..RegistryConfig::default()
        });
        let summary = summarize(&registry.language(&path, 3).unwrap());

        assert_eq!(summary.dictionary, "tiny");
        assert_eq!(summary.words, 3);
        // 000, 220 and the identity bucket
        assert_eq!(summary.patterns, 3);
        assert_eq!(summary.pairs, 6);
        assert!(summary.best_opening.is_some());
    }
}
