//! Benchmark command
//!
//! Self-plays the solver against a set of secret words.

use crate::core::{Pattern, Word};
use crate::error::{Error, Result};
use crate::registry::Language;
use crate::session::{GameMode, GameStatus, Session};
use crate::solver::choose_guess;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of one self-played game
#[derive(Debug, Clone)]
pub struct GameResult {
    pub secret: Word,
    pub guesses: Vec<(Word, Pattern)>,
    pub suggestions_used: usize,
    pub solved: bool,
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_words: usize,
    pub solved: usize,
    pub failed: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Guess count → number of solved games
    pub distribution: BTreeMap<usize, usize>,
    pub suggestions_used: usize,
    pub games_with_suggestion: usize,
    pub max_tries: usize,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Self-play one game against `secret`
///
/// The first guess is `opening`, or the best opening of the language. Later
/// guesses follow the autoplay policy.
///
/// # Errors
///
/// Returns an error if the secret is not a dictionary word or if a solver
/// step fails.
pub fn play_game(
    language: &Arc<Language>,
    secret: &str,
    opening: Option<&Word>,
    max_tries: usize,
) -> Result<GameResult> {
    let mut session = Session::with_secret(Arc::clone(language), GameMode::Solve, max_tries, secret)?;
    let mut suggestions_used = 0;

    let mut guess = match opening {
        Some(word) => word.clone(),
        None => language
            .word_information()?
            .first()
            .map(|ranked| ranked.word.clone())
            .ok_or_else(|| Error::EmptyDictionary(language.dictionary().name().to_string()))?,
    };

    while session.status() == GameStatus::Ongoing {
        let pattern = session.submit_guess(guess.text())?;
        if session.status() != GameStatus::Ongoing {
            break;
        }

        let report = session.submit_guess_and_pattern(guess.text(), &pattern.to_string())?;
        let Some(choice) = choose_guess(&report.ranking, pattern, &report.suggestions, language.word_length()) else {
            break;
        };

        // A replayed suggestion cannot narrow the pool any further
        let replayed = session.history().iter().any(|(played, _)| *played == choice.guess);
        guess = if choice.used_suggestion && replayed {
            report.ranking[0].word.clone()
        } else {
            if choice.used_suggestion {
                suggestions_used += 1;
            }
            choice.guess
        };
    }

    Ok(GameResult {
        secret: session.secret().clone(),
        guesses: session.history().to_vec(),
        suggestions_used,
        solved: session.status() == GameStatus::Won,
    })
}

/// Run benchmark on a set of target words
///
/// If `opening` is provided, it is used as the first guess of every game.
///
/// # Errors
///
/// Returns the first game error encountered.
pub fn run_benchmark(
    language: &Arc<Language>,
    target_words: &[Word],
    opening: Option<&Word>,
    max_tries: usize,
) -> Result<BenchmarkResult> {
    let start = Instant::now();
    let pb = language
        .workers()
        .progress_bar(target_words.len() as u64, "Self-playing");

    let mut total_guesses = 0;
    let mut solved = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: BTreeMap<usize, usize> = BTreeMap::new();
    let mut suggestions_used = 0;
    let mut games_with_suggestion = 0;

    for target in target_words {
        let game = play_game(language, target.text(), opening, max_tries)?;
        pb.inc(1);

        suggestions_used += game.suggestions_used;
        if game.suggestions_used > 0 {
            games_with_suggestion += 1;
        }

        if game.solved {
            let guesses = game.guesses.len();
            solved += 1;
            total_guesses += guesses;
            min_guesses = min_guesses.min(guesses);
            max_guesses = max_guesses.max(guesses);
            *distribution.entry(guesses).or_insert(0) += 1;
        }
    }

    pb.finish_and_clear();

    let duration = start.elapsed();
    let total_words = target_words.len();

    Ok(BenchmarkResult {
        total_words,
        solved,
        failed: total_words - solved,
        total_guesses,
        average_guesses: if solved == 0 {
            0.0
        } else {
            total_guesses as f64 / solved as f64
        },
        min_guesses: if solved == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        suggestions_used,
        games_with_suggestion,
        max_tries,
        duration,
        words_per_second: total_words as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, RegistryConfig};
    use crate::solver::WorkerConfig;
    use crate::test_support::TempDir;
    use std::fs;

    const WORDS: &str = "crane\nslate\nspeed\nerase\nrobot\nfloor\neerie\ngeese\nsight\nlight\nmight\nnight\n";

    fn language(dir: &TempDir) -> Arc<Language> {
        let path = dir.path().join("bench.txt");
        fs::write(&path, WORDS).unwrap();
        Registry::new(RegistryConfig {
            workers: WorkerConfig::new(2),
            ..RegistryConfig::default()
        })
        .language(&path, 5)
        .unwrap()
    }

    #[test]
    fn game_ends_on_the_secret() {
        let dir = TempDir::new("bench-game");
        let language = language(&dir);

        let game = play_game(&language, "light", None, 24).unwrap();

        assert!(game.solved);
        assert_eq!(game.secret.text(), "light");
        assert_eq!(game.guesses.last().unwrap().0.text(), "light");
        assert!(game.guesses.last().unwrap().1.is_perfect());
    }

    #[test]
    fn forced_opening_is_played_first() {
        let dir = TempDir::new("bench-opening");
        let language = language(&dir);
        let opening = Word::new("robot").unwrap();

        let game = play_game(&language, "night", Some(&opening), 24).unwrap();

        assert_eq!(game.guesses[0].0, opening);
        assert!(game.solved);
    }

    #[test]
    fn every_dictionary_word_is_found() {
        let dir = TempDir::new("bench-all");
        let language = language(&dir);
        let targets = language.dictionary().words().to_vec();

        let result = run_benchmark(&language, &targets, None, 24).unwrap();

        assert_eq!(result.total_words, targets.len());
        assert_eq!(result.solved, targets.len());
        assert_eq!(result.failed, 0);
        assert_eq!(result.distribution.values().sum::<usize>(), result.solved);
        assert!(result.average_guesses >= result.min_guesses as f64);
        assert!(result.average_guesses <= result.max_guesses as f64);
    }

    #[test]
    fn tight_budget_can_fail() {
        let dir = TempDir::new("bench-budget");
        let language = language(&dir);
        let targets = language.dictionary().words().to_vec();

        let result = run_benchmark(&language, &targets, None, 1).unwrap();

        assert_eq!(result.solved + result.failed, targets.len());
        assert!(result.solved <= 1);
        assert!(result.distribution.keys().all(|&guesses| guesses == 1));
    }

    #[test]
    fn benchmark_empty_word_list() {
        let dir = TempDir::new("bench-empty");
        let result = run_benchmark(&language(&dir), &[], None, 6).unwrap();

        assert_eq!(result.total_words, 0);
        assert_eq!(result.total_guesses, 0);
        assert_eq!(result.min_guesses, 0);
    }
}
