//! One game against one secret word
//!
//! A session owns its candidate pool and letter extractor; the `Language` it
//! plays in is shared read-only.

use crate::core::{Pattern, Word};
use crate::error::{Error, Result};
use crate::registry::Language;
use crate::solver::{CandidatePool, LetterExtractor, PoolLetters, RankedWord, Suggestions};
use crate::wordlists::normalize_entry;
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::sync::Arc;

/// What the player is allowed to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Guess a hidden word; solver statistics are withheld
    Play,
    /// Feed externally observed patterns to the solver
    Solve,
    /// Guess a hidden word with solver statistics available
    Assisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
}

/// Solver view after a (guess, pattern) turn
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Remaining pool words ranked by entropy
    pub ranking: Vec<RankedWord>,
    /// Bits still needed to identify the secret
    pub information: f64,
    pub suggestions: Suggestions,
}

#[derive(Debug, Clone)]
pub struct Session {
    language: Arc<Language>,
    mode: GameMode,
    max_tries: usize,
    tries: usize,
    secret: Word,
    pool: CandidatePool,
    extractor: LetterExtractor,
    history: Vec<(Word, Pattern)>,
    status: GameStatus,
}

impl Session {
    /// Start a game against a secret drawn uniformly from the dictionary
    ///
    /// # Errors
    /// Returns `Error::EmptyDictionary` if the dictionary has no word to draw.
    pub fn new<R: Rng + ?Sized>(
        language: Arc<Language>,
        mode: GameMode,
        max_tries: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let secret = draw_secret(&language, rng)?;
        Ok(Self::start(language, mode, max_tries, secret))
    }

    /// Start a game against a chosen secret
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `secret` is not a dictionary word.
    pub fn with_secret(language: Arc<Language>, mode: GameMode, max_tries: usize, secret: &str) -> Result<Self> {
        let secret = parse_dictionary_word(&language, secret)?;
        Ok(Self::start(language, mode, max_tries, secret))
    }

    fn start(language: Arc<Language>, mode: GameMode, max_tries: usize, secret: Word) -> Self {
        let pool = CandidatePool::new(language.dictionary());
        Self {
            language,
            mode,
            max_tries,
            tries: 0,
            secret,
            pool,
            extractor: LetterExtractor::new(),
            history: Vec::new(),
            status: GameStatus::Ongoing,
        }
    }

    /// Restore the full pool and draw a new secret
    ///
    /// # Errors
    /// Returns `Error::EmptyDictionary` if the dictionary has no word to draw.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let secret = draw_secret(&self.language, rng)?;
        *self = Self::start(Arc::clone(&self.language), self.mode, self.max_tries, secret);
        Ok(())
    }

    /// Score `guess` against the secret, consuming one try
    ///
    /// # Errors
    /// - `Error::TriesExhausted` once every try is used
    /// - `Error::InvalidInput` for a malformed or unknown guess, or once the
    ///   game is won
    pub fn submit_guess(&mut self, guess: &str) -> Result<Pattern> {
        if self.tries >= self.max_tries {
            return Err(Error::TriesExhausted {
                max_tries: self.max_tries,
            });
        }
        if self.status == GameStatus::Won {
            return Err(Error::InvalidInput("the game is already won".to_string()));
        }

        let guess = parse_dictionary_word(&self.language, guess)?;
        let pattern = Pattern::calculate(&guess, &self.secret);

        self.tries += 1;
        self.history.push((guess, pattern));

        if pattern.is_perfect() {
            self.status = GameStatus::Won;
        } else if self.tries >= self.max_tries {
            self.status = GameStatus::Lost;
        }

        Ok(pattern)
    }

    /// Narrow the pool with an observed pattern and report solver statistics
    ///
    /// Suggestions are drawn from the best-opening table when the language
    /// has one, otherwise from the new pool ranking.
    ///
    /// # Errors
    /// - `Error::InvalidInput` in play mode, or for a malformed guess or pattern
    /// - `Error::PoolExhausted` if no candidate is consistent
    ///
    /// The session is unchanged on error.
    pub fn submit_guess_and_pattern(&mut self, guess: &str, pattern: &str) -> Result<TurnReport> {
        if self.mode == GameMode::Play {
            return Err(Error::InvalidInput(
                "solver statistics are not available in play mode".to_string(),
            ));
        }

        let language = Arc::clone(&self.language);
        let dictionary = language.dictionary();
        let guess = parse_dictionary_word(&language, guess)?;
        let pattern = Pattern::parse(pattern, dictionary.word_length())?;

        let ranking = self.pool.apply(
            dictionary,
            language.compendium(),
            &guess,
            pattern,
            language.workers(),
        )?;
        self.extractor.merge(&LetterExtractor::from_guess(&guess, pattern));

        let pool_letters = PoolLetters::gather(self.pool.words(dictionary));
        let candidates = language
            .best_opening()
            .map_or(ranking.as_slice(), |table| table.as_slice());
        let suggestions = Suggestions::build(
            dictionary.word_length(),
            candidates,
            &pool_letters,
            &self.extractor,
        );

        Ok(TurnReport {
            ranking,
            information: self.pool.information(),
            suggestions,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn tries(&self) -> usize {
        self.tries
    }

    #[must_use]
    pub const fn max_tries(&self) -> usize {
        self.max_tries
    }

    #[must_use]
    pub const fn remaining_tries(&self) -> usize {
        self.max_tries.saturating_sub(self.tries)
    }

    #[must_use]
    pub fn history(&self) -> &[(Word, Pattern)] {
        &self.history
    }

    #[must_use]
    pub const fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    #[must_use]
    pub const fn extractor(&self) -> &LetterExtractor {
        &self.extractor
    }

    #[must_use]
    pub fn information(&self) -> f64 {
        self.pool.information()
    }

    /// The hidden word
    #[must_use]
    pub const fn secret(&self) -> &Word {
        &self.secret
    }

    #[must_use]
    pub fn language(&self) -> &Arc<Language> {
        &self.language
    }
}

fn draw_secret<R: Rng + ?Sized>(language: &Language, rng: &mut R) -> Result<Word> {
    let dictionary = language.dictionary();
    dictionary
        .words()
        .choose(rng)
        .cloned()
        .ok_or_else(|| Error::EmptyDictionary(dictionary.name().to_string()))
}

fn parse_dictionary_word(language: &Language, text: &str) -> Result<Word> {
    let dictionary = language.dictionary();
    let word = Word::new(normalize_entry(text))?;

    if word.len() != dictionary.word_length() {
        return Err(Error::InvalidInput(format!(
            "'{word}' has {} letters, expected {}",
            word.len(),
            dictionary.word_length()
        )));
    }
    if !dictionary.contains(&word) {
        return Err(Error::InvalidInput(format!(
            "'{word}' is not in dictionary {}",
            dictionary.name()
        )));
    }

    Ok(word)
}
