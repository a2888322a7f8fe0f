//! Dictionaries of fixed-length words
//!
//! A `Dictionary` is loaded once per (language, word length) and never
//! mutated afterwards. Words are addressed by their position (`WordId`) in the
//! sorted word vector, which keeps compendium pairs small.

pub mod loader;

use crate::core::Word;
use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

pub use loader::{load_dictionary, normalize_entry};

/// Index of a word inside its dictionary
pub type WordId = u32;

/// Immutable set of words sharing one length
#[derive(Debug, Clone)]
pub struct Dictionary {
    name: String,
    word_length: usize,
    words: Vec<Word>,
    index: FxHashMap<Word, WordId>,
    fingerprint: u64,
}

impl Dictionary {
    /// Build a dictionary from already normalised words
    ///
    /// Words of another length are dropped; duplicates collapse. Words are
    /// sorted so ids only depend on the word set, not on input order.
    ///
    /// # Errors
    /// Returns `Error::EmptyDictionary` if no word of `word_length` remains.
    pub fn new(
        name: impl Into<String>,
        word_length: usize,
        words: impl IntoIterator<Item = Word>,
    ) -> Result<Self> {
        let name = name.into();

        let mut words: Vec<Word> = words
            .into_iter()
            .filter(|word| word.len() == word_length)
            .collect();
        words.sort_unstable();
        words.dedup();

        if words.is_empty() {
            return Err(Error::EmptyDictionary(name));
        }

        let index = words
            .iter()
            .enumerate()
            .map(|(id, word)| (word.clone(), id as WordId))
            .collect();

        let mut hasher = FxHasher::default();
        (word_length as u64).hash(&mut hasher);
        for word in &words {
            word.text().hash(&mut hasher);
        }

        Ok(Self {
            name,
            word_length,
            words,
            index,
            fingerprint: hasher.finish(),
        })
    }

    /// Convenience constructor from string slices, skipping invalid entries
    ///
    /// # Errors
    /// Returns `Error::EmptyDictionary` if nothing valid remains.
    pub fn from_slice(name: &str, word_length: usize, slice: &[&str]) -> Result<Self> {
        Self::new(name, word_length, loader::words_from_slice(slice))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Word for an id
    ///
    /// # Panics
    /// Panics if the id does not belong to this dictionary
    #[inline]
    #[must_use]
    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id as usize]
    }

    #[must_use]
    pub fn id_of(&self, word: &Word) -> Option<WordId> {
        self.index.get(word).copied()
    }

    /// Look up raw text, after the same normalisation applied at load time
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<WordId> {
        let word = Word::new(normalize_entry(text)).ok()?;
        self.id_of(&word)
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    /// Every id, in dictionary order
    #[must_use]
    pub fn ids(&self) -> Vec<WordId> {
        (0..self.words.len() as WordId).collect()
    }

    /// Deterministic hash of the length and word set, used to detect stale caches
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
