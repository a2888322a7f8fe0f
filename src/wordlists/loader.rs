//! Word list loading utilities
//!
//! Reads newline-delimited word lists, folding case and accents and keeping
//! only alphabetic entries of the requested length.

use super::Dictionary;
use crate::core::Word;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Fold an entry to lowercase ASCII, stripping accents (`"Été"` → `"ete"`)
#[must_use]
pub fn normalize_entry(entry: &str) -> String {
    deunicode::deunicode(entry.trim()).to_lowercase()
}

/// Load a dictionary from a file
///
/// The dictionary is named after the file stem, so `data/french.txt` yields
/// `"french"`. Entries that are not alphabetic after normalisation, or whose
/// length differs from `word_length`, are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or `EmptyDictionary` if no
/// entry survives filtering.
///
/// # Examples
/// ```no_run
/// use wordle_compendium::wordlists::load_dictionary;
///
/// let dictionary = load_dictionary("data/wordle.txt", 5).unwrap();
/// println!("Loaded {} words", dictionary.len());
/// ```
pub fn load_dictionary<P: AsRef<Path>>(path: P, word_length: usize) -> Result<Dictionary> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let name = path
        .file_stem()
        .map_or_else(|| "dictionary".to_string(), |s| s.to_string_lossy().into_owned());

    let words = content.lines().filter_map(|line| {
        let normalized = normalize_entry(line);
        if normalized.len() == word_length {
            Word::new(normalized).ok()
        } else {
            None
        }
    });

    Dictionary::new(name, word_length, words)
}

/// Convert string slices to words, skipping invalid entries
///
/// # Examples
/// ```
/// use wordle_compendium::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["crane", "sl4te", "Évité"]);
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[1].text(), "evite");
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice
        .iter()
        .filter_map(|&s| Word::new(normalize_entry(s)).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize_entry("  Crème\n"), "creme");
        assert_eq!(normalize_entry("ÉLÈVE"), "eleve");
        assert_eq!(normalize_entry("naïve"), "naive");
    }

    #[test]
    fn words_from_slice_skips_invalid() {
        let words = words_from_slice(&["crane", "it's", "abc1", "slate"]);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "crane");
        assert_eq!(words[1].text(), "slate");
    }

    #[test]
    fn load_dictionary_filters_entries() {
        let dir = TempDir::new("loader");
        let path = dir.path().join("french.txt");
        fs::write(&path, "Élève\nabris\n\nporte-\nété\nAbris\ncoeur\n12345\n").unwrap();

        let dictionary = load_dictionary(&path, 5).unwrap();

        assert_eq!(dictionary.name(), "french");
        let texts: Vec<&str> = dictionary.words().iter().map(Word::text).collect();
        assert_eq!(texts, ["abris", "coeur", "eleve"]);
    }

    #[test]
    fn load_dictionary_missing_file() {
        let dir = TempDir::new("loader-missing");
        assert!(load_dictionary(dir.path().join("nope.txt"), 5).is_err());
    }
}
