//! Feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 digits:
//! - 0 = Miss (letter not in word, or all its occurrences already matched)
//! - 1 = Misplaced (letter in word, wrong position)
//! - 2 = Exact (letter in correct position)
//!
//! Position `i` contributes `digit × 3^i` to the packed value. The length is
//! stored alongside so patterns of different word lengths never compare equal.

use super::word::{MAX_WORD_LENGTH, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for a single letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mark {
    Miss = 0,
    Misplaced = 1,
    Exact = 2,
}

impl Mark {
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u64 {
        self as u64
    }

    const fn from_digit(digit: u64) -> Self {
        match digit {
            2 => Self::Exact,
            1 => Self::Misplaced,
            _ => Self::Miss,
        }
    }

    /// Parse one symbol of a textual pattern
    ///
    /// Accepts digits (`0`/`1`/`2`), letters (`-`/`_`, `Y`, `G`) and the usual
    /// square emojis.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' | '-' | '_' | '⬛' | '⬜' => Some(Self::Miss),
            '1' | 'Y' | 'y' | '🟨' => Some(Self::Misplaced),
            '2' | 'G' | 'g' | '🟩' => Some(Self::Exact),
            _ => None,
        }
    }
}

/// Error type for unparsable patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    InvalidLength { expected: usize, got: usize },
    InvalidSymbol(char),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, got } => {
                write!(f, "Pattern must have {expected} symbols, got {got}")
            }
            Self::InvalidSymbol(symbol) => write!(f, "Invalid pattern symbol '{symbol}'"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Feedback pattern for a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pattern {
    value: u64,
    len: u8,
}

/// Marks a consumed letter in the secret copy; letters are always `a..=z`
const CONSUMED: u8 = 0;

impl Pattern {
    /// Pack a sequence of marks
    ///
    /// # Panics
    /// Panics in debug mode if more than `MAX_WORD_LENGTH` marks are given
    #[must_use]
    pub fn from_marks(marks: &[Mark]) -> Self {
        debug_assert!(marks.len() <= MAX_WORD_LENGTH, "pattern too long");

        let value = marks
            .iter()
            .rev()
            .fold(0u64, |acc, &mark| acc * 3 + mark.digit());

        Self {
            value,
            len: marks.len() as u8,
        }
    }

    /// All-exact pattern of the given length
    #[must_use]
    pub fn perfect(len: usize) -> Self {
        Self::from_marks(&vec![Mark::Exact; len])
    }

    /// Get the raw packed value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.value
    }

    /// Number of positions
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Mark at a position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[must_use]
    pub fn mark(self, position: usize) -> Mark {
        assert!(position < self.len(), "position out of range");
        Mark::from_digit((self.value / 3u64.pow(position as u32)) % 3)
    }

    /// Iterate the marks left to right
    pub fn marks(self) -> impl Iterator<Item = Mark> {
        let mut val = self.value;
        (0..self.len()).map(move |_| {
            let mark = Mark::from_digit(val % 3);
            val /= 3;
            mark
        })
    }

    /// Check if every position is exact
    #[must_use]
    pub fn is_perfect(self) -> bool {
        self.marks().all(|mark| mark == Mark::Exact)
    }

    /// Count the exact marks
    #[must_use]
    pub fn count_exact(self) -> usize {
        self.marks().filter(|&mark| mark == Mark::Exact).count()
    }

    /// Count the misplaced marks
    #[must_use]
    pub fn count_misplaced(self) -> usize {
        self.marks().filter(|&mark| mark == Mark::Misplaced).count()
    }

    /// Calculate the pattern when `guess` is played against `secret`
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and consume them in a copy of the secret
    /// 2. Second pass: for every non-exact position, consume the first unconsumed
    ///    occurrence of the guessed letter in the secret copy and mark it misplaced
    /// 3. Encode as base-3 number
    ///
    /// The total of exact and misplaced marks for a letter never exceeds the
    /// number of times it occurs in `secret`.
    ///
    /// # Panics
    /// Panics if `guess` and `secret` differ in length.
    ///
    /// # Examples
    /// ```
    /// use wordle_compendium::core::{Pattern, Word};
    ///
    /// let guess = Word::new("abc").unwrap();
    /// let secret = Word::new("cab").unwrap();
    ///
    /// assert_eq!(Pattern::calculate(&guess, &secret).to_string(), "111");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, secret: &Word) -> Self {
        debug_assert_eq!(guess.len(), secret.len(), "words of different lengths");

        let len = guess.len();
        let guess = guess.letters();

        let mut remaining = [CONSUMED; MAX_WORD_LENGTH];
        remaining[..len].copy_from_slice(secret.letters());

        let mut marks = [Mark::Miss; MAX_WORD_LENGTH];

        // Allow: Index needed to compare guess[i], remaining[i] and set marks[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..len {
            if guess[i] == remaining[i] {
                marks[i] = Mark::Exact;
                remaining[i] = CONSUMED;
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..len {
            if marks[i] == Mark::Exact {
                continue;
            }

            if let Some(j) = remaining[..len].iter().position(|&c| c == guess[i]) {
                marks[i] = Mark::Misplaced;
                remaining[j] = CONSUMED;
            }
        }

        Self::from_marks(&marks[..len])
    }

    /// Parse a pattern such as "20110", "G-YY-" or "🟩⬛🟨🟨⬛"
    ///
    /// # Errors
    /// Returns `PatternError` if the symbol count differs from `expected_len`
    /// or any symbol is unknown.
    pub fn parse(text: &str, expected_len: usize) -> Result<Self, PatternError> {
        let marks = text
            .trim()
            .chars()
            .map(|symbol| Mark::from_symbol(symbol).ok_or(PatternError::InvalidSymbol(symbol)))
            .collect::<Result<Vec<_>, _>>()?;

        if marks.len() != expected_len || marks.len() > MAX_WORD_LENGTH {
            return Err(PatternError::InvalidLength {
                expected: expected_len,
                got: marks.len(),
            });
        }

        Ok(Self::from_marks(&marks))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.marks() {
            write!(f, "{}", mark.digit())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn marks_of(pattern: Pattern) -> Vec<Mark> {
        pattern.marks().collect()
    }

    #[test]
    fn pattern_perfect() {
        let perfect = Pattern::perfect(5);
        assert!(perfect.is_perfect());
        assert_eq!(perfect.count_exact(), 5);
        assert_eq!(perfect.value(), 242);
    }

    #[test]
    fn pattern_all_miss() {
        let pattern = Pattern::calculate(&word("abcde"), &word("fghij"));
        assert_eq!(pattern.value(), 0);
        assert_eq!(pattern.count_exact(), 0);
        assert_eq!(pattern.count_misplaced(), 0);
    }

    #[test]
    fn pattern_self_is_perfect() {
        for text in ["crane", "aaaaa", "abc", "zz", "mississippi"] {
            let w = word(text);
            assert_eq!(Pattern::calculate(&w, &w), Pattern::perfect(w.len()));
        }
    }

    #[test]
    fn pattern_exact_exact_miss() {
        let pattern = Pattern::calculate(&word("abc"), &word("abd"));
        assert_eq!(marks_of(pattern), [Mark::Exact, Mark::Exact, Mark::Miss]);
    }

    #[test]
    fn pattern_all_misplaced() {
        let pattern = Pattern::calculate(&word("abc"), &word("cab"));
        assert_eq!(
            marks_of(pattern),
            [Mark::Misplaced, Mark::Misplaced, Mark::Misplaced]
        );
    }

    #[test]
    fn pattern_duplicate_in_guess_only() {
        // Only one E in the secret: the exact one consumes it
        let pattern = Pattern::calculate(&word("eerie"), &word("crane"));
        assert_eq!(
            marks_of(pattern),
            [Mark::Miss, Mark::Miss, Mark::Misplaced, Mark::Miss, Mark::Exact]
        );
    }

    #[test]
    fn pattern_duplicate_first_unconsumed_wins() {
        // SPEED vs ERASE: both E's misplaced, S misplaced
        let pattern = Pattern::calculate(&word("speed"), &word("erase"));
        assert_eq!(
            marks_of(pattern),
            [
                Mark::Misplaced,
                Mark::Miss,
                Mark::Misplaced,
                Mark::Misplaced,
                Mark::Miss
            ]
        );
    }

    #[test]
    fn pattern_is_asymmetric_with_duplicates() {
        let forward = Pattern::calculate(&word("aab"), &word("abc"));
        let backward = Pattern::calculate(&word("abc"), &word("aab"));
        assert_ne!(forward, backward);
    }

    #[test]
    fn pattern_marks_never_exceed_secret_counts() {
        let words = ["speed", "erase", "eerie", "crane", "geese", "level", "abbey"];
        for guess in words {
            for secret in words {
                let (g, s) = (word(guess), word(secret));
                let pattern = Pattern::calculate(&g, &s);
                let secret_counts = s.letter_counts();
                let mut marked = [0u8; 26];
                for (mark, &letter) in pattern.marks().zip(g.letters()) {
                    if mark != Mark::Miss {
                        marked[usize::from(letter - b'a')] += 1;
                    }
                }
                for letter in 0..26 {
                    assert!(marked[letter] <= secret_counts[letter], "{guess} vs {secret}");
                }
            }
        }
    }

    #[test]
    fn pattern_is_pure() {
        let (g, s) = (word("robot"), word("floor"));
        assert_eq!(Pattern::calculate(&g, &s), Pattern::calculate(&g, &s));
    }

    #[test]
    fn pattern_parse_symbol_sets() {
        let digits = Pattern::parse("21100", 5).unwrap();
        let letters = Pattern::parse("GYY--", 5).unwrap();
        let emoji = Pattern::parse("🟩🟨🟨⬛⬜", 5).unwrap();

        assert_eq!(digits, letters);
        assert_eq!(digits, emoji);
        assert_eq!(digits.to_string(), "21100");
    }

    #[test]
    fn pattern_parse_invalid() {
        assert_eq!(
            Pattern::parse("2110", 5),
            Err(PatternError::InvalidLength {
                expected: 5,
                got: 4
            })
        );
        assert_eq!(
            Pattern::parse("21130", 5),
            Err(PatternError::InvalidSymbol('3'))
        );
        assert!(Pattern::parse("", 5).is_err());
    }

    #[test]
    fn pattern_lengths_distinguish() {
        // Same packed value, different lengths
        let short = Pattern::perfect(3);
        let long = Pattern::parse("2220", 4).unwrap();
        assert_eq!(short.value(), long.value());
        assert_ne!(short, long);
    }

    #[test]
    fn pattern_mark_accessor() {
        let pattern = Pattern::parse("012", 3).unwrap();
        assert_eq!(pattern.mark(0), Mark::Miss);
        assert_eq!(pattern.mark(1), Mark::Misplaced);
        assert_eq!(pattern.mark(2), Mark::Exact);
    }

    #[test]
    fn pattern_max_length_packs() {
        let long = "ab".repeat(MAX_WORD_LENGTH / 2);
        let w = word(&long);
        let pattern = Pattern::calculate(&w, &w);
        assert!(pattern.is_perfect());
        assert_eq!(pattern.len(), MAX_WORD_LENGTH);
    }
}
