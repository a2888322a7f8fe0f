//! Formatting utilities for terminal output

use crate::core::{Mark, Pattern};

/// Format a pattern as emoji string
#[must_use]
pub fn pattern_to_emoji(pattern: Pattern) -> String {
    pattern
        .marks()
        .map(|mark| match mark {
            Mark::Miss => '⬛',
            Mark::Misplaced => '🟨',
            Mark::Exact => '🟩',
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    // Cast is safe: ratio is clamped to [0, 1]
    let filled = ((ratio * width as f64) as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Entropy as a bar scaled to the information still missing
#[must_use]
pub fn entropy_bar(entropy: f64, information: f64, width: usize) -> String {
    create_progress_bar(entropy, information, width)
}

/// Letters as an upper-case, space-separated list
#[must_use]
pub fn letter_list(letters: impl Iterator<Item = u8>) -> String {
    letters
        .map(|letter| char::from(letter.to_ascii_uppercase()).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_to_emoji_all_gray() {
        let pattern = Pattern::parse("00000", 5).unwrap();
        assert_eq!(pattern_to_emoji(pattern), "⬛⬛⬛⬛⬛");
    }

    #[test]
    fn pattern_to_emoji_all_green() {
        assert_eq!(pattern_to_emoji(Pattern::perfect(6)), "🟩🟩🟩🟩🟩🟩");
    }

    #[test]
    fn pattern_to_emoji_mixed() {
        let pattern = Pattern::parse("2100", 4).unwrap();
        assert_eq!(pattern_to_emoji(pattern), "🟩🟨⬛⬛");
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(1.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn letter_list_uppercases() {
        assert_eq!(letter_list(b"abz".iter().copied()), "A B Z");
    }
}
