//! Wordle Compendium
//!
//! A word-guessing game engine for dictionaries of any language and word
//! length. Every pair of dictionary words is indexed once by the feedback
//! pattern it produces; narrowing the candidate pool and ranking guesses by
//! entropy then read that index instead of recomputing patterns.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_compendium::core::{Pattern, Word};
//!
//! let guess = Word::new("crane").unwrap();
//! let secret = Word::new("slate").unwrap();
//!
//! let pattern = Pattern::calculate(&guess, &secret);
//! assert_eq!(pattern.to_string(), "00202");
//! ```

// Core domain types
pub mod core;

// Dictionaries
pub mod wordlists;

// Compendium, entropy ranking, narrowing and suggestions
pub mod solver;

// Persisted artifacts
pub mod cache;

// Shared per-dictionary state
pub mod registry;

// Game sessions
pub mod session;

pub mod error;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::{fs, process};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    /// Scratch directory removed on drop
    pub struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        pub fn new(label: &str) -> Self {
            let unique = NEXT.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "wordle_compendium-{label}-{}-{unique}",
                process::id()
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
