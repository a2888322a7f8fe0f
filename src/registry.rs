//! Shared, lazily built per-dictionary state
//!
//! A `Registry` hands out one `Language` per (dictionary file, word length).
//! The first request loads the dictionary and the cached compendium (building
//! and persisting it when missing, stale or corrupt); later requests share the
//! same `Arc<Language>`.

use crate::cache::CompendiumCache;
use crate::error::Result;
use crate::solver::{Compendium, PatternHistogram, RankedWord, WorkerConfig, rank_words};
use crate::wordlists::{Dictionary, load_dictionary};
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// How languages are loaded
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Where artifacts live; defaults to the dictionary's own directory
    pub cache_dir: Option<PathBuf>,
    /// Compute (or load) the best-opening table when a language is loaded
    pub best_opening: bool,
    pub workers: WorkerConfig,
}

/// Everything needed to play or solve with one dictionary
#[derive(Debug)]
pub struct Language {
    dictionary: Arc<Dictionary>,
    compendium: Compendium,
    word_information: OnceCell<Arc<Vec<RankedWord>>>,
    cache: Arc<CompendiumCache>,
    workers: WorkerConfig,
}

impl Language {
    #[must_use]
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    #[must_use]
    pub const fn compendium(&self) -> &Compendium {
        &self.compendium
    }

    #[must_use]
    pub const fn workers(&self) -> &WorkerConfig {
        &self.workers
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.dictionary.word_length()
    }

    /// Best-opening table, if it has been loaded or computed already
    #[must_use]
    pub fn best_opening(&self) -> Option<&Arc<Vec<RankedWord>>> {
        self.word_information.get()
    }

    /// Best-opening table, loading it from the cache or computing it
    ///
    /// # Errors
    /// Returns `Error::ComputeFailure` if ranking fails, or a cache I/O error
    /// other than corruption.
    pub fn word_information(&self) -> Result<&Arc<Vec<RankedWord>>> {
        self.word_information
            .get_or_try_init(|| self.load_or_rank_dictionary().map(Arc::new))
    }

    fn load_or_rank_dictionary(&self) -> Result<Vec<RankedWord>> {
        match self.cache.load_word_information(&self.dictionary) {
            Ok(Some(ranking)) => return Ok(ranking),
            Ok(None) => {}
            Err(e) if e.is_corrupt() => {
                self.workers.warn(&format!("Discarding word information: {e}"));
            }
            Err(e) => return Err(e.into()),
        }

        self.workers.status(&format!(
            "Ranking {} words for the best opening",
            self.dictionary.len()
        ));
        let pool = self.dictionary.ids();
        let histogram = PatternHistogram::build(&self.compendium, &pool, &self.workers)?;
        let ranking = rank_words(&self.dictionary, &pool, &histogram, &self.workers)?;

        if let Err(e) = self.cache.store_word_information(&self.dictionary, &ranking) {
            self.workers.warn(&format!("Could not cache word information: {e}"));
        }

        Ok(ranking)
    }
}

type Slot = Arc<OnceCell<Arc<Language>>>;

/// Map of loaded languages
#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    slots: Mutex<FxHashMap<(PathBuf, usize), Slot>>,
    caches: Mutex<FxHashMap<PathBuf, Arc<CompendiumCache>>>,
}

impl Registry {
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Language for the dictionary at `path`, restricted to `word_length`
    ///
    /// Concurrent first requests for the same key build it once.
    ///
    /// # Errors
    /// Returns the dictionary loading error, `Error::ComputeFailure` if the
    /// compendium build fails, or a cache I/O error other than corruption.
    pub fn language(&self, path: impl AsRef<Path>, word_length: usize) -> Result<Arc<Language>> {
        let path = path.as_ref();
        let slot = Arc::clone(
            self.slots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry((path.to_path_buf(), word_length))
                .or_default(),
        );

        slot.get_or_try_init(|| self.load_language(path, word_length).map(Arc::new))
            .cloned()
    }

    /// Language whose compendium is loaded from cache or freshly built
    ///
    /// # Errors
    /// See [`Registry::language`].
    pub fn get_or_build_compendium(&self, path: impl AsRef<Path>, word_length: usize) -> Result<Arc<Language>> {
        self.language(path, word_length)
    }

    /// Best-opening table of the language, computed and cached on first use
    ///
    /// # Errors
    /// See [`Registry::language`] and [`Language::word_information`].
    pub fn get_or_build_word_information(
        &self,
        path: impl AsRef<Path>,
        word_length: usize,
    ) -> Result<Arc<Vec<RankedWord>>> {
        let language = self.language(path, word_length)?;
        language.word_information().cloned()
    }

    fn load_language(&self, path: &Path, word_length: usize) -> Result<Language> {
        let workers = self.config.workers;
        let dictionary = Arc::new(load_dictionary(path, word_length)?);
        workers.status(&format!(
            "Loaded {} words of length {word_length} from {}",
            dictionary.len(),
            path.display()
        ));

        let cache = self.cache_for(path)?;
        let compendium = load_or_build_compendium(&cache, &dictionary, &workers)?;

        let language = Language {
            dictionary,
            compendium,
            word_information: OnceCell::new(),
            cache,
            workers,
        };

        if self.config.best_opening {
            language.word_information()?;
        }

        Ok(language)
    }

    fn cache_for(&self, dictionary_path: &Path) -> Result<Arc<CompendiumCache>> {
        let dir = self.config.cache_dir.clone().unwrap_or_else(|| {
            dictionary_path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        });

        let mut caches = self.caches.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cache) = caches.get(&dir) {
            return Ok(Arc::clone(cache));
        }

        let cache = Arc::new(CompendiumCache::open(&dir)?);
        caches.insert(dir, Arc::clone(&cache));
        Ok(cache)
    }
}

fn load_or_build_compendium(
    cache: &CompendiumCache,
    dictionary: &Dictionary,
    workers: &WorkerConfig,
) -> Result<Compendium> {
    match cache.load(dictionary) {
        Ok(Some(compendium)) => {
            workers.status(&format!(
                "Loaded {} patterns from {}",
                compendium.pattern_count(),
                cache.compendium_path(dictionary).display()
            ));
            return Ok(compendium);
        }
        Ok(None) => {}
        Err(e) if e.is_corrupt() => {
            workers.warn(&format!("Rebuilding corrupt compendium cache: {e}"));
        }
        Err(e) => return Err(e.into()),
    }

    let compendium = Compendium::build(dictionary, workers)?;
    workers.status(&format!(
        "Built {} patterns over {} pairs",
        compendium.pattern_count(),
        compendium.pair_count()
    ));

    if let Err(e) = cache.store(dictionary, &compendium) {
        workers.warn(&format!("Could not cache compendium: {e}"));
    }

    Ok(compendium)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;
    use std::fs;

    fn write_dictionary(dir: &TempDir, words: &str) -> PathBuf {
        let path = dir.path().join("demo.txt");
        fs::write(&path, words).unwrap();
        path
    }

    fn registry(best_opening: bool) -> Registry {
        Registry::new(RegistryConfig {
            cache_dir: None,
            best_opening,
            workers: WorkerConfig::new(2),
        })
    }

    #[test]
    fn language_is_built_once_and_shared() {
        let dir = TempDir::new("registry-shared");
        let path = write_dictionary(&dir, "abc\nabd\nxyz\nabcd\n");
        let registry = registry(false);

        let first = registry.language(&path, 3).unwrap();
        let second = registry.get_or_build_compendium(&path, 3).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.dictionary().len(), 3);
        assert_eq!(first.compendium().validate(), Ok(()));
        assert!(first.best_opening().is_none());
    }

    #[test]
    fn word_lengths_are_separate_languages() {
        let dir = TempDir::new("registry-lengths");
        let path = write_dictionary(&dir, "abc\nabd\nabcd\nwxyz\n");
        let registry = registry(false);

        let three = registry.language(&path, 3).unwrap();
        let four = registry.language(&path, 4).unwrap();

        assert_eq!(three.word_length(), 3);
        assert_eq!(four.word_length(), 4);
        assert!(dir.path().join("demo_3_compendium.bin").exists());
        assert!(dir.path().join("demo_4_compendium.bin").exists());
    }

    #[test]
    fn compendium_is_persisted_and_reloaded() {
        let dir = TempDir::new("registry-persist");
        let path = write_dictionary(&dir, "abc\nabd\nxyz\n");

        let built = registry(false).language(&path, 3).unwrap();
        let reloaded = registry(false).language(&path, 3).unwrap();

        assert_eq!(built.compendium(), reloaded.compendium());
    }

    #[test]
    fn corrupt_cache_is_rebuilt_and_overwritten() {
        let dir = TempDir::new("registry-corrupt");
        let path = write_dictionary(&dir, "abc\nabd\nxyz\n");
        let built = registry(false).language(&path, 3).unwrap();

        let blob = dir.path().join("demo_3_compendium.bin");
        fs::write(&blob, b"garbage").unwrap();

        let rebuilt = registry(false).language(&path, 3).unwrap();
        assert_eq!(built.compendium(), rebuilt.compendium());

        let cache = CompendiumCache::open(dir.path()).unwrap();
        let reloaded = cache.load(rebuilt.dictionary()).unwrap().unwrap();
        assert_eq!(&reloaded, rebuilt.compendium());
    }

    #[test]
    fn word_information_is_computed_and_cached() {
        let dir = TempDir::new("registry-info");
        let path = write_dictionary(&dir, "abc\nabd\nabe\nxyz\n");

        let ranking = registry(false).get_or_build_word_information(&path, 3).unwrap();
        assert_eq!(ranking.len(), 4);
        assert!(ranking.windows(2).all(|w| w[0].entropy >= w[1].entropy));
        assert!(dir.path().join("demo_3_info.txt").exists());

        let eager = registry(true).language(&path, 3).unwrap();
        assert_eq!(eager.best_opening().map(|r| r.as_slice()), Some(ranking.as_slice()));
    }

    #[test]
    fn explicit_cache_dir_is_used() {
        let dictionaries = TempDir::new("registry-dict");
        let artifacts = TempDir::new("registry-artifacts");
        let path = write_dictionary(&dictionaries, "abc\nabd\n");

        let registry = Registry::new(RegistryConfig {
            cache_dir: Some(artifacts.path().to_path_buf()),
            best_opening: false,
            workers: WorkerConfig::new(1),
        });
        registry.language(&path, 3).unwrap();

        assert!(artifacts.path().join("demo_3_compendium.bin").exists());
        assert!(!dictionaries.path().join("demo_3_compendium.bin").exists());
    }

    #[test]
    fn missing_dictionary_is_an_error() {
        let dir = TempDir::new("registry-missing");
        assert!(registry(false).language(dir.path().join("none.txt"), 5).is_err());
    }

    #[test]
    fn no_word_of_length_is_an_error() {
        let dir = TempDir::new("registry-empty");
        let path = write_dictionary(&dir, "abc\nabd\n");
        assert!(registry(false).language(&path, 7).is_err());
    }
}
