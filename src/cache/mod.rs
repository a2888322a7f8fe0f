//! On-disk compendium cache
//!
//! One artifact pair per (dictionary name, word length):
//!
//! - `{name}_{L}_compendium.bin`: bincode-encoded compendium with a header
//!   identifying the dictionary it was built from
//! - `{name}_{L}_info.txt`: best-opening table, one `word entropy` line each
//!
//! Every write goes to a `.tmp` sibling first and is renamed into place, so a
//! reader either sees a complete artifact or none at all.

use crate::core::Pattern;
use crate::solver::{Compendium, RankedWord, WordPair};
use crate::wordlists::Dictionary;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const MAGIC: [u8; 4] = *b"WCMP";
const FORMAT_VERSION: u32 = 1;
const INFO_HEADER: &str = "# fingerprint";

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cache encoding error: {0}")]
    Encode(bincode::Error),

    #[error("cache decoding error: {0}")]
    Decode(bincode::Error),

    #[error("{0}")]
    Corrupt(String),
}

impl CacheError {
    /// Whether rebuilding the artifact is the right recovery
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_) | Self::Decode(_))
    }
}

type CacheResult<T> = std::result::Result<T, CacheError>;

#[derive(Serialize)]
struct CompendiumFileRef<'a> {
    magic: [u8; 4],
    version: u32,
    word_length: u32,
    fingerprint: u64,
    word_count: u32,
    buckets: Vec<(Pattern, &'a [WordPair])>,
}

#[derive(Deserialize)]
struct CompendiumFile {
    magic: [u8; 4],
    version: u32,
    word_length: u32,
    fingerprint: u64,
    word_count: u32,
    buckets: Vec<(Pattern, Vec<WordPair>)>,
}

/// Directory of cached artifacts
#[derive(Debug)]
pub struct CompendiumCache {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl CompendiumCache {
    /// Open (and create if needed) the cache directory
    ///
    /// # Errors
    /// Returns `CacheError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> CacheResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn compendium_path(&self, dictionary: &Dictionary) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_compendium.bin",
            dictionary.name(),
            dictionary.word_length()
        ))
    }

    #[must_use]
    pub fn info_path(&self, dictionary: &Dictionary) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_info.txt",
            dictionary.name(),
            dictionary.word_length()
        ))
    }

    /// Load the compendium cached for `dictionary`
    ///
    /// Returns `Ok(None)` when nothing is cached or the cached artifact was
    /// built from a different word list.
    ///
    /// # Errors
    /// Returns `CacheError::Corrupt` or `CacheError::Decode` when the artifact
    /// exists but cannot be trusted, `CacheError::Io` on read failure.
    pub fn load(&self, dictionary: &Dictionary) -> CacheResult<Option<Compendium>> {
        let Some(bytes) = read_if_exists(&self.compendium_path(dictionary))? else {
            return Ok(None);
        };

        let file: CompendiumFile = bincode::deserialize(&bytes).map_err(CacheError::Decode)?;

        if file.magic != MAGIC {
            return Err(CacheError::Corrupt("bad magic bytes".to_string()));
        }
        if file.version != FORMAT_VERSION {
            return Err(CacheError::Corrupt(format!(
                "unsupported format version {}",
                file.version
            )));
        }
        if file.word_length as usize != dictionary.word_length() {
            return Err(CacheError::Corrupt(format!(
                "word length {} in a cache for length {}",
                file.word_length,
                dictionary.word_length()
            )));
        }

        if file.fingerprint != dictionary.fingerprint() || file.word_count as usize != dictionary.len() {
            return Ok(None);
        }

        let compendium =
            Compendium::from_buckets(dictionary.word_length(), dictionary.len(), file.buckets);
        compendium.validate().map_err(CacheError::Corrupt)?;

        Ok(Some(compendium))
    }

    /// Persist `compendium` for `dictionary`, replacing any previous artifact
    ///
    /// # Errors
    /// Returns `CacheError::Encode` or `CacheError::Io`; the previous artifact
    /// is left in place on failure.
    pub fn store(&self, dictionary: &Dictionary, compendium: &Compendium) -> CacheResult<()> {
        let file = CompendiumFileRef {
            magic: MAGIC,
            version: FORMAT_VERSION,
            word_length: dictionary.word_length() as u32,
            fingerprint: dictionary.fingerprint(),
            word_count: dictionary.len() as u32,
            buckets: compendium.sorted_buckets(),
        };
        let bytes = bincode::serialize(&file).map_err(CacheError::Encode)?;

        self.write_atomic(&self.compendium_path(dictionary), &bytes)
    }

    /// Load the best-opening table cached for `dictionary`
    ///
    /// # Errors
    /// Returns `CacheError::Corrupt` on a malformed line, an unknown word, a
    /// header row count other than the dictionary size or a row count that
    /// disagrees with the header.
    pub fn load_word_information(&self, dictionary: &Dictionary) -> CacheResult<Option<Vec<RankedWord>>> {
        let Some(bytes) = read_if_exists(&self.info_path(dictionary))? else {
            return Ok(None);
        };
        let content = String::from_utf8(bytes)
            .map_err(|_| CacheError::Corrupt("word information is not UTF-8".to_string()))?;

        let mut lines = content.lines();
        let (fingerprint, count) = lines
            .next()
            .and_then(parse_info_header)
            .ok_or_else(|| CacheError::Corrupt("missing word information header".to_string()))?;

        if fingerprint != dictionary.fingerprint() {
            return Ok(None);
        }
        if count != dictionary.len() {
            return Err(CacheError::Corrupt(format!(
                "word information header lists {count} rows for {} words",
                dictionary.len()
            )));
        }

        let mut ranking = Vec::with_capacity(count);
        for (number, line) in lines.enumerate() {
            let corrupt = || CacheError::Corrupt(format!("bad word information line {}: {line:?}", number + 2));

            let (text, entropy) = line.split_once(' ').ok_or_else(corrupt)?;
            let entropy: f64 = entropy.parse().map_err(|_| corrupt())?;
            let id = dictionary.lookup(text).ok_or_else(corrupt)?;

            ranking.push(RankedWord {
                word: dictionary.word(id).clone(),
                entropy,
            });
        }

        if ranking.len() != count {
            return Err(CacheError::Corrupt(format!(
                "expected {count} word information rows, found {}",
                ranking.len()
            )));
        }

        Ok(Some(ranking))
    }

    /// Persist the best-opening table for `dictionary`
    ///
    /// # Errors
    /// Returns `CacheError::Io` if the table cannot be written.
    pub fn store_word_information(&self, dictionary: &Dictionary, ranking: &[RankedWord]) -> CacheResult<()> {
        let mut content = format!(
            "{INFO_HEADER} {:016x} {}\n",
            dictionary.fingerprint(),
            ranking.len()
        );
        for ranked in ranking {
            let _ = writeln!(content, "{} {}", ranked.word, ranked.entropy);
        }

        self.write_atomic(&self.info_path(dictionary), content.as_bytes())
    }

    /// Delete every artifact of `dictionary`
    ///
    /// # Errors
    /// Returns `CacheError::Io` if an existing artifact cannot be removed.
    pub fn invalidate(&self, dictionary: &Dictionary) -> CacheResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        for path in [self.compendium_path(dictionary), self.info_path(dictionary)] {
            match fs::remove_file(&path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
        Ok(())
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> CacheResult<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let written = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written.map_err(CacheError::from)
    }
}

fn read_if_exists(path: &Path) -> CacheResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_info_header(line: &str) -> Option<(u64, usize)> {
    let mut fields = line.strip_prefix(INFO_HEADER)?.split_whitespace();
    let fingerprint = u64::from_str_radix(fields.next()?, 16).ok()?;
    let count = fields.next()?.parse().ok()?;
    fields.next().is_none().then_some((fingerprint, count))
}
