//! Wordle Compendium - CLI
//!
//! Play, solve and benchmark word-guessing games over any dictionary and word
//! length, backed by a cached pattern compendium.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wordle_compendium::{
    commands::{rank_openings, run_benchmark, run_play, run_solve, summarize},
    core::Word,
    output::{print_benchmark_result, print_build_summary, print_rank_result},
    registry::{Language, Registry, RegistryConfig},
    solver::WorkerConfig,
    wordlists::normalize_entry,
};

#[derive(Parser)]
#[command(
    name = "wordle_compendium",
    about = "Word-guessing game engine built on an exhaustive pattern compendium",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Newline-delimited word list
    #[arg(short, long, global = true, default_value = "words.txt")]
    dictionary: PathBuf,

    /// Word length to play with
    #[arg(short, long, global = true, default_value = "5")]
    length: usize,

    /// Worker threads (0 = all hardware threads)
    #[arg(short, long, global = true, default_value = "0")]
    threads: usize,

    /// Directory for cached artifacts (default: next to the dictionary)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Compute or load the best-opening table when loading the dictionary
    #[arg(short, long, global = true)]
    best_opening: bool,

    /// Hide progress bars and status lines
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Precompute and cache the compendium (and opening table with -b)
    Build,

    /// Rank the best opening words
    Rank {
        /// Number of openings to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Also show the rank of this word
        word: Option<String>,
    },

    /// Guess a hidden word
    Play {
        /// Try budget per game
        #[arg(short, long, default_value = "6")]
        max_tries: usize,

        /// Show solver statistics after each guess
        #[arg(short, long)]
        assist: bool,

        /// Ranked candidates to display
        #[arg(short = 'n', long, default_value = "10")]
        shown: usize,
    },

    /// Enter guesses and patterns from another game, get the narrowed pool
    Solve {
        /// Ranked candidates to display
        #[arg(short = 'n', long, default_value = "10")]
        shown: usize,
    },

    /// Self-play against the first dictionary words
    Bench {
        /// Number of secret words to play
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Try budget per game
        #[arg(short, long, default_value = "6")]
        max_tries: usize,

        /// Override the opening guess (default: best opening)
        #[arg(short, long)]
        opening: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let registry = Registry::new(RegistryConfig {
        cache_dir: cli.cache_dir.clone(),
        best_opening: cli.best_opening,
        workers: WorkerConfig::new(cli.threads).with_progress(!cli.quiet),
    });

    let language = registry
        .get_or_build_compendium(&cli.dictionary, cli.length)
        .with_context(|| {
            format!(
                "Failed to load {}-letter words from {}",
                cli.length,
                cli.dictionary.display()
            )
        })?;

    match cli.command {
        Commands::Build => {
            print_build_summary(&summarize(&language));
            Ok(())
        }
        Commands::Rank { count, word } => {
            let result = rank_openings(&language, count, word.as_deref())
                .context("Failed to rank openings")?;
            print_rank_result(&result);
            Ok(())
        }
        Commands::Play {
            max_tries,
            assist,
            shown,
        } => run_play(&language, max_tries, assist, shown).context("Play session failed"),
        Commands::Solve { shown } => run_solve(&language, shown).context("Solve session failed"),
        Commands::Bench {
            count,
            max_tries,
            opening,
        } => run_bench_command(&language, count, max_tries, opening.as_deref()),
    }
}

fn run_bench_command(
    language: &Arc<Language>,
    count: usize,
    max_tries: usize,
    opening: Option<&str>,
) -> Result<()> {
    let opening = opening
        .map(|text| -> Result<Word> {
            let word = Word::new(normalize_entry(text))?;
            anyhow::ensure!(
                language.dictionary().contains(&word),
                "Opening '{text}' is not in the dictionary"
            );
            Ok(word)
        })
        .transpose()?;

    if let Some(word) = &opening {
        println!("Running benchmark on {count} words with forced opening: {word}...");
    } else {
        println!("Running benchmark on {count} words...");
    }

    let targets: Vec<Word> = language.dictionary().words().iter().take(count).cloned().collect();

    let result = run_benchmark(language, &targets, opening.as_ref(), max_tries).context("Benchmark failed")?;
    print_benchmark_result(&result);
    Ok(())
}
