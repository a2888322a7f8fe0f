//! Command implementations

pub mod benchmark;
pub mod build;
pub mod play;
pub mod rank;
pub mod solve;

pub use benchmark::{BenchmarkResult, GameResult, play_game, run_benchmark};
pub use build::{BuildSummary, summarize};
pub use play::run_play;
pub use rank::{RankResult, rank_openings};
pub use solve::{SolveInput, parse_solve_input, run_solve};

use crate::error::Result;
use std::io::{self, Write};

/// Prompt and read one trimmed line; `None` at end of input
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}
