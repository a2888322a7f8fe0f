//! Interactive solve mode
//!
//! The user plays a game elsewhere and reports each guess with the pattern it
//! received; the solver answers with the narrowed pool and its suggestions.

use super::read_line;
use crate::error::{Error, Result};
use crate::output::{print_session_banner, print_turn_report};
use crate::registry::Language;
use crate::session::{GameMode, Session};
use rand::rng;
use std::sync::Arc;

/// One line of user input in solve mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveInput {
    Turn { guess: String, pattern: String },
    New,
    Quit,
}

/// Parse `guess pattern`, or one of the `new` / `quit` commands
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the line is neither a command nor exactly
/// two fields.
pub fn parse_solve_input(line: &str) -> Result<SolveInput> {
    let mut fields = line.split_whitespace();

    match (fields.next(), fields.next(), fields.next()) {
        (Some("quit" | "q" | "exit"), None, None) => Ok(SolveInput::Quit),
        (Some("new" | "n"), None, None) => Ok(SolveInput::New),
        (Some(guess), Some(pattern), None) => Ok(SolveInput::Turn {
            guess: guess.to_string(),
            pattern: pattern.to_string(),
        }),
        _ => Err(Error::InvalidInput(
            "expected '<guess> <pattern>', 'new' or 'quit'".to_string(),
        )),
    }
}

/// Run the interactive solver until the user quits or input ends
///
/// # Errors
///
/// Returns an error on terminal I/O failure. Invalid turns are reported and
/// the loop continues.
pub fn run_solve(language: &Arc<Language>, shown: usize) -> Result<()> {
    let mut session = Session::new(Arc::clone(language), GameMode::Solve, usize::MAX, &mut rng())?;
    print_session_banner(&session, "Solve");

    println!("Enter each guess followed by its pattern, e.g. 'crane 20100'.");
    println!("Patterns use 0/1/2, -/Y/G or ⬛🟨🟩. Commands: 'new', 'quit'.\n");

    loop {
        let Some(line) = read_line("guess pattern")? else {
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }

        match parse_solve_input(&line) {
            Ok(SolveInput::Quit) => return Ok(()),
            Ok(SolveInput::New) => {
                session.reset(&mut rng())?;
                println!("\n🔄 New game started!\n");
            }
            Ok(SolveInput::Turn { guess, pattern }) => {
                match session.submit_guess_and_pattern(&guess, &pattern) {
                    Ok(report) => print_turn_report(&report, shown),
                    Err(e @ Error::PoolExhausted { .. }) => {
                        println!("❌ {e}; the pool is unchanged, check the pattern.\n");
                    }
                    Err(Error::InvalidInput(reason)) => println!("❌ {reason}\n"),
                    Err(e) => return Err(e),
                }
            }
            Err(e) => println!("❌ {e}\n"),
        }
    }
}
