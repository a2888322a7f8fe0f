//! Interactive play mode
//!
//! Guess a hidden dictionary word within the try budget. In assisted mode the
//! solver statistics are shown after every guess.

use super::read_line;
use crate::error::{Error, Result};
use crate::output::formatters::pattern_to_emoji;
use crate::output::{print_game_over, print_session_banner, print_turn_report};
use crate::registry::Language;
use crate::session::{GameMode, GameStatus, Session};
use rand::rng;
use std::sync::Arc;

/// Play games until the user quits or input ends
///
/// # Errors
///
/// Returns an error on terminal I/O failure. Invalid guesses are reported and
/// the loop continues.
pub fn run_play(language: &Arc<Language>, max_tries: usize, assisted: bool, shown: usize) -> Result<()> {
    let mode = if assisted {
        GameMode::Assisted
    } else {
        GameMode::Play
    };
    let mut session = Session::new(Arc::clone(language), mode, max_tries, &mut rng())?;
    print_session_banner(&session, "Play");

    println!("Guess the hidden word. Commands: 'new', 'quit'.\n");

    loop {
        let prompt = format!("Guess {}/{}", session.tries() + 1, session.max_tries());
        let Some(line) = read_line(&prompt)? else {
            return Ok(());
        };

        match line.to_lowercase().as_str() {
            "" => continue,
            "quit" | "q" | "exit" => {
                println!("\n👋 The word was {}.\n", session.secret().text().to_uppercase());
                return Ok(());
            }
            "new" | "n" => {
                session.reset(&mut rng())?;
                println!("\n🔄 New game started!\n");
                continue;
            }
            guess => match session.submit_guess(guess) {
                Ok(pattern) => {
                    println!("   {} {}", guess.to_uppercase(), pattern_to_emoji(pattern));

                    if session.status() == GameStatus::Ongoing && mode == GameMode::Assisted {
                        let report = session.submit_guess_and_pattern(guess, &pattern.to_string())?;
                        print_turn_report(&report, shown);
                    }
                }
                Err(Error::InvalidInput(reason)) => {
                    println!("❌ {reason}\n");
                    continue;
                }
                Err(e) => return Err(e),
            },
        }

        if session.status() != GameStatus::Ongoing {
            print_game_over(&session);

            match read_line("Play again? (yes/no)")?.as_deref() {
                Some("yes" | "y") => {
                    session.reset(&mut rng())?;
                    println!("\n🔄 New game started!\n");
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
        }
    }
}
