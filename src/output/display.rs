//! Display functions for command results

use super::formatters::{entropy_bar, letter_list, pattern_to_emoji};
use crate::commands::{BenchmarkResult, BuildSummary, RankResult};
use crate::session::{GameStatus, Session, TurnReport};
use colored::Colorize;

/// Print the summary of a precompute run
pub fn print_build_summary(summary: &BuildSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ({} letters)",
        "COMPENDIUM:".bright_cyan().bold(),
        summary.dictionary.bright_yellow().bold(),
        summary.word_length
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Words:     {}", summary.words);
    println!("   Patterns:  {}", summary.patterns);
    println!("   Pairs:     {}", summary.pairs);
    if let Some(opening) = &summary.best_opening {
        println!(
            "   Opening:   {}",
            opening.to_uppercase().bright_green().bold()
        );
    }
}

/// Print the best openings
pub fn print_rank_result(result: &RankResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ({} letters, {} words)",
        "BEST OPENINGS:".bright_cyan().bold(),
        result.dictionary.bright_yellow().bold(),
        result.word_length,
        result.total_words
    );
    println!("{}", "═".repeat(60).cyan());
    println!();

    for (i, ranked) in result.top.iter().enumerate() {
        println!(
            "   {:>3}. {}  [{}] {}",
            i + 1,
            ranked.word.text().to_uppercase().bright_white().bold(),
            entropy_bar(ranked.entropy, result.information, 30).green(),
            format!("{:.3} bits", ranked.entropy).bright_yellow()
        );
    }

    if let Some((position, ranked)) = &result.focus {
        println!(
            "\n📊 {} ranks #{} of {} with {}",
            ranked.word.text().to_uppercase().bright_white().bold(),
            position,
            result.total_words,
            format!("{:.3} bits", ranked.entropy).bright_yellow()
        );
    }
}

/// Print the opening lines of a session
pub fn print_session_banner(session: &Session, title: &str) {
    let dictionary = session.language().dictionary();

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ({} letters, {} words)",
        format!("{title}:").bright_cyan().bold(),
        dictionary.name().bright_yellow().bold(),
        dictionary.word_length(),
        dictionary.len()
    );
    println!("{}", "═".repeat(60).cyan());
    println!(
        "\n   Remaining information: {:.2} bits\n",
        session.information()
    );
}

/// Print the solver view after a turn
pub fn print_turn_report(report: &TurnReport, shown: usize) {
    println!(
        "\n📊 {} candidates, {} bits remaining",
        report.ranking.len().to_string().bright_yellow().bold(),
        format!("{:.2}", report.information).bright_yellow()
    );

    for ranked in report.ranking.iter().take(shown) {
        println!(
            "   {}  [{}] {:.3} bits",
            ranked.word.text().to_uppercase().bright_white().bold(),
            entropy_bar(ranked.entropy, report.information, 20).green(),
            ranked.entropy
        );
    }
    if report.ranking.len() > shown {
        println!("   … and {} more", report.ranking.len() - shown);
    }

    let unknown = letter_list(report.suggestions.unknown_letters());
    if let (Some(bucket), Some(best)) = (report.suggestions.best_bucket(), report.suggestions.best()) {
        println!(
            "\n💡 {} tests {} unknown letter(s) [{}]",
            best.word.text().to_uppercase().bright_green().bold(),
            bucket,
            unknown
        );
    }
    println!();
}

/// Print the end of a game with its history
pub fn print_game_over(session: &Session) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    match session.status() {
        GameStatus::Won => println!(
            "{}",
            format!("  🎉 Solved in {} of {} tries!", session.tries(), session.max_tries())
                .bright_green()
                .bold()
        ),
        GameStatus::Lost => println!(
            "{}",
            format!(
                "  ❌ Out of tries, the word was {}",
                session.secret().text().to_uppercase()
            )
            .red()
            .bold()
        ),
        GameStatus::Ongoing => {}
    }
    println!("{}", "═".repeat(60).bright_cyan());

    println!("\n  Guess history:");
    for (i, (word, pattern)) in session.history().iter().enumerate() {
        println!(
            "    {}. {} {}",
            (i + 1).to_string().bright_black(),
            word.text().to_uppercase().bright_white().bold(),
            pattern_to_emoji(*pattern)
        );
    }
    println!();
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!(
        "   Solved:           {}",
        format!("{}/{}", result.solved, result.total_words).green()
    );
    if result.failed > 0 {
        println!(
            "   Failed:           {}",
            format!("{} (over {} tries)", result.failed, result.max_tries).red()
        );
    }
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!(
        "   Suggestions used: {} (in {} games)",
        result.suggestions_used, result.games_with_suggestion
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    if result.solved == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&guess_count, &count) in &result.distribution {
        let pct = (count as f64 / result.total_words as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░"
                .repeat(40_usize.saturating_sub(bar_width))
                .bright_black()
        );
        println!("   {guess_count:>2}: {bar} {count:4} ({pct:5.1}%)");
    }
}
