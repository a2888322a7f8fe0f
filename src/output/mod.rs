//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_build_summary, print_game_over, print_rank_result,
    print_session_banner, print_turn_report,
};
