//! CLI surface: argument parsing and the help/voices screen.

mod args;
mod help;

pub use args::Cli;
pub use help::{enumerate_voices, generate_completions, print_help, wants_help};
