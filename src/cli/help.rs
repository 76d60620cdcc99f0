//! Help output with voice enumeration.
//!
//! The help screen appends the list of installed speech voices to the
//! generated usage text, matching what `--speak-voice` accepts.
//! Enumeration is best-effort and bounded by a timeout; failure degrades
//! to a placeholder line and never blocks the help path for long.

use std::sync::Arc;
use std::time::Duration;

use clap::CommandFactory;
use tokio::time::timeout;
use tracing::debug;

use crate::speech::SpeechSynthesizer;

use super::args::Cli;

/// Maximum time to wait for voice enumeration.
const VOICES_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns true if the argument list asks for the help screen.
///
/// An empty argument list also shows help: the program does nothing
/// useful without at least a duration or a mode flag.
pub fn wants_help(args: &[String]) -> bool {
    args.is_empty()
        || args
            .iter()
            .any(|a| a == "-h" || a == "-?" || a.eq_ignore_ascii_case("--help"))
}

/// Enumerates installed voices, formatted as an indented block.
///
/// The engine runs as a subprocess, so the call is pushed onto a
/// blocking worker and bounded by [`VOICES_TIMEOUT`].
pub async fn enumerate_voices(synth: Arc<dyn SpeechSynthesizer>) -> String {
    let result = timeout(
        VOICES_TIMEOUT,
        tokio::task::spawn_blocking(move || synth.voices()),
    )
    .await;

    match result {
        Ok(Ok(Ok(voices))) if !voices.is_empty() => voices
            .iter()
            .map(|v| format!("    {v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Ok(Ok(Ok(_))) => "    (no voices found)".to_string(),
        Ok(Ok(Err(e))) => {
            debug!("voice enumeration failed: {e}");
            "    (failed to enumerate voices)".to_string()
        }
        _ => "    (failed to enumerate voices)".to_string(),
    }
}

/// Prints the full help text plus the available voices.
pub fn print_help(voices_block: &str) {
    let mut cmd = Cli::command();
    let help = cmd.render_long_help();
    println!("{help}");
    println!("Available voices:");
    println!("{voices_block}");
}

/// Generates shell completion scripts on stdout.
pub fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::speech::MockSynthesizer;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wants_help_empty() {
        assert!(wants_help(&[]));
    }

    #[test]
    fn test_wants_help_flags() {
        assert!(wants_help(&args(&["-h"])));
        assert!(wants_help(&args(&["-?"])));
        assert!(wants_help(&args(&["--help"])));
        assert!(wants_help(&args(&["--HELP"])));
        assert!(wants_help(&args(&["5", "--help"])));
    }

    #[test]
    fn test_wants_help_not_for_normal_args() {
        assert!(!wants_help(&args(&["5"])));
        assert!(!wants_help(&args(&["0", "--clock"])));
    }

    #[tokio::test]
    async fn test_enumerate_voices_lists_installed() {
        let synth = Arc::new(MockSynthesizer::new());
        synth.set_voices(vec!["Alex".to_string(), "Samantha".to_string()]);
        let block = enumerate_voices(synth as Arc<dyn SpeechSynthesizer>).await;
        assert_eq!(block, "    Alex\n    Samantha");
    }

    #[tokio::test]
    async fn test_enumerate_voices_empty_placeholder() {
        let synth = Arc::new(MockSynthesizer::new());
        let block = enumerate_voices(synth as Arc<dyn SpeechSynthesizer>).await;
        assert_eq!(block, "    (no voices found)");
    }

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
