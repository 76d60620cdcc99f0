//! Speech synthesis via the platform speech engine.
//!
//! The overlay delegates synthesis to whatever engine the platform
//! ships: `say` on macOS, `espeak-ng`/`espeak` on Linux, the SAPI
//! synthesizer through PowerShell on Windows. The engine runs as a
//! subprocess and `speak` blocks until it finishes; callers that must
//! not block run it inside `tokio::task::spawn_blocking`.
//!
//! Voice selection is best-effort: when the engine rejects the
//! requested voice, the failure is reported to the user through a
//! desktop notification and synthesis is retried with the default
//! voice.

use std::path::{Path, PathBuf};
use std::process::Command;

use notify_rust::Notification;
use tracing::{debug, error, warn};

use super::error::SpeechError;
use super::SpeechSynthesizer;

/// A synthesizer that drives the platform speech engine as a subprocess.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: Option<PathBuf>,
}

impl CommandSynthesizer {
    /// Probes the system for a speech engine.
    ///
    /// Detection never fails; a system without an engine produces a
    /// synthesizer whose operations return `SpeechError::EngineNotFound`.
    #[must_use]
    pub fn detect() -> Self {
        let program = find_engine();
        match &program {
            Some(path) => debug!(engine = %path.display(), "speech engine detected"),
            None => warn!("no speech engine found; speech requests will be skipped"),
        }
        Self { program }
    }

    /// Creates a synthesizer for an explicit engine binary (tests).
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    /// Returns true if an engine binary was found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn program(&self) -> Result<&Path, SpeechError> {
        self.program.as_deref().ok_or(SpeechError::EngineNotFound)
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn speak(&self, text: &str, voice: Option<&str>) -> Result<(), SpeechError> {
        let program = self.program()?;

        if let Some(voice) = voice {
            match run_engine(speak_command(program, text, Some(voice))) {
                Ok(()) => return Ok(()),
                Err(detail) => {
                    let err = SpeechError::VoiceSelection {
                        voice: voice.to_string(),
                        detail,
                    };
                    report_voice_error(&err);
                    // Keep speaking with the engine's default voice.
                }
            }
        }

        run_engine(speak_command(program, text, None)).map_err(SpeechError::Synthesis)
    }

    fn voices(&self) -> Result<Vec<String>, SpeechError> {
        let program = self.program()?;
        let output = voices_command(program)
            .output()
            .map_err(|e| SpeechError::Enumeration(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Enumeration(stderr.trim().to_string()));
        }
        Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Runs a prepared engine command to completion.
fn run_engine(mut command: Command) -> Result<(), String> {
    let output = command.output().map_err(|e| e.to_string())?;
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("{} ({})", stderr.trim(), output.status))
    }
}

/// Reports a voice-selection failure to the user.
///
/// Falls back to the log when the notification service is unreachable.
fn report_voice_error(err: &SpeechError) {
    let shown = Notification::new()
        .summary("Speech Error")
        .body(&err.to_string())
        .show();
    if shown.is_err() {
        error!("{err}");
    } else {
        warn!("{err}; continuing with the default voice");
    }
}

// ============================================================================
// Engine detection
// ============================================================================

#[cfg(target_os = "macos")]
fn find_engine() -> Option<PathBuf> {
    let say = PathBuf::from("/usr/bin/say");
    say.exists().then_some(say)
}

#[cfg(target_os = "windows")]
fn find_engine() -> Option<PathBuf> {
    find_in_path("powershell.exe")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn find_engine() -> Option<PathBuf> {
    ["espeak-ng", "espeak"]
        .iter()
        .find_map(|name| find_in_path(name))
}

/// Searches `PATH` for an executable with the given name.
#[allow(dead_code)]
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// Command construction
// ============================================================================

#[cfg(target_os = "macos")]
fn speak_command(program: &Path, text: &str, voice: Option<&str>) -> Command {
    let mut cmd = Command::new(program);
    if let Some(voice) = voice {
        cmd.arg("-v").arg(voice);
    }
    cmd.arg(text);
    cmd
}

#[cfg(target_os = "macos")]
fn voices_command(program: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("-v").arg("?");
    cmd
}

#[cfg(target_os = "windows")]
fn speak_command(program: &Path, text: &str, voice: Option<&str>) -> Command {
    let mut script = String::from(
        "Add-Type -AssemblyName System.Speech; \
         $ErrorActionPreference = 'Stop'; \
         $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; ",
    );
    if let Some(voice) = voice {
        script.push_str(&format!("$s.SelectVoice('{}'); ", escape_ps(voice)));
    }
    script.push_str(&format!("$s.Speak('{}')", escape_ps(text)));

    let mut cmd = Command::new(program);
    cmd.args(["-NoProfile", "-NonInteractive", "-Command", &script]);
    cmd
}

#[cfg(target_os = "windows")]
fn voices_command(program: &Path) -> Command {
    let script = "Add-Type -AssemblyName System.Speech; \
                  (New-Object System.Speech.Synthesis.SpeechSynthesizer).GetInstalledVoices() \
                  | ForEach-Object { $_.VoiceInfo.Name }";
    let mut cmd = Command::new(program);
    cmd.args(["-NoProfile", "-NonInteractive", "-Command", script]);
    cmd
}

/// Doubles single quotes for embedding in a PowerShell literal.
#[cfg(target_os = "windows")]
fn escape_ps(text: &str) -> String {
    text.replace('\'', "''")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn speak_command(program: &Path, text: &str, voice: Option<&str>) -> Command {
    let mut cmd = Command::new(program);
    if let Some(voice) = voice {
        cmd.arg("-v").arg(voice);
    }
    cmd.arg(text);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn voices_command(program: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("--voices");
    cmd
}

// ============================================================================
// Voice list parsing
// ============================================================================

#[cfg(target_os = "macos")]
fn parse_voices(output: &str) -> Vec<String> {
    parse_say_voices(output)
}

#[cfg(target_os = "windows")]
fn parse_voices(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn parse_voices(output: &str) -> Vec<String> {
    parse_espeak_voices(output)
}

/// Parses `say -v ?` output. Voice names may contain single spaces;
/// columns are separated by runs of at least two.
#[allow(dead_code)]
fn parse_say_voices(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split("  ").next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Parses `espeak-ng --voices` tabular output; the voice name is the
/// fourth column.
#[allow(dead_code)]
fn parse_espeak_voices(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(3))
        .map(String::from)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
