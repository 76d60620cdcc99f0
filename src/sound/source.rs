//! Sound source resolution.
//!
//! Maps the five named timer sounds to platform sound files, falling back
//! to a synthesized tone when no file is available. Resolution is
//! best-effort: a missing sound theme must never stop the timer.

use std::path::{Path, PathBuf};

use crate::types::SoundKind;

/// A resolved sound, ready for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sound file shipped with the platform.
    File {
        /// The sound this file was resolved for.
        kind: SoundKind,
        /// Full path to the sound file.
        path: PathBuf,
    },
    /// A synthesized tone, used when no platform file exists.
    Tone {
        /// The sound the tone stands in for.
        kind: SoundKind,
    },
}

impl SoundSource {
    /// The sound kind this source was resolved for.
    #[must_use]
    pub fn kind(&self) -> SoundKind {
        match self {
            Self::File { kind, .. } | Self::Tone { kind } => *kind,
        }
    }

    /// The file path, if this source is file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

/// Candidate files for a sound kind, in order of preference.
#[cfg(target_os = "macos")]
fn candidate_files(kind: SoundKind) -> &'static [&'static str] {
    match kind {
        SoundKind::Beep => &["/System/Library/Sounds/Ping.aiff"],
        SoundKind::Asterisk => &["/System/Library/Sounds/Glass.aiff"],
        SoundKind::Exclamation => &["/System/Library/Sounds/Sosumi.aiff"],
        SoundKind::Hand => &["/System/Library/Sounds/Basso.aiff"],
        SoundKind::Question => &["/System/Library/Sounds/Purr.aiff"],
    }
}

#[cfg(target_os = "windows")]
fn candidate_files(kind: SoundKind) -> &'static [&'static str] {
    match kind {
        SoundKind::Beep => &["C:\\Windows\\Media\\Windows Ding.wav"],
        SoundKind::Asterisk => &["C:\\Windows\\Media\\Windows Background.wav", "C:\\Windows\\Media\\chimes.wav"],
        SoundKind::Exclamation => &["C:\\Windows\\Media\\Windows Exclamation.wav"],
        SoundKind::Hand => &["C:\\Windows\\Media\\Windows Critical Stop.wav"],
        SoundKind::Question => &["C:\\Windows\\Media\\chord.wav"],
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn candidate_files(kind: SoundKind) -> &'static [&'static str] {
    match kind {
        SoundKind::Beep => &[
            "/usr/share/sounds/freedesktop/stereo/bell.oga",
            "/usr/share/sounds/freedesktop/stereo/complete.oga",
        ],
        SoundKind::Asterisk => &["/usr/share/sounds/freedesktop/stereo/dialog-information.oga"],
        SoundKind::Exclamation => &["/usr/share/sounds/freedesktop/stereo/dialog-warning.oga"],
        SoundKind::Hand => &["/usr/share/sounds/freedesktop/stereo/dialog-error.oga"],
        SoundKind::Question => &[
            "/usr/share/sounds/freedesktop/stereo/dialog-question.oga",
            "/usr/share/sounds/freedesktop/stereo/dialog-information.oga",
        ],
    }
}

/// Resolves a sound kind to the first existing platform file, or a tone.
#[must_use]
pub fn resolve(kind: SoundKind) -> SoundSource {
    for candidate in candidate_files(kind) {
        let path = Path::new(candidate);
        if path.exists() {
            return SoundSource::File {
                kind,
                path: path.to_path_buf(),
            };
        }
    }
    SoundSource::Tone { kind }
}
