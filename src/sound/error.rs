//! Sound system error types.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device is available.
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The resolved sound file could not be opened.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// The audio file could not be decoded.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// The playback sink could not be created.
    #[error("failed to create audio sink: {0}")]
    StreamError(String),
}

impl SoundError {
    /// Returns true if this error is about device availability rather
    /// than a particular file.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }
}
