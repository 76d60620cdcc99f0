//! Speech system error types.

use thiserror::Error;

/// Errors that can occur in the speech synthesis system.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No speech engine was found on this system.
    #[error("no speech engine available on this system")]
    EngineNotFound,

    /// The requested voice could not be selected.
    #[error("failed to select voice '{voice}': {detail}")]
    VoiceSelection {
        /// The requested voice name.
        voice: String,
        /// Engine output describing the failure.
        detail: String,
    },

    /// The engine failed while synthesizing.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    /// Installed voices could not be enumerated.
    #[error("failed to enumerate voices: {0}")]
    Enumeration(String),
}
