//! Sound player implementation using rodio.

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use crate::types::SoundKind;

use super::error::SoundError;
use super::source::SoundSource;

/// A sound player backed by rodio.
///
/// Playback is non-blocking: sinks are detached and the sound keeps
/// playing in the background while the tick loop continues. A failed
/// file playback falls back to a synthesized tone.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source without blocking.
    ///
    /// File sources that fail to open or decode fall back to the tone.
    ///
    /// # Errors
    ///
    /// Returns an error only if the fallback tone cannot be played either.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { kind, path } => {
                debug!(sound = %kind, path = %path.display(), "playing sound file");
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(sound = %kind, "file playback failed ({e}), falling back to tone");
                        self.play_tone(*kind)
                    }
                }
            }
            SoundSource::Tone { kind } => {
                debug!(sound = %kind, "playing synthesized tone");
                self.play_tone(*kind)
            }
        }
    }

    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;
        self.detach(decoder.convert_samples())
    }

    fn play_tone(&self, kind: SoundKind) -> Result<(), SoundError> {
        let tone = SineWave::new(tone_frequency(kind))
            .take_duration(Duration::from_millis(350))
            .amplify(0.6);
        self.detach(tone)
    }

    fn detach<S>(&self, audio: S) -> Result<(), SoundError>
    where
        S: Source<Item = f32> + Send + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.append(audio);
        sink.detach();
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Tone frequency standing in for each named sound, in hertz.
fn tone_frequency(kind: SoundKind) -> f32 {
    match kind {
        SoundKind::Beep => 880.0,
        SoundKind::Asterisk => 660.0,
        SoundKind::Exclamation => 988.0,
        SoundKind::Hand => 440.0,
        SoundKind::Question => 740.0,
    }
}

/// Creates a sound player, returning `None` if audio is unavailable.
///
/// Audio is optional for the overlay: if initialization fails a warning
/// is logged and the timer runs silently.
#[must_use]
pub fn try_create_player() -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("audio not available, sound disabled: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests tolerate environments without audio hardware
    // (e.g. CI containers) by skipping when no device is present.

    #[test]
    fn test_tone_frequencies_distinct() {
        let freqs = [
            tone_frequency(SoundKind::Beep),
            tone_frequency(SoundKind::Asterisk),
            tone_frequency(SoundKind::Exclamation),
            tone_frequency(SoundKind::Hand),
            tone_frequency(SoundKind::Question),
        ];
        for (i, a) in freqs.iter().enumerate() {
            for b in freqs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_try_create_player_no_panic() {
        let _ = try_create_player();
    }

    #[test]
    fn test_play_tone() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };
        assert!(player
            .play(&SoundSource::Tone {
                kind: SoundKind::Beep
            })
            .is_ok());
    }

    #[test]
    fn test_play_missing_file_falls_back() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };
        let source = SoundSource::File {
            kind: SoundKind::Hand,
            path: "/nonexistent/sound.wav".into(),
        };
        // Falls back to the tone and succeeds.
        assert!(player.play(&source).is_ok());
    }

    #[test]
    fn test_debug_impl() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };
        assert!(format!("{player:?}").contains("RodioSoundPlayer"));
    }
}
