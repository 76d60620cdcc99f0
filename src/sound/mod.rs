//! Sound playback for timer events.
//!
//! The timer plays one of five named system sounds at a configured
//! timing offset. Resolution and playback are both best-effort:
//!
//! - `source` maps a sound name to a platform sound file, with a
//!   synthesized tone standing in when no file exists;
//! - `player` plays the resolved source through rodio on a detached
//!   sink, so playback never blocks the tick loop;
//! - a machine without audio hardware runs the timer silently.

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{resolve, SoundSource};

/// Trait for sound playback implementations.
///
/// Abstracts playback so the overlay window can be driven by a mock in
/// tests. Playback happens on the UI thread; the underlying audio
/// stream is not `Send`, so neither is this trait.
pub trait SoundPlayer {
    /// Plays a sound from the given source without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: std::sync::Mutex<Vec<SoundSource>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }
}
