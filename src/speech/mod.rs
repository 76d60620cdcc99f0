//! Speech synthesis for timer events.
//!
//! Synthesis is delegated to the platform speech engine through
//! [`CommandSynthesizer`]; the trait seam lets tests drive the overlay
//! window with a mock instead.

mod engine;
mod error;

pub use engine::CommandSynthesizer;
pub use error::SpeechError;

/// Trait for speech synthesis implementations.
///
/// `speak` blocks until synthesis completes; callers that must not block
/// run it on a worker (`tokio::task::spawn_blocking`).
pub trait SpeechSynthesizer: Send + Sync {
    /// Speaks the given text, optionally with a specific voice.
    ///
    /// Voice selection is best-effort: implementations report a failed
    /// selection to the user and retry with the default voice.
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis itself fails.
    fn speak(&self, text: &str, voice: Option<&str>) -> Result<(), SpeechError>;

    /// Enumerates the installed voices.
    ///
    /// # Errors
    ///
    /// Returns an error if enumeration fails; callers degrade to a
    /// placeholder string.
    fn voices(&self) -> Result<Vec<String>, SpeechError>;
}

/// Mock synthesizer for testing.
#[derive(Debug, Default)]
pub struct MockSynthesizer {
    spoken: std::sync::Mutex<Vec<(String, Option<String>)>>,
    delay: std::sync::Mutex<std::time::Duration>,
    voice_list: std::sync::Mutex<Vec<String>>,
}

impl MockSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `speak` call block for the given duration, to simulate
    /// a long synthesis.
    pub fn set_delay(&self, delay: std::time::Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn set_voices(&self, voices: Vec<String>) {
        *self.voice_list.lock().unwrap() = voices;
    }

    #[must_use]
    pub fn spoken(&self) -> Vec<(String, Option<String>)> {
        self.spoken.lock().unwrap().clone()
    }

    #[must_use]
    pub fn speak_count(&self) -> usize {
        self.spoken.lock().unwrap().len()
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn speak(&self, text: &str, voice: Option<&str>) -> Result<(), SpeechError> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice.map(String::from)));
        Ok(())
    }

    fn voices(&self) -> Result<Vec<String>, SpeechError> {
        Ok(self.voice_list.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_spoken_text() {
        let synth = MockSynthesizer::new();
        synth.speak("hello", None).unwrap();
        synth.speak("world", Some("Alex")).unwrap();

        let spoken = synth.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[0], ("hello".to_string(), None));
        assert_eq!(spoken[1], ("world".to_string(), Some("Alex".to_string())));
    }

    #[test]
    fn test_mock_voices() {
        let synth = MockSynthesizer::new();
        synth.set_voices(vec!["Alex".to_string(), "Samantha".to_string()]);
        assert_eq!(synth.voices().unwrap(), vec!["Alex", "Samantha"]);
    }
}
