//! Overlay window lifecycle.
//!
//! One `OverlayWindow` per target display. The window composes the
//! formatter and the event scheduler, dispatches the scheduler's events
//! to the sound and speech collaborators, and owns the close decision.
//!
//! Lifecycle: `Created → Shown → (tick)* → AwaitingSpeech? → Closed`.
//! The first tick fires the start events; subsequent ticks evaluate the
//! scheduler. End-timed speech runs on a blocking worker and signals a
//! one-shot channel the tick loop polls, so the render loop itself never
//! blocks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::sound::{self, SoundPlayer};
use crate::speech::SpeechSynthesizer;
use crate::timer::{format, EventScheduler, TimerEvent};
use crate::types::{OverlayConfig, WindowBounds};

use super::display::Monitor;
use super::layout;

// ============================================================================
// WindowState
// ============================================================================

/// Lifecycle state of one overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowState {
    /// Constructed, not yet rendered.
    Created,
    /// Visible and ticking.
    Shown,
    /// End speech in flight; close once it completes.
    AwaitingSpeech,
    /// Done; the window must be torn down.
    Closed,
}

// ============================================================================
// OverlayWindow
// ============================================================================

/// The text and close decision produced by one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFrame {
    /// Text to render this frame.
    pub text: String,
    /// True once the window must close.
    pub closed: bool,
}

/// One overlay window: scheduler, session, and side-effect dispatch.
pub struct OverlayWindow {
    config: Arc<OverlayConfig>,
    monitor: Monitor,
    scheduler: EventScheduler,
    state: WindowState,
    bounds: WindowBounds,
    sound: Option<Arc<dyn SoundPlayer>>,
    speech: Arc<dyn SpeechSynthesizer>,
    runtime: Handle,
    speech_done: Option<oneshot::Receiver<()>>,
}

impl OverlayWindow {
    /// Creates a window for one display.
    pub fn new(
        config: Arc<OverlayConfig>,
        monitor: Monitor,
        started_at: Instant,
        sound: Option<Arc<dyn SoundPlayer>>,
        speech: Arc<dyn SpeechSynthesizer>,
        runtime: Handle,
    ) -> Self {
        let scheduler = EventScheduler::new(&config, started_at);
        let mut bounds = WindowBounds::INITIAL;
        bounds.left = monitor.area.left + (monitor.area.width - bounds.width) / 2;
        bounds.top = monitor.area.top + (monitor.area.height - bounds.height) / 2;
        Self {
            config,
            monitor,
            scheduler,
            state: WindowState::Created,
            bounds,
            sound,
            speech,
            runtime,
            speech_done: None,
        }
    }

    /// The display this window lives on.
    pub fn monitor(&self) -> Monitor {
        self.monitor
    }

    /// The shared configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Current window bounds.
    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    /// The periodic tick interval for this window.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    /// Returns true once the window has closed.
    pub fn is_closed(&self) -> bool {
        self.state == WindowState::Closed
    }

    /// Advances the window by one tick.
    ///
    /// The first call transitions `Created → Shown` and fires the start
    /// events; later calls evaluate the scheduler and, once an end speech
    /// is in flight, poll its completion channel.
    pub fn tick(&mut self, now: Instant, wall: DateTime<Local>) -> TickFrame {
        match self.state {
            WindowState::Created => {
                self.state = WindowState::Shown;
                let events = self.scheduler.on_shown();
                self.dispatch(events);
            }
            WindowState::Shown => {
                let events = self.scheduler.on_tick(now);
                self.dispatch(events);
            }
            WindowState::AwaitingSpeech => self.poll_speech(),
            WindowState::Closed => {}
        }

        TickFrame {
            text: format::display_text(&self.config, self.scheduler.session(), now, wall),
            closed: self.is_closed(),
        }
    }

    /// Closes the window in response to user input (click or Escape).
    ///
    /// Any in-flight speech keeps running; it is not worth interrupting
    /// for a window that is already gone.
    pub fn request_close(&mut self) {
        if self.state != WindowState::Closed {
            debug!("window closed by user");
            self.state = WindowState::Closed;
        }
    }

    /// Resolves bounds for the measured text, reporting whether they
    /// changed since the last tick.
    ///
    /// The changed flag keeps resize idempotent: identical text produces
    /// identical bounds and no window-system commands.
    pub fn resolve_bounds(&mut self, text_width: f32, text_height: f32) -> (WindowBounds, bool) {
        let bounds = layout::resolve_bounds(text_width, text_height, self.monitor.area, &self.config);
        let changed = bounds != self.bounds;
        self.bounds = bounds;
        (bounds, changed)
    }

    fn dispatch(&mut self, events: Vec<TimerEvent>) {
        for event in events {
            match event {
                TimerEvent::PlaySound => self.play_sound(),
                TimerEvent::Speak => self.begin_speech(None),
                TimerEvent::SpeakThenClose => {
                    let (tx, rx) = oneshot::channel();
                    self.speech_done = Some(rx);
                    self.begin_speech(Some(tx));
                    self.state = WindowState::AwaitingSpeech;
                }
                TimerEvent::Close => self.state = WindowState::Closed,
            }
        }
    }

    fn play_sound(&self) {
        let Some(kind) = self.config.sound else {
            return;
        };
        let Some(player) = &self.sound else {
            debug!("no audio device; skipping sound");
            return;
        };
        let source = sound::resolve(kind);
        if let Err(e) = player.play(&source) {
            warn!("sound playback failed: {e}");
        }
    }

    /// Starts speech on a blocking worker; `done` fires when synthesis
    /// completes (or fails).
    fn begin_speech(&self, done: Option<oneshot::Sender<()>>) {
        let Some(text) = self.config.speak_text.clone() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let voice = self.config.speak_voice.clone();
        let speech = Arc::clone(&self.speech);
        self.runtime.spawn_blocking(move || {
            if let Err(e) = speech.speak(&text, voice.as_deref()) {
                warn!("speech synthesis failed: {e}");
            }
            if let Some(done) = done {
                let _ = done.send(());
            }
        });
    }

    fn poll_speech(&mut self) {
        let finished = match self.speech_done.as_mut() {
            // A dropped sender (worker died) also releases the window.
            Some(rx) => !matches!(rx.try_recv(), Err(oneshot::error::TryRecvError::Empty)),
            None => true,
        };
        if finished {
            self.speech_done = None;
            self.state = WindowState::Closed;
        }
    }
}

impl std::fmt::Debug for OverlayWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayWindow")
            .field("state", &self.state)
            .field("monitor", &self.monitor.id)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sound::MockSoundPlayer;
    use crate::speech::MockSynthesizer;
    use crate::types::EventTiming;

    fn at(start: Instant, secs: f64) -> Instant {
        start + Duration::from_secs_f64(secs)
    }

    struct Harness {
        window: OverlayWindow,
        sound: Arc<MockSoundPlayer>,
        speech: Arc<MockSynthesizer>,
        start: Instant,
    }

    fn harness(config: OverlayConfig) -> Harness {
        let sound = Arc::new(MockSoundPlayer::new());
        let speech = Arc::new(MockSynthesizer::new());
        let start = Instant::now();
        let window = OverlayWindow::new(
            Arc::new(config),
            Monitor::fallback(),
            start,
            Some(sound.clone() as Arc<dyn SoundPlayer>),
            speech.clone() as Arc<dyn SpeechSynthesizer>,
            Handle::current(),
        );
        Harness {
            window,
            sound,
            speech,
            start,
        }
    }

    fn tick(h: &mut Harness, secs: f64) -> TickFrame {
        h.window.tick(at(h.start, secs), Local::now())
    }

    #[tokio::test]
    async fn test_countdown_closes_with_end_sound() {
        let mut h = harness(OverlayConfig {
            duration_seconds: 3.0,
            ..OverlayConfig::default()
        });

        let frame = tick(&mut h, 0.0);
        assert!(!frame.closed);
        assert_eq!(frame.text, "3.0s");

        let frame = tick(&mut h, 2.95);
        assert!(!frame.closed);
        assert!(!frame.text.is_empty());

        let frame = tick(&mut h, 3.0);
        assert!(frame.closed);
        assert_eq!(h.sound.play_count(), 1);
        assert_eq!(h.speech.speak_count(), 0);

        // Further ticks stay closed and fire nothing.
        let frame = tick(&mut h, 4.0);
        assert!(frame.closed);
        assert_eq!(h.sound.play_count(), 1);
    }

    #[tokio::test]
    async fn test_sound_fires_exactly_once_over_full_run() {
        let mut h = harness(OverlayConfig {
            duration_seconds: 2.0,
            ..OverlayConfig::default()
        });
        let mut t = 0.0;
        while t < 3.0 {
            tick(&mut h, t);
            t += 0.1;
        }
        assert_eq!(h.sound.play_count(), 1);
    }

    #[tokio::test]
    async fn test_start_sound_fires_on_first_tick_only() {
        let mut h = harness(OverlayConfig {
            duration_seconds: 5.0,
            sound_timing: EventTiming::Start,
            ..OverlayConfig::default()
        });
        tick(&mut h, 0.0);
        assert_eq!(h.sound.play_count(), 1);
        tick(&mut h, 0.1);
        tick(&mut h, 0.2);
        assert_eq!(h.sound.play_count(), 1);
    }

    #[tokio::test]
    async fn test_end_speech_defers_close_until_complete() {
        let mut h = harness(OverlayConfig {
            duration_seconds: 1.0,
            sound: None,
            speak_text: Some("Done".to_string()),
            speak_timing: EventTiming::End,
            ..OverlayConfig::default()
        });
        h.speech.set_delay(Duration::from_millis(100));

        tick(&mut h, 0.0);
        let frame = tick(&mut h, 1.0);
        // Speech is in flight: blank display, not yet closed.
        assert!(!frame.closed);
        assert_eq!(frame.text, "");

        // Poll until the worker signals completion.
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut secs = 1.1;
        loop {
            std::thread::sleep(Duration::from_millis(20));
            let frame = tick(&mut h, secs);
            secs += 0.1;
            if frame.closed {
                break;
            }
            assert!(Instant::now() < deadline, "speech completion never observed");
        }
        assert_eq!(h.speech.speak_count(), 1);
        assert_eq!(h.speech.spoken()[0].0, "Done");
    }

    #[tokio::test]
    async fn test_user_close_wins_over_pending_speech() {
        let mut h = harness(OverlayConfig {
            duration_seconds: 1.0,
            speak_text: Some("Done".to_string()),
            speak_timing: EventTiming::End,
            ..OverlayConfig::default()
        });
        h.speech.set_delay(Duration::from_millis(200));

        tick(&mut h, 0.0);
        tick(&mut h, 1.0);
        h.window.request_close();
        assert!(h.window.is_closed());
        let frame = tick(&mut h, 1.1);
        assert!(frame.closed);
    }

    #[tokio::test]
    async fn test_clock_window_never_closes() {
        let mut h = harness(OverlayConfig {
            clock: true,
            ..OverlayConfig::default()
        });
        for t in 0..100 {
            let frame = tick(&mut h, t as f64);
            assert!(!frame.closed);
            assert_eq!(frame.text.len(), 8, "HH:MM:SS");
        }
        assert_eq!(h.sound.play_count(), 0);
    }

    #[tokio::test]
    async fn test_click_close() {
        let mut h = harness(OverlayConfig {
            clock: true,
            ..OverlayConfig::default()
        });
        tick(&mut h, 0.0);
        h.window.request_close();
        assert!(h.window.is_closed());
    }

    #[tokio::test]
    async fn test_resolve_bounds_reports_changes() {
        let mut h = harness(OverlayConfig::default());
        let (first, changed) = h.window.resolve_bounds(200.0, 100.0);
        assert!(changed);
        let (second, changed) = h.window.resolve_bounds(200.0, 100.0);
        assert!(!changed, "identical text must not move the window");
        assert_eq!(first, second);
        let (_, changed) = h.window.resolve_bounds(210.0, 100.0);
        assert!(changed);
    }

    #[tokio::test]
    async fn test_middle_speech_does_not_block_close() {
        let mut h = harness(OverlayConfig {
            duration_seconds: 2.0,
            sound: None,
            speak_text: Some("halfway".to_string()),
            speak_timing: EventTiming::Middle,
            ..OverlayConfig::default()
        });
        tick(&mut h, 0.0);
        tick(&mut h, 1.0);
        // Close at the end is immediate; middle speech is fire-and-forget.
        let frame = tick(&mut h, 2.0);
        assert!(frame.closed);
    }
}
