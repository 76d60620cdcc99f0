//! The timed-event scheduler.
//!
//! Evaluated once per tick, the scheduler decides which sound and speech
//! events fire and when the window must close. It owns the session's
//! one-shot flags and the timing tags but performs no side effects
//! itself: it emits `TimerEvent` values for the window to dispatch.
//!
//! Event ordering within a session follows wall-clock progression:
//! start events fire once when the window is shown, middle events on the
//! first tick at or past the halfway point, end events on the first tick
//! at or past the end instant. Every class of event is guarded by its own
//! flag, and each flag is claimed before the corresponding event is
//! emitted, so a long tick interval or a re-entrant tick can never
//! double-fire.

use std::time::Instant;

use crate::types::{EventTiming, OverlayConfig};

use super::session::TimerSession;

// ============================================================================
// TimerEvent
// ============================================================================

/// Side effects requested by the scheduler for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Play the configured sound (fire-and-forget).
    PlaySound,
    /// Begin speech without blocking the tick loop.
    Speak,
    /// Begin speech and close the window once it completes.
    SpeakThenClose,
    /// Close the window and stop ticking.
    Close,
}

// ============================================================================
// EventScheduler
// ============================================================================

/// Per-window event scheduler: session state plus the timing tags that
/// route sound and speech to start, middle, or end.
#[derive(Debug)]
pub struct EventScheduler {
    session: TimerSession,
    sound_timing: EventTiming,
    speak_timing: EventTiming,
    has_sound: bool,
    has_speech: bool,
    start_fired: bool,
}

impl EventScheduler {
    /// Creates a scheduler for one window from the shared configuration.
    pub fn new(config: &OverlayConfig, started_at: Instant) -> Self {
        Self {
            session: TimerSession::new(started_at, config.duration_seconds),
            sound_timing: config.sound_timing,
            speak_timing: config.speak_timing,
            has_sound: config.sound.is_some(),
            has_speech: config.has_speech(),
            start_fired: false,
        }
    }

    /// Start events, fired exactly once when the window becomes visible.
    ///
    /// These fire even for an inert session: a clock window with
    /// `--sound-timing=start` still beeps on show.
    pub fn on_shown(&mut self) -> Vec<TimerEvent> {
        if std::mem::replace(&mut self.start_fired, true) {
            return Vec::new();
        }
        let mut events = Vec::new();
        if self.sound_timing == EventTiming::Start && self.has_sound {
            events.push(TimerEvent::PlaySound);
        }
        if self.speak_timing == EventTiming::Start && self.has_speech {
            events.push(TimerEvent::Speak);
        }
        events
    }

    /// Evaluates the middle and end transition rules for one tick.
    pub fn on_tick(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut events = Vec::new();

        // Middle events: sound and speech fire independently, each at most
        // once. The flag is claimed even when there is nothing to play, so
        // the check stops running after the halfway point either way.
        if self.session.past_middle(now) {
            if self.sound_timing == EventTiming::Middle
                && self.session.try_fire_middle_sound()
                && self.has_sound
            {
                events.push(TimerEvent::PlaySound);
            }
            if self.speak_timing == EventTiming::Middle
                && self.session.try_fire_middle_speech()
                && self.has_speech
            {
                events.push(TimerEvent::Speak);
            }
        }

        // End check: claim the flag before emitting anything.
        if self.session.reached_end(now) && self.session.try_begin_end() {
            if self.sound_timing == EventTiming::End && self.has_sound {
                events.push(TimerEvent::PlaySound);
            }
            if self.speak_timing == EventTiming::End && self.has_speech {
                events.push(TimerEvent::SpeakThenClose);
            } else {
                events.push(TimerEvent::Close);
            }
        }

        events
    }

    /// Returns true once the end sequence has begun.
    pub fn end_started(&self) -> bool {
        self.session.end_started()
    }

    /// Read access to the session for display formatting.
    pub fn session(&self) -> &TimerSession {
        &self.session
    }
}

// ============================================================================
// Tests
// ============================================================================
