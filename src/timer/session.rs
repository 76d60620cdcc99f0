//! Per-window countdown session state.
//!
//! A `TimerSession` owns the derived end instant and the three one-shot
//! fired flags. The flags only ever transition false→true, through
//! check-and-set accessors, so a caller that observes `true` from a
//! `try_*` method is the unique owner of that event.

use std::time::{Duration, Instant};

/// Mutable countdown state owned exclusively by one overlay window.
#[derive(Debug, Clone)]
pub struct TimerSession {
    duration: Duration,
    end_at: Option<Instant>,
    middle_sound_fired: bool,
    middle_speech_fired: bool,
    end_started: bool,
}

impl TimerSession {
    /// Creates a session starting at `started_at`.
    ///
    /// A non-positive duration produces an inert session: it has no end
    /// instant and never reaches the middle or end states.
    pub fn new(started_at: Instant, duration_seconds: f64) -> Self {
        let duration_seconds = duration_seconds.max(0.0);
        let duration = Duration::from_secs_f64(duration_seconds);
        let end_at = (duration_seconds > 0.0).then(|| started_at + duration);
        Self {
            duration,
            end_at,
            middle_sound_fired: false,
            middle_speech_fired: false,
            end_started: false,
        }
    }

    /// Returns true if this session counts down (duration above zero).
    pub fn has_countdown(&self) -> bool {
        self.end_at.is_some()
    }

    /// The configured duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Remaining time in seconds, floored at zero.
    ///
    /// Returns 0 for an inert session.
    pub fn remaining_seconds(&self, now: Instant) -> f64 {
        match self.end_at {
            Some(end) => end.saturating_duration_since(now).as_secs_f64(),
            None => 0.0,
        }
    }

    /// Elapsed time in seconds since the session start, capped at the
    /// duration.
    pub fn elapsed_seconds(&self, now: Instant) -> f64 {
        self.duration_seconds() - self.remaining_seconds(now)
    }

    /// Returns true once at least half the countdown has elapsed.
    pub fn past_middle(&self, now: Instant) -> bool {
        self.has_countdown() && self.elapsed_seconds(now) >= self.duration_seconds() / 2.0
    }

    /// Returns true once the end instant has been reached.
    pub fn reached_end(&self, now: Instant) -> bool {
        self.end_at.is_some_and(|end| now >= end)
    }

    /// Claims the middle-sound event. Returns true exactly once.
    pub fn try_fire_middle_sound(&mut self) -> bool {
        !std::mem::replace(&mut self.middle_sound_fired, true)
    }

    /// Claims the middle-speech event. Returns true exactly once.
    pub fn try_fire_middle_speech(&mut self) -> bool {
        !std::mem::replace(&mut self.middle_speech_fired, true)
    }

    /// Claims the end sequence. Returns true exactly once.
    ///
    /// The flag is set before the caller dispatches any side effect, so a
    /// tick that re-enters while the end sequence is still in flight never
    /// double-fires.
    pub fn try_begin_end(&mut self) -> bool {
        !std::mem::replace(&mut self.end_started, true)
    }

    /// Returns true once the end sequence has begun.
    pub fn end_started(&self) -> bool {
        self.end_started
    }
}
