//! Display text formatting.
//!
//! Pure functions from session state and time to the string the window
//! renders. The shape of the countdown text depends on magnitude:
//! `H:MM:SS` above an hour, `MM:SS` above a minute, `S.s` below.

use std::time::Instant;

use chrono::{DateTime, Local, Timelike};

use crate::types::{EventTiming, OverlayConfig};

use super::session::TimerSession;

/// Text shown when no countdown is configured.
pub const IDLE_TEXT: &str = "0.0s";

/// Formats a remaining-seconds value according to the magnitude rule.
pub fn countdown_text(remaining_seconds: f64) -> String {
    let remaining = remaining_seconds.max(0.0);
    if remaining >= 3600.0 {
        let total = remaining as u64;
        format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    } else if remaining >= 60.0 {
        let total = remaining as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    } else {
        format!("{remaining:.1}s")
    }
}

/// Formats a wall-clock time as zero-padded 24-hour `HH:MM:SS`.
pub fn clock_text(wall: DateTime<Local>) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        wall.hour(),
        wall.minute(),
        wall.second()
    )
}

/// Produces the display string for one render pass.
///
/// Once the end sequence has started with end-timed speech, the window
/// blanks while the speech plays out; that takes precedence over every
/// other shape, including clock mode.
pub fn display_text(
    config: &OverlayConfig,
    session: &TimerSession,
    now: Instant,
    wall: DateTime<Local>,
) -> String {
    if config.speak_timing == EventTiming::End && session.end_started() {
        return String::new();
    }
    if config.clock {
        return clock_text(wall);
    }
    if !session.has_countdown() {
        return IDLE_TEXT.to_string();
    }
    countdown_text(session.remaining_seconds(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn wall(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, h, m, s).unwrap()
    }

    mod countdown_text_tests {
        use super::*;

        #[test]
        fn test_hours_shape() {
            assert_eq!(countdown_text(3600.0), "1:00:00");
            assert_eq!(countdown_text(3725.0), "1:02:05");
            assert_eq!(countdown_text(7325.9), "2:02:05");
            // Hours stay unpadded past ten.
            assert_eq!(countdown_text(36_000.0), "10:00:00");
        }

        #[test]
        fn test_minutes_shape() {
            assert_eq!(countdown_text(60.0), "01:00");
            assert_eq!(countdown_text(65.0), "01:05");
            assert_eq!(countdown_text(3599.9), "59:59");
            assert_eq!(countdown_text(125.4), "02:05");
        }

        #[test]
        fn test_seconds_shape() {
            assert_eq!(countdown_text(59.9), "59.9s");
            assert_eq!(countdown_text(12.34), "12.3s");
            assert_eq!(countdown_text(0.0), "0.0s");
            assert_eq!(countdown_text(-1.0), "0.0s");
        }

        #[test]
        fn test_seconds_rounding() {
            // One decimal place rounds half up, like the display expects.
            assert_eq!(countdown_text(4.95), "5.0s");
            assert_eq!(countdown_text(4.94), "4.9s");
        }
    }

    mod clock_text_tests {
        use super::*;

        #[test]
        fn test_zero_padded_24h() {
            assert_eq!(clock_text(wall(9, 5, 3)), "09:05:03");
            assert_eq!(clock_text(wall(23, 59, 59)), "23:59:59");
            assert_eq!(clock_text(wall(0, 0, 0)), "00:00:00");
        }
    }

    mod display_text_tests {
        use super::*;
        use crate::types::EventTiming;

        fn at(start: Instant, secs: f64) -> Instant {
            start + Duration::from_secs_f64(secs)
        }

        #[test]
        fn test_idle_placeholder() {
            let config = OverlayConfig::default();
            let start = Instant::now();
            let session = TimerSession::new(start, 0.0);
            assert_eq!(display_text(&config, &session, start, wall(12, 0, 0)), IDLE_TEXT);
        }

        #[test]
        fn test_clock_mode() {
            let config = OverlayConfig {
                clock: true,
                ..OverlayConfig::default()
            };
            let start = Instant::now();
            let session = TimerSession::new(start, 0.0);
            assert_eq!(
                display_text(&config, &session, start, wall(8, 30, 15)),
                "08:30:15"
            );
        }

        #[test]
        fn test_countdown() {
            let config = OverlayConfig {
                duration_seconds: 65.0,
                ..OverlayConfig::default()
            };
            let start = Instant::now();
            let session = TimerSession::new(start, 65.0);
            assert_eq!(
                display_text(&config, &session, start, wall(12, 0, 0)),
                "01:05"
            );
            assert_eq!(
                display_text(&config, &session, at(start, 60.0), wall(12, 0, 0)),
                "5.0s"
            );
        }

        #[test]
        fn test_blank_during_end_speech() {
            let config = OverlayConfig {
                duration_seconds: 3.0,
                speak_text: Some("Done".to_string()),
                speak_timing: EventTiming::End,
                ..OverlayConfig::default()
            };
            let start = Instant::now();
            let mut session = TimerSession::new(start, 3.0);
            assert_eq!(
                display_text(&config, &session, at(start, 2.95), wall(12, 0, 0)),
                "0.1s"
            );
            assert!(session.try_begin_end());
            assert_eq!(
                display_text(&config, &session, at(start, 3.0), wall(12, 0, 0)),
                ""
            );
        }

        #[test]
        fn test_blank_beats_clock_mode() {
            let config = OverlayConfig {
                duration_seconds: 3.0,
                clock: true,
                speak_timing: EventTiming::End,
                ..OverlayConfig::default()
            };
            let start = Instant::now();
            let mut session = TimerSession::new(start, 3.0);
            session.try_begin_end();
            assert_eq!(
                display_text(&config, &session, at(start, 3.0), wall(12, 0, 0)),
                ""
            );
        }

        #[test]
        fn test_no_blank_for_non_end_speech() {
            let config = OverlayConfig {
                duration_seconds: 3.0,
                speak_text: Some("Done".to_string()),
                speak_timing: EventTiming::Middle,
                ..OverlayConfig::default()
            };
            let start = Instant::now();
            let mut session = TimerSession::new(start, 3.0);
            session.try_begin_end();
            assert_eq!(
                display_text(&config, &session, at(start, 3.0), wall(12, 0, 0)),
                "0.0s"
            );
        }

        #[test]
        fn test_idempotent() {
            let config = OverlayConfig {
                duration_seconds: 10.0,
                ..OverlayConfig::default()
            };
            let start = Instant::now();
            let session = TimerSession::new(start, 10.0);
            let now = at(start, 4.2);
            let first = display_text(&config, &session, now, wall(12, 0, 0));
            let second = display_text(&config, &session, now, wall(12, 0, 0));
            assert_eq!(first, second);
        }
    }
}
