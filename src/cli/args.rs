//! Command-line surface.
//!
//! Uses clap derive for argument parsing. The whole program is a single
//! flag-style command: a positional duration plus display, sound, and
//! speech options. Unknown flags or enum values make clap print usage
//! and exit non-zero; the custom help path (with voice enumeration)
//! lives in [`super::help`].

use clap::Parser;
use tracing::warn;

use crate::types::{Corner, EventTiming, OverlayConfig, SoundKind, TextColor};

// ============================================================================
// CLI Structure
// ============================================================================

/// Borderless always-on-top countdown/clock overlay
#[derive(Parser, Debug, Clone)]
#[command(
    name = "screentimer",
    version,
    about = "Borderless always-on-top countdown/clock overlay",
    long_about = "Shows a countdown (or the wall clock) as a borderless, always-on-top\n\
                  overlay, optionally playing a sound or speaking text at the start,\n\
                  middle, or end of the countdown.",
    disable_help_flag = true,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Countdown duration in seconds (0 or omitted: no countdown)
    #[arg(value_name = "SECONDS", default_value_t = 0.0)]
    pub seconds: f64,

    /// Show the timer on every display
    #[arg(short, long)]
    pub all: bool,

    /// Window X position in pixels (overrides --pos horizontally)
    #[arg(short = 'x', long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Window Y position in pixels (overrides --pos vertically)
    #[arg(short = 'y', long, allow_negative_numbers = true)]
    pub y: Option<i32>,

    /// Font size in points
    #[arg(short = 's', long, default_value_t = 48.0)]
    pub size: f32,

    /// Font family name
    #[arg(short = 'f', long)]
    pub font: Option<String>,

    /// Window opacity, clamped to 0.1 - 1.0
    #[arg(short = 'o', long, default_value_t = 0.95)]
    pub opacity: f64,

    /// Text color by name or #rrggbb
    #[arg(short = 'c', long, default_value = "white")]
    pub color: String,

    /// Ignore mouse input (Escape still closes)
    #[arg(long, alias = "ct")]
    pub clickthrough: bool,

    /// Show the current time instead of a countdown
    #[arg(long, alias = "cl")]
    pub clock: bool,

    /// Anchor the window to a screen corner
    #[arg(short = 'p', long, value_enum, value_name = "tl|tr|bl|br")]
    pub pos: Option<Corner>,

    /// System sound to play
    #[arg(long, value_enum, default_value_t = SoundKind::Beep)]
    pub sound: SoundKind,

    /// When to play the sound
    #[arg(long = "sound-timing", value_enum, default_value_t = EventTiming::End)]
    pub sound_timing: EventTiming,

    /// Text to speak using speech synthesis
    #[arg(long, value_name = "TEXT")]
    pub speak: Option<String>,

    /// Voice for speech synthesis (best effort)
    #[arg(long = "speak-voice", value_name = "NAME")]
    pub speak_voice: Option<String>,

    /// When to speak
    #[arg(long = "speak-timing", value_enum, default_value_t = EventTiming::End)]
    pub speak_timing: EventTiming,

    /// Generate shell completion scripts
    #[arg(long, value_enum, hide = true)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Translates parsed arguments into the overlay configuration.
    ///
    /// Out-of-range values are normalized here: the duration floors at
    /// zero, opacity clamps to [0.1, 1.0], and an unknown color falls
    /// back to white with a warning.
    pub fn into_config(self) -> OverlayConfig {
        let color = TextColor::parse(&self.color).unwrap_or_else(|| {
            warn!("unknown color '{}'; using white", self.color);
            TextColor::WHITE
        });
        OverlayConfig {
            duration_seconds: self.seconds.max(0.0),
            x: self.x,
            y: self.y,
            font_size: if self.size > 0.0 { self.size } else { 48.0 },
            font_name: self.font,
            opacity: OverlayConfig::clamp_opacity(self.opacity),
            color,
            click_through: self.clickthrough,
            clock: self.clock,
            corner: self.pos,
            sound: Some(self.sound),
            sound_timing: self.sound_timing,
            speak_text: self.speak,
            speak_voice: self.speak_voice,
            speak_timing: self.speak_timing,
            all_displays: self.all,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
