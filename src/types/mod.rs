//! Core data types for the overlay timer.
//!
//! This module defines the data structures shared across the crate:
//! - Overlay configuration built from CLI input
//! - Event timing and screen-corner tags
//! - Text color parsing
//! - Window bounds and screen rectangles

use std::time::Duration;

use clap::ValueEnum;

// ============================================================================
// EventTiming
// ============================================================================

/// When a sound or speech event fires relative to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EventTiming {
    /// Immediately after the window is shown
    Start,
    /// At the halfway point of the countdown
    Middle,
    /// When the countdown reaches zero
    #[default]
    End,
}

impl EventTiming {
    /// Returns the string representation of the timing tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventTiming::Start => "start",
            EventTiming::Middle => "middle",
            EventTiming::End => "end",
        }
    }
}

impl std::fmt::Display for EventTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Corner
// ============================================================================

/// Screen corner the window is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Corner {
    /// Top-left corner
    #[value(name = "tl")]
    TopLeft,
    /// Top-right corner
    #[value(name = "tr")]
    TopRight,
    /// Bottom-left corner
    #[value(name = "bl")]
    BottomLeft,
    /// Bottom-right corner
    #[value(name = "br")]
    BottomRight,
}

impl Corner {
    /// Returns true if the corner is on the left edge.
    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Returns true if the corner is on the top edge.
    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

// ============================================================================
// SoundKind
// ============================================================================

/// Named system sounds the timer can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SoundKind {
    /// The default alert sound
    Beep,
    /// Informational chime
    Asterisk,
    /// Warning sound
    Exclamation,
    /// Critical-stop sound
    Hand,
    /// Question prompt sound
    Question,
}

impl SoundKind {
    /// Returns the string representation of the sound name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Beep => "beep",
            SoundKind::Asterisk => "asterisk",
            SoundKind::Exclamation => "exclamation",
            SoundKind::Hand => "hand",
            SoundKind::Question => "question",
        }
    }
}

impl std::fmt::Display for SoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TextColor
// ============================================================================

/// An opaque RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const WHITE: TextColor = TextColor::new(255, 255, 255);

    /// Creates a color from its RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a color from a CSS-style name or a `#rgb`/`#rrggbb` hex string.
    ///
    /// Returns `None` for unrecognized input; the caller decides the fallback.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let (r, g, b) = match input.to_ascii_lowercase().as_str() {
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "navy" => (0, 0, 128),
            "yellow" => (255, 255, 0),
            "cyan" | "aqua" => (0, 255, 255),
            "magenta" | "fuchsia" => (255, 0, 255),
            "orange" => (255, 165, 0),
            "purple" => (128, 0, 128),
            "pink" => (255, 192, 203),
            "gray" | "grey" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "maroon" => (128, 0, 0),
            "olive" => (128, 128, 0),
            "teal" => (0, 128, 128),
            "brown" => (165, 42, 42),
            "gold" => (255, 215, 0),
            _ => return None,
        };
        Some(Self::new(r, g, b))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v << 4 | v;
                }
                Some(Self::new(out[0], out[1], out[2]))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }
}

// ============================================================================
// ScreenRect / WindowBounds
// ============================================================================

/// A rectangle in screen coordinates (pixels, origin at the virtual
/// desktop's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The exclusive right edge.
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    /// The exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// The resolved position and size of an overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowBounds {
    /// Size used before the first text measurement.
    pub const INITIAL: WindowBounds = WindowBounds {
        left: 0,
        top: 0,
        width: 400,
        height: 200,
    };
}

// ============================================================================
// OverlayConfig
// ============================================================================

/// Immutable configuration for one overlay run, constructed once from
/// CLI input and shared by every window.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Countdown duration in seconds; 0 disables the countdown.
    pub duration_seconds: f64,
    /// Explicit horizontal position (overrides corner on that axis).
    pub x: Option<i32>,
    /// Explicit vertical position (overrides corner on that axis).
    pub y: Option<i32>,
    /// Font size in points.
    pub font_size: f32,
    /// Font family name; `None` uses the UI default.
    pub font_name: Option<String>,
    /// Window opacity, clamped to [0.1, 1.0].
    pub opacity: f64,
    /// Text color.
    pub color: TextColor,
    /// Ignore mouse input (Escape still closes).
    pub click_through: bool,
    /// Show the wall clock instead of the countdown.
    pub clock: bool,
    /// Corner the window is anchored to; `None` centers it.
    pub corner: Option<Corner>,
    /// Sound played at `sound_timing`; `None` disables sound.
    pub sound: Option<SoundKind>,
    /// When the sound fires.
    pub sound_timing: EventTiming,
    /// Text to synthesize as speech.
    pub speak_text: Option<String>,
    /// Requested speech voice (best effort).
    pub speak_voice: Option<String>,
    /// When speech fires.
    pub speak_timing: EventTiming,
    /// Replicate the window across every display.
    pub all_displays: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            x: None,
            y: None,
            font_size: 48.0,
            font_name: None,
            opacity: 0.95,
            color: TextColor::WHITE,
            click_through: false,
            clock: false,
            corner: None,
            sound: Some(SoundKind::Beep),
            sound_timing: EventTiming::End,
            speak_text: None,
            speak_voice: None,
            speak_timing: EventTiming::End,
            all_displays: false,
        }
    }
}

impl OverlayConfig {
    /// Clamps a requested opacity into the supported range.
    pub fn clamp_opacity(requested: f64) -> f64 {
        requested.clamp(0.1, 1.0)
    }

    /// Returns true if a countdown is active (duration above zero).
    pub fn has_countdown(&self) -> bool {
        self.duration_seconds > 0.0
    }

    /// Returns true if speech text is configured and non-empty.
    pub fn has_speech(&self) -> bool {
        self.speak_text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The periodic tick interval.
    ///
    /// The clock only needs second resolution; the countdown needs
    /// sub-second resolution for the decimal-seconds display.
    pub fn tick_interval(&self) -> Duration {
        if self.clock {
            Duration::from_millis(1000)
        } else {
            Duration::from_millis(100)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
