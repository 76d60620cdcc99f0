//! Screentimer library
//!
//! A borderless, always-on-top countdown/clock overlay. The crate is
//! organized leaf to root:
//! - `types`: configuration and shared value types
//! - `timer`: session state, event scheduling, and text formatting
//! - `sound`: system sound resolution and rodio playback
//! - `speech`: platform speech engine driven as a subprocess
//! - `overlay`: window lifecycle, layout, and multi-display coordination
//! - `ui`: the eframe/egui shell
//! - `cli`: argument parsing and the help/voices screen

pub mod cli;
pub mod overlay;
pub mod sound;
pub mod speech;
pub mod timer;
pub mod types;
pub mod ui;

// Re-export commonly used types for convenience
pub use overlay::{Coordinator, OverlayWindow, ShutdownCounter};
pub use timer::{EventScheduler, TimerEvent, TimerSession};
pub use types::{Corner, EventTiming, OverlayConfig, SoundKind, TextColor};
