//! Overlay window orchestration.
//!
//! This module contains everything between the timer core and the GUI
//! shell:
//! - `display`: monitor enumeration behind a trait seam
//! - `layout`: size/position resolution for measured text
//! - `window`: the per-window lifecycle state machine
//! - `coordinator`: multi-display replication and process shutdown

pub mod coordinator;
pub mod display;
pub mod layout;
pub mod window;

pub use coordinator::{Coordinator, ShutdownCounter};
pub use display::{
    detect_monitors, DisplayError, DisplayProvider, MockDisplayProvider, Monitor,
    NativeDisplayProvider,
};
pub use window::{OverlayWindow, TickFrame};
