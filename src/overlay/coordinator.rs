//! Multi-display coordination.
//!
//! In `--all` mode the overlay is replicated once per detected display.
//! Windows are fully independent: they share the configuration and the
//! nominal start instant, nothing else. The only cross-window state is
//! the open-window counter; the process exits when it reaches zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tracing::debug;

use crate::sound::SoundPlayer;
use crate::speech::SpeechSynthesizer;
use crate::types::OverlayConfig;

use super::display::{detect_monitors, DisplayProvider, Monitor};
use super::window::OverlayWindow;

// ============================================================================
// ShutdownCounter
// ============================================================================

/// Shared count of open windows.
///
/// Each window close calls [`ShutdownCounter::window_closed`] exactly
/// once; the call that brings the count to zero tells the caller to end
/// the process.
#[derive(Debug, Clone)]
pub struct ShutdownCounter(Arc<AtomicUsize>);

impl ShutdownCounter {
    /// Creates a counter for `open` windows.
    #[must_use]
    pub fn new(open: usize) -> Self {
        Self(Arc::new(AtomicUsize::new(open)))
    }

    /// Records one window close. Returns true if it was the last one.
    pub fn window_closed(&self) -> bool {
        self.0.fetch_sub(1, Ordering::AcqRel) == 1
    }

    /// Number of windows still open.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

// ============================================================================
// Coordinator
// ============================================================================

/// Builds the window set for one run and owns the shutdown counter.
pub struct Coordinator {
    windows: Vec<OverlayWindow>,
    counter: ShutdownCounter,
}

impl Coordinator {
    /// Plans the windows for this run.
    ///
    /// One window per display in all-displays mode, otherwise a single
    /// window on the primary display. Every window shares `started_at`
    /// so replicated countdowns stay nominally in sync without any
    /// cross-window barrier.
    pub fn new(
        config: Arc<OverlayConfig>,
        provider: &dyn DisplayProvider,
        sound: Option<Arc<dyn SoundPlayer>>,
        speech: Arc<dyn SpeechSynthesizer>,
        runtime: Handle,
        started_at: Instant,
    ) -> Self {
        let monitors = detect_monitors(provider);
        let targets: Vec<Monitor> = if config.all_displays {
            monitors
        } else {
            vec![Monitor::primary_or_first(&monitors).unwrap_or_else(Monitor::fallback)]
        };
        debug!(windows = targets.len(), "planning overlay windows");

        let windows: Vec<OverlayWindow> = targets
            .into_iter()
            .map(|monitor| {
                OverlayWindow::new(
                    Arc::clone(&config),
                    monitor,
                    started_at,
                    sound.clone(),
                    Arc::clone(&speech),
                    runtime.clone(),
                )
            })
            .collect();
        let counter = ShutdownCounter::new(windows.len());

        Self { windows, counter }
    }

    /// Hands the planned windows to the UI shell.
    pub fn take_windows(&mut self) -> Vec<OverlayWindow> {
        std::mem::take(&mut self.windows)
    }

    /// The shared shutdown counter.
    #[must_use]
    pub fn counter(&self) -> ShutdownCounter {
        self.counter.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
