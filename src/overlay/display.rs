//! Monitor enumeration.
//!
//! The overlay needs the usable area of each display to center, anchor,
//! and clamp its windows. Enumeration sits behind a trait so the core
//! can be tested against synthetic monitor layouts; the production
//! implementation queries the OS through `display-info`.

use thiserror::Error;
use tracing::warn;

use crate::types::ScreenRect;

/// Errors that can occur while enumerating displays.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The platform query failed.
    #[error("display enumeration failed: {0}")]
    Enumeration(String),
}

/// One connected display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    /// Platform display identifier.
    pub id: u32,
    /// Usable area in virtual-desktop pixel coordinates.
    pub area: ScreenRect,
    /// Whether this is the primary display.
    pub is_primary: bool,
}

impl Monitor {
    /// Area used when no display can be enumerated.
    pub fn fallback() -> Self {
        Self {
            id: 0,
            area: ScreenRect::new(0, 0, 1920, 1080),
            is_primary: true,
        }
    }

    /// Picks the primary monitor, or the first one when none is marked
    /// primary.
    pub fn primary_or_first(monitors: &[Monitor]) -> Option<Monitor> {
        monitors
            .iter()
            .find(|m| m.is_primary)
            .or_else(|| monitors.first())
            .copied()
    }
}

/// Trait for monitor enumeration sources.
pub trait DisplayProvider {
    /// Lists the connected displays.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform query fails.
    fn monitors(&self) -> Result<Vec<Monitor>, DisplayError>;
}

/// Production provider backed by the `display-info` crate.
#[derive(Debug, Default)]
pub struct NativeDisplayProvider;

impl DisplayProvider for NativeDisplayProvider {
    fn monitors(&self) -> Result<Vec<Monitor>, DisplayError> {
        let infos = display_info::DisplayInfo::all()
            .map_err(|e| DisplayError::Enumeration(e.to_string()))?;
        Ok(infos
            .into_iter()
            .map(|info| Monitor {
                id: info.id,
                area: ScreenRect::new(
                    info.x,
                    info.y,
                    info.width as i32,
                    info.height as i32,
                ),
                is_primary: info.is_primary,
            })
            .collect())
    }
}

/// Fixed monitor list for tests.
#[derive(Debug, Default)]
pub struct MockDisplayProvider {
    monitors: Vec<Monitor>,
}

impl MockDisplayProvider {
    #[must_use]
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self { monitors }
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn monitors(&self) -> Result<Vec<Monitor>, DisplayError> {
        if self.monitors.is_empty() {
            return Err(DisplayError::Enumeration("no monitors".to_string()));
        }
        Ok(self.monitors.clone())
    }
}

/// Enumerates displays, degrading to a single fallback area on failure.
pub fn detect_monitors(provider: &dyn DisplayProvider) -> Vec<Monitor> {
    match provider.monitors() {
        Ok(monitors) if !monitors.is_empty() => monitors,
        Ok(_) => {
            warn!("no displays reported; using fallback display area");
            vec![Monitor::fallback()]
        }
        Err(e) => {
            warn!("{e}; using fallback display area");
            vec![Monitor::fallback()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(id: u32, left: i32, primary: bool) -> Monitor {
        Monitor {
            id,
            area: ScreenRect::new(left, 0, 1920, 1080),
            is_primary: primary,
        }
    }

    #[test]
    fn test_primary_or_first_prefers_primary() {
        let monitors = vec![monitor(1, 0, false), monitor(2, 1920, true)];
        assert_eq!(Monitor::primary_or_first(&monitors).unwrap().id, 2);
    }

    #[test]
    fn test_primary_or_first_falls_back_to_first() {
        let monitors = vec![monitor(1, 0, false), monitor(2, 1920, false)];
        assert_eq!(Monitor::primary_or_first(&monitors).unwrap().id, 1);
    }

    #[test]
    fn test_primary_or_first_empty() {
        assert!(Monitor::primary_or_first(&[]).is_none());
    }

    #[test]
    fn test_detect_monitors_uses_provider() {
        let provider = MockDisplayProvider::new(vec![monitor(1, 0, true), monitor(2, 1920, false)]);
        let monitors = detect_monitors(&provider);
        assert_eq!(monitors.len(), 2);
    }

    #[test]
    fn test_detect_monitors_fallback_on_error() {
        let provider = MockDisplayProvider::new(vec![]);
        let monitors = detect_monitors(&provider);
        assert_eq!(monitors.len(), 1);
        assert!(monitors[0].is_primary);
        assert_eq!(monitors[0].area, ScreenRect::new(0, 0, 1920, 1080));
    }
}
