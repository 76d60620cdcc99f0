//! Window size and position resolution.
//!
//! The window shrinks to the measured text with no padding, then lands
//! where the configuration says: an explicit `--x`/`--y` wins on its
//! axis, a corner tag comes next, and the default centers the window in
//! the display's usable area. The final position is always clamped so
//! the window stays inside that area.

use crate::types::{OverlayConfig, ScreenRect, WindowBounds};

/// Resolves window bounds for a measured text size.
///
/// Idempotent: the same text size against the same area yields the same
/// bounds.
pub fn resolve_bounds(
    text_width: f32,
    text_height: f32,
    area: ScreenRect,
    config: &OverlayConfig,
) -> WindowBounds {
    let width = text_width.ceil().max(1.0) as i32;
    let height = text_height.ceil().max(1.0) as i32;

    let left = match (config.x, config.corner) {
        (Some(x), _) => x,
        (None, Some(corner)) if corner.is_left() => area.left,
        (None, Some(_)) => area.right() - width,
        (None, None) => area.left + (area.width - width) / 2,
    };
    let top = match (config.y, config.corner) {
        (Some(y), _) => y,
        (None, Some(corner)) if corner.is_top() => area.top,
        (None, Some(_)) => area.bottom() - height,
        (None, None) => area.top + (area.height - height) / 2,
    };

    WindowBounds {
        left: clamp_axis(left, area.left, area.right() - width),
        top: clamp_axis(top, area.top, area.bottom() - height),
        width,
        height,
    }
}

/// Clamps a coordinate into `[lo, hi]`, preferring `lo` when the window
/// is larger than the area.
fn clamp_axis(value: i32, lo: i32, hi: i32) -> i32 {
    value.min(hi).max(lo)
}
