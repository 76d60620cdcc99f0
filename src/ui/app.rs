//! The eframe shell hosting the overlay windows.
//!
//! The root viewport stays hidden; every overlay window is an immediate
//! viewport of its own: borderless, transparent, always on top, and
//! optionally mouse-passthrough. Each frame ticks the window state
//! machine, fits the viewport to the measured text, paints it, and
//! handles close input. The app exits when the shutdown counter reports
//! the last window closed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use chrono::{DateTime, Local};
use tokio::runtime::Handle;

use crate::overlay::{Coordinator, NativeDisplayProvider, OverlayWindow, ShutdownCounter};
use crate::sound::{self, SoundPlayer};
use crate::speech::{CommandSynthesizer, SpeechSynthesizer};
use crate::types::{OverlayConfig, TextColor};

use super::fonts;

/// Runs the overlay UI until every window has closed.
///
/// # Errors
///
/// Returns an error if the windowing backend fails to start.
pub fn run_overlay(config: Arc<OverlayConfig>, runtime: Handle) -> anyhow::Result<()> {
    let provider = NativeDisplayProvider;
    let sound = sound::try_create_player().map(|p| p as Arc<dyn SoundPlayer>);
    let speech: Arc<dyn SpeechSynthesizer> = Arc::new(CommandSynthesizer::detect());

    let mut coordinator = Coordinator::new(
        Arc::clone(&config),
        &provider,
        sound,
        speech,
        runtime,
        Instant::now(),
    );
    let windows = coordinator.take_windows();
    let counter = coordinator.counter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_visible(false)
            .with_decorations(false)
            .with_taskbar(false)
            .with_inner_size([1.0, 1.0]),
        ..Default::default()
    };

    eframe::run_native(
        "screentimer",
        native_options,
        Box::new(move |cc| Ok(Box::new(OverlayApp::new(cc, &config, windows, counter)))),
    )
    .map_err(|e| anyhow!("failed to start overlay UI: {e}"))
}

/// Converts the configured text color and window opacity to a paint color.
fn text_color32(color: TextColor, opacity: f64) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

// ============================================================================
// OverlayApp
// ============================================================================

struct OverlayApp {
    slots: Vec<WindowSlot>,
    counter: ShutdownCounter,
    tick_interval: Duration,
}

impl OverlayApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: &OverlayConfig,
        windows: Vec<OverlayWindow>,
        counter: ShutdownCounter,
    ) -> Self {
        let family = fonts::install_font(&cc.egui_ctx, config.font_name.as_deref());
        let color = text_color32(config.color, config.opacity);
        let tick_interval = config.tick_interval();

        let slots = windows
            .into_iter()
            .enumerate()
            .map(|(index, window)| WindowSlot::new(index, window, config, family.clone(), color))
            .collect();

        Self {
            slots,
            counter,
            tick_interval,
        }
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let wall = Local::now();
        let counter = self.counter.clone();
        let mut last_closed = false;

        self.slots.retain_mut(|slot| {
            let open = slot.show(ctx, now, wall);
            if !open && counter.window_closed() {
                last_closed = true;
            }
            open
        });

        if last_closed || self.slots.is_empty() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        ctx.request_repaint_after(self.tick_interval);
    }
}

// ============================================================================
// WindowSlot
// ============================================================================

/// One overlay window bound to its egui viewport.
struct WindowSlot {
    window: OverlayWindow,
    viewport_id: egui::ViewportId,
    builder: egui::ViewportBuilder,
    font_size: f32,
    font_family: egui::FontFamily,
    color: egui::Color32,
    click_through: bool,
}

impl WindowSlot {
    fn new(
        index: usize,
        window: OverlayWindow,
        config: &OverlayConfig,
        font_family: egui::FontFamily,
        color: egui::Color32,
    ) -> Self {
        let bounds = window.bounds();
        let builder = egui::ViewportBuilder::default()
            .with_title("screentimer")
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_active(false)
            .with_mouse_passthrough(config.click_through)
            .with_position([bounds.left as f32, bounds.top as f32])
            .with_inner_size([bounds.width as f32, bounds.height as f32]);

        Self {
            window,
            viewport_id: egui::ViewportId::from_hash_of(("overlay", index)),
            builder,
            font_size: config.font_size,
            font_family,
            color,
            click_through: config.click_through,
        }
    }

    /// Ticks and renders this window. Returns false once it has closed.
    fn show(&mut self, ctx: &egui::Context, now: Instant, wall: DateTime<Local>) -> bool {
        let frame = self.window.tick(now, wall);
        if frame.closed {
            return false;
        }

        let font_id = egui::FontId::new(self.font_size, self.font_family.clone());
        let color = self.color;
        let click_through = self.click_through;
        let interval = self.window.tick_interval();
        let text = frame.text;
        let window = &mut self.window;

        ctx.show_viewport_immediate(self.viewport_id, self.builder.clone(), |ctx, _class| {
            // Fit the viewport to the measured text; commands are only
            // sent when the bounds actually change.
            let galley =
                ctx.fonts(|fonts| fonts.layout_no_wrap(text.clone(), font_id.clone(), color));
            let size = galley.size();
            let (bounds, changed) = window.resolve_bounds(size.x, size.y);
            if changed {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    bounds.width as f32,
                    bounds.height as f32,
                )));
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                    bounds.left as f32,
                    bounds.top as f32,
                )));
            }

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    ui.painter().text(
                        ui.max_rect().center(),
                        egui::Align2::CENTER_CENTER,
                        &text,
                        font_id.clone(),
                        color,
                    );
                });

            // Escape always closes; a click closes unless the window is
            // click-through.
            let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
            let clicked = !click_through
                && ctx.input(|i| i.pointer.button_pressed(egui::PointerButton::Primary));
            let close_requested = ctx.input(|i| i.viewport().close_requested());
            if escape || clicked || close_requested {
                window.request_close();
            }

            ctx.request_repaint_after(interval);
        });

        !self.window.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_color32_applies_opacity() {
        // Color32 premultiplies, so only the alpha channel is asserted
        // exactly here.
        let color = text_color32(TextColor::new(255, 128, 0), 0.5);
        assert_eq!(color.a(), 128);
    }

    #[test]
    fn test_text_color32_full_opacity() {
        let color = text_color32(TextColor::WHITE, 1.0);
        assert_eq!(color.a(), 255);
        assert_eq!(color.r(), 255);
        assert_eq!(color.g(), 255);
        assert_eq!(color.b(), 255);
    }
}
