//! GUI shell for the overlay, built on eframe/egui.

mod app;
mod fonts;

pub use app::run_overlay;
pub use fonts::install_font;
