//! Font selection for the overlay.
//!
//! A requested family name is resolved against the system font database
//! and loaded into egui under a dedicated family key. Lookup failure
//! falls back to egui's default proportional font; the overlay always
//! renders something.

use egui::{FontData, FontDefinitions, FontFamily};
use tracing::{debug, warn};

/// egui family key for the user-requested font.
const USER_FAMILY: &str = "overlay-user";

/// Installs the requested font family into the egui context and returns
/// the family to render with.
pub fn install_font(ctx: &egui::Context, family: Option<&str>) -> FontFamily {
    let Some(name) = family else {
        return FontFamily::Proportional;
    };
    match load_system_font(name) {
        Some(data) => {
            debug!("loaded font family '{name}'");
            let mut fonts = FontDefinitions::default();
            fonts
                .font_data
                .insert(USER_FAMILY.to_owned(), FontData::from_owned(data));
            fonts.families.insert(
                FontFamily::Name(USER_FAMILY.into()),
                vec![USER_FAMILY.to_owned()],
            );
            ctx.set_fonts(fonts);
            FontFamily::Name(USER_FAMILY.into())
        }
        None => {
            warn!("font family '{name}' not found; using the default font");
            FontFamily::Proportional
        }
    }
}

/// Looks up a bold face for the family in the system font database.
fn load_system_font(name: &str) -> Option<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::Name(name)],
        weight: fontdb::Weight::BOLD,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, _index| data.to_vec())
}
