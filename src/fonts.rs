//! The bundled DejaVu Sans Bold face, used for coordinate labels and the
//! built-in piece glyphs.

use ab_glyph::FontRef;

use crate::error::Result;

static DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

pub fn bundled() -> Result<FontRef<'static>> {
    Ok(FontRef::try_from_slice(DEJAVU_SANS_BOLD)?)
}
