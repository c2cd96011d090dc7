//! Piece glyph sources.
//! `AssetDir` reads `{root}/{theme}/{color}{role}.png` files; every theme it
//! serves is checked for all 12 glyphs when the directory is opened.
//! `FontGlyphs` draws the chess symbols of the bundled font instead, so a
//! board can be rendered without any image assets on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use shakmaty::{Color as Side, Piece, Role};

use crate::error::{Error, Result};
use crate::fonts;
use crate::theme::Theme;

/// Supplies the glyph image for a piece in a theme.
pub trait GlyphSource: Send + Sync {
    fn glyph(&self, theme: Theme, piece: Piece) -> Result<RgbaImage>;

    /// Whether `theme` can be served at all.
    fn supports(&self, _theme: Theme) -> bool {
        true
    }
}

const ROLES: [Role; 6] = [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen, Role::King];

/// All 12 colour/role combinations.
pub fn all_pieces() -> impl Iterator<Item = Piece> {
    [Side::White, Side::Black]
        .into_iter()
        .flat_map(|color| ROLES.into_iter().map(move |role| Piece { color, role }))
}

/// File name of a glyph inside its theme directory, e.g. `wk.png`.
pub fn glyph_file_name(piece: Piece) -> String {
    format!("{}{}.png", piece.color.char(), piece.role.char())
}

/// PNG glyphs laid out as `{root}/{theme}/{color}{role}.png`.
#[derive(Clone, Debug)]
pub struct AssetDir {
    themes: HashMap<Theme, PathBuf>,
}

impl AssetDir {
    /// Registers `themes` under `root`, failing if any glyph file is missing.
    pub fn open(root: impl AsRef<Path>, themes: &[Theme]) -> Result<Self> {
        let root = root.as_ref();
        let mut registered = HashMap::new();
        for &theme in themes {
            let dir = root.join(theme.dir_name());
            for piece in all_pieces() {
                let path = dir.join(glyph_file_name(piece));
                if !path.is_file() {
                    return Err(Error::MissingAsset { path });
                }
            }
            log::debug!("Registered theme {} at {}", theme, dir.display());
            registered.insert(theme, dir);
        }
        Ok(AssetDir { themes: registered })
    }

    pub fn glyph_path(&self, theme: Theme, piece: Piece) -> Result<PathBuf> {
        let dir = self.themes.get(&theme).ok_or(Error::UnknownTheme(theme))?;
        Ok(dir.join(glyph_file_name(piece)))
    }
}

impl GlyphSource for AssetDir {
    fn glyph(&self, theme: Theme, piece: Piece) -> Result<RgbaImage> {
        let path = self.glyph_path(theme, piece)?;
        log::debug!("Loading glyph {}", path.display());
        let image = image::open(&path).map_err(|source| Error::Asset { path, source })?;
        Ok(image.into_rgba8())
    }

    fn supports(&self, theme: Theme) -> bool {
        self.themes.contains_key(&theme)
    }
}

/// Glyphs drawn from the Unicode chess symbols of the bundled font.
pub struct FontGlyphs {
    font: FontRef<'static>,
    resolution: u32,
}

impl FontGlyphs {
    pub fn new() -> Result<Self> {
        Ok(FontGlyphs {
            font: fonts::bundled()?,
            resolution: 128,
        })
    }

    fn symbol(role: Role, solid: bool) -> char {
        match (role, solid) {
            (Role::King, false) => '♔',
            (Role::Queen, false) => '♕',
            (Role::Rook, false) => '♖',
            (Role::Bishop, false) => '♗',
            (Role::Knight, false) => '♘',
            (Role::Pawn, false) => '♙',
            (Role::King, true) => '♚',
            (Role::Queen, true) => '♛',
            (Role::Rook, true) => '♜',
            (Role::Bishop, true) => '♝',
            (Role::Knight, true) => '♞',
            (Role::Pawn, true) => '♟',
        }
    }

    /// Fill and outline colours of each side's pieces.
    fn inks(theme: Theme, side: Side) -> (Rgba<u8>, Rgba<u8>) {
        match (theme, side) {
            (Theme::Modern, Side::White) => (Rgba([255, 255, 255, 255]), Rgba([0, 0, 0, 255])),
            (Theme::Modern, Side::Black) => (Rgba([0, 0, 0, 255]), Rgba([0, 0, 0, 255])),
            (Theme::Wood, Side::White) => (Rgba([250, 235, 205, 255]), Rgba([60, 35, 20, 255])),
            (Theme::Wood, Side::Black) => (Rgba([60, 35, 20, 255]), Rgba([30, 15, 5, 255])),
        }
    }

    fn draw_symbol(&self, canvas: &mut RgbaImage, symbol: char, color: Rgba<u8>) -> Result<()> {
        if self.font.glyph_id(symbol).0 == 0 {
            return Err(Error::Font(symbol));
        }
        let scale = PxScale::from(self.resolution as f32 * 0.9);
        let text = symbol.to_string();
        let (width, _) = text_size(scale, &self.font, &text);
        let line_height = self.font.as_scaled(scale).height();
        let x = (self.resolution as i32 - width as i32) / 2;
        let y = ((self.resolution as f32 - line_height) / 2.0).round() as i32;
        draw_text_mut(canvas, color, x, y, scale, &self.font, &text);
        Ok(())
    }
}

impl GlyphSource for FontGlyphs {
    fn glyph(&self, theme: Theme, piece: Piece) -> Result<RgbaImage> {
        let (fill, outline) = Self::inks(theme, piece.color);
        let mut canvas = RgbaImage::new(self.resolution, self.resolution);
        self.draw_symbol(&mut canvas, Self::symbol(piece.role, true), fill)?;
        self.draw_symbol(&mut canvas, Self::symbol(piece.role, false), outline)?;
        Ok(canvas)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    /// Solid single-colour glyphs; white pieces are magenta, black pieces cyan.
    pub(crate) struct SolidGlyphs;

    pub(crate) const WHITE_INK: Rgba<u8> = Rgba([255, 0, 255, 255]);
    pub(crate) const BLACK_INK: Rgba<u8> = Rgba([0, 255, 255, 255]);

    impl GlyphSource for SolidGlyphs {
        fn glyph(&self, _theme: Theme, piece: Piece) -> Result<RgbaImage> {
            let ink = match piece.color {
                Side::White => WHITE_INK,
                Side::Black => BLACK_INK,
            };
            Ok(RgbaImage::from_pixel(16, 16, ink))
        }
    }

    fn temp_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("glyphs-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        root
    }

    fn write_theme(root: &Path, theme: Theme) {
        let dir = root.join(theme.dir_name());
        fs::create_dir_all(&dir).unwrap();
        for piece in all_pieces() {
            RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]))
                .save(dir.join(glyph_file_name(piece)))
                .unwrap();
        }
    }

    #[test]
    fn test_glyph_file_names() {
        let names: Vec<String> = all_pieces().map(glyph_file_name).collect();
        assert_eq!(names.len(), 12);
        assert!(names.contains(&"wk.png".to_string()));
        assert!(names.contains(&"bp.png".to_string()));
        assert!(names.contains(&"bn.png".to_string()));
    }

    #[test]
    fn test_asset_dir_loads_registered_theme() {
        let root = temp_root("ok");
        write_theme(&root, Theme::Wood);
        let assets = AssetDir::open(&root, &[Theme::Wood]).unwrap();
        let piece = Piece { color: Side::Black, role: Role::Queen };
        assert_eq!(assets.glyph_path(Theme::Wood, piece).unwrap(), root.join("wood").join("bq.png"));
        let glyph = assets.glyph(Theme::Wood, piece).unwrap();
        assert_eq!(glyph.dimensions(), (4, 4));
        assert!(matches!(assets.glyph(Theme::Modern, piece), Err(Error::UnknownTheme(Theme::Modern))));
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_asset_dir_rejects_incomplete_theme() {
        let root = temp_root("missing");
        write_theme(&root, Theme::Modern);
        fs::remove_file(root.join("modern").join("wn.png")).unwrap();
        let err = AssetDir::open(&root, &[Theme::Modern]).unwrap_err();
        assert!(matches!(err, Error::MissingAsset { .. }));
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_font_glyphs_draw_something() {
        let glyphs = FontGlyphs::new().unwrap();
        for piece in all_pieces() {
            let glyph = glyphs.glyph(Theme::Modern, piece).unwrap();
            assert_eq!(glyph.dimensions(), (128, 128));
            assert!(glyph.pixels().any(|p| p[3] > 0), "{piece:?} is blank");
            assert_eq!(glyph.get_pixel(0, 0)[3], 0);
        }
    }
}
