//! Draws one complete board frame onto an RGBA surface.

use std::collections::HashMap;

use ab_glyph::{Font, FontRef, ScaleFont};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use shakmaty::{Board, Piece, Square};

use crate::assets::GlyphSource;
use crate::config::BoardConfig;
use crate::error::Result;
use crate::fonts;
use crate::geometry::{CellRect, Geometry};

const LABEL_SCALE: f32 = 12.0;

/// Renders frames for one board configuration.
///
/// Scaled glyphs are cached, so reuse one renderer for every frame of a
/// sequence.
pub struct FrameRenderer<'a> {
    config: &'a BoardConfig,
    geometry: Geometry,
    glyphs: &'a dyn GlyphSource,
    font: FontRef<'static>,
    cache: HashMap<(Piece, u32, u32), RgbaImage>,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(config: &'a BoardConfig, glyphs: &'a dyn GlyphSource) -> Result<Self> {
        config.validate()?;
        Ok(FrameRenderer {
            config,
            geometry: Geometry::new(config),
            glyphs,
            font: fonts::bundled()?,
            cache: HashMap::new(),
        })
    }

    /// A blank surface sized to the padded canvas.
    pub fn surface(&self) -> RgbaImage {
        let (width, height) = self.config.canvas_size();
        RgbaImage::new(width, height)
    }

    /// Overwrites `surface` with the board, its labels, the highlighted
    /// squares and the pieces of `board`.
    pub fn draw(&mut self, surface: &mut RgbaImage, board: &Board, highlights: &[Square]) -> Result<()> {
        let light = self.config.light.to_rgba();
        let dark = self.config.dark.to_rgba();
        let geometry = self.geometry;

        for pixel in surface.pixels_mut() {
            *pixel = light;
        }

        for (row, col) in geometry.cells() {
            let rect = geometry.rect(row, col);
            let square = geometry.square_at(row, col);

            if (row + col) % 2 == 0 {
                draw_filled_rect_mut(surface, to_rect(rect), dark);
            }

            if col == 7 {
                let ink = if row % 2 == 0 { dark } else { light };
                let label = geometry.rank_label(row).to_string();
                self.draw_label(surface, &label, ink, rect.x as i32 + 3, rect.y as i32 + 4);
            }

            if row == 7 {
                let ink = if col % 2 == 0 { dark } else { light };
                let label = geometry.file_label(col).to_string();
                let (width, _) = text_size(LABEL_SCALE, &self.font, &label);
                let height = self.font.as_scaled(LABEL_SCALE).height();
                let right = (rect.x + rect.width) as i32 - 3;
                let bottom = (rect.y + rect.height) as f32 - 2.0;
                self.draw_label(surface, &label, ink, right - width as i32, (bottom - height).round() as i32);
            }

            if highlights.contains(&square) {
                let overlay = RgbaImage::from_pixel(rect.width, rect.height, self.config.highlight.to_rgba());
                imageops::overlay(surface, &overlay, rect.x.into(), rect.y.into());
            }

            if let Some(piece) = board.piece_at(square) {
                let glyph = self.scaled_glyph(piece, rect.width, rect.height)?;
                imageops::overlay(surface, glyph, rect.x.into(), rect.y.into());
            }
        }

        Ok(())
    }

    fn draw_label(&self, surface: &mut RgbaImage, text: &str, ink: Rgba<u8>, x: i32, y: i32) {
        draw_text_mut(surface, ink, x, y, LABEL_SCALE, &self.font, text);
    }

    fn scaled_glyph(&mut self, piece: Piece, width: u32, height: u32) -> Result<&RgbaImage> {
        let theme = self.config.style;
        let glyphs = self.glyphs;
        if !self.cache.contains_key(&(piece, width, height)) {
            log::debug!("Scaling {:?} glyph of theme {} to {}x{}", piece, theme, width, height);
            let glyph = glyphs.glyph(theme, piece)?;
            let scaled = imageops::resize(&glyph, width, height, FilterType::Triangle);
            self.cache.insert((piece, width, height), scaled);
        }
        Ok(&self.cache[&(piece, width, height)])
    }
}

fn to_rect(cell: CellRect) -> Rect {
    Rect::at(cell.x as i32, cell.y as i32).of_size(cell.width, cell.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::{BLACK_INK, SolidGlyphs, WHITE_INK};
    use crate::color::Color;
    use crate::config::Padding;
    use crate::game::Game;

    fn config(size: u32, flipped: bool) -> BoardConfig {
        BoardConfig {
            size,
            flipped,
            light: Color::rgb(200, 200, 200),
            dark: Color::rgb(50, 50, 50),
            highlight: Color::rgba(255, 0, 0, 128),
            ..Default::default()
        }
    }

    fn render(config: &BoardConfig, game: &Game, highlights: &[Square]) -> RgbaImage {
        let mut renderer = FrameRenderer::new(config, &SolidGlyphs).unwrap();
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, game.board(), highlights).unwrap();
        surface
    }

    /// Centre pixel of the cell showing `square`.
    fn centre(config: &BoardConfig, image: &RgbaImage, square: Square) -> Rgba<u8> {
        let geometry = Geometry::new(config);
        let (row, col) = geometry.cell_of(square);
        let rect = geometry.rect(row, col);
        *image.get_pixel(rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    #[test]
    fn test_lone_king_bottom_left() {
        let config = config(80, false);
        let game = Game::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let image = render(&config, &game, &[]);
        assert_eq!(image.dimensions(), (80, 80));

        let inked: Vec<(u32, u32)> = (0..8)
            .flat_map(|cy| (0..8).map(move |cx| (cx, cy)))
            .filter(|&(cx, cy)| *image.get_pixel(cx * 10 + 5, cy * 10 + 5) == WHITE_INK)
            .collect();
        assert_eq!(inked, [(0, 7)]);
        for y in 70..80 {
            for x in 0..10 {
                assert_eq!(*image.get_pixel(x, y), WHITE_INK);
            }
        }
    }

    #[test]
    fn test_square_colours_follow_chess_parity() {
        let config = config(160, false);
        let image = render(&config, &Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap(), &[]);
        let dark = config.dark.to_rgba();
        let light = config.light.to_rgba();
        assert_eq!(centre(&config, &image, Square::B2), dark);
        assert_eq!(centre(&config, &image, Square::C2), light);
        assert_eq!(centre(&config, &image, Square::H8), dark);
        assert_eq!(centre(&config, &image, Square::D4), dark);
        assert_eq!(centre(&config, &image, Square::E4), light);
    }

    #[test]
    fn test_flipped_start_position() {
        let config = config(160, true);
        let image = render(&config, &Game::new(), &[]);
        // black pieces at the bottom, the a-file on the right
        assert_eq!(*image.get_pixel(155, 155), BLACK_INK);
        assert_eq!(*image.get_pixel(155, 5), WHITE_INK);
        assert_eq!(centre(&config, &image, Square::E2), WHITE_INK);
        assert_eq!(centre(&config, &image, Square::E7), BLACK_INK);
        assert_eq!(centre(&config, &image, Square::E4), config.light.to_rgba());
    }

    #[test]
    fn test_highlights_only_listed_squares() {
        let config = config(160, false);
        let game = Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        let plain = render(&config, &game, &[]);
        let lit = render(&config, &game, &[Square::E2, Square::E4]);

        let geometry = Geometry::new(&config);
        for (row, col) in geometry.cells() {
            let square = geometry.square_at(row, col);
            let before = centre(&config, &plain, square);
            let after = centre(&config, &lit, square);
            if square == Square::E2 || square == Square::E4 {
                assert_ne!(before, after, "{square} should be highlighted");
                assert!(after[0] > before[0]);
            } else {
                assert_eq!(before, after, "{square} should not be highlighted");
            }
        }
        assert_eq!(render(&config, &game, &[]), plain);
    }

    #[test]
    fn test_labels_are_drawn_on_edge_cells() {
        let config = config(480, false);
        let game = Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        let image = render(&config, &game, &[]);
        let geometry = Geometry::new(&config);

        // light squares are (200, 200, 200) and dark ones (50, 50, 50)
        let has_pixel = |row: u32, col: u32, pred: &dyn Fn(u8) -> bool| {
            let rect = geometry.rect(row, col);
            (rect.x..rect.x + rect.width)
                .flat_map(|x| (rect.y..rect.y + rect.height).map(move |y| (x, y)))
                .any(|(x, y)| pred(image.get_pixel(x, y)[0]))
        };
        // rank 8 label sits on the light a8 square in the dark colour
        assert!(has_pixel(0, 7, &|v| v < 100));
        // the file label of h1 (light) is dark
        assert!(has_pixel(7, 0, &|v| v < 100));
        // a middle (dark) cell carries no label
        assert!(!has_pixel(3, 3, &|v| v != 50));
    }

    #[test]
    fn test_padding_keeps_margin_light() {
        let config = BoardConfig { padding: Padding::uniform(10), ..config(80, false) };
        let game = Game::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let image = render(&config, &game, &[]);
        assert_eq!(image.dimensions(), (100, 100));
        assert_eq!(*image.get_pixel(0, 0), config.light.to_rgba());
        assert_eq!(*image.get_pixel(15, 85), WHITE_INK);
    }

    #[test]
    fn test_rejects_unrenderable_config() {
        let config = BoardConfig { padding: Padding::uniform(u32::MAX), ..config(8, false) };
        assert!(matches!(FrameRenderer::new(&config, &SolidGlyphs), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_missing_glyph_aborts() {
        struct NoGlyphs;
        impl GlyphSource for NoGlyphs {
            fn glyph(&self, theme: crate::Theme, _piece: Piece) -> Result<RgbaImage> {
                Err(crate::Error::UnknownTheme(theme))
            }
        }
        let config = config(80, false);
        let mut renderer = FrameRenderer::new(&config, &NoGlyphs).unwrap();
        let mut surface = renderer.surface();
        assert!(renderer.draw(&mut surface, Game::new().board(), &[]).is_err());
    }
}
