//! Renders chess positions and game histories to raster images.
//! - Still frames: PNG, JPEG, WEBP and AVIF via `image`.
//! - Animated GIFs with one frame per half-move.
//! - Games are loaded from PGN or FEN; moves are checked by `shakmaty`.
//! - Piece glyphs come from a themed asset directory or the bundled font.

mod animation;
mod assets;
mod board;
mod color;
mod config;
mod error;
mod fonts;
mod frame;
mod game;
mod geometry;
mod output;
mod pgn;
mod still;
mod theme;

pub use animation::render_animation;
pub use assets::{AssetDir, FontGlyphs, GlyphSource, all_pieces, glyph_file_name};
pub use board::Chessboard;
pub use color::Color;
pub use config::{BoardConfig, Padding};
pub use error::{Error, Result};
pub use frame::FrameRenderer;
pub use game::{Game, HistoryEntry, clamp_move, movetext};
pub use geometry::{CellRect, Geometry};
pub use output::{DEFAULT_FRAME_DELAY_MS, OutputFormat, RenderOptions};
pub use pgn::{ParsedPgn, parse as parse_pgn};
pub use still::render_still;
pub use theme::{Palette, Theme};

pub use shakmaty::Square;
