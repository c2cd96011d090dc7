//! `Chessboard`, the public facade: owns a config, the loaded game and the highlighted squares.
//! Renders are synchronous underneath; `buffer` and `write_file` run them on
//! tokio's blocking pool.

use std::path::Path;
use std::sync::Arc;

use shakmaty::Square;

use crate::animation::render_animation;
use crate::assets::{FontGlyphs, GlyphSource};
use crate::config::BoardConfig;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::output::{OutputFormat, RenderOptions};
use crate::still::render_still;
use crate::theme::Theme;

#[derive(Clone)]
pub struct Chessboard {
    config: BoardConfig,
    game: Game,
    highlighted: Vec<Square>,
    glyphs: Arc<dyn GlyphSource>,
}

impl Chessboard {
    /// A board at the standard start position, drawing pieces from the bundled font.
    pub fn new(config: BoardConfig) -> Result<Self> {
        Self::with_glyphs(config, Arc::new(FontGlyphs::new()?))
    }

    pub fn with_glyphs(config: BoardConfig, glyphs: Arc<dyn GlyphSource>) -> Result<Self> {
        config.validate()?;
        if !glyphs.supports(config.style) {
            return Err(Error::UnknownTheme(config.style));
        }
        Ok(Chessboard {
            config,
            game: Game::new(),
            highlighted: Vec::new(),
            glyphs,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Switches the piece theme and its default colours; size, padding and
    /// orientation are kept.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        if !self.glyphs.supports(theme) {
            return Err(Error::UnknownTheme(theme));
        }
        self.config.set_theme(theme);
        Ok(())
    }

    /// Replaces the game with the one in `pgn`. On error the current game is kept.
    pub fn load_pgn(&mut self, pgn: &str) -> Result<()> {
        self.game = Game::from_pgn(pgn)?;
        Ok(())
    }

    /// Replaces the game with the position in `fen`. On error the current game is kept.
    pub fn load_fen(&mut self, fen: &str) -> Result<()> {
        self.game = Game::from_fen(fen)?;
        Ok(())
    }

    /// Replaces the highlighted squares; an empty slice clears them.
    pub fn highlight_squares(&mut self, squares: &[Square]) {
        self.highlighted = squares.to_vec();
    }

    pub fn highlighted(&self) -> &[Square] {
        &self.highlighted
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The game as it stood after `n` half-moves (clamped).
    pub fn snapshot(&self, n: usize) -> Result<Game> {
        self.game.snapshot(n)
    }

    /// Renders on the calling thread.
    pub fn render(&self, format: OutputFormat, options: &RenderOptions) -> Result<Vec<u8>> {
        if format.is_animated() {
            return render_animation(&self.config, self.glyphs.as_ref(), &self.game, options);
        }
        render_still(
            &self.config,
            self.glyphs.as_ref(),
            &self.game,
            &self.highlighted,
            format,
            options,
        )
    }

    /// Renders to an encoded buffer on the blocking pool.
    pub async fn buffer(&self, format: OutputFormat, options: RenderOptions) -> Result<Vec<u8>> {
        let board = self.clone();
        tokio::task::spawn_blocking(move || board.render(format, &options)).await?
    }

    /// Renders and writes the result to `path`.
    pub async fn write_file(&self, path: impl AsRef<Path>, format: OutputFormat, options: RenderOptions) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.buffer(format, options).await?;
        tokio::fs::write(path, &bytes).await?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetDir;
    use crate::assets::tests::SolidGlyphs;
    use crate::config::Padding;

    fn board(config: BoardConfig) -> Chessboard {
        Chessboard::with_glyphs(config, Arc::new(SolidGlyphs)).unwrap()
    }

    #[test]
    fn test_wood_theme_keeps_size_and_orientation() {
        let mut board = board(BoardConfig {
            size: 240,
            flipped: true,
            padding: Padding::uniform(4),
            ..Default::default()
        });
        board.set_theme(Theme::Wood).unwrap();
        let palette = Theme::Wood.palette();
        let config = board.config();
        assert_eq!(config.style, Theme::Wood);
        assert_eq!(config.light, palette.light);
        assert_eq!(config.dark, palette.dark);
        assert_eq!(config.highlight, palette.highlight);
        assert_eq!(config.size, 240);
        assert!(config.flipped);
        assert_eq!(config.padding, Padding::uniform(4));
    }

    #[test]
    fn test_highlight_then_clear() {
        let mut board = board(BoardConfig::default());
        assert!(board.highlighted().is_empty());
        board.highlight_squares(&[Square::E2, Square::E4]);
        assert_eq!(board.highlighted(), [Square::E2, Square::E4]);
        board.highlight_squares(&[Square::D4]);
        assert_eq!(board.highlighted(), [Square::D4]);
        board.highlight_squares(&[]);
        assert!(board.highlighted().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_game() {
        let mut board = board(BoardConfig::default());
        board.load_pgn("1. e4 e5").unwrap();
        assert!(board.load_pgn("1. e4 e5 2. Ke3").is_err());
        assert!(board.load_fen("not a fen").is_err());
        assert_eq!(board.game().len(), 2);
        assert_eq!(board.snapshot(1).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_config_and_unknown_theme() {
        let err = Chessboard::with_glyphs(BoardConfig { size: 0, ..Default::default() }, Arc::new(SolidGlyphs));
        assert!(matches!(err, Err(Error::Config(_))));
        let padded = BoardConfig { size: 8, padding: Padding::uniform(u32::MAX), ..Default::default() };
        let err = Chessboard::with_glyphs(padded, Arc::new(SolidGlyphs));
        assert!(matches!(err, Err(Error::Config(_))));

        let root = std::env::temp_dir().join(format!("board-empty-{}", std::process::id()));
        let assets = AssetDir::open(&root, &[]).unwrap();
        let err = Chessboard::with_glyphs(BoardConfig::default(), Arc::new(assets));
        assert!(matches!(err, Err(Error::UnknownTheme(Theme::Modern))));
    }

    #[tokio::test]
    async fn test_buffer_png_and_gif() {
        let mut board = board(BoardConfig { size: 80, ..Default::default() });
        board.load_pgn("1. e4 e5").unwrap();
        let png = board.buffer(OutputFormat::Png, RenderOptions::default()).await.unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        let gif = board.buffer(OutputFormat::Gif, RenderOptions::default()).await.unwrap();
        assert!(gif.starts_with(b"GIF89a"));
        // rendering never touches the board's own state
        assert_eq!(board.game().len(), 2);
    }

    #[tokio::test]
    async fn test_write_file() {
        let board = board(BoardConfig { size: 80, ..Default::default() });
        let path = std::env::temp_dir().join(format!("board-{}.png", std::process::id()));
        board.write_file(&path, OutputFormat::Png, RenderOptions::default()).await.unwrap();
        let written = std::fs::read(&path).unwrap();
        let image = image::load_from_memory(&written).unwrap();
        assert_eq!((image.width(), image.height()), (80, 80));
        std::fs::remove_file(&path).unwrap();
    }
}
