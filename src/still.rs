//! Single-frame renders (PNG, JPEG, WEBP, AVIF).

use std::time::Instant;

use shakmaty::Square;

use crate::assets::GlyphSource;
use crate::config::BoardConfig;
use crate::error::Result;
use crate::frame::FrameRenderer;
use crate::game::Game;
use crate::output::{OutputFormat, RenderOptions};

/// Highlights to draw for `game`: its latest move when requested and
/// available, otherwise `base`.
pub(crate) fn effective_highlights(game: &Game, base: &[Square], highlight_last_move: bool) -> Vec<Square> {
    match game.last_move() {
        Some((from, to)) if highlight_last_move => vec![from, to],
        _ => base.to_vec(),
    }
}

/// Renders one frame of `game` (or of its snapshot at `options.move_index`)
/// and encodes it.
///
/// A snapshot starts without highlights; the live game keeps `highlights`.
pub fn render_still(
    config: &BoardConfig,
    glyphs: &dyn GlyphSource,
    game: &Game,
    highlights: &[Square],
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let start = Instant::now();

    let snapshot;
    let (shown, base): (&Game, &[Square]) = match options.move_index {
        Some(n) => {
            snapshot = game.snapshot(n)?;
            (&snapshot, &[])
        }
        None => (game, highlights),
    };
    let highlights = effective_highlights(shown, base, options.highlight_last_move);

    let mut renderer = FrameRenderer::new(config, glyphs)?;
    let mut surface = renderer.surface();
    renderer.draw(&mut surface, shown.board(), &highlights)?;
    let bytes = format.encode(surface)?;

    log::info!(
        "Rendered {} at half-move {} ({} bytes) in {:?}",
        format,
        shown.len(),
        bytes.len(),
        start.elapsed()
    );
    Ok(bytes)
}
