//! Animated GIF of a game: one frame per half-move, from the initial
//! position up to the requested move.

use std::time::Instant;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::assets::GlyphSource;
use crate::config::BoardConfig;
use crate::error::Result;
use crate::frame::FrameRenderer;
use crate::game::{Game, clamp_move};
use crate::output::RenderOptions;
use crate::still::effective_highlights;

/// Quantizer speed for GIF frames (1 = best quality, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// Renders snapshots `0..=end` of `game` as a looping GIF, where `end` is
/// `options.move_index` clamped to the game length (default: the full game).
///
/// Frames are drawn one after another onto a single reused surface.
pub fn render_animation(
    config: &BoardConfig,
    glyphs: &dyn GlyphSource,
    game: &Game,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let start = Instant::now();
    let end = clamp_move(options.move_index.unwrap_or(game.len()), game.len());
    let delay = Delay::from_numer_denom_ms(options.frame_delay_ms, 1);

    let mut renderer = FrameRenderer::new(config, glyphs)?;
    let mut surface = renderer.surface();
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        for ply in 0..=end {
            let snapshot = game.snapshot(ply)?;
            let highlights = effective_highlights(&snapshot, &[], options.highlight_last_move);
            renderer.draw(&mut surface, snapshot.board(), &highlights)?;
            encoder.encode_frame(Frame::from_parts(surface.clone(), 0, 0, delay))?;
            log::debug!("Encoded frame {}/{}", ply, end);
        }
    }

    log::info!(
        "Rendered {} GIF frames ({} bytes) in {:?}",
        end + 1,
        bytes.len(),
        start.elapsed()
    );
    Ok(bytes)
}
