//! Output formats and per-call render options.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{Error, Result};

pub const DEFAULT_FRAME_DELAY_MS: u32 = 500;

/// Encoded image formats a board can be rendered to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Avif,
    /// Animated, one frame per half-move
    Gif,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Webp,
        OutputFormat::Avif,
        OutputFormat::Gif,
    ];

    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Avif => "image/avif",
            OutputFormat::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
            OutputFormat::Avif => "avif",
            OutputFormat::Gif => "gif",
        }
    }

    pub fn is_animated(self) -> bool {
        self == OutputFormat::Gif
    }

    pub fn from_mime(mime: &str) -> Result<Self> {
        let mime = mime.trim();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.mime().eq_ignore_ascii_case(mime))
            .ok_or_else(|| Error::UnsupportedFormat(mime.to_string()))
    }

    /// Guesses the format from a file extension (`board.png`, `game.gif`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Webp => ImageFormat::WebP,
            OutputFormat::Avif => ImageFormat::Avif,
            OutputFormat::Gif => ImageFormat::Gif,
        }
    }

    /// Encodes a single frame.
    pub fn encode(self, frame: RgbaImage) -> Result<Vec<u8>> {
        let image = match self {
            // JPEG has no alpha channel
            OutputFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(frame).into_rgb8()),
            _ => DynamicImage::ImageRgba8(frame),
        };
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, self.image_format())?;
        Ok(bytes.into_inner())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Accepts a MIME type or a short name / extension.
impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.contains('/') {
            return OutputFormat::from_mime(s);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::Webp),
            "avif" => Ok(OutputFormat::Avif),
            "gif" => Ok(OutputFormat::Gif),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Per-call options; never stored on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Half-move index to render (still) or to stop at (animated); clamped
    /// to the game length
    pub move_index: Option<usize>,
    /// Highlight the origin and destination of the latest move
    pub highlight_last_move: bool,
    /// Delay between GIF frames
    pub frame_delay_ms: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            move_index: None,
            highlight_last_move: false,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_format_parsing() {
        assert_eq!("image/png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path("out/game.gif").unwrap(), OutputFormat::Gif);
        assert_eq!(OutputFormat::from_mime("image/avif").unwrap(), OutputFormat::Avif);
        assert!("image/bmp".parse::<OutputFormat>().is_err());
        assert!(OutputFormat::from_path("board").is_err());
    }

    #[test]
    fn test_mime_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_mime(format.mime()).unwrap(), format);
            assert_eq!(format.extension().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_encode_signatures() {
        let frame = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let png = OutputFormat::Png.encode(frame.clone()).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        let jpeg = OutputFormat::Jpeg.encode(frame.clone()).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8]));
        let webp = OutputFormat::Webp.encode(frame.clone()).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
        let avif = OutputFormat::Avif.encode(frame).unwrap();
        assert_eq!(&avif[4..8], b"ftyp");
        assert_eq!(&avif[8..12], b"avif");
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.frame_delay_ms, 500);
        assert_eq!(options.move_index, None);
        assert!(!options.highlight_last_move);
    }
}
