//! Error type shared by every rendering entry point.

use std::path::PathBuf;

use shakmaty::fen::ParseFenError;
use shakmaty::san::{ParseSanError, SanError};
use shakmaty::{Chess, PositionError};
use thiserror::Error;

use crate::theme::Theme;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),
    #[error("illegal position: {0}")]
    Position(#[from] Box<PositionError<Chess>>),
    #[error("invalid SAN token {token:?}")]
    San {
        token: String,
        #[source]
        source: ParseSanError,
    },
    #[error("move {san:?} cannot be played after {ply} half-moves")]
    IllegalMove {
        san: String,
        ply: usize,
        #[source]
        source: SanError,
    },
    #[error("malformed PGN: {0}")]
    Pgn(String),
    #[error("theme {0} has no registered glyph directory")]
    UnknownTheme(Theme),
    #[error("missing piece glyph {}", path.display())]
    MissingAsset { path: PathBuf },
    #[error("failed to load piece glyph {}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("font is missing a glyph for {0:?}")]
    Font(char),
    #[error("bundled font could not be parsed")]
    FontData(#[from] ab_glyph::InvalidFont),
    #[error("invalid color {0:?}")]
    Color(String),
    #[error("invalid board configuration: {0}")]
    Config(String),
    #[error("unsupported output format {0:?}")]
    UnsupportedFormat(String),
    #[error("image encoding failed")]
    Image(#[from] image::ImageError),
    #[error("failed to read configuration")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("render task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl From<PositionError<Chess>> for Error {
    fn from(err: PositionError<Chess>) -> Self {
        Error::Position(Box::new(err))
    }
}
