//! Game state: the starting position, the moves played from it, and the
//! position they lead to. Snapshots rebuild an earlier position by replaying
//! a truncated movetext through the same PGN loader.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{Board, CastlingMode, Chess, EnPassantMode, Position, PositionError, Square};

use crate::error::{Error, Result};
use crate::pgn;

const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// One half-move of the history, in SAN plus origin and destination squares.
///
/// Castling is reported as the king's move (`e1` to `g1`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub san: String,
    pub from: Option<Square>,
    pub to: Option<Square>,
}

/// A FEN that parses but is not a playable position (for example a lone
/// king). It can still be drawn; playing moves on it fails.
#[derive(Clone, Debug)]
struct Diagram {
    fen: Fen,
    error: PositionError<Chess>,
}

#[derive(Clone, Debug, Default)]
pub struct Game {
    /// FEN of the starting position when it is not the standard one
    setup: Option<String>,
    position: Chess,
    diagram: Option<Diagram>,
    history: Vec<HistoryEntry>,
}

/// Clamps a requested move index to `[0, history_len]`.
pub fn clamp_move(requested: usize, history_len: usize) -> usize {
    requested.min(history_len)
}

/// Movetext for the given SAN moves, with a move number before every white move.
pub fn movetext<S: AsRef<str>>(moves: &[S]) -> String {
    let mut tokens = Vec::with_capacity(moves.len() * 3 / 2);
    for (i, san) in moves.iter().enumerate() {
        if i % 2 == 0 {
            tokens.push(format!("{}.", i / 2 + 1));
        }
        tokens.push(san.as_ref().to_string());
    }
    tokens.join(" ")
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        let fen = Fen::from_ascii(fen.trim().as_bytes())?;
        match fen.clone().into_position::<Chess>(CastlingMode::Standard) {
            Ok(position) => {
                let normalized = Fen::from_position(&position, EnPassantMode::Legal).to_string();
                Ok(Game {
                    setup: (normalized != STANDARD_FEN).then_some(normalized),
                    position,
                    diagram: None,
                    history: Vec::new(),
                })
            }
            Err(error) => {
                log::warn!("FEN {fen} is not a playable position ({error}); loading it as a diagram");
                Ok(Game {
                    setup: Some(fen.to_string()),
                    position: Chess::default(),
                    diagram: Some(Diagram { fen, error }),
                    history: Vec::new(),
                })
            }
        }
    }

    /// Loads a PGN game; a `[FEN]` tag sets the starting position.
    pub fn from_pgn(text: &str) -> Result<Self> {
        let parsed = pgn::parse(text)?;
        let mut game = match parsed.tag("FEN") {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        for san in &parsed.moves {
            game.play_san(san)?;
        }
        log::debug!("Loaded PGN with {} half-moves", game.history.len());
        Ok(game)
    }

    /// Plays one SAN move on the current position.
    pub fn play_san(&mut self, token: &str) -> Result<()> {
        if let Some(diagram) = &self.diagram {
            return Err(diagram.error.clone().into());
        }
        let san_plus = SanPlus::from_ascii(token.as_bytes()).map_err(|source| Error::San {
            token: token.to_string(),
            source,
        })?;
        let mv = san_plus
            .san
            .to_move(&self.position)
            .map_err(|source| Error::IllegalMove {
                san: token.to_string(),
                ply: self.history.len(),
                source,
            })?;
        let uci = mv.to_uci(CastlingMode::Standard);
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, mv);
        self.history.push(HistoryEntry {
            san: san.to_string(),
            from: uci.from(),
            to: uci.to(),
        });
        Ok(())
    }

    /// The playable position, or `None` for a diagram-only game.
    pub fn position(&self) -> Option<&Chess> {
        match self.diagram {
            Some(_) => None,
            None => Some(&self.position),
        }
    }

    /// Piece placement to draw.
    pub fn board(&self) -> &Board {
        match &self.diagram {
            Some(diagram) => &diagram.fen.as_setup().board,
            None => self.position.board(),
        }
    }

    /// Number of half-moves played.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|entry| entry.san.as_str())
    }

    pub fn verbose_history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Origin and destination of the latest move, if any.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        let latest = self.history.last()?;
        Some((latest.from?, latest.to?))
    }

    pub fn fen(&self) -> String {
        match &self.diagram {
            Some(diagram) => diagram.fen.to_string(),
            None => Fen::from_position(&self.position, EnPassantMode::Legal).to_string(),
        }
    }

    fn setup_tags(&self) -> String {
        match &self.setup {
            Some(fen) => format!("[SetUp \"1\"]\n[FEN \"{fen}\"]\n\n"),
            None => String::new(),
        }
    }

    /// PGN of the whole game.
    pub fn pgn(&self) -> String {
        let sans: Vec<&str> = self.history().collect();
        format!("{}{}", self.setup_tags(), movetext(&sans))
    }

    /// A fresh game holding the position after the first `n` half-moves.
    ///
    /// `n` is clamped to the history length.
    pub fn snapshot(&self, n: usize) -> Result<Game> {
        let n = clamp_move(n, self.history.len());
        let sans: Vec<&str> = self.history().take(n).collect();
        let text = format!("{}{}", self.setup_tags(), movetext(&sans));
        Game::from_pgn(&text)
    }
}
