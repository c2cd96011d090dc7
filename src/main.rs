use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chessboard_image::{
    AssetDir, BoardConfig, Chessboard, Color, DEFAULT_FRAME_DELAY_MS, FontGlyphs, GlyphSource, OutputFormat,
    Padding, RenderOptions, Square, Theme,
};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

fn cli() -> Command {
    Command::new("chessboard-image")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders chess positions and games to PNG, JPEG, WEBP, AVIF or animated GIF")
        .arg(
            Arg::new("fen")
                .long("fen")
                .value_name("FEN")
                .help("Position to render")
                .conflicts_with("pgn"),
        )
        .arg(
            Arg::new("pgn")
                .long("pgn")
                .value_name("FILE")
                .help("PGN file with the game to render")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON board config; flags below override it")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the image")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("png, jpeg, webp, avif, gif or a MIME type (default: from the output extension)")
                .value_parser(OutputFormat::from_str),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .value_name("PX")
                .help("Board edge length in pixels")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("padding")
                .long("padding")
                .value_name("PX")
                .help("Margin on every side of the board")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .help("Piece theme (modern, wood); resets the board colours")
                .value_parser(Theme::from_str),
        )
        .arg(color_arg("light", "Colour of the light squares"))
        .arg(color_arg("dark", "Colour of the dark squares"))
        .arg(color_arg("highlight-color", "Colour blended over highlighted squares"))
        .arg(
            Arg::new("flipped")
                .long("flipped")
                .help("Draw the board from black's side")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("move")
                .long("move")
                .value_name("N")
                .help("Half-move to render (still) or to stop at (gif); clamped to the game length")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("highlight-last-move")
                .long("highlight-last-move")
                .help("Highlight the origin and destination of the latest move")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("highlight")
                .long("highlight")
                .value_name("SQUARES")
                .help("Comma-separated squares to highlight, e.g. e2,e4")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(Square::from_str),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .value_name("MS")
                .help("Delay between GIF frames")
                .default_value("500")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("assets")
                .long("assets")
                .value_name("DIR")
                .help("Piece images laid out as DIR/{theme}/{color}{role}.png (default: built-in glyphs)")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn color_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("COLOR")
        .help(help)
        .value_parser(Color::from_str)
}

/// Config file first, then the theme, then individual overrides.
fn board_config(matches: &ArgMatches) -> Result<BoardConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => BoardConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BoardConfig::default(),
    };
    if let Some(&theme) = matches.get_one::<Theme>("theme") {
        config.set_theme(theme);
    }
    if let Some(&size) = matches.get_one::<u32>("size") {
        config.size = size;
    }
    if let Some(&padding) = matches.get_one::<u32>("padding") {
        config.padding = Padding::uniform(padding);
    }
    if let Some(&light) = matches.get_one::<Color>("light") {
        config.light = light;
    }
    if let Some(&dark) = matches.get_one::<Color>("dark") {
        config.dark = dark;
    }
    if let Some(&highlight) = matches.get_one::<Color>("highlight-color") {
        config.highlight = highlight;
    }
    if matches.get_flag("flipped") {
        config.flipped = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let matches = cli().get_matches();

    let config = board_config(&matches)?;
    let glyphs: Arc<dyn GlyphSource> = match matches.get_one::<PathBuf>("assets") {
        Some(root) => Arc::new(
            AssetDir::open(root, &[config.style])
                .with_context(|| format!("Failed to open piece assets in {}", root.display()))?,
        ),
        None => Arc::new(FontGlyphs::new().context("Failed to load built-in glyphs")?),
    };
    let mut board = Chessboard::with_glyphs(config, glyphs).context("Invalid board configuration")?;

    if let Some(fen) = matches.get_one::<String>("fen") {
        board.load_fen(fen).context("Failed to load FEN")?;
    }
    if let Some(path) = matches.get_one::<PathBuf>("pgn") {
        let pgn = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        board.load_pgn(&pgn).context("Failed to load PGN")?;
    }
    if let Some(squares) = matches.get_many::<Square>("highlight") {
        board.highlight_squares(&squares.copied().collect::<Vec<_>>());
    }

    let output = matches.get_one::<PathBuf>("output").context("--output is required")?;
    let format = match matches.get_one::<OutputFormat>("format") {
        Some(&format) => format,
        None => OutputFormat::from_path(output).context("Cannot infer the output format; pass --format")?,
    };
    let options = RenderOptions {
        move_index: matches.get_one::<usize>("move").copied(),
        highlight_last_move: matches.get_flag("highlight-last-move"),
        frame_delay_ms: matches.get_one::<u32>("delay").copied().unwrap_or(DEFAULT_FRAME_DELAY_MS),
    };

    board
        .write_file(output, format, options)
        .await
        .with_context(|| format!("Failed to render {}", output.display()))?;

    println!("Wrote {} ({}, {} half-moves)", output.display(), format, board.game().len());
    Ok(())
}
