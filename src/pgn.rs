//! Minimal PGN reader: tag pairs plus the SAN tokens of the main line.
//!
//! Comments, variations, NAGs, move numbers, annotation glyphs and result
//! tokens are skipped. Legality is checked later when the tokens are played.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static TAG_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\s*([A-Za-z0-9_]+)\s+"((?:[^"\\]|\\.)*)"\s*\]$"#).expect("valid tag regex")
});

static MOVE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.+").expect("valid move number regex"));

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedPgn {
    pub tags: Vec<(String, String)>,
    pub moves: Vec<String>,
}

impl ParsedPgn {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Splits PGN text into tag pairs and main-line SAN tokens.
pub fn parse(text: &str) -> Result<ParsedPgn> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parsed = ParsedPgn::default();
    let mut chars = text.char_indices();
    let mut depth = 0usize;
    let mut token = String::new();

    fn flush(token: &mut String, parsed: &mut ParsedPgn, depth: usize) {
        if depth == 0 {
            if let Some(san) = movetext_token(token) {
                parsed.moves.push(san);
            }
        }
        token.clear();
    }

    while let Some((start, c)) = chars.next() {
        match c {
            '[' if token.is_empty() && depth == 0 => {
                let mut end = text.len();
                let mut in_quotes = false;
                let mut escaped = false;
                for (i, c) in chars.by_ref() {
                    match c {
                        _ if escaped => escaped = false,
                        '\\' if in_quotes => escaped = true,
                        '"' => in_quotes = !in_quotes,
                        ']' if !in_quotes => {
                            end = i + 1;
                            break;
                        }
                        _ => {}
                    }
                }
                let line = text.get(start..end).unwrap_or_default();
                let caps = TAG_PAIR
                    .captures(line)
                    .ok_or_else(|| Error::Pgn(format!("bad tag pair {line:?}")))?;
                let value = caps[2].replace("\\\"", "\"").replace("\\\\", "\\");
                parsed.tags.push((caps[1].to_string(), value));
            }
            '{' => {
                flush(&mut token, &mut parsed, depth);
                if !chars.by_ref().any(|(_, c)| c == '}') {
                    return Err(Error::Pgn("unterminated comment".into()));
                }
            }
            ';' => {
                flush(&mut token, &mut parsed, depth);
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '(' => {
                flush(&mut token, &mut parsed, depth);
                depth += 1;
            }
            ')' => {
                flush(&mut token, &mut parsed, depth);
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::Pgn("unbalanced ')'".into()))?;
            }
            c if c.is_whitespace() => flush(&mut token, &mut parsed, depth),
            c => token.push(c),
        }
    }
    flush(&mut token, &mut parsed, depth);

    if depth != 0 {
        return Err(Error::Pgn("unterminated variation".into()));
    }
    Ok(parsed)
}

/// Reduces a movetext token to a bare SAN, or `None` for tokens that carry no move.
fn movetext_token(token: &str) -> Option<String> {
    // old-style en passant suffix, alone or glued to the move
    let token = token.strip_suffix("e.p.").unwrap_or(token);
    if token.is_empty() || token.starts_with('$') || RESULTS.contains(&token) {
        return None;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let san = MOVE_NUMBER.replace(token, "");
    let san = san.trim_end_matches(['!', '?']);
    if san.is_empty() {
        return None;
    }
    Some(match san {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        _ => san.to_string(),
    })
}
