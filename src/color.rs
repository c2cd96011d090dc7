//! CSS-style colour strings for board squares and overlays.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An RGBA colour, parsed from and printed as a CSS-like string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color([u8; 4]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color([r, g, b, a])
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

/// Parse a colour string.
///
/// Supports:
/// - `rgb(r, g, b)` and `rgba(r, g, b, a)` with `a` in `0.0..=1.0`
/// - Hex: `#RGB`, `#RRGGBB`, `#RRGGBBAA`
/// - Named colors: black, white, red, green, blue, yellow, gray/grey, orange,
///   purple, brown, transparent
/// - Case-insensitive, trims whitespace
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = function_args(&lower, "rgba") {
            parse_rgba(args)
        } else if let Some(args) = function_args(&lower, "rgb") {
            parse_rgb(args)
        } else {
            parse_named(&lower)
        };
        parsed.ok_or_else(|| Error::Color(s.to_string()))
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn channel(s: &str) -> Option<u8> {
    s.trim().parse().ok()
}

fn parse_rgb(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').collect();
    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        _ => None,
    }
}

fn parse_rgba(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').collect();
    match parts.as_slice() {
        [r, g, b, a] => {
            let a: f32 = a.trim().parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            let a = (a * 255.0).round() as u8;
            Some(Color::rgba(channel(r)?, channel(g)?, channel(b)?, a))
        }
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
            Some(Color::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17))
        }
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_named(s: &str) -> Option<Color> {
    match s {
        "black"         => Some(Color::rgb(0, 0, 0)),
        "white"         => Some(Color::rgb(255, 255, 255)),
        "red"           => Some(Color::rgb(255, 0, 0)),
        "green"         => Some(Color::rgb(0, 128, 0)),
        "blue"          => Some(Color::rgb(0, 0, 255)),
        "yellow"        => Some(Color::rgb(255, 255, 0)),
        "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
        "orange"        => Some(Color::rgb(255, 165, 0)),
        "purple"        => Some(Color::rgb(128, 0, 128)),
        "brown"         => Some(Color::rgb(139, 69, 19)),
        "transparent"   => Some(Color::rgba(0, 0, 0, 0)),
        _               => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "rgb({r},{g},{b})")
        } else {
            write!(f, "rgba({r},{g},{b},{:.3})", f32::from(a) / 255.0)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
