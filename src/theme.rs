//! Piece themes and the board colours each one ships with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};

/// A named set of piece glyphs plus default board colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Modern,
    Wood,
}

/// Light, dark and highlight colours applied by [`crate::BoardConfig::set_theme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub light: Color,
    pub dark: Color,
    pub highlight: Color,
}

const HIGHLIGHT: Color = Color::rgba(255, 255, 52, 128);

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Modern, Theme::Wood];

    /// Directory name under the asset root holding this theme's glyphs.
    pub fn dir_name(self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Wood => "wood",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Modern => Palette {
                light: Color::rgb(238, 238, 210),
                dark: Color::rgb(118, 150, 86),
                highlight: HIGHLIGHT,
            },
            Theme::Wood => Palette {
                light: Color::rgb(192, 166, 132),
                dark: Color::rgb(131, 95, 66),
                highlight: HIGHLIGHT,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.dir_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("unknown theme {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_display_matches_dir() {
        assert_eq!(Theme::Modern.to_string(), "modern");
        assert_eq!(Theme::Wood.to_string(), "wood");
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("wood".parse::<Theme>().unwrap(), Theme::Wood);
        assert_eq!(" Modern ".parse::<Theme>().unwrap(), Theme::Modern);
        assert!("marble".parse::<Theme>().is_err());
    }

    #[test]
    fn test_wood_palette() {
        let palette = Theme::Wood.palette();
        assert_eq!(palette.light, Color::rgb(192, 166, 132));
        assert_eq!(palette.dark, Color::rgb(131, 95, 66));
    }
}
