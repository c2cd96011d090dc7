//! Board appearance: pixel size, padding, square colours, orientation and piece theme.
//! Uses serde for JSON config files; unknown keys are rejected.
//! Every field has a default, so a config file only lists what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::theme::Theme;

/// Largest board edge for which every grid line `size * k / 8` fits in a `u32`.
pub const MAX_SIZE: u32 = u32::MAX / 8;

/// Pixel margins around the 8x8 board area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub const fn uniform(px: u32) -> Self {
        Padding { top: px, right: px, bottom: px, left: px }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Edge length of the 8x8 board area in pixels
    pub size: u32,
    pub padding: Padding,
    pub light: Color,
    pub dark: Color,
    pub highlight: Color,
    /// Black at the bottom when set
    pub flipped: bool,
    pub style: Theme,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let palette = Theme::Modern.palette();
        BoardConfig {
            size: 480,
            padding: Padding::default(),
            light: palette.light,
            dark: palette.dark,
            highlight: palette.highlight,
            flipped: false,
            style: Theme::Modern,
        }
    }
}

impl BoardConfig {
    /// Loads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: BoardConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded board config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Config("size must be greater than zero".into()));
        }
        if self.size > MAX_SIZE {
            return Err(Error::Config(format!("size {} exceeds {}", self.size, MAX_SIZE)));
        }
        let padded = |a: u32, b: u32| self.size.checked_add(a)?.checked_add(b);
        if padded(self.padding.left, self.padding.right).is_none()
            || padded(self.padding.top, self.padding.bottom).is_none()
        {
            return Err(Error::Config("size plus padding does not fit in 32 bits".into()));
        }
        if self.size % 8 != 0 {
            log::warn!("board size {} is not a multiple of 8; cell edges will be rounded", self.size);
        }
        Ok(())
    }

    /// Switches the piece theme and resets the colours to that theme's defaults.
    pub fn set_theme(&mut self, theme: Theme) {
        let palette = theme.palette();
        self.style = theme;
        self.light = palette.light;
        self.dark = palette.dark;
        self.highlight = palette.highlight;
    }

    /// Width and height of the padded canvas. Saturates on configs that
    /// fail [`BoardConfig::validate`].
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.size.saturating_add(self.padding.left).saturating_add(self.padding.right),
            self.size.saturating_add(self.padding.top).saturating_add(self.padding.bottom),
        )
    }
}
