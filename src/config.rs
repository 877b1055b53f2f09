use std::path::Path;

use serde::Deserialize;

use crate::canvas::Color;
use crate::error::ConfigError;
use crate::mode::{FixedSize, ModeKind, SelectionMode};

/// Selector settings as read from a TOML file. Every key is optional.
///
/// ```toml
/// mode = "fixed"
/// fixed_width = 64
/// fixed_height = 64
/// highlight = "#3366cc"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub mode: ModeKind,
    pub fixed_width: u32,
    pub fixed_height: u32,
    pub highlight: String,
    pub fill_alpha: f64,
    pub stroke_width: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            mode: ModeKind::Normal,
            fixed_width: FixedSize::DEFAULT.width(),
            fixed_height: FixedSize::DEFAULT.height(),
            highlight: "#3366cc".to_string(),
            fill_alpha: 0.2,
            stroke_width: 1.0,
        }
    }
}

impl SelectorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SelectorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.fixed_size()?;
        self.highlight_color()?;
        Ok(())
    }

    pub fn fixed_size(&self) -> Result<FixedSize, ConfigError> {
        Ok(FixedSize::new(self.fixed_width, self.fixed_height)?)
    }

    pub fn selection_mode(&self) -> Result<SelectionMode, ConfigError> {
        Ok(match self.mode {
            ModeKind::Normal => SelectionMode::Normal,
            ModeKind::Fixed => SelectionMode::Fixed(self.fixed_size()?),
        })
    }

    pub fn highlight_color(&self) -> Result<Color, ConfigError> {
        Color::from_hex(&self.highlight)
    }
}
