use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;

pub const MIN_MINES_COUNT: usize = 10;
pub const MAX_MINES_COUNT: usize = 200;
pub const MIN_HEIGHT: usize = 9;
pub const MAX_HEIGHT: usize = 100;
pub const MIN_WIDTH: usize = 9;
pub const MAX_WIDTH: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    #[default]
    Easy,
    Normal,
    Hard,
    Custom,
}

impl GameMode {
    /// `(mines_count, height, width)` of a preset mode, `None` for custom.
    pub fn preset(self) -> Option<(usize, usize, usize)> {
        match self {
            GameMode::Easy => Some((10, 9, 9)),
            GameMode::Normal => Some((40, 16, 16)),
            GameMode::Hard => Some((99, 22, 22)),
            GameMode::Custom => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Easy => "easy",
            GameMode::Normal => "normal",
            GameMode::Hard => "hard",
            GameMode::Custom => "custom",
        }
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(GameMode::Easy),
            "normal" => Ok(GameMode::Normal),
            "hard" => Ok(GameMode::Hard),
            "custom" => Ok(GameMode::Custom),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated board configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    mode: GameMode,
    mines_count: usize,
    height: usize,
    width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { mode: GameMode::Easy, mines_count: 10, height: 9, width: 9 }
    }
}

impl GameConfig {
    /// The fixed configuration of a preset mode, `None` for custom.
    pub fn preset(mode: GameMode) -> Option<Self> {
        mode.preset().map(|(mines_count, height, width)| Self { mode, mines_count, height, width })
    }

    /// Resolves a mode and the optional custom values into a configuration.
    ///
    /// Preset modes ignore the custom values. Custom mode needs all three and
    /// checks, in order: mines count, height, width, and mines against a third
    /// of the board area.
    pub fn resolve(
        mode: GameMode,
        mines_count: Option<usize>,
        height: Option<usize>,
        width: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(cfg) = Self::preset(mode) {
            if mines_count.is_some() || height.is_some() || width.is_some() {
                warn!(%mode, "custom values are ignored outside custom mode");
            }
            return Ok(cfg);
        }

        let (mines_count, height, width) = match (mines_count, height, width) {
            (Some(m), Some(h), Some(w)) => (m, h, w),
            _ => {
                let missing = [("mines_count", mines_count), ("height", height), ("width", width)]
                    .into_iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| name)
                    .collect();
                return Err(ConfigError::MissingCustomFields(missing));
            }
        };

        if !(MIN_MINES_COUNT..=MAX_MINES_COUNT).contains(&mines_count) {
            return Err(ConfigError::MinesCountOutOfRange { value: mines_count, min: MIN_MINES_COUNT, max: MAX_MINES_COUNT });
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(ConfigError::HeightOutOfRange { value: height, min: MIN_HEIGHT, max: MAX_HEIGHT });
        }
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(ConfigError::WidthOutOfRange { value: width, min: MIN_WIDTH, max: MAX_WIDTH });
        }
        let max_for_area = height * width / 3;
        if mines_count > max_for_area {
            return Err(ConfigError::MinesCountOutOfRange { value: mines_count, min: MIN_MINES_COUNT, max: max_for_area });
        }

        Ok(Self { mode, mines_count, height, width })
    }

    /// Like [`GameConfig::resolve`], parsing the mode identifier first.
    pub fn parse(
        mode: &str,
        mines_count: Option<usize>,
        height: Option<usize>,
        width: Option<usize>,
    ) -> Result<Self, ConfigError> {
        Self::resolve(mode.parse()?, mines_count, height, width)
    }

    pub fn mode(&self) -> GameMode { self.mode }
    pub fn mines_count(&self) -> usize { self.mines_count }
    pub fn height(&self) -> usize { self.height }
    pub fn width(&self) -> usize { self.width }
}
