use std::error;
use std::fmt;

/// Rejected game configuration. Raised while resolving a [`GameConfig`](crate::config::GameConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The mode identifier is not one of `easy`, `normal`, `hard` or `custom`.
    InvalidMode(String),
    /// Custom mode was selected without some of `mines_count`, `height`, `width`.
    MissingCustomFields(Vec<&'static str>),
    MinesCountOutOfRange { value: usize, min: usize, max: usize },
    HeightOutOfRange { value: usize, min: usize, max: usize },
    WidthOutOfRange { value: usize, min: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMode(mode) => {
                write!(f, "unknown game mode '{}' (expected easy, normal, hard or custom)", mode)
            }
            ConfigError::MissingCustomFields(missing) => {
                write!(f, "custom mode requires {}", missing.join(", "))
            }
            ConfigError::MinesCountOutOfRange { value, min, max } => {
                write!(f, "mines_count {} out of range [{}, {}]", value, min, max)
            }
            ConfigError::HeightOutOfRange { value, min, max } => {
                write!(f, "height {} out of range [{}, {}]", value, min, max)
            }
            ConfigError::WidthOutOfRange { value, min, max } => {
                write!(f, "width {} out of range [{}, {}]", value, min, max)
            }
        }
    }
}

impl error::Error for ConfigError {}

/// Invalid transition on a single [`Cell`](crate::cell::Cell).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellError {
    /// A number was assigned to a mine cell.
    WrongCellType,
    /// Numbers are neighbour mine counts and live in `1..=8`.
    NumberOutOfRange(u8),
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellError::WrongCellType => f.write_str("cannot assign a number to a mine cell"),
            CellError::NumberOutOfRange(n) => write!(f, "cell number {} out of range [1, 8]", n),
        }
    }
}

impl error::Error for CellError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    EmptyGrid,
    /// Randomly generated fields need `1 <= mines < cells`.
    InvalidMinesCount { mines: usize, cells: usize },
    MineOutOfBounds { row: usize, col: usize },
    Cell(CellError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::EmptyGrid => f.write_str("field dimensions must be positive"),
            FieldError::InvalidMinesCount { mines, cells } => {
                write!(f, "mines count {} must be at least 1 and less than {} cells", mines, cells)
            }
            FieldError::MineOutOfBounds { row, col } => {
                write!(f, "mine position ({}, {}) lies outside the field", row, col)
            }
            FieldError::Cell(e) => e.fmt(f),
        }
    }
}

impl error::Error for FieldError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            FieldError::Cell(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CellError> for FieldError {
    fn from(e: CellError) -> Self {
        FieldError::Cell(e)
    }
}

/// Everything that can stop a [`GameSession`](crate::session::GameSession) from being built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Config(ConfigError),
    Field(FieldError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::Field(e) => write!(f, "cannot build field: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Field(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<FieldError> for Error {
    fn from(e: FieldError) -> Self {
        Error::Field(e)
    }
}
