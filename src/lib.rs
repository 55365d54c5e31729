//! Minesweeper field model with terminal frontends.
//!
//! - [`cell`]: a single grid unit (mine, number or empty) and its opened/flagged marks
//! - [`field`]: mine placement, neighbour numbers, flood-fill opening and the win check
//! - [`config`]: preset modes and bounds-checked custom boards
//! - [`session`]: click handling, win/loss status, restart and the game clock
//! - [`tui`]: ratatui frontend driven by mouse and keyboard
//!
//! ```
//! use minefield::{Button, GameConfig, GameMode, GameSession};
//!
//! let config = GameConfig::resolve(GameMode::Easy, None, None, None).unwrap();
//! let mut session = GameSession::with_seed(config, 7).unwrap();
//! session.handle_click(4, 4, Button::Secondary);
//! assert_eq!(session.remaining_mines(), 9);
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod field;
pub mod session;
pub mod tui;

pub use cell::{Cell, CellKind};
pub use config::{GameConfig, GameMode};
pub use error::{CellError, ConfigError, Error, FieldError};
pub use field::{Field, OpenResult};
pub use session::{Button, Event, GameSession, Status};
