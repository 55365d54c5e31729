use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GameConfig;
use crate::error::Error;
use crate::field::{Field, OpenResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Opens a cell.
    Primary,
    /// Toggles a flag.
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Input a frontend feeds into a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Click { row: usize, col: usize, button: Button },
    Restart,
    Quit,
}

/// One game in progress: a configuration, the field it produced and the clock.
pub struct GameSession {
    config: GameConfig,
    field: Field,
    status: Status,
    started_at: Instant,
    finished_in: Option<Duration>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, Error> {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    /// Session whose fields, including the ones built on restart, follow from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, Error> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, Error> {
        let field = Field::with_rng(config.height(), config.width(), config.mines_count(), &mut rng)?;
        info!(mode = %config.mode(), height = config.height(), width = config.width(), mines = config.mines_count(), "session started");
        Ok(Self { config, field, status: Status::Playing, started_at: Instant::now(), finished_in: None, rng })
    }

    pub fn handle_click(&mut self, row: usize, col: usize, button: Button) -> Status {
        if !self.running() { return self.status; }

        let changed = match button {
            Button::Primary => match self.field.open_cell(row, col) {
                OpenResult::HitMine => {
                    self.field.reveal_all();
                    self.finish(Status::Lost);
                    false
                }
                OpenResult::Opened => true,
                OpenResult::NoOp => false,
            },
            Button::Secondary => self.field.toggle_flag(row, col),
        };
        if changed && self.field.is_won() {
            self.finish(Status::Won);
        }
        self.status
    }

    /// Applies one input event. Returns `false` once the player asked to quit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool, Error> {
        match event {
            Event::Click { row, col, button } => { self.handle_click(row, col, button); }
            Event::Restart => self.restart()?,
            Event::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Replaces the field with a freshly generated one of the same configuration.
    pub fn restart(&mut self) -> Result<(), Error> {
        let c = self.config;
        self.field = Field::with_rng(c.height(), c.width(), c.mines_count(), &mut self.rng)?;
        self.status = Status::Playing;
        self.started_at = Instant::now();
        self.finished_in = None;
        info!(mode = %c.mode(), "session restarted");
        Ok(())
    }

    fn finish(&mut self, status: Status) {
        let elapsed = self.started_at.elapsed();
        self.status = status;
        self.finished_in = Some(elapsed);
        info!(?status, elapsed_secs = elapsed.as_secs(), "session ended");
    }
}

impl GameSession {
    pub fn config(&self) -> &GameConfig { &self.config }
    pub fn field(&self) -> &Field { &self.field }
    pub fn status(&self) -> Status { self.status }
    pub fn running(&self) -> bool { self.status == Status::Playing }
    /// Mines minus live flags. Goes negative when the player over-flags.
    pub fn remaining_mines(&self) -> isize {
        self.field.mines_count() as isize - self.field.flagged_count() as isize
    }
    /// Time since the session started, frozen once it is won or lost.
    pub fn elapsed(&self) -> Duration {
        self.finished_in.unwrap_or_else(|| self.started_at.elapsed())
    }
}
