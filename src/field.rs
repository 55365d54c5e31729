use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use tracing::{debug, trace};

use crate::cell::{Cell, CellKind};
use crate::error::{CellError, FieldError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenResult {
    NoOp,
    Opened,
    HitMine,
}

/// A fixed `height` x `width` grid of cells addressed as `(row, col)`.
#[derive(Clone, Debug)]
pub struct Field {
    height: usize,
    width: usize,
    mines_count: usize,
    cells: Vec<Cell>,
    exploded: Option<(usize, usize)>,
}

impl Field {
    /// Builds and generates a field from an OS-seeded generator.
    pub fn new(height: usize, width: usize, mines_count: usize) -> Result<Self, FieldError> {
        Self::with_rng(height, width, mines_count, &mut rand::rng())
    }

    /// Builds and generates a field drawing mine positions from `rng`.
    pub fn with_rng<R: Rng>(height: usize, width: usize, mines_count: usize, rng: &mut R) -> Result<Self, FieldError> {
        if height == 0 || width == 0 { return Err(FieldError::EmptyGrid); }
        let total = height * width;
        if mines_count == 0 || mines_count >= total {
            return Err(FieldError::InvalidMinesCount { mines: mines_count, cells: total });
        }

        let mut field = Self::blank(height, width, mines_count);
        field.generate(rng)?;
        Ok(field)
    }

    /// Builds a field with mines at exactly the given positions.
    ///
    /// Duplicate positions count once. Any number of mines is accepted,
    /// including none, which makes the layout fully deterministic.
    pub fn with_mines(height: usize, width: usize, mines: &[(usize, usize)]) -> Result<Self, FieldError> {
        if height == 0 || width == 0 { return Err(FieldError::EmptyGrid); }
        let mut field = Self::blank(height, width, 0);
        for &(row, col) in mines {
            if row >= height || col >= width { return Err(FieldError::MineOutOfBounds { row, col }); }
            let cell = &mut field.cells[idx(width, row, col)];
            if !cell.is_mine() {
                cell.set_mine();
                field.mines_count += 1;
            }
        }
        field.compute_numbers()?;
        Ok(field)
    }

    fn blank(height: usize, width: usize, mines_count: usize) -> Self {
        Self { height, width, mines_count, cells: vec![Cell::new(); height * width], exploded: None }
    }

    fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<(), CellError> {
        self.cells.iter_mut().for_each(|c| *c = Cell::new());
        // Rejection sampling: redraw coordinates that already hold a mine.
        let mut planted = 0;
        let mut draws = 0usize;
        while planted < self.mines_count {
            let row = rng.random_range(0..self.height);
            let col = rng.random_range(0..self.width);
            draws += 1;
            let cell = &mut self.cells[idx(self.width, row, col)];
            if cell.is_mine() { continue; }
            cell.set_mine();
            planted += 1;
        }
        debug!(height = self.height, width = self.width, mines = self.mines_count, draws, "field generated");
        self.compute_numbers()
    }

    fn compute_numbers(&mut self) -> Result<(), CellError> {
        for row in 0..self.height {
            for col in 0..self.width {
                let i0 = idx(self.width, row, col);
                if self.cells[i0].is_mine() { continue; }
                let c = self.adjacent_cells(row, col).filter(|c| c.is_mine()).count() as u8;
                if c > 0 { self.cells[i0].set_number(c)?; }
            }
        }
        Ok(())
    }

    /// Coordinates of the in-bounds neighbours of `(row, col)`, row-major.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        neighbors(self.height, self.width, row, col)
    }

    pub fn adjacent_cells(&self, row: usize, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.neighbors(row, col).map(move |(r, c)| &self.cells[idx(self.width, r, c)])
    }

    pub fn open_cell(&mut self, row: usize, col: usize) -> OpenResult {
        if row >= self.height || col >= self.width { return OpenResult::NoOp; }
        let i = idx(self.width, row, col);
        if self.cells[i].is_flagged() || self.cells[i].is_opened() { return OpenResult::NoOp; }

        self.cells[i].open();
        match self.cells[i].kind() {
            CellKind::Mine => {
                self.exploded = Some((row, col));
                OpenResult::HitMine
            }
            CellKind::Number(_) => OpenResult::Opened,
            CellKind::Empty => {
                let opened = self.reveal_connected_empty_region();
                trace!(row, col, opened, "empty region revealed");
                OpenResult::Opened
            }
        }
    }

    /// Opens every safe cell reachable from an opened empty cell.
    ///
    /// Worklist over empty cells; mines stop the fill and are never opened.
    /// Returns the number of cells this call opened.
    fn reveal_connected_empty_region(&mut self) -> usize {
        let mut queue: VecDeque<usize> = (0..self.cells.len())
            .filter(|&i| self.cells[i].is_opened() && self.cells[i].is_empty())
            .collect();
        let mut opened = 0;
        while let Some(i) = queue.pop_front() {
            let (row, col) = (i / self.width, i % self.width);
            for (nr, nc) in neighbors(self.height, self.width, row, col) {
                let ni = idx(self.width, nr, nc);
                let n = &mut self.cells[ni];
                if n.is_opened() || n.is_mine() { continue; }
                n.open();
                opened += 1;
                if n.is_empty() { queue.push_back(ni); }
            }
        }
        opened
    }

    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width { return false; }
        let i = idx(self.width, row, col);
        self.cells[i].toggle_flag()
    }

    pub fn reveal_all(&mut self) {
        self.cells.iter_mut().for_each(Cell::reveal);
    }

    /// Every cell is opened or is a flagged mine.
    ///
    /// Not every mine needs a flag once it is opened, but an untouched mine does,
    /// and a wrongly flagged safe cell still has to be opened.
    pub fn is_won(&self) -> bool {
        self.cells.iter().all(|c| c.is_opened() || (c.is_mine() && c.is_flagged()))
    }

    /// Text grid for line-mode play, with row and column labels.
    pub fn render(&self, one_based: bool) -> String {
        let mut out = String::new();
        let _ = self.write_grid(&mut out, one_based);
        out
    }

    fn write_grid<W: fmt::Write>(&self, out: &mut W, one_based: bool) -> fmt::Result {
        let base = usize::from(one_based);
        write!(out, "    ")?;
        for col in 0..self.width {
            write!(out, "{:>3}", col + base)?;
        }
        writeln!(out)?;
        writeln!(out, "    {}", "-".repeat(self.width * 3 + 1))?;

        for (i, row) in self.cells.chunks(self.width).enumerate() {
            write!(out, "{:>3} |", i + base)?;
            for (col, c) in row.iter().enumerate() {
                write!(out, "{:>2} ", self.glyph(c, (i, col)))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn glyph(&self, c: &Cell, pos: (usize, usize)) -> char {
        if self.exploded == Some(pos) { return 'X'; }
        match (c.is_opened(), c.kind()) {
            (true, CellKind::Mine) => '*',
            (true, CellKind::Number(n)) => char::from(b'0' + n),
            (true, CellKind::Empty) => ' ',
            (false, _) if c.is_flagged() => 'F',
            (false, _) => '.',
        }
    }
}

fn idx(w: usize, row: usize, col: usize) -> usize { row * w + col }

fn neighbors(h: usize, w: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let row = row as isize; let col = col as isize; let h = h as isize; let w = w as isize;
    let mut out = Vec::with_capacity(8);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 { continue; }
            let nr = row + dr; let nc = col + dc;
            if nr >= 0 && nc >= 0 && nr < h && nc < w {
                out.push((nr as usize, nc as usize));
            }
        }
    }
    out.into_iter()
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f, true)
    }
}

impl Field {
    pub fn height(&self) -> usize { self.height }
    pub fn width(&self) -> usize { self.width }
    pub fn mines_count(&self) -> usize { self.mines_count }
    pub fn exploded(&self) -> Option<(usize, usize)> { self.exploded }
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.height && col < self.width { Some(&self.cells[idx(self.width, row, col)]) } else { None }
    }
    /// All cells with their `(row, col)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(i, c)| ((i / self.width, i % self.width), c))
    }
    pub fn flagged_count(&self) -> usize { self.cells.iter().filter(|c| c.is_flagged()).count() }
    pub fn opened_count(&self) -> usize { self.cells.iter().filter(|c| c.is_opened()).count() }
}
