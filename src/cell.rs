use crate::error::CellError;

/// What a cell holds. The neighbour count only exists on `Number`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CellKind {
    Mine,
    Number(u8),
    #[default]
    Empty,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    kind: CellKind,
    opened: bool,
    flagged: bool,
}

impl Cell {
    pub fn new() -> Self { Self::default() }

    /// Marks the cell as bordering `n` mines.
    ///
    /// Fails on a mine cell, or when `n` is not a possible neighbour count.
    pub fn set_number(&mut self, n: u8) -> Result<(), CellError> {
        if self.kind == CellKind::Mine { return Err(CellError::WrongCellType); }
        if !(1..=8).contains(&n) { return Err(CellError::NumberOutOfRange(n)); }
        self.kind = CellKind::Number(n);
        Ok(())
    }

    pub fn set_mine(&mut self) { self.kind = CellKind::Mine; }

    pub(crate) fn open(&mut self) {
        self.opened = true;
        self.flagged = false;
    }

    /// Opens without touching the flag, so a full reveal keeps the player's marks.
    pub(crate) fn reveal(&mut self) { self.opened = true; }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.opened { return false; }
        self.flagged = !self.flagged;
        true
    }
}

impl Cell {
    pub fn kind(&self) -> CellKind { self.kind }
    pub fn number(&self) -> Option<u8> {
        match self.kind { CellKind::Number(n) => Some(n), _ => None }
    }
    pub fn is_mine(&self) -> bool { self.kind == CellKind::Mine }
    pub fn is_empty(&self) -> bool { self.kind == CellKind::Empty }
    pub fn is_opened(&self) -> bool { self.opened }
    pub fn is_flagged(&self) -> bool { self.flagged }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_closed_empty() {
        let c = Cell::new();
        assert_eq!(c.kind(), CellKind::Empty);
        assert_eq!(c.number(), None);
        assert!(!c.is_opened());
        assert!(!c.is_flagged());
    }

    #[test]
    fn number_on_mine_is_rejected() {
        let mut c = Cell::new();
        c.set_mine();
        assert_eq!(c.set_number(3), Err(CellError::WrongCellType));
        assert!(c.is_mine());
    }

    #[test]
    fn number_must_be_a_neighbour_count() {
        let mut c = Cell::new();
        assert_eq!(c.set_number(0), Err(CellError::NumberOutOfRange(0)));
        assert_eq!(c.set_number(9), Err(CellError::NumberOutOfRange(9)));
        assert_eq!(c.set_number(8), Ok(()));
        assert_eq!(c.number(), Some(8));
    }

    #[test]
    fn mine_replaces_number() {
        let mut c = Cell::new();
        c.set_number(2).unwrap();
        c.set_mine();
        assert_eq!(c.kind(), CellKind::Mine);
        assert_eq!(c.number(), None);
    }

    #[test]
    fn opened_cell_cannot_be_flagged() {
        let mut c = Cell::new();
        assert!(c.toggle_flag());
        assert!(c.is_flagged());
        c.open();
        assert!(!c.is_flagged());
        assert!(!c.toggle_flag());
        assert!(!c.is_flagged());
    }
}
