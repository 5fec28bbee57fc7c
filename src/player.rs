//! Players: colour, seat, current cell, and wall budget.

use std::fmt;

use crate::board::CellId;
use crate::constants::WALLS_PER_PLAYER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Black always sits at the top edge, white at the bottom.
    pub fn side(self) -> Side {
        match self {
            Color::Black => Side::Top,
            Color::White => Side::Bottom,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

/// Which edge a player starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Side::Top => Color::Black,
            Side::Bottom => Color::White,
        }
    }
}

/// A pawn on the board. The board owns the cells; the player only records
/// which one it stands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    cell: CellId,
    walls: u8,
}

impl Player {
    pub fn new(color: Color, cell: CellId) -> Self {
        Self {
            color,
            cell,
            walls: WALLS_PER_PLAYER,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn side(&self) -> Side {
        self.color.side()
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn walls_left(&self) -> u8 {
        self.walls
    }

    pub(crate) fn change_cell(&mut self, cell: CellId) {
        self.cell = cell;
    }

    /// Spend one wall. False, with nothing spent, if the budget is exhausted.
    pub fn place_wall(&mut self) -> bool {
        if self.walls == 0 {
            return false;
        }
        self.walls -= 1;
        true
    }

    /// Refund a wall whose placement was rolled back.
    pub fn unplace_wall(&mut self) {
        self.walls = (self.walls + 1).min(WALLS_PER_PLAYER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_budget() {
        let mut p = Player::new(Color::Black, CellId::at(0, 4));
        assert_eq!(p.walls_left(), WALLS_PER_PLAYER);
        for _ in 0..WALLS_PER_PLAYER {
            assert!(p.place_wall());
        }
        assert_eq!(p.walls_left(), 0);
        assert!(!p.place_wall());
        assert_eq!(p.walls_left(), 0);
        p.unplace_wall();
        assert_eq!(p.walls_left(), 1);
    }

    #[test]
    fn test_refund_never_exceeds_budget() {
        let mut p = Player::new(Color::White, CellId::at(8, 4));
        p.unplace_wall();
        assert_eq!(p.walls_left(), WALLS_PER_PLAYER);
    }

    #[test]
    fn test_seating() {
        assert_eq!(Color::Black.side(), Side::Top);
        assert_eq!(Color::White.side(), Side::Bottom);
        assert_eq!(Side::Top.opposite().color(), Color::White);
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
