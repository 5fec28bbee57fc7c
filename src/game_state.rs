//! Winning rows and win detection.

use std::collections::HashSet;

use crate::board::{Board, CellId};
use crate::player::{Player, Side};

/// Fixed winning-row sets for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    top_winning: HashSet<CellId>,
    bottom_winning: HashSet<CellId>,
}

impl GameState {
    pub fn new(top_winning: Vec<CellId>, bottom_winning: Vec<CellId>) -> Self {
        Self {
            top_winning: top_winning.into_iter().collect(),
            bottom_winning: bottom_winning.into_iter().collect(),
        }
    }

    pub fn from_board(board: &Board) -> Self {
        Self::new(board.top_winning_cells(), board.bottom_winning_cells())
    }

    /// Cells `side` must reach to win.
    pub fn winning_cells(&self, side: Side) -> &HashSet<CellId> {
        match side {
            Side::Top => &self.top_winning,
            Side::Bottom => &self.bottom_winning,
        }
    }

    /// Row index of `side`'s winning row.
    pub fn goal_row(&self, side: Side) -> usize {
        self.winning_cells(side)
            .iter()
            .next()
            .map(|c| c.row())
            .unwrap_or_default()
    }

    pub fn check_top_winning(&self, top: &Player) -> bool {
        self.top_winning.contains(&top.cell())
    }

    pub fn check_bottom_winning(&self, bottom: &Player) -> bool {
        self.bottom_winning.contains(&bottom.cell())
    }

    /// The side that has reached its winning row, if any.
    pub fn winner(&self, top: &Player, bottom: &Player) -> Option<Side> {
        if self.check_bottom_winning(bottom) {
            Some(Side::Bottom)
        } else if self.check_top_winning(top) {
            Some(Side::Top)
        } else {
            None
        }
    }

    pub fn in_play(&self, top: &Player, bottom: &Player) -> bool {
        self.winner(top, bottom).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Color;

    #[test]
    fn test_rows_are_disjoint() {
        let state = GameState::from_board(&Board::new());
        assert!(state.winning_cells(Side::Top).is_disjoint(state.winning_cells(Side::Bottom)));
        assert_eq!(state.goal_row(Side::Top), 8);
        assert_eq!(state.goal_row(Side::Bottom), 0);
    }

    #[test]
    fn test_winner() {
        let board = Board::new();
        let state = GameState::from_board(&board);
        let mut top = Player::new(Color::Black, board.top_start_position());
        let bottom = Player::new(Color::White, board.bottom_start_position());
        assert!(state.in_play(&top, &bottom));
        assert_eq!(state.winner(&top, &bottom), None);

        board.move_player(&mut top, CellId::at(8, 0));
        assert_eq!(state.winner(&top, &bottom), Some(Side::Top));
        assert!(!state.in_play(&top, &bottom));
    }
}
