//! Move legality: single steps, jumps, and the path-preservation check.
//!
//! All functions are stateless queries over a [`Board`]. Illegal requests are
//! simply not in the generated sets; callers decide what rejection means.

use std::collections::{HashSet, VecDeque};

use crate::board::{Board, CellId, Direction, Slot};
use crate::constants::CELLS;
use crate::game_state::GameState;
use crate::player::{Player, Side};

/// Open neighbours of `from`, minus the cell `other` stands on.
pub fn step_cells(board: &Board, from: CellId, other: CellId) -> Vec<CellId> {
    board.open_neighbors(from).filter(|&c| c != other).collect()
}

/// Jump destinations from `from` over an adjacent opponent at `other`.
///
/// A straight jump lands on the cell beyond the opponent. If that passage is
/// walled or runs off the board, the open cells beside the opponent (at right
/// angles to the approach) become the destinations instead.
pub fn jump_cells(board: &Board, from: CellId, other: CellId) -> Vec<CellId> {
    let Some(dir) = Direction::ALL
        .into_iter()
        .find(|&d| board.neighbor(from, d) == Some(other))
    else {
        return Vec::new();
    };
    match board.slot(other, dir) {
        Slot::Open(beyond) => vec![beyond],
        Slot::Edge | Slot::Wall(_) => dir
            .perpendicular()
            .into_iter()
            .filter_map(|side| board.neighbor(other, side))
            .collect(),
    }
}

/// Cells `player` may move to: plain steps, or jumps when `jumping` is set.
pub fn possible_to_move_cells(
    board: &Board,
    player: &Player,
    other: &Player,
    jumping: bool,
) -> Vec<CellId> {
    if jumping {
        jump_cells(board, player.cell(), other.cell())
    } else {
        step_cells(board, player.cell(), other.cell())
    }
}

pub fn is_valid_move(board: &Board, cell: CellId, player: &Player, other: &Player) -> bool {
    possible_to_move_cells(board, player, other, false).contains(&cell)
}

pub fn is_valid_jump(board: &Board, cell: CellId, player: &Player, other: &Player) -> bool {
    possible_to_move_cells(board, player, other, true).contains(&cell)
}

/// Whether an open-passage path leads from `start` to any of `targets`.
pub fn reachable(board: &Board, start: CellId, targets: &HashSet<CellId>) -> bool {
    let mut visited = [false; CELLS];
    let mut queue = VecDeque::with_capacity(CELLS);
    visited[start.0] = true;
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        if targets.contains(&id) {
            return true;
        }
        for next in board.open_neighbors(id) {
            if !visited[next.0] {
                visited[next.0] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

/// True only if both players can still reach their winning rows.
///
/// Consulted after a wall is speculatively placed; on false the wall must be
/// rolled back.
pub fn is_there_a_way(board: &Board, state: &GameState, top: &Player, bottom: &Player) -> bool {
    reachable(board, top.cell(), state.winning_cells(Side::Top))
        && reachable(board, bottom.cell(), state.winning_cells(Side::Bottom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Wall;
    use crate::player::Color;

    fn players(top: CellId, bottom: CellId) -> (Player, Player) {
        (Player::new(Color::Black, top), Player::new(Color::White, bottom))
    }

    fn sorted(mut cells: Vec<CellId>) -> Vec<CellId> {
        cells.sort();
        cells
    }

    #[test]
    fn test_steps_exclude_opponent() {
        let board = Board::new();
        let (me, other) = players(CellId::at(4, 4), CellId::at(3, 4));
        let cells = possible_to_move_cells(&board, &me, &other, false);
        assert_eq!(
            sorted(cells),
            vec![CellId::at(4, 3), CellId::at(4, 5), CellId::at(5, 4)]
        );
        assert!(!is_valid_move(&board, CellId::at(3, 4), &me, &other));
    }

    #[test]
    fn test_steps_respect_walls_and_edges() {
        let mut board = Board::new();
        assert!(board.put_wall(Wall::vertical(0, 0)));
        let (me, other) = players(CellId::at(0, 0), CellId::at(8, 8));
        assert_eq!(
            possible_to_move_cells(&board, &me, &other, false),
            vec![CellId::at(1, 0)]
        );
    }

    #[test]
    fn test_straight_jump() {
        let board = Board::new();
        let (me, other) = players(CellId::at(5, 4), CellId::at(4, 4));
        assert_eq!(
            possible_to_move_cells(&board, &me, &other, true),
            vec![CellId::at(3, 4)]
        );
        assert!(is_valid_jump(&board, CellId::at(3, 4), &me, &other));
        assert!(!is_valid_jump(&board, CellId::at(4, 3), &me, &other));
    }

    #[test]
    fn test_diagonal_jump_when_walled() {
        let mut board = Board::new();
        // Wall behind the opponent at (4, 4), seen from (5, 4).
        assert!(board.put_wall(Wall::horizontal(3, 4)));
        let (me, other) = players(CellId::at(5, 4), CellId::at(4, 4));
        assert_eq!(
            sorted(possible_to_move_cells(&board, &me, &other, true)),
            vec![CellId::at(4, 3), CellId::at(4, 5)]
        );
    }

    #[test]
    fn test_diagonal_jump_at_edge() {
        let mut board = Board::new();
        let (me, other) = players(CellId::at(1, 0), CellId::at(0, 0));
        assert_eq!(
            possible_to_move_cells(&board, &me, &other, true),
            vec![CellId::at(0, 1)]
        );
        // Close the only diagonal too.
        assert!(board.put_wall(Wall::vertical(0, 0)));
        assert!(possible_to_move_cells(&board, &me, &other, true).is_empty());
    }

    #[test]
    fn test_no_jump_without_adjacent_opponent() {
        let board = Board::new();
        let (me, other) = players(CellId::at(6, 4), CellId::at(4, 4));
        assert!(possible_to_move_cells(&board, &me, &other, true).is_empty());

        // Adjacent on the grid but separated by a wall.
        let mut board = Board::new();
        assert!(board.put_wall(Wall::horizontal(4, 4)));
        let (me, other) = players(CellId::at(5, 4), CellId::at(4, 4));
        assert!(possible_to_move_cells(&board, &me, &other, true).is_empty());
    }

    #[test]
    fn test_is_there_a_way_open_board() {
        let board = Board::new();
        let state = GameState::from_board(&board);
        let (top, bottom) = players(board.top_start_position(), board.bottom_start_position());
        assert!(is_there_a_way(&board, &state, &top, &bottom));
    }

    #[test]
    fn test_is_there_a_way_detects_enclosure() {
        let mut board = Board::new();
        let state = GameState::from_board(&board);
        let (top, bottom) = players(CellId::at(0, 0), board.bottom_start_position());
        assert!(board.put_wall(Wall::vertical(0, 0)));
        assert!(is_there_a_way(&board, &state, &top, &bottom));
        // Close the pocket of (0, 0) and (1, 0) from below.
        assert!(board.put_wall(Wall::horizontal(1, 0)));
        assert!(!is_there_a_way(&board, &state, &top, &bottom));
    }
}
