//! Property tests for wall placement and path preservation.

use proptest::prelude::*;

use quoridor_rust::board::{Board, Wall};
use quoridor_rust::controller::Controller;
use quoridor_rust::game::{Applied, Game, LogViewer};
use quoridor_rust::player::Side;
use quoridor_rust::validator::is_there_a_way;

// =============================================================================
// Strategies
// =============================================================================

fn any_wall() -> impl Strategy<Value = Wall> {
    (0usize..8, 0usize..8, any::<bool>()).prop_map(|(row, col, vertical)| {
        if vertical {
            Wall::vertical(row, col)
        } else {
            Wall::horizontal(row, col)
        }
    })
}

/// Apply `walls` to a fresh board, skipping any that do not fit.
fn board_with(walls: &[Wall]) -> Board {
    let mut board = Board::new();
    for &wall in walls {
        board.put_wall(wall);
    }
    board
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn committed_walls_keep_both_paths(walls in prop::collection::vec(any_wall(), 0..40)) {
        let mut game = Game::with_seats(None, None);
        for wall in walls {
            let mut controller = Controller::new();
            controller.request_wall(wall);
            let applied = game.update(&mut controller, &mut LogViewer).expect("update");
            prop_assert_ne!(applied, Applied::Idle);
            prop_assert!(is_there_a_way(
                game.board(),
                game.state(),
                game.player(Side::Top),
                game.player(Side::Bottom)
            ));
        }
    }

    #[test]
    fn put_then_drop_restores_board(placed in prop::collection::vec(any_wall(), 0..20), wall in any_wall()) {
        let mut board = board_with(&placed);
        let before = board.clone();
        if board.put_wall(wall) {
            prop_assert!(board.drop_wall(&wall));
        }
        prop_assert_eq!(board, before);
    }

    #[test]
    fn can_place_agrees_with_put(placed in prop::collection::vec(any_wall(), 0..20), wall in any_wall()) {
        let mut board = board_with(&placed);
        let fits = board.can_place_wall(&wall);
        prop_assert_eq!(board.put_wall(wall), fits);
        if !fits {
            prop_assert_eq!(board, board_with(&placed));
        }
    }

    #[test]
    fn walls_cannot_be_put_twice(placed in prop::collection::vec(any_wall(), 1..20)) {
        let mut board = board_with(&placed);
        for wall in &placed {
            prop_assert!(!board.put_wall(*wall));
        }
    }
}
