//! Quoridor-Rust: a Quoridor rules engine with a minimax bot.
//!
//! Two pawns race across a 9x9 board to the opposite edge. On each turn a
//! player either steps, jumps over the adjacent opponent, or places a wall,
//! as long as both players keep a route to their goal row.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, pixel layout, and bot parameters
//! - [`coords`] - Pixel coordinates and console notation
//! - [`board`] - Cell arena, slots, and wall placement
//! - [`player`] - Pawn colours, seats, and wall budgets
//! - [`validator`] - Move and jump generation, path preservation
//! - [`game_state`] - Winning rows and win detection
//! - [`queue`] - Bucketed priority queue
//! - [`pathfinding`] - A* toward a target row
//! - [`search`] - Alpha-beta minimax over pawn paths
//! - [`bot`] - The computer player
//! - [`controller`] - Pending action relay
//! - [`game`] - The game session and its viewer callbacks
//! - [`console`] - Text protocol for playing from a terminal
//!
//! ## Example
//!
//! ```
//! use quoridor_rust::bot::{Bot, BotConfig, Decision};
//! use quoridor_rust::board::{Board, CellId};
//! use quoridor_rust::game_state::GameState;
//! use quoridor_rust::player::{Color, Player};
//!
//! let mut board = Board::new();
//! let state = GameState::from_board(&board);
//! let config = BotConfig { walls_enabled: false, ..BotConfig::default() };
//! let mut bot = Bot::new(Color::Black, board.top_start_position(), &state, config);
//! let opponent = Player::new(Color::White, board.bottom_start_position());
//!
//! let decision = bot.make_a_move(&mut board, &state, &opponent).unwrap();
//! assert_eq!(decision, Decision::Move(CellId::at(1, 4)));
//! ```

pub mod board;
pub mod bot;
pub mod console;
pub mod constants;
pub mod controller;
pub mod coords;
pub mod error;
pub mod game;
pub mod game_state;
pub mod pathfinding;
pub mod player;
pub mod queue;
pub mod search;
pub mod validator;

pub use error::{QuoridorError, Result};
