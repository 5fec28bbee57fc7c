//! Constants for board geometry, pixel layout, and bot parameters.
//!
//! Cells live on a fixed pixel grid: the first cell sits at `FIRST_CELL`
//! on both axes and neighbours are `CELL_PITCH` apart. Wall placements are
//! addressed by pixel coordinates on the same grid, shifted by `WALL_OFFSET`
//! along the axis they block.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Quoridor is always played on 9x9.
pub const N: usize = 9;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

/// Number of wall intersections along one axis.
pub const WALL_SLOTS: usize = N - 1;

/// Column both players start on.
pub const START_COL: usize = N / 2;

// =============================================================================
// Pixel Layout
// =============================================================================

/// Pixel offset of the first row/column of cells.
pub const FIRST_CELL: i32 = 25;

/// Pixel distance between two adjacent cells.
pub const CELL_PITCH: i32 = 75;

/// Pixel shift from a cell to the wall groove next to it.
pub const WALL_OFFSET: i32 = 50;

// =============================================================================
// Rules
// =============================================================================

/// Walls each player may place over a game.
pub const WALLS_PER_PLAYER: u8 = 10;

// =============================================================================
// Bot Parameters
// =============================================================================

/// Default minimax depth in plies.
pub const SEARCH_DEPTH: u8 = 3;

/// Penalty for stepping onto a cell with a single open neighbour.
pub const DEADLOCK_PENALTY: i32 = 100;

/// Bonus for a step that lands on the mover's target row.
pub const GOAL_BONUS: i32 = 1000;

/// Bound used as +/- infinity by the alpha-beta window.
pub const INF: i32 = i32::MAX / 2;

// =============================================================================
// Session
// =============================================================================

/// Turn limit for a bot-vs-bot game before it is called a draw.
pub const MAX_TURNS: usize = 500;
