//! Board graph: 81 cells wired as a 4-neighbour grid, with walls as nodes.
//!
//! Each cell has four directional slots. A slot holds the neighbouring cell
//! (open passage), the wall standing in the groove (blocked passage), or
//! nothing (board edge). Placing a wall rewires four slots from
//! cell-to-cell into cell-to-wall, and the wall records which cells lie on
//! each of its sides. Dropping it restores the direct adjacency.
//!
//! The board owns every cell in an arena; players only hold a [`CellId`].

use std::collections::HashMap;
use std::fmt;

use crate::constants::{CELL_PITCH, CELLS, N, START_COL, WALL_OFFSET, WALL_SLOTS};
use crate::coords::{Coordinate, pixel};
use crate::player::Player;

/// Index of a cell in the board arena (`row * N + col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

impl CellId {
    pub const fn at(row: usize, col: usize) -> Self {
        CellId(row * N + col)
    }

    pub const fn row(self) -> usize {
        self.0 / N
    }

    pub const fn col(self) -> usize {
        self.0 % N
    }

    /// Pixel coordinate of the cell.
    pub const fn coord(self) -> Coordinate {
        Coordinate::cell(self.row(), self.col())
    }
}

/// One of the four passage directions out of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Slot order used everywhere a cell's neighbours are enumerated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two directions at right angles to this one.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Direction of the single step from `from` to an orthogonally adjacent `to`.
    pub fn between(from: CellId, to: CellId) -> Option<Self> {
        let (fr, fc) = (from.row() as isize, from.col() as isize);
        let (tr, tc) = (to.row() as isize, to.col() as isize);
        match (tr - fr, tc - fc) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A wall placement, identified by its groove coordinate and orientation.
///
/// A horizontal wall at `(top, left)` lies `WALL_OFFSET` pixels below the row
/// of cells at `top - WALL_OFFSET` and spans the cell at `left` and the one to
/// its right. A vertical wall at `(top, left)` lies right of the column at
/// `left - WALL_OFFSET` and spans the cell at `top` and the one below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    pub at: Coordinate,
    pub orientation: Orientation,
}

impl Wall {
    pub const fn new(at: Coordinate, orientation: Orientation) -> Self {
        Self { at, orientation }
    }

    /// Horizontal wall under row `row`, spanning columns `col` and `col + 1`.
    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self::new(
            Coordinate::new(pixel(row) + WALL_OFFSET, pixel(col)),
            Orientation::Horizontal,
        )
    }

    /// Vertical wall right of column `col`, spanning rows `row` and `row + 1`.
    pub const fn vertical(row: usize, col: usize) -> Self {
        Self::new(
            Coordinate::new(pixel(row), pixel(col) + WALL_OFFSET),
            Orientation::Vertical,
        )
    }

    /// Build a wall from the top-left cell of the 2x2 block it sits in.
    pub const fn from_grid(row: usize, col: usize, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::horizontal(row, col),
            Orientation::Vertical => Self::vertical(row, col),
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Pixel position of the top-left cell of the 2x2 block around this wall.
    pub const fn anchor(&self) -> Coordinate {
        match self.orientation {
            Orientation::Horizontal => self.at.offset(-WALL_OFFSET, 0),
            Orientation::Vertical => self.at.offset(0, -WALL_OFFSET),
        }
    }

    /// Grid indices of [`Wall::anchor`], if the wall is on the intersection grid.
    pub fn grid(&self) -> Option<(usize, usize)> {
        let (row, col) = self.anchor().grid()?;
        (row < WALL_SLOTS && col < WALL_SLOTS).then_some((row, col))
    }

    /// Every placement on the board: 64 horizontal, then 64 vertical.
    pub fn all_spots() -> Vec<Wall> {
        let mut spots = Vec::with_capacity(2 * WALL_SLOTS * WALL_SLOTS);
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for row in 0..WALL_SLOTS {
                for col in 0..WALL_SLOTS {
                    spots.push(Wall::from_grid(row, col, orientation));
                }
            }
        }
        spots
    }
}

/// Parse a wall in console notation, e.g. `S1h` or `z8v`.
///
/// The letter (S-Z) and digit (1-8) name the top-left cell of the 2x2 block;
/// the suffix picks the orientation.
pub fn parse_wall(s: &str) -> Option<Wall> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 3 {
        return None;
    }
    let col = bytes[0].to_ascii_uppercase().checked_sub(b'S')? as usize;
    let row = (bytes[1] as char).to_digit(10)?.checked_sub(1)? as usize;
    let orientation = match bytes[2].to_ascii_lowercase() {
        b'h' => Orientation::Horizontal,
        b'v' => Orientation::Vertical,
        _ => return None,
    };
    if row >= WALL_SLOTS || col >= WALL_SLOTS {
        return None;
    }
    Some(Wall::from_grid(row, col, orientation))
}

/// Format a wall in console notation.
pub fn str_wall(wall: &Wall) -> String {
    let suffix = if wall.is_vertical() { 'v' } else { 'h' };
    match wall.grid() {
        Some((row, col)) => format!("{}{}{suffix}", (b'S' + col as u8) as char, row + 1),
        None => format!("({}, {}){suffix}", wall.at.top, wall.at.left),
    }
}

/// Content of one directional slot of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Board edge: no neighbour in this direction.
    Edge,
    /// Open passage to the neighbouring cell.
    Open(CellId),
    /// Passage blocked by a placed wall.
    Wall(Wall),
}

impl Slot {
    pub fn is_wall(&self) -> bool {
        matches!(self, Slot::Wall(_))
    }
}

/// A board position and its four passage slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub coord: Coordinate,
    slots: [Slot; 4],
}

impl Cell {
    fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            slots: [Slot::Edge; 4],
        }
    }

    #[inline]
    pub fn slot(&self, dir: Direction) -> Slot {
        self.slots[dir.index()]
    }

    /// Neighbouring cell in `dir`, if the passage is open.
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<CellId> {
        match self.slot(dir) {
            Slot::Open(id) => Some(id),
            _ => None,
        }
    }

    /// Open neighbours in [`Direction::ALL`] order.
    pub fn open_neighbors(&self) -> impl Iterator<Item = CellId> + '_ {
        Direction::ALL.into_iter().filter_map(|d| self.neighbor(d))
    }
}

/// Cells on either side of a placed wall.
///
/// `first` is the upper side of a horizontal wall or the left side of a
/// vertical one; `second` is the opposite side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSides {
    pub first: [CellId; 2],
    pub second: [CellId; 2],
}

/// The board graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    walls: HashMap<Wall, WallSides>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let mut board = Board {
            cells: Vec::with_capacity(CELLS),
            walls: HashMap::new(),
        };
        board.initialize();
        board
    }

    /// Rebuild all 81 cells with full grid adjacency and no walls.
    pub fn initialize(&mut self) {
        self.walls.clear();
        self.cells.clear();
        for row in 0..N {
            for col in 0..N {
                self.cells.push(Cell::new(Coordinate::cell(row, col)));
            }
        }
        for row in 0..N {
            for col in 0..N {
                let id = CellId::at(row, col);
                if row + 1 < N {
                    self.connect(id, Direction::Down, Slot::Open(CellId::at(row + 1, col)));
                }
                if col + 1 < N {
                    self.connect(id, Direction::Right, Slot::Open(CellId::at(row, col + 1)));
                }
            }
        }
    }

    /// Set `id`'s slot in `dir` and the mirrored slot of the cell beyond it.
    ///
    /// For a wall, `far` is the cell on the other side of the groove.
    fn connect(&mut self, id: CellId, dir: Direction, content: Slot) {
        let far = match content {
            Slot::Open(other) => other,
            _ => {
                self.cells[id.0].slots[dir.index()] = content;
                return;
            }
        };
        self.cells[id.0].slots[dir.index()] = Slot::Open(far);
        self.cells[far.0].slots[dir.opposite().index()] = Slot::Open(id);
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// Look up the cell at a pixel coordinate.
    pub fn cell_at(&self, coord: Coordinate) -> Option<CellId> {
        let (row, col) = coord.grid()?;
        Some(CellId::at(row, col))
    }

    #[inline]
    pub fn slot(&self, id: CellId, dir: Direction) -> Slot {
        self.cell(id).slot(dir)
    }

    #[inline]
    pub fn neighbor(&self, id: CellId, dir: Direction) -> Option<CellId> {
        self.cell(id).neighbor(dir)
    }

    pub fn open_neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.cell(id).open_neighbors()
    }

    /// Point `player` at `cell`. Legality is the validator's business.
    pub fn move_player(&self, player: &mut Player, cell: CellId) {
        player.change_cell(cell);
    }

    /// Point `player` at the cell under `coord`; false if there is none.
    pub fn move_player_to(&self, player: &mut Player, coord: Coordinate) -> bool {
        match self.cell_at(coord) {
            Some(cell) => {
                self.move_player(player, cell);
                true
            }
            None => false,
        }
    }

    pub fn top_start_position(&self) -> CellId {
        CellId::at(0, START_COL)
    }

    pub fn bottom_start_position(&self) -> CellId {
        CellId::at(N - 1, START_COL)
    }

    /// Cells the top player must reach: the bottom row.
    pub fn top_winning_cells(&self) -> Vec<CellId> {
        (0..N).rev().map(|col| CellId::at(N - 1, col)).collect()
    }

    /// Cells the bottom player must reach: the top row.
    pub fn bottom_winning_cells(&self) -> Vec<CellId> {
        (0..N).map(|col| CellId::at(0, col)).collect()
    }

    pub fn placed_walls(&self) -> impl Iterator<Item = (&Wall, &WallSides)> {
        self.walls.iter()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn wall_sides(&self, wall: &Wall) -> Option<&WallSides> {
        self.walls.get(wall)
    }

    /// The four cells around a wall's groove, or `None` if any is off-board.
    ///
    /// Vertical walls yield `[left_upper, left_lower, right_upper, right_lower]`,
    /// horizontal walls `[upper_left, upper_right, lower_left, lower_right]`.
    pub fn wall_neighbours(&self, wall: &Wall) -> Option<[CellId; 4]> {
        let at = wall.at;
        let back = -WALL_OFFSET;
        let fwd = CELL_PITCH - WALL_OFFSET;
        let coords = match wall.orientation {
            Orientation::Vertical => [
                at.offset(0, back),
                at.offset(CELL_PITCH, back),
                at.offset(0, fwd),
                at.offset(CELL_PITCH, fwd),
            ],
            Orientation::Horizontal => [
                at.offset(back, 0),
                at.offset(back, CELL_PITCH),
                at.offset(fwd, 0),
                at.offset(fwd, CELL_PITCH),
            ],
        };
        let mut ids = [CellId(0); 4];
        for (slot, coord) in ids.iter_mut().zip(coords) {
            *slot = self.cell_at(coord)?;
        }
        Some(ids)
    }

    /// Whether `wall` fits: on-board, not overlapping a parallel wall, and not
    /// crossing a perpendicular wall at the same intersection.
    pub fn can_place_wall(&self, wall: &Wall) -> bool {
        let Some(cells) = self.wall_neighbours(wall) else {
            return false;
        };
        match wall.orientation {
            Orientation::Vertical => {
                let [lu, lb, ru, rb] = cells;
                if self.same_wall(lu, ru, Direction::Down) || self.same_wall(lb, rb, Direction::Up) {
                    return false;
                }
                !(self.slot(lu, Direction::Right).is_wall()
                    || self.slot(lb, Direction::Right).is_wall()
                    || self.slot(ru, Direction::Left).is_wall()
                    || self.slot(rb, Direction::Left).is_wall())
            }
            Orientation::Horizontal => {
                let [ul, ur, ll, lr] = cells;
                if self.same_wall(ul, ll, Direction::Right) || self.same_wall(ur, lr, Direction::Left) {
                    return false;
                }
                !(self.slot(ul, Direction::Down).is_wall()
                    || self.slot(ur, Direction::Down).is_wall()
                    || self.slot(ll, Direction::Up).is_wall()
                    || self.slot(lr, Direction::Up).is_wall())
            }
        }
    }

    /// Both cells' `dir` slots hold the very same wall.
    fn same_wall(&self, a: CellId, b: CellId, dir: Direction) -> bool {
        match (self.slot(a, dir), self.slot(b, dir)) {
            (Slot::Wall(x), Slot::Wall(y)) => x == y,
            _ => false,
        }
    }

    /// Rewire the four affected slots through `wall`.
    ///
    /// Returns false, leaving the board untouched, if [`Board::can_place_wall`]
    /// rejects the wall.
    pub fn put_wall(&mut self, wall: Wall) -> bool {
        if !self.can_place_wall(&wall) {
            return false;
        }
        let Some(cells) = self.wall_neighbours(&wall) else {
            return false;
        };
        let (toward, back) = blocked_directions(wall.orientation);
        let [a1, a2, b1, b2] = cells;
        for id in [a1, a2] {
            self.connect(id, toward, Slot::Wall(wall));
        }
        for id in [b1, b2] {
            self.connect(id, back, Slot::Wall(wall));
        }
        self.walls.insert(
            wall,
            WallSides {
                first: [a1, a2],
                second: [b1, b2],
            },
        );
        log::trace!("wall placed at {:?}", wall);
        true
    }

    /// Restore direct adjacency across a placed wall. False if it was not placed.
    pub fn drop_wall(&mut self, wall: &Wall) -> bool {
        let Some(sides) = self.walls.remove(wall) else {
            return false;
        };
        let (toward, _) = blocked_directions(wall.orientation);
        // Cells facing each other across the groove share an index.
        for (near, far) in sides.first.into_iter().zip(sides.second) {
            self.connect(near, toward, Slot::Open(far));
        }
        log::trace!("wall dropped at {:?}", wall);
        true
    }

    /// ASCII rendering with optional pawns for the top and bottom players.
    pub fn render(&self, top: Option<CellId>, bottom: Option<CellId>) -> String {
        let mut out = String::from("   ");
        for col in 0..N {
            out.push((b'A' + col as u8) as char);
            out.push(' ');
        }
        out.push('\n');
        for row in 0..N {
            out.push_str(&format!("{:>2} ", row + 1));
            for col in 0..N {
                let id = CellId::at(row, col);
                let ch = if Some(id) == top {
                    'T'
                } else if Some(id) == bottom {
                    'B'
                } else {
                    '.'
                };
                out.push(ch);
                if col + 1 < N {
                    let sep = if self.slot(id, Direction::Right).is_wall() { '|' } else { ' ' };
                    out.push(sep);
                }
            }
            out.push('\n');
            if row + 1 < N {
                out.push_str("   ");
                for col in 0..N {
                    let id = CellId::at(row, col);
                    out.push(if self.slot(id, Direction::Down).is_wall() { '-' } else { ' ' });
                    out.push(' ');
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Slot direction blocked on the first side of a wall, and on the second side.
const fn blocked_directions(orientation: Orientation) -> (Direction, Direction) {
    match orientation {
        Orientation::Vertical => (Direction::Right, Direction::Left),
        Orientation::Horizontal => (Direction::Down, Direction::Up),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None, None))
    }
}
