//! The computer player.
//!
//! [`Bot::make_a_move`] runs one turn and returns exactly one [`Decision`].
//! The search strategy works through a fixed pipeline:
//!
//! 1. **Shortcuts**: step onto the goal row when a step reaches it, else take
//!    any legal jump that shortens the row distance.
//! 2. **Movement search**: alpha-beta from the bot's own cell.
//! 3. **Wall search**: try the walls that block the opponent's predicted next
//!    passage and score each with an opponent-seeded search.
//! 4. **Arbitration**: a wall wins if it beats the movement outlook and still
//!    leaves both players a path.
//! 5. **Movement**: the search's first step, else the A* next step, else any
//!    legal step.
//! 6. **Self-preservation**: sidestep if the chosen cell hands the opponent
//!    a jump, unless the cell is on the goal row.
//!
//! The bot only tries walls speculatively and always rolls them back. The
//! orchestrator commits whatever the bot returns.

use std::fmt;

use log::debug;

use crate::board::{Board, CellId, Direction, Wall, str_wall};
use crate::constants::{SEARCH_DEPTH, WALL_SLOTS};
use crate::controller::{Action, Controller};
use crate::coords::str_coord;
use crate::error::{QuoridorError, Result};
use crate::game_state::GameState;
use crate::pathfinding::next_step;
use crate::player::{Color, Player, Side};
use crate::search::{Line, Searcher, Step, StepKind};
use crate::validator::{is_there_a_way, jump_cells, step_cells};

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Minimax over paths plus wall arbitration.
    #[default]
    Search,
    /// Uniformly random legal actions.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotConfig {
    pub depth: u8,
    pub strategy: Strategy,
    /// Seed for the random strategy; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub walls_enabled: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            depth: SEARCH_DEPTH,
            strategy: Strategy::Search,
            seed: None,
            walls_enabled: true,
        }
    }
}

// =============================================================================
// Decision
// =============================================================================

/// The single action a bot emits per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Move(CellId),
    Jump(CellId),
    Wall(Wall),
}

impl Decision {
    pub fn action(&self) -> Action {
        match self {
            Decision::Move(_) => Action::Move,
            Decision::Jump(_) => Action::Jump,
            Decision::Wall(_) => Action::Wall,
        }
    }

    /// Write this decision into the controller as the pending request.
    pub fn submit(&self, controller: &mut Controller) {
        match *self {
            Decision::Move(cell) | Decision::Jump(cell) => {
                controller.request_step(self.action(), cell.coord());
            }
            Decision::Wall(wall) => controller.request_wall(wall),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move(cell) | Decision::Jump(cell) => {
                write!(f, "{} {}", self.action(), str_coord(cell.coord()))
            }
            Decision::Wall(wall) => write!(f, "wall {}", str_wall(wall)),
        }
    }
}

impl From<Step> for Decision {
    fn from(step: Step) -> Self {
        match step.kind {
            StepKind::Move => Decision::Move(step.cell),
            StepKind::Jump => Decision::Jump(step.cell),
        }
    }
}

// =============================================================================
// Bot
// =============================================================================

pub struct Bot {
    /// Pawn position and wall budget.
    player: Player,
    /// Row the bot is racing to.
    goal_row: usize,
    /// Row the bot starts on; the opponent's goal.
    home_row: usize,
    config: BotConfig,
    /// Draws for the random strategy.
    rng: fastrand::Rng,
    /// Wall spots the random strategy has not drawn yet.
    wall_spots: Vec<Wall>,
}

impl Bot {
    pub fn new(color: Color, cell: CellId, state: &GameState, config: BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            player: Player::new(color, cell),
            goal_row: state.goal_row(color.side()),
            home_row: state.goal_row(color.side().opposite()),
            config,
            rng,
            wall_spots: Wall::all_spots(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn goal_row(&self) -> usize {
        self.goal_row
    }

    pub fn home_row(&self) -> usize {
        self.home_row
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Decide this turn's action.
    ///
    /// The board is only borrowed mutably to try walls; it is returned in the
    /// state it was passed in.
    pub fn make_a_move(&mut self, board: &mut Board, state: &GameState, other: &Player) -> Result<Decision> {
        let decision = match self.config.strategy {
            Strategy::Search => self.search_move(board, state, other)?,
            Strategy::Random => self.random_move(board, state, other)?,
        };
        debug!("{} bot decided: {}", self.player.color(), decision);
        Ok(decision)
    }

    // =========================================================================
    // Search strategy
    // =========================================================================

    fn search_move(&mut self, board: &mut Board, state: &GameState, other: &Player) -> Result<Decision> {
        let me = self.player.cell();

        // Deeper lines can outscore an immediate win, so take it first.
        if let Some(cell) = self.winning_step(board, other) {
            debug!("winning step to {:?}", cell);
            return Ok(Decision::Move(cell));
        }
        if let Some(cell) = self.forward_jump(board, other) {
            debug!("forward jump to {:?}", cell);
            return Ok(Decision::Jump(cell));
        }

        let rival_goal = state.goal_row(other.side());
        let line = Searcher::new(board, self.goal_row, rival_goal)
            .with_depth(self.config.depth)
            .search(me, other.cell());
        debug!("movement search: score {} line {:?}", line.score, line.steps);

        if let Some(wall) = self.wall_search(board, state, other, &line) {
            return Ok(Decision::Wall(wall));
        }

        let step = self.choose_step(board, other, &line)?;
        Ok(self.preserve(board, other, step).into())
    }

    fn winning_step(&self, board: &Board, other: &Player) -> Option<CellId> {
        step_cells(board, self.player.cell(), other.cell())
            .into_iter()
            .find(|c| c.row() == self.goal_row)
    }

    /// The legal jump that cuts the most row distance, if any cuts some.
    fn forward_jump(&self, board: &Board, other: &Player) -> Option<CellId> {
        let me = self.player.cell();
        let before = me.row().abs_diff(self.goal_row);
        jump_cells(board, me, other.cell())
            .into_iter()
            .filter(|c| c.row().abs_diff(self.goal_row) < before)
            .min_by_key(|c| c.row().abs_diff(self.goal_row))
    }

    fn wall_search(&self, board: &mut Board, state: &GameState, other: &Player, line: &Line) -> Option<Wall> {
        if !self.config.walls_enabled || self.player.walls_left() == 0 {
            return None;
        }
        let me = self.player.cell();
        let rival = other.cell();
        let rival_goal = state.goal_row(other.side());

        let depth = self.config.depth;
        let rival_search = |board: &Board, me: CellId| {
            Searcher::new(board, rival_goal, self.goal_row)
                .with_depth(depth)
                .search(rival, me)
        };

        let after_step = line.first().map_or(me, |s| s.cell);
        let outlook = -rival_search(board, after_step).score;

        let predicted = rival_search(board, me).first().map(|s| s.cell);
        let shortest = next_step(board, rival, rival_goal);
        let mut candidates = Vec::new();
        for to in [predicted, shortest].into_iter().flatten() {
            for wall in blocking_walls(rival, to) {
                if !candidates.contains(&wall) {
                    candidates.push(wall);
                }
            }
        }

        let mut best: Option<(Wall, i32)> = None;
        for wall in candidates {
            if !board.put_wall(wall) {
                continue;
            }
            if self.both_can_finish(board, state, other) {
                let score = -rival_search(board, me).score;
                if best.is_none_or(|(_, b)| score > b) {
                    best = Some((wall, score));
                }
            }
            board.drop_wall(&wall);
        }
        debug!("wall search: best {:?}, movement outlook {}", best, outlook);

        let (wall, score) = best?;
        if score <= outlook || !board.can_place_wall(&wall) {
            return None;
        }
        if !board.put_wall(wall) {
            return None;
        }
        let open = self.both_can_finish(board, state, other);
        board.drop_wall(&wall);
        open.then_some(wall)
    }

    fn choose_step(&self, board: &Board, other: &Player, line: &Line) -> Result<Step> {
        let me = self.player.cell();
        let steps = step_cells(board, me, other.cell());
        let jumps = jump_cells(board, me, other.cell());

        if let Some(step) = line.first() {
            let legal = match step.kind {
                StepKind::Move => steps.contains(&step.cell),
                StepKind::Jump => jumps.contains(&step.cell),
            };
            if legal {
                return Ok(step);
            }
        }
        if let Some(cell) = next_step(board, me, self.goal_row).filter(|c| steps.contains(c)) {
            return Ok(Step::walk(cell));
        }
        if let Some(&cell) = steps.first() {
            return Ok(Step::walk(cell));
        }
        jumps
            .first()
            .map(|&cell| Step::jump(cell))
            .ok_or(QuoridorError::NoLegalMove(self.player.side()))
    }

    /// Swap `step` for a sideways move if it would let the opponent jump.
    ///
    /// A step onto the goal row ends the game, so it is never swapped.
    fn preserve(&self, board: &Board, other: &Player, step: Step) -> Step {
        if step.cell.row() == self.goal_row {
            return step;
        }
        let exposed = |cell: CellId| !jump_cells(board, other.cell(), cell).is_empty();
        if !exposed(step.cell) {
            return step;
        }
        let me = self.player.cell();
        let forward = if self.goal_row > self.home_row {
            Direction::Down
        } else {
            Direction::Up
        };
        let steps = step_cells(board, me, other.cell());
        forward
            .perpendicular()
            .into_iter()
            .filter_map(|dir| board.neighbor(me, dir))
            .find(|c| steps.contains(c) && !exposed(*c))
            .map_or(step, |cell| {
                debug!("sidestepping to {:?} instead of {:?}", cell, step.cell);
                Step::walk(cell)
            })
    }

    fn both_can_finish(&self, board: &Board, state: &GameState, other: &Player) -> bool {
        match self.player.side() {
            Side::Top => is_there_a_way(board, state, &self.player, other),
            Side::Bottom => is_there_a_way(board, state, other, &self.player),
        }
    }

    // =========================================================================
    // Random strategy
    // =========================================================================

    fn random_move(&mut self, board: &mut Board, state: &GameState, other: &Player) -> Result<Decision> {
        let me = self.player.cell();
        let steps = step_cells(board, me, other.cell());
        let jumps = jump_cells(board, me, other.cell());

        let mut action = match self.rng.u8(0..3) {
            0 => Action::Move,
            1 => Action::Jump,
            _ => Action::Wall,
        };
        if action == Action::Wall && (!self.config.walls_enabled || self.player.walls_left() == 0) {
            action = Action::Move;
        }
        if action == Action::Jump && jumps.is_empty() {
            action = Action::Move;
        }

        if action == Action::Wall {
            if let Some(wall) = self.random_wall(board, state, other) {
                return Ok(Decision::Wall(wall));
            }
        }
        if action == Action::Jump || steps.is_empty() {
            if jumps.is_empty() {
                return Err(QuoridorError::NoLegalMove(self.player.side()));
            }
            return Ok(Decision::Jump(jumps[self.rng.usize(..jumps.len())]));
        }
        Ok(Decision::Move(steps[self.rng.usize(..steps.len())]))
    }

    /// Draw spots until one is placeable and keeps both paths open.
    fn random_wall(&mut self, board: &mut Board, state: &GameState, other: &Player) -> Option<Wall> {
        while !self.wall_spots.is_empty() {
            let wall = self.wall_spots.swap_remove(self.rng.usize(..self.wall_spots.len()));
            if !board.put_wall(wall) {
                continue;
            }
            let open = self.both_can_finish(board, state, other);
            board.drop_wall(&wall);
            if open {
                return Some(wall);
            }
        }
        None
    }
}

/// The two walls that would block the passage between adjacent `from` and `to`.
fn blocking_walls(from: CellId, to: CellId) -> Vec<Wall> {
    let Some(dir) = Direction::between(from, to) else {
        return Vec::new();
    };
    // Upper-left cell of the pair.
    let ul = match dir {
        Direction::Down | Direction::Right => from,
        Direction::Up | Direction::Left => to,
    };
    let (row, col) = (ul.row(), ul.col());
    let walls = match dir {
        Direction::Up | Direction::Down => [
            Some((row, col, false)),
            col.checked_sub(1).map(|c| (row, c, false)),
        ],
        Direction::Left | Direction::Right => [
            Some((row, col, true)),
            row.checked_sub(1).map(|r| (r, col, true)),
        ],
    };
    walls
        .into_iter()
        .flatten()
        .filter(|&(r, c, _)| r < WALL_SLOTS && c < WALL_SLOTS)
        .map(|(r, c, vertical)| {
            if vertical {
                Wall::vertical(r, c)
            } else {
                Wall::horizontal(r, c)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(config: BotConfig, bot_at: CellId, other_at: CellId) -> (Board, GameState, Bot, Player) {
        let board = Board::new();
        let state = GameState::from_board(&board);
        let bot = Bot::new(Color::Black, bot_at, &state, config);
        let other = Player::new(Color::White, other_at);
        (board, state, bot, other)
    }

    fn no_walls() -> BotConfig {
        BotConfig {
            walls_enabled: false,
            ..BotConfig::default()
        }
    }

    #[test]
    fn test_first_move_is_forward() {
        let (mut board, state, mut bot, other) = setup(no_walls(), CellId::at(0, 4), CellId::at(8, 4));
        let decision = bot.make_a_move(&mut board, &state, &other).expect("decision");
        assert_eq!(decision, Decision::Move(CellId::at(1, 4)));
    }

    #[test]
    fn test_goal_and_home_rows() {
        let (_, _, bot, _) = setup(no_walls(), CellId::at(0, 4), CellId::at(8, 4));
        assert_eq!(bot.goal_row(), 8);
        assert_eq!(bot.home_row(), 0);
    }

    #[test]
    fn test_walls_when_race_is_even() {
        // Both pawns are eight rows out. Blocking the opponent's first
        // passage costs it a sideways step, which beats stepping forward.
        let (mut board, state, mut bot, other) =
            setup(BotConfig::default(), CellId::at(0, 4), CellId::at(8, 4));
        let decision = bot.make_a_move(&mut board, &state, &other).expect("decision");
        let Decision::Wall(wall) = decision else {
            panic!("expected a wall, got {decision}");
        };
        assert!([Wall::horizontal(7, 4), Wall::horizontal(7, 3)].contains(&wall));
        assert_eq!(board.wall_count(), 0);
    }

    #[test]
    fn test_takes_winning_step_next_to_opponent() {
        let (mut board, state, mut bot, other) =
            setup(BotConfig::default(), CellId::at(7, 4), CellId::at(8, 3));
        let decision = bot.make_a_move(&mut board, &state, &other).expect("decision");
        assert_eq!(decision, Decision::Move(CellId::at(8, 4)));
    }

    #[test]
    fn test_forward_jump_shortcut() {
        let (mut board, state, mut bot, other) = setup(no_walls(), CellId::at(3, 4), CellId::at(4, 4));
        let decision = bot.make_a_move(&mut board, &state, &other).expect("decision");
        assert_eq!(decision, Decision::Jump(CellId::at(5, 4)));
    }

    #[test]
    fn test_no_legal_move_is_an_error() {
        let (mut board, state, mut bot, other) = setup(no_walls(), CellId::at(0, 0), CellId::at(1, 0));
        assert!(board.put_wall(Wall::vertical(0, 0)));
        assert!(board.put_wall(Wall::horizontal(1, 0)));
        let err = bot.make_a_move(&mut board, &state, &other).unwrap_err();
        assert!(matches!(err, QuoridorError::NoLegalMove(Side::Top)));
    }

    #[test]
    fn test_sidestep_when_exposed() {
        let (board, _state, bot, other) = setup(no_walls(), CellId::at(2, 4), CellId::at(4, 4));
        let step = bot.preserve(&board, &other, Step::walk(CellId::at(3, 4)));
        assert!([CellId::at(2, 3), CellId::at(2, 5)].contains(&step.cell));
        assert_eq!(step.kind, StepKind::Move);

        // Nothing to fear from a distant opponent.
        let far = Player::new(Color::White, CellId::at(8, 0));
        let step = bot.preserve(&board, &far, Step::walk(CellId::at(3, 4)));
        assert_eq!(step.cell, CellId::at(3, 4));
    }

    #[test]
    fn test_goal_row_step_is_never_swapped() {
        let (board, _state, bot, other) = setup(no_walls(), CellId::at(7, 4), CellId::at(8, 3));
        // (8, 4) sits beside the opponent, but reaching it ends the game.
        let step = bot.preserve(&board, &other, Step::walk(CellId::at(8, 4)));
        assert_eq!(step, Step::walk(CellId::at(8, 4)));
    }

    #[test]
    fn test_wall_search_leaves_board_untouched() {
        let (mut board, state, mut bot, other) =
            setup(BotConfig::default(), CellId::at(0, 4), CellId::at(2, 4));
        let before = board.clone();
        let decision = bot.make_a_move(&mut board, &state, &other).expect("decision");
        assert_eq!(board, before);
        if let Decision::Wall(wall) = decision {
            assert!(board.put_wall(wall));
            assert!(is_there_a_way(&board, &state, bot.player(), &other));
        }
    }

    #[test]
    fn test_blocking_walls() {
        let mut walls = blocking_walls(CellId::at(2, 4), CellId::at(1, 4));
        walls.sort();
        let mut expected = vec![Wall::horizontal(1, 4), Wall::horizontal(1, 3)];
        expected.sort();
        assert_eq!(walls, expected);

        assert_eq!(blocking_walls(CellId::at(0, 0), CellId::at(0, 1)), vec![Wall::vertical(0, 0)]);
        assert_eq!(blocking_walls(CellId::at(8, 8), CellId::at(8, 7)), vec![Wall::vertical(7, 7)]);
        assert!(blocking_walls(CellId::at(0, 0), CellId::at(2, 0)).is_empty());
    }

    #[test]
    fn test_random_bot_emits_legal_actions() {
        let config = BotConfig {
            strategy: Strategy::Random,
            seed: Some(7),
            ..BotConfig::default()
        };
        let (mut board, state, mut bot, other) = setup(config, CellId::at(0, 4), CellId::at(8, 4));
        for _ in 0..200 {
            match bot.make_a_move(&mut board, &state, &other).expect("decision") {
                Decision::Move(cell) => {
                    assert!(step_cells(&board, bot.player().cell(), other.cell()).contains(&cell));
                    board.move_player(bot.player_mut(), cell);
                }
                Decision::Jump(cell) => {
                    assert!(jump_cells(&board, bot.player().cell(), other.cell()).contains(&cell));
                    board.move_player(bot.player_mut(), cell);
                }
                Decision::Wall(wall) => {
                    assert!(bot.player_mut().place_wall());
                    assert!(board.put_wall(wall));
                    assert!(is_there_a_way(&board, &state, bot.player(), &other));
                }
            }
            if bot.player().cell().row() == 8 {
                break;
            }
        }
        assert!(bot.player().walls_left() <= 10);
    }

    #[test]
    fn test_decision_notation() {
        assert_eq!(Decision::Move(CellId::at(1, 4)).to_string(), "move E2");
        assert_eq!(Decision::Jump(CellId::at(0, 0)).to_string(), "jump A1");
        assert_eq!(Decision::Wall(Wall::horizontal(0, 0)).to_string(), "wall S1h");
    }

    #[test]
    fn test_decision_submits_to_controller() {
        let mut controller = Controller::new();
        Decision::Wall(Wall::vertical(3, 2)).submit(&mut controller);
        assert_eq!(controller.action(), Some(Action::Wall));
        assert_eq!(controller.wall(), Some(Wall::vertical(3, 2)));

        Decision::Jump(CellId::at(2, 2)).submit(&mut controller);
        assert_eq!(controller.action(), Some(Action::Jump));
        assert_eq!(controller.cell(), Some(CellId::at(2, 2).coord()));
    }
}
