//! The game session: seats, turn order, and the single place where requests
//! are validated and committed.
//!
//! A [`Game`] is an ordinary value owned by whoever drives it (the console
//! engine, the self-play loop, a test). Requests arrive through a
//! [`Controller`]; outcomes go out through a [`Viewer`].

use log::{info, trace};

use crate::board::{Board, CellId, Orientation, Wall};
use crate::bot::{Bot, BotConfig, Decision};
use crate::constants::MAX_TURNS;
use crate::controller::{Action, Controller};
use crate::coords::{Coordinate, str_coord};
use crate::error::{QuoridorError, Result};
use crate::game_state::GameState;
use crate::player::{Color, Player, Side};
use crate::validator::{is_there_a_way, is_valid_jump, is_valid_move};

/// Receives everything the orchestrator commits.
pub trait Viewer {
    fn render_player(&mut self, side: Side, at: Coordinate, action: Action);
    fn render_wall(&mut self, side: Side, at: Coordinate, orientation: Orientation);
    /// Fired after every wall request, accepted or not.
    fn render_remaining_walls(&mut self, top: u8, bottom: u8);
    fn render_ending(&mut self, message: &str);
}

/// Viewer that forwards every event to the log.
#[derive(Debug, Default)]
pub struct LogViewer;

impl Viewer for LogViewer {
    fn render_player(&mut self, side: Side, at: Coordinate, action: Action) {
        info!("{side:?} {action} {}", str_coord(at));
    }

    fn render_wall(&mut self, side: Side, at: Coordinate, orientation: Orientation) {
        info!("{side:?} wall {orientation:?} at {at}");
    }

    fn render_remaining_walls(&mut self, top: u8, bottom: u8) {
        info!("walls left: top {top}, bottom {bottom}");
    }

    fn render_ending(&mut self, message: &str) {
        info!("{message}");
    }
}

/// Who occupies a seat.
pub enum Contender {
    Human(Player),
    Bot(Bot),
}

impl Contender {
    pub fn player(&self) -> &Player {
        match self {
            Contender::Human(p) => p,
            Contender::Bot(b) => b.player(),
        }
    }

    pub fn player_mut(&mut self) -> &mut Player {
        match self {
            Contender::Human(p) => p,
            Contender::Bot(b) => b.player_mut(),
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, Contender::Bot(_))
    }
}

/// Outcome of one [`Game::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// Illegal or out of turn; nothing changed and the request is still pending.
    Rejected,
    /// No request was pending.
    Idle,
}

pub struct Game {
    board: Board,
    /// Winning rows of the board above.
    state: GameState,
    /// Seat starting on row 0.
    top: Contender,
    /// Seat starting on the last row; moves first.
    bottom: Contender,
    /// Side to move.
    current: Side,
    /// Committed actions so far.
    turns: usize,
}

impl Game {
    /// A human against a bot playing `bot_color`.
    pub fn new(bot_color: Color, config: BotConfig) -> Self {
        match bot_color.side() {
            Side::Top => Self::with_seats(Some(config), None),
            Side::Bottom => Self::with_seats(None, Some(config)),
        }
    }

    /// Seat a bot wherever a config is given and a human elsewhere.
    pub fn with_seats(top: Option<BotConfig>, bottom: Option<BotConfig>) -> Self {
        let board = Board::new();
        let state = GameState::from_board(&board);
        let seat = |color: Color, cell: CellId, config: Option<BotConfig>| match config {
            Some(config) => Contender::Bot(Bot::new(color, cell, &state, config)),
            None => Contender::Human(Player::new(color, cell)),
        };
        let top = seat(Side::Top.color(), board.top_start_position(), top);
        let bottom = seat(Side::Bottom.color(), board.bottom_start_position(), bottom);
        info!("new game: top {}, bottom {}", describe(&top), describe(&bottom));
        Self {
            board,
            state,
            top,
            bottom,
            current: Side::Bottom,
            turns: 0,
        }
    }

    /// Throw the current game away and start over with the bot on `bot_color`.
    pub fn new_game(&mut self, bot_color: Color, config: BotConfig) {
        *self = Self::new(bot_color, config);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current(&self) -> Side {
        self.current
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn seat(&self, side: Side) -> &Contender {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        self.seat(side).player()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner(self.top.player(), self.bottom.player())
    }

    pub fn in_play(&self) -> bool {
        self.winner().is_none()
    }

    /// Apply the pending request, then let any bots to move play out.
    pub fn update(&mut self, controller: &mut Controller, viewer: &mut dyn Viewer) -> Result<Applied> {
        let Some(action) = controller.action() else {
            self.play_bots(viewer)?;
            return Ok(Applied::Idle);
        };
        let side = self.current;
        if self.seat(side).is_bot() {
            trace!("{action} request while the {side:?} bot is to move");
            return Ok(Applied::Rejected);
        }
        if !self.apply(side, action, controller, viewer)? {
            return Ok(Applied::Rejected);
        }
        controller.take_action();
        self.play_bots(viewer)?;
        Ok(Applied::Accepted)
    }

    /// Run bot turns until a human is to move or the game ends.
    ///
    /// When both seats are bots the game is called a draw after
    /// [`MAX_TURNS`] turns. Games with a human seat have no limit.
    pub fn play_bots(&mut self, viewer: &mut dyn Viewer) -> Result<()> {
        let self_play = self.top.is_bot() && self.bottom.is_bot();
        loop {
            if self_play && self.turns >= MAX_TURNS {
                if self.in_play() {
                    let message = format!("Draw after {} turns", self.turns);
                    info!("{message}");
                    viewer.render_ending(&message);
                }
                return Ok(());
            }
            if self.bot_turn(viewer)?.is_none() {
                return Ok(());
            }
        }
    }

    /// Let the bot to move take one turn.
    ///
    /// `None` if the game is over or a human is to move.
    pub fn bot_turn(&mut self, viewer: &mut dyn Viewer) -> Result<Option<Decision>> {
        if !self.in_play() {
            return Ok(None);
        }
        let side = self.current;
        let (seat, other) = match side {
            Side::Top => (&mut self.top, &self.bottom),
            Side::Bottom => (&mut self.bottom, &self.top),
        };
        let Contender::Bot(bot) = seat else {
            return Ok(None);
        };
        let decision = bot.make_a_move(&mut self.board, &self.state, other.player())?;

        let mut controller = Controller::new();
        decision.submit(&mut controller);
        if !self.apply(side, decision.action(), &controller, viewer)? {
            return Err(QuoridorError::BotActionRejected {
                side,
                action: decision.to_string(),
            });
        }
        Ok(Some(decision))
    }

    /// Validate and commit one request for `side`. False leaves everything
    /// untouched.
    fn apply(&mut self, side: Side, action: Action, controller: &Controller, viewer: &mut dyn Viewer) -> Result<bool> {
        if !self.in_play() {
            trace!("{action} request after the game ended");
            return Ok(false);
        }
        match action {
            Action::Move | Action::Jump => {
                let coord = controller.cell().ok_or(QuoridorError::MissingTarget("move"))?;
                let Some(cell) = self.board.cell_at(coord) else {
                    trace!("{action} to off-board {coord}");
                    return Ok(false);
                };
                let (mover, other) = (self.player(side), self.player(side.opposite()));
                let legal = match action {
                    Action::Jump => is_valid_jump(&self.board, cell, mover, other),
                    _ => is_valid_move(&self.board, cell, mover, other),
                };
                if !legal {
                    trace!("illegal {action} to {} by {side:?}", str_coord(coord));
                    return Ok(false);
                }
                let seat = match side {
                    Side::Top => &mut self.top,
                    Side::Bottom => &mut self.bottom,
                };
                self.board.move_player(seat.player_mut(), cell);
                viewer.render_player(side, coord, action);
            }
            Action::Wall => {
                let wall = controller.wall().ok_or(QuoridorError::MissingTarget("wall"))?;
                let placed = self.place_wall(side, wall);
                if placed {
                    viewer.render_wall(side, wall.at, wall.orientation);
                }
                viewer.render_remaining_walls(self.top.player().walls_left(), self.bottom.player().walls_left());
                if !placed {
                    return Ok(false);
                }
            }
        }

        self.turns += 1;
        self.current = side.opposite();
        if let Some(winner) = self.winner() {
            let message = format!("{} player won!", winner.color());
            info!("{message} after {} turns", self.turns);
            viewer.render_ending(&message);
        }
        Ok(true)
    }

    /// Spend a wall for `side` and commit it, or roll everything back.
    fn place_wall(&mut self, side: Side, wall: Wall) -> bool {
        if !self.board.can_place_wall(&wall) || !self.seat_mut(side).player_mut().place_wall() {
            trace!("wall {wall:?} rejected for {side:?}");
            return false;
        }
        if self.board.put_wall(wall)
            && is_there_a_way(&self.board, &self.state, self.top.player(), self.bottom.player())
        {
            info!("{side:?} committed wall {wall:?}");
            return true;
        }
        self.board.drop_wall(&wall);
        self.seat_mut(side).player_mut().unplace_wall();
        trace!("wall {wall:?} would cut a path");
        false
    }

    fn seat_mut(&mut self, side: Side) -> &mut Contender {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }
}

fn describe(seat: &Contender) -> String {
    let kind = if seat.is_bot() { "bot" } else { "human" };
    format!("{} {kind}", seat.player().color())
}
