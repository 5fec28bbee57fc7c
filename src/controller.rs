//! Pending-action relay between whoever decides a move and the orchestrator.
//!
//! A human front end or the bot writes an [`Action`] plus its target here;
//! [`crate::game::Game::update`] reads it back.

use std::fmt;

use crate::board::{Orientation, Wall};
use crate::coords::Coordinate;

/// The three kinds of turn a player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move,
    Jump,
    Wall,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move => f.write_str("move"),
            Action::Jump => f.write_str("jump"),
            Action::Wall => f.write_str("wall"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    action: Option<Action>,
    cell: Option<Coordinate>,
    wall: Option<Wall>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = Some(action);
    }

    /// Read and clear the pending action.
    pub fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }

    pub fn cell(&self) -> Option<Coordinate> {
        self.cell
    }

    pub fn set_cell(&mut self, top: i32, left: i32) {
        self.cell = Some(Coordinate::new(top, left));
    }

    pub fn wall(&self) -> Option<Wall> {
        self.wall
    }

    pub fn set_wall(&mut self, top: i32, left: i32, is_vertical: bool) {
        let orientation = if is_vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        self.wall = Some(Wall::new(Coordinate::new(top, left), orientation));
    }

    /// Queue a move or jump to `coord`.
    pub fn request_step(&mut self, action: Action, coord: Coordinate) {
        self.set_action(action);
        self.set_cell(coord.top, coord.left);
    }

    /// Queue a wall placement.
    pub fn request_wall(&mut self, wall: Wall) {
        self.set_action(Action::Wall);
        self.set_wall(wall.at.top, wall.at.left, wall.is_vertical());
    }
}
