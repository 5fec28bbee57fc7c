//! Line-oriented console protocol for playing against the bot.
//!
//! Each input line is a command followed by arguments. Each response is
//! `= <message>` on success or `? <message>` on failure, followed by a
//! blank line.
//!
//! ## Commands
//!
//! - `black` / `white` - Start a new game with the bot playing that colour
//! - `move <cell>` - Step to a cell, e.g. `move E2`
//! - `jump <cell>` - Jump over the opponent
//! - `wall <wall>` - Place a wall, e.g. `wall S1h`
//! - `board` - Print the board
//! - `walls` - Print the walls each side has left
//! - `list_commands` - List all supported commands
//! - `quit` - Exit
//!
//! After an accepted request the bot's reply is printed in the same notation.

use std::io::{BufRead, Write};

use crate::board::{Orientation, Wall, parse_wall, str_wall};
use crate::bot::BotConfig;
use crate::controller::{Action, Controller};
use crate::coords::{Coordinate, parse_coord, str_coord};
use crate::error::Result;
use crate::game::{Applied, Game, Viewer};
use crate::player::{Color, Side};

const KNOWN_COMMANDS: &[&str] = &[
    "black",
    "board",
    "jump",
    "list_commands",
    "move",
    "quit",
    "wall",
    "walls",
    "white",
];

/// Collects what the bot did so it can be echoed back to the user.
#[derive(Debug, Default)]
pub struct ConsoleView {
    bot_side: Option<Side>,
    lines: Vec<String>,
}

impl ConsoleView {
    fn take(&mut self) -> String {
        std::mem::take(&mut self.lines).join("\n")
    }

    fn is_bot(&self, side: Side) -> bool {
        self.bot_side == Some(side)
    }
}

impl Viewer for ConsoleView {
    fn render_player(&mut self, side: Side, at: Coordinate, action: Action) {
        if self.is_bot(side) {
            self.lines.push(format!("{action} {}", str_coord(at)));
        }
    }

    fn render_wall(&mut self, side: Side, at: Coordinate, orientation: Orientation) {
        if self.is_bot(side) {
            self.lines.push(format!("wall {}", str_wall(&Wall::new(at, orientation))));
        }
    }

    fn render_remaining_walls(&mut self, top: u8, bottom: u8) {
        log::debug!("walls left: top {top}, bottom {bottom}");
    }

    fn render_ending(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

pub struct ConsoleEngine {
    game: Option<Game>,
    controller: Controller,
    view: ConsoleView,
    config: BotConfig,
}

impl Default for ConsoleEngine {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

impl ConsoleEngine {
    pub fn new(config: BotConfig) -> Self {
        Self {
            game: None,
            controller: Controller::new(),
            view: ConsoleView::default(),
            config,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..])?;

            let prefix = if success { '=' } else { '?' };
            writeln!(output, "{prefix} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<(bool, String)> {
        let response = match command {
            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "quit" => (true, String::new()),

            "black" | "white" => {
                let color = if command == "black" { Color::Black } else { Color::White };
                self.start(color)?
            }

            "move" | "jump" => {
                let Some(arg) = args.first() else {
                    return Ok((false, "missing cell".to_string()));
                };
                let Some(coord) = parse_coord(arg) else {
                    return Ok((false, format!("invalid cell: {arg}")));
                };
                let action = if command == "move" { Action::Move } else { Action::Jump };
                self.controller.request_step(action, coord);
                self.submit()?
            }

            "wall" => {
                let Some(arg) = args.first() else {
                    return Ok((false, "missing wall".to_string()));
                };
                let Some(wall) = parse_wall(arg) else {
                    return Ok((false, format!("invalid wall: {arg}")));
                };
                self.controller.request_wall(wall);
                self.submit()?
            }

            "board" => match &self.game {
                Some(game) => {
                    let top = game.player(Side::Top).cell();
                    let bottom = game.player(Side::Bottom).cell();
                    (true, format!("\n{}", game.board().render(Some(top), Some(bottom))))
                }
                None => no_game(),
            },

            "walls" => match &self.game {
                Some(game) => {
                    let top = game.player(Side::Top);
                    let bottom = game.player(Side::Bottom);
                    (
                        true,
                        format!(
                            "{} {}, {} {}",
                            top.color(),
                            top.walls_left(),
                            bottom.color(),
                            bottom.walls_left()
                        ),
                    )
                }
                None => no_game(),
            },

            _ => (false, format!("unknown command: {command}")),
        };
        Ok(response)
    }

    fn start(&mut self, bot_color: Color) -> Result<(bool, String)> {
        self.controller = Controller::new();
        self.view = ConsoleView {
            bot_side: Some(bot_color.side()),
            ..ConsoleView::default()
        };
        let game = self.game.insert(Game::new(bot_color, self.config));
        game.play_bots(&mut self.view)?;
        Ok((true, self.view.take()))
    }

    fn submit(&mut self) -> Result<(bool, String)> {
        let Some(game) = self.game.as_mut() else {
            return Ok(no_game());
        };
        let applied = game.update(&mut self.controller, &mut self.view)?;
        let response = match applied {
            Applied::Accepted => (true, self.view.take()),
            Applied::Rejected if !game.in_play() => (false, "game is over".to_string()),
            Applied::Rejected => (false, "illegal request".to_string()),
            Applied::Idle => (false, "nothing to do".to_string()),
        };
        // Rejected requests are left pending by the game; drop them here.
        self.controller = Controller::new();
        Ok(response)
    }
}

fn no_game() -> (bool, String) {
    (false, "no game in progress, start one with black or white".to_string())
}
