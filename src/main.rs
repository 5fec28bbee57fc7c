//! Quoridor-Rust command line.
//!
//! - `quoridor-rust play` - Play against the bot over the console protocol
//! - `quoridor-rust selfplay` - Let two bots play each other

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use quoridor_rust::bot::{BotConfig, Strategy};
use quoridor_rust::console::ConsoleEngine;
use quoridor_rust::constants::{MAX_TURNS, SEARCH_DEPTH};
use quoridor_rust::game::{Game, LogViewer};
use quoridor_rust::player::{Color, Side};

/// Quoridor-Rust: a Quoridor engine with a minimax bot
#[derive(Parser)]
#[command(name = "quoridor-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log bot decisions and game events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the bot; reads commands from stdin
    Play {
        /// Colour the bot plays; start another game with `black` or `white`
        #[arg(long, value_enum)]
        bot_color: Option<ColorArg>,
        #[arg(long, value_enum, default_value_t = StrategyArg::Search)]
        strategy: StrategyArg,
        /// Minimax depth in plies
        #[arg(long, default_value_t = SEARCH_DEPTH)]
        depth: u8,
        /// Seed for the random strategy
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a bot-vs-bot game and print the final board
    Selfplay {
        #[arg(long, default_value_t = MAX_TURNS)]
        max_turns: usize,
        /// Strategy for both bots
        #[arg(long, value_enum, default_value_t = StrategyArg::Search)]
        strategy: StrategyArg,
        #[arg(long, default_value_t = SEARCH_DEPTH)]
        depth: u8,
        /// Seed for the random strategy; each bot gets its own offset
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Black,
    White,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Black => Color::Black,
            ColorArg::White => Color::White,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Search,
    Random,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Search => Strategy::Search,
            StrategyArg::Random => Strategy::Random,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Play {
            bot_color,
            strategy,
            depth,
            seed,
        }) => {
            let config = BotConfig {
                depth,
                strategy: strategy.into(),
                seed,
                ..BotConfig::default()
            };
            play(config, bot_color.map(Color::from))
        }
        Some(Commands::Selfplay {
            max_turns,
            strategy,
            depth,
            seed,
        }) => {
            let config = BotConfig {
                depth,
                strategy: strategy.into(),
                seed,
                ..BotConfig::default()
            };
            selfplay(max_turns, config)
        }
        None => play(BotConfig::default(), None),
    }
}

fn play(config: BotConfig, bot_color: Option<Color>) -> Result<()> {
    let mut engine = ConsoleEngine::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Some(color) = bot_color {
        let command = if color == Color::Black { "black" } else { "white" };
        let (_, reply) = engine.execute(command, &[]).context("starting the game")?;
        if !reply.is_empty() {
            println!("= {reply}\n");
        }
    }
    engine
        .run(stdin.lock(), &mut stdout)
        .context("console session failed")
}

fn selfplay(max_turns: usize, base: BotConfig) -> Result<()> {
    if base.strategy == Strategy::Search && base.seed.is_some() {
        log::warn!("--seed only affects the random strategy");
    }
    let config = |salt: u64| BotConfig {
        seed: base.seed.map(|s| s.wrapping_add(salt)),
        ..base
    };
    let mut game = Game::with_seats(Some(config(0)), Some(config(1)));
    let mut viewer = LogViewer;

    while game.turns() < max_turns {
        if game
            .bot_turn(&mut viewer)
            .context("bot failed to move")?
            .is_none()
        {
            break;
        }
    }

    let top = game.player(Side::Top).cell();
    let bottom = game.player(Side::Bottom).cell();
    println!("{}", game.board().render(Some(top), Some(bottom)));
    match game.winner() {
        Some(side) => println!("{} player won after {} turns", side.color(), game.turns()),
        None => println!("No winner after {} turns", game.turns()),
    }
    Ok(())
}
