//! Errors that indicate a broken invariant rather than a rejected request.
//!
//! Illegal moves, jumps, and walls are not errors: the orchestrator rejects
//! them and leaves the game untouched. The variants here are raised only
//! when the engine contradicts itself.

use thiserror::Error;

use crate::player::Side;

#[derive(Debug, Error)]
pub enum QuoridorError {
    /// The searching side found no legal continuation at all.
    #[error("no legal move for the {0:?} player")]
    NoLegalMove(Side),

    /// The bot emitted an action the orchestrator refused.
    #[error("bot on the {side:?} side emitted a rejected action: {action}")]
    BotActionRejected { side: Side, action: String },

    /// A pending action arrived without the data it needs.
    #[error("pending {0} request carries no target")]
    MissingTarget(&'static str),

    #[error("console I/O failed")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuoridorError>;
