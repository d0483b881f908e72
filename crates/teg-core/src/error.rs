//! Error type shared by every gateway.
//!
//! A [`GatewayError`] is a fault reported by an external collaborator. The
//! bot engine never lets one escape a sub-action: it is logged and folded
//! into that sub-action's outcome.

use teg_types::{GameId, PlayerId, TerritoryId};

/// A fault raised by a gateway or telemetry sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The game is unknown to the host.
    #[error("game not found: {0}")]
    GameNotFound(GameId),

    /// The player is not seated in the game.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The territory is not on the board.
    #[error("territory not found: {0}")]
    TerritoryNotFound(TerritoryId),

    /// The host refused a command.
    #[error("command rejected: {reason}")]
    Rejected {
        /// Why the command was refused.
        reason: String,
    },

    /// The collaborator could not be reached or failed internally.
    #[error("gateway unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl GatewayError {
    /// Shorthand for a [`GatewayError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`GatewayError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
