//! Turn-phase cursor.
//!
//! Tracks the phase a turn is in and pushes every change to the host's
//! game-state gateway. A refused change is logged and leaves the cursor
//! where it was.

use teg_types::{GameId, TurnPhase};
use tracing::{debug, warn};

use crate::gateway::GameStateGateway;

/// The phase of the turn being played, plus every phase entered so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCursor {
    game: GameId,
    current: TurnPhase,
    entered: Vec<TurnPhase>,
}

impl PhaseCursor {
    /// A cursor starting at the game's current phase.
    pub const fn new(game: GameId, current: TurnPhase) -> Self {
        Self {
            game,
            current,
            entered: Vec::new(),
        }
    }

    /// Phase the cursor is at.
    pub const fn current(&self) -> TurnPhase {
        self.current
    }

    /// Phases successfully entered, in order.
    pub fn entered(&self) -> &[TurnPhase] {
        &self.entered
    }

    /// Move to the next phase in the cycle.
    pub fn advance(&mut self, gateway: &dyn GameStateGateway) -> Option<TurnPhase> {
        self.jump_to(gateway, self.current.next())
    }

    /// Move straight to `phase`.
    pub fn jump_to(&mut self, gateway: &dyn GameStateGateway, phase: TurnPhase) -> Option<TurnPhase> {
        match gateway.change_turn_phase(self.game, phase) {
            Ok(()) => {
                debug!(game = %self.game, from = ?self.current, to = ?phase, "turn phase changed");
                self.current = phase;
                self.entered.push(phase);
                Some(phase)
            }
            Err(e) => {
                warn!(game = %self.game, from = ?self.current, to = ?phase, error = %e, "failed to change turn phase");
                None
            }
        }
    }

    /// Consume the cursor, returning the phases entered.
    pub fn into_entered(self) -> Vec<TurnPhase> {
        self.entered
    }
}
