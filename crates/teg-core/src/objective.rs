//! Secret objectives: evaluation, progress reporting, winner detection and
//! dealing.
//!
//! - common: hold at least the common territory target (30 by default)
//! - occupation: own every territory of every listed continent
//! - destruction: every player of the target colour is eliminated
//!
//! Malformed objectives (none assigned, no continents listed) and gateway
//! faults never count as achieved. They are logged and evaluate to `false`.

use core::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use teg_types::{
    Game, Objective, ObjectiveError, ObjectiveKind, Player, PlayerId, PlayerStatus,
};
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::gateway::TerritoryQueries;

/// Territories needed to fulfil the common objective.
pub const COMMON_TERRITORY_TARGET: usize = 30;

/// Progress toward an objective, rendered for players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveProgress {
    /// Common objective.
    Territories {
        /// Territories held.
        held: usize,
        /// Territories needed.
        target: usize,
    },
    /// Occupation objective.
    Continents {
        /// Listed continents fully held.
        controlled: usize,
        /// Continents listed.
        required: usize,
    },
    /// Destruction objective.
    Destruction {
        /// Whether every player of the colour is out.
        eliminated: bool,
    },
    /// No objective assigned.
    Unassigned,
    /// The board could not be read.
    Unavailable,
}

impl fmt::Display for ObjectiveProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Territories { held, target } => write!(f, "Territories: {held}/{target}"),
            Self::Continents {
                controlled,
                required,
            } => write!(f, "Continents controlled: {controlled}/{required}"),
            Self::Destruction { eliminated: true } => f.write_str("Target eliminated!"),
            Self::Destruction { eliminated: false } => f.write_str("Target still active"),
            Self::Unassigned => f.write_str("No objective assigned"),
            Self::Unavailable => f.write_str("Progress unavailable"),
        }
    }
}

/// Evaluates secret objectives against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveEvaluator {
    common_territory_target: usize,
}

impl Default for ObjectiveEvaluator {
    fn default() -> Self {
        Self::new(COMMON_TERRITORY_TARGET)
    }
}

impl ObjectiveEvaluator {
    /// An evaluator with a custom common territory target.
    pub const fn new(common_territory_target: usize) -> Self {
        Self {
            common_territory_target,
        }
    }

    /// Territories needed for the common objective.
    pub const fn common_territory_target(&self) -> usize {
        self.common_territory_target
    }

    /// Whether `player` has fulfilled `objective`.
    pub fn is_achieved(
        &self,
        objective: Option<&Objective>,
        game: &Game,
        player: PlayerId,
        territories: &dyn TerritoryQueries,
    ) -> bool {
        let Some(objective) = objective else {
            warn!(game = %game.id, %player, "player has no objective");
            return false;
        };
        match self.check(objective, game, player, territories) {
            Ok(achieved) => achieved,
            Err(e) => {
                warn!(game = %game.id, %player, error = %e, "objective could not be evaluated");
                false
            }
        }
    }

    fn check(
        &self,
        objective: &Objective,
        game: &Game,
        player: PlayerId,
        territories: &dyn TerritoryQueries,
    ) -> Result<bool, GatewayError> {
        match &objective.kind {
            ObjectiveKind::Common => self.holds_enough(game, player, territories),
            ObjectiveKind::Occupation { continents } => {
                if continents.is_empty() {
                    warn!(objective = %objective.id, "occupation objective lists no continents");
                    return Ok(false);
                }
                for continent in continents {
                    if !territories.controls_continent(game.id, player, continent)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            ObjectiveKind::Destruction { color } => Ok(game
                .players_with_color(*color)
                .all(|p| p.status == PlayerStatus::Eliminated)),
        }
    }

    fn holds_enough(
        &self,
        game: &Game,
        player: PlayerId,
        territories: &dyn TerritoryQueries,
    ) -> Result<bool, GatewayError> {
        let held = territories.owned_by(game.id, player)?.len();
        Ok(held >= self.common_territory_target)
    }

    fn territory_progress(
        &self,
        game: &Game,
        player: PlayerId,
        territories: &dyn TerritoryQueries,
    ) -> Result<ObjectiveProgress, GatewayError> {
        territories
            .owned_by(game.id, player)
            .map(|owned| ObjectiveProgress::Territories {
                held: owned.len(),
                target: self.common_territory_target,
            })
    }

    /// Progress of `player` toward `objective`.
    pub fn progress(
        &self,
        objective: Option<&Objective>,
        game: &Game,
        player: PlayerId,
        territories: &dyn TerritoryQueries,
    ) -> ObjectiveProgress {
        let Some(objective) = objective else {
            return ObjectiveProgress::Unassigned;
        };
        let measured = match &objective.kind {
            ObjectiveKind::Common => self.territory_progress(game, player, territories),
            ObjectiveKind::Occupation { continents } => continents
                .iter()
                .try_fold(0_usize, |held, continent| {
                    territories
                        .controls_continent(game.id, player, continent)
                        .map(|owned| if owned { held.saturating_add(1) } else { held })
                })
                .map(|controlled| ObjectiveProgress::Continents {
                    controlled,
                    required: continents.len(),
                }),
            ObjectiveKind::Destruction { .. } => Ok(ObjectiveProgress::Destruction {
                eliminated: self.is_achieved(Some(objective), game, player, territories),
            }),
        };
        measured.unwrap_or_else(|e| {
            warn!(game = %game.id, %player, error = %e, "objective progress unavailable");
            ObjectiveProgress::Unavailable
        })
    }

    /// The first active player, in seat order, whose objective is achieved.
    pub fn find_winner<'g>(
        &self,
        game: &'g Game,
        territories: &dyn TerritoryQueries,
    ) -> Option<&'g Player> {
        let winner = game.players.iter().filter(|p| p.is_active()).find(|p| {
            self.is_achieved(p.objective.as_ref(), game, p.id, territories)
        });
        if let Some(player) = winner {
            info!(game = %game.id, player = %player.id, name = %player.display_name, "objective achieved");
        }
        winner
    }
}

/// Deal objectives from a shuffled copy of `pool`, round-robin in seat order.
/// Players that already hold an objective keep it. Returns how many players
/// received one.
///
/// # Errors
///
/// Returns [`ObjectiveError::EmptyPool`] when `pool` is empty.
pub fn assign_objectives<R: Rng + ?Sized>(
    players: &mut [Player],
    pool: &[Objective],
    rng: &mut R,
) -> Result<usize, ObjectiveError> {
    if pool.is_empty() {
        return Err(ObjectiveError::EmptyPool);
    }
    let mut deck = pool.to_vec();
    deck.shuffle(rng);

    let mut dealt = 0_usize;
    for (seat, player) in players.iter_mut().enumerate() {
        if player.objective.is_some() {
            continue;
        }
        let card = seat.checked_rem(deck.len()).and_then(|i| deck.get(i));
        if let Some(card) = card {
            debug!(player = %player.id, objective = %card.id, "objective dealt");
            player.objective = Some(card.clone());
            dealt = dealt.saturating_add(1);
        }
    }
    Ok(dealt)
}
