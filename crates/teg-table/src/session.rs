//! Game loop for an all-bot table.
//!
//! [`run_game`] drives a dealt table from the two initial placement rounds
//! through normal play:
//!
//! - **Placement**: one `Reinforcement5` round, then one `Reinforcement3` round
//! - **Normal play**: rounds in seat order, eliminated seats skipped
//! - **Winner check**: after every turn, secret objectives first, then last
//!   player standing
//! - **Round limit**: the game is called after `max_rounds` normal rounds
//!
//! Each turn starts with [`Table::begin_turn`], which puts the phase back to
//! `Reinforcement` and lifts the per-turn limits.

use teg_core::{BotExecutor, BotRoster, ConfiguredBot, Gateways, ObjectiveEvaluator};
use teg_types::{GameState, PlayerId};
use tracing::{debug, info};

use crate::table::Table;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// A player fulfilled their secret objective.
    ObjectiveAchieved {
        /// The winner.
        winner: PlayerId,
    },
    /// Every other player was eliminated.
    LastStanding {
        /// The survivor.
        winner: PlayerId,
    },
    /// The round limit was reached with no winner.
    RoundLimit,
}

impl GameEndReason {
    /// The winning player, if any.
    pub const fn winner(&self) -> Option<PlayerId> {
        match self {
            Self::ObjectiveAchieved { winner } | Self::LastStanding { winner } => Some(*winner),
            Self::RoundLimit => None,
        }
    }
}

/// Result of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Why the game ended.
    pub end_reason: GameEndReason,
    /// Normal-play rounds started.
    pub rounds: u32,
    /// Bot turns played, placement rounds included.
    pub turns: u32,
}

/// Play a dealt table to the end.
///
/// Seats without a bot profile are skipped: this loop has nobody to wait on.
pub fn run_game(
    table: &Table,
    roster: &BotRoster,
    evaluator: ObjectiveEvaluator,
    max_rounds: u32,
) -> GameResult {
    let seats: Vec<(PlayerId, ConfiguredBot)> = table
        .game()
        .players
        .iter()
        .filter_map(|p| p.bot_profile.as_ref().map(|b| (p.id, roster.executor_for(b))))
        .collect();
    let gateways = Gateways::uniform(table);
    let mut turns: u32 = 0;

    info!(seats = seats.len(), max_rounds, "game starting");

    // --- Initial placement ---
    for state in [GameState::Reinforcement5, GameState::Reinforcement3] {
        table.set_state(state);
        for (id, executor) in &seats {
            table.begin_turn(0);
            let game = table.game();
            let Some(player) = game.player(*id) else {
                continue;
            };
            executor.execute_turn(player, &game, &gateways);
            turns = turns.saturating_add(1);
        }
    }

    // --- Normal play ---
    table.set_state(GameState::NormalPlay);
    for round in 1..=max_rounds {
        debug!(round, "round starting");
        for (id, executor) in &seats {
            table.begin_turn(round);
            let game = table.game();
            let Some(player) = game.player(*id).filter(|p| p.is_active()) else {
                continue;
            };
            executor.execute_turn(player, &game, &gateways);
            turns = turns.saturating_add(1);

            if let Some(end_reason) = check_end(table, evaluator) {
                table.set_state(GameState::Finished);
                info!(round, turns, ?end_reason, "game over");
                return GameResult {
                    end_reason,
                    rounds: round,
                    turns,
                };
            }
        }
    }

    table.set_state(GameState::Finished);
    info!(max_rounds, turns, "round limit reached");
    GameResult {
        end_reason: GameEndReason::RoundLimit,
        rounds: max_rounds,
        turns,
    }
}

fn check_end(table: &Table, evaluator: ObjectiveEvaluator) -> Option<GameEndReason> {
    let game = table.game();
    if let Some(winner) = evaluator.find_winner(&game, table) {
        return Some(GameEndReason::ObjectiveAchieved { winner: winner.id });
    }
    let mut active = game.players.iter().filter(|p| p.is_active());
    match (active.next(), active.next()) {
        (Some(survivor), None) => Some(GameEndReason::LastStanding {
            winner: survivor.id,
        }),
        _ => None,
    }
}
