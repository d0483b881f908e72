//! Turn orchestration.
//!
//! A bot turn is bracketed by `TurnStarted` and `TurnEnded` telemetry. In
//! between, the game's coarse state picks the sub-actions:
//!
//! | State            | Sub-actions                                              |
//! |------------------|----------------------------------------------------------|
//! | `Reinforcement5` | initial placement of 5 armies                            |
//! | `Reinforcement3` | initial placement of 3 armies, then phase to `Attack`     |
//! | `HostilityOnly`  | attack, advance, fortify, advance                        |
//! | `NormalPlay`     | reinforce, advance, attack, advance, fortify, advance    |
//! | anything else    | nothing                                                  |
//!
//! Every sub-action returns an outcome rather than an error, so the closing
//! bracket is always reached.

use teg_types::{Game, GameState, Player, TelemetryEvent, TurnPhase};
use tracing::{debug, info};

use crate::bot::ConfiguredBot;
use crate::gateway::Gateways;
use crate::outcome::{AttackOutcome, FortifyOutcome, PlacementOutcome};
use crate::phase::PhaseCursor;
use crate::telemetry::emit;

/// What happened during one bot turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Coarse state the turn was played in.
    pub state: GameState,
    /// Initial placement, in placement rounds.
    pub initial_placement: Option<PlacementOutcome>,
    /// Reinforcement, in normal play.
    pub reinforcement: Option<PlacementOutcome>,
    /// Attack sequence.
    pub attack: Option<AttackOutcome>,
    /// Fortify move.
    pub fortify: Option<FortifyOutcome>,
    /// Phases entered, in order.
    pub phases: Vec<TurnPhase>,
}

impl TurnReport {
    const fn empty(state: GameState) -> Self {
        Self {
            state,
            initial_placement: None,
            reinforcement: None,
            attack: None,
            fortify: None,
            phases: Vec::new(),
        }
    }
}

/// Play one turn for `bot`.
pub fn run_turn(executor: &ConfiguredBot, bot: &Player, game: &Game, gw: &Gateways<'_>) -> TurnReport {
    let level = executor.params().level;
    info!(
        game = %game.id,
        player = %bot.id,
        name = %game.display_name(bot.id),
        ?level,
        state = ?game.state,
        turn = game.turn,
        "bot turn started"
    );
    emit(
        gw.telemetry,
        TelemetryEvent::TurnStarted {
            game: game.id,
            player: bot.id,
            turn: game.turn,
        },
    );

    let mut report = TurnReport::empty(game.state);
    let mut cursor = PhaseCursor::new(game.id, game.phase);
    match game.state {
        GameState::Reinforcement5 | GameState::Reinforcement3 => {
            let allotment = game.state.initial_allotment().unwrap_or(0);
            report.initial_placement =
                Some(executor.place_initial_armies(bot, game, gw, allotment));
            if game.state == GameState::Reinforcement3 {
                let _ = cursor.jump_to(gw.game_state, TurnPhase::Attack);
            }
        }
        GameState::HostilityOnly => {
            report.attack = Some(executor.attack(bot, game, gw));
            let _ = cursor.advance(gw.game_state);
            report.fortify = Some(executor.fortify(bot, game, gw));
            let _ = cursor.advance(gw.game_state);
        }
        GameState::NormalPlay => {
            report.reinforcement = Some(executor.reinforce(bot, game, gw));
            let _ = cursor.advance(gw.game_state);
            report.attack = Some(executor.attack(bot, game, gw));
            let _ = cursor.advance(gw.game_state);
            report.fortify = Some(executor.fortify(bot, game, gw));
            let _ = cursor.advance(gw.game_state);
        }
        GameState::WaitingForPlayers | GameState::Paused | GameState::Finished => {
            debug!(game = %game.id, state = ?game.state, "no bot action in this state");
        }
    }
    report.phases = cursor.into_entered();

    emit(
        gw.telemetry,
        TelemetryEvent::TurnEnded {
            game: game.id,
            player: bot.id,
            turn: game.turn,
        },
    );
    info!(
        game = %game.id,
        player = %bot.id,
        attacks = report.attack.as_ref().map_or(0, |a| a.attacks().len()),
        phases = report.phases.len(),
        "bot turn ended"
    );
    report
}
