//! Engine binary for the TEG bot table.
//!
//! Seats the configured bots on the classic map and plays one game to the
//! end, logging every turn through the bot engine's telemetry.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `teg-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the classic board (50 countries, 6 continents)
//! 4. Seat the configured bots and deal the territories
//! 5. Deal secret objectives from the seeded deck
//! 6. Play placement rounds and normal play until a winner or the round limit
//! 7. Log the result and every player's objective progress

mod error;

use std::path::Path;

use teg_core::{BotRoster, ObjectiveEvaluator, TegConfig};
use teg_table::{GameResult, Table, classic, deal_classic_objectives, run_game};
use teg_types::{
    BotProfile, Game, GameId, GameState, Player, PlayerId, PlayerStatus, TurnPhase,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

const CONFIG_PATH: &str = "teg-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or the table
/// cannot be seated.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = Path::new(CONFIG_PATH);
    let found = config_path.exists();
    let config = load_config(config_path, found)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("teg-engine starting");
    if !found {
        info!("Config file not found, using defaults");
    }
    info!(
        code = %config.game.code,
        seed = config.game.seed,
        max_rounds = config.game.max_rounds,
        seats = config.game.seats.len(),
        "Configuration loaded"
    );

    // 3-5. Build the board, seat the bots, deal territories and objectives.
    let table = seat_table(&config)?;

    // 6. Play.
    let roster = BotRoster::new(config.bots.clone(), config.dispositions.clone());
    let evaluator = ObjectiveEvaluator::new(config.objectives.common_territory_target);
    let result = run_game(&table, &roster, evaluator, config.game.max_rounds);

    // 7. Log results.
    log_game_end(&table, evaluator, &result);

    info!(
        end_reason = ?result.end_reason,
        turns = result.turns,
        "teg-engine shutdown complete"
    );

    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path, found: bool) -> Result<TegConfig, EngineError> {
    if found {
        Ok(TegConfig::from_file(path)?)
    } else {
        let mut config = TegConfig::default();
        config.game.apply_env_overrides();
        Ok(config)
    }
}

/// Build the classic board and seat the configured bots at it, with
/// territories and objectives dealt.
fn seat_table(config: &TegConfig) -> Result<Table, EngineError> {
    let board = classic()?;
    info!(
        territories = board.territory_count(),
        continents = board.continents().count(),
        "Classic board created"
    );

    let game = seat_players(config)?;
    let players = game.players.len();
    let table = Table::new(board, game, config.game.seed);
    table.deal_territories()?;
    info!(players, "Territories dealt");

    let dealt = table.update_game(|game, rng| deal_classic_objectives(&mut game.players, rng))?;
    info!(dealt, "Objectives dealt");

    Ok(table)
}

/// Build the game snapshot for the configured seats, in turn order.
fn seat_players(config: &TegConfig) -> Result<Game, EngineError> {
    if config.game.seats.is_empty() {
        return Err(EngineError::NoSeats);
    }
    let players = config
        .game
        .seats
        .iter()
        .map(|seat| Player {
            id: PlayerId::new(),
            display_name: seat.name.clone(),
            color: seat.color,
            status: PlayerStatus::Active,
            bot_profile: Some(BotProfile {
                name: seat.name.clone(),
                level: seat.level,
                strategy: seat.strategy,
            }),
            objective: None,
        })
        .collect();
    Ok(Game {
        id: GameId::new(),
        code: config.game.code.clone(),
        state: GameState::WaitingForPlayers,
        phase: TurnPhase::Reinforcement,
        turn: 0,
        players,
    })
}

fn log_game_end(table: &Table, evaluator: ObjectiveEvaluator, result: &GameResult) {
    let game = table.game();
    match result.end_reason.winner().and_then(|id| game.player(id)) {
        Some(winner) => info!(
            name = %winner.display_name,
            color = %winner.color,
            rounds = result.rounds,
            "Game won"
        ),
        None => info!(rounds = result.rounds, "Game ended without a winner"),
    }

    for player in &game.players {
        let held = table.with_board(|board| board.owned_by(player.id).len());
        let progress = evaluator.progress(player.objective.as_ref(), &game, player.id, table);
        info!(
            name = %player.display_name,
            status = ?player.status,
            territories = held,
            objective = player.objective.as_ref().map_or("none", |o| o.description.as_str()),
            %progress,
            "Final standing"
        );
    }
}
