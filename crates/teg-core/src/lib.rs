//! Turn orchestration, objective evaluation and bot policy for the TEG
//! engine.
//!
//! The crate never owns the board. It reads and mutates game state through
//! the gateway traits in [`gateway`], which the host implements.
//!
//! # Modules
//!
//! - [`turn`] -- Plays one bot turn according to the game's coarse state
//! - [`phase`] -- Turn-phase cursor pushing phase changes to the host
//! - [`bot`] -- Table-driven bot policy for every tier and disposition
//! - [`objective`] -- Secret objective evaluation, progress, winner detection
//! - [`gateway`] -- Traits for the collaborators that own the board
//! - [`outcome`] -- Per-sub-action outcomes reported back to the caller
//! - [`telemetry`] -- Best-effort telemetry sink
//! - [`config`] -- YAML configuration
//! - [`error`] -- Gateway errors

pub mod bot;
pub mod config;
pub mod error;
pub mod gateway;
pub mod objective;
pub mod outcome;
pub mod phase;
pub mod telemetry;
pub mod turn;

pub use bot::{BotExecutor, BotParams, BotRoster, ConfiguredBot, ObjectiveFocus, TierParams};
pub use config::{ConfigError, TegConfig};
pub use error::GatewayError;
pub use gateway::{
    CombatGateway, FortificationGateway, GameStateGateway, Gateways, InitialPlacementGateway,
    ReinforcementGateway, TerritoryQueries,
};
pub use objective::{ObjectiveEvaluator, ObjectiveProgress, assign_objectives};
pub use outcome::{AttackOutcome, FortifyOutcome, PlacementOutcome, SkipReason};
pub use phase::PhaseCursor;
pub use telemetry::TelemetrySink;
pub use turn::{TurnReport, run_turn};
