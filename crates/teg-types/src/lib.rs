//! Shared type definitions for the TEG bot engine.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the web client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for games, players, territories, objectives
//! - [`enums`] -- Game states, turn phases, colours, bot tiers, event kinds
//! - [`structs`] -- Territories, players, bot profiles, objectives, games
//! - [`actions`] -- Placement plans, attack and fortify orders, combat results
//! - [`telemetry`] -- Events emitted while a bot plays
//! - [`error`] -- Objective decoding errors

pub mod actions;
pub mod enums;
pub mod error;
pub mod ids;
pub mod structs;
pub mod telemetry;

// Re-export all public types at crate root for convenience.
pub use actions::{ArmyPlan, AttackOrder, CombatResult, FortifyOrder, ReinforcementStatus};
pub use enums::{
    BotLevel, BotStrategy, EventType, GameState, ObjectiveType, PlayerColor, PlayerStatus,
    TurnPhase,
};
pub use error::ObjectiveError;
pub use ids::{GameId, ObjectiveId, PlayerId, TerritoryId};
pub use structs::{
    BotProfile, Game, Objective, ObjectiveKind, Player, Territory, UNKNOWN_PLAYER,
};
pub use telemetry::{TelemetryEvent, TelemetryRecord};
