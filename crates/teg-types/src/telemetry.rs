//! Telemetry records emitted while a bot plays.
//!
//! Each [`TelemetryEvent`] carries the game, the acting player and the turn
//! it happened in. The host stamps it into a [`TelemetryRecord`] when it is
//! stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::EventType;
use crate::ids::{GameId, PlayerId};

/// A telemetry event, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TelemetryEvent {
    /// A bot turn began.
    TurnStarted {
        /// Game being played.
        game: GameId,
        /// Acting player.
        player: PlayerId,
        /// Turn number.
        turn: u32,
    },
    /// A bot turn ended, whatever happened in between.
    TurnEnded {
        /// Game being played.
        game: GameId,
        /// Acting player.
        player: PlayerId,
        /// Turn number.
        turn: u32,
    },
    /// An attack was resolved.
    AttackPerformed {
        /// Game being played.
        game: GameId,
        /// Acting player.
        player: PlayerId,
        /// Turn number.
        turn: u32,
        /// Attacking territory name.
        from: String,
        /// Defending territory name.
        to: String,
        /// Armies committed.
        armies: u32,
        /// Whether the defender fell.
        conquered: bool,
    },
    /// An attack conquered its target.
    TerritoryConquered {
        /// Game being played.
        game: GameId,
        /// Acting player.
        player: PlayerId,
        /// Turn number.
        turn: u32,
        /// Name of the conquered territory.
        territory: String,
        /// Name of the territory the attack came from.
        from: String,
    },
    /// Armies were placed on a territory.
    ReinforcementsPlaced {
        /// Game being played.
        game: GameId,
        /// Acting player.
        player: PlayerId,
        /// Turn number.
        turn: u32,
        /// Reinforced territory name.
        territory: String,
        /// Armies placed.
        armies: u32,
        /// Armies on the territory after placement.
        total_armies: u32,
    },
    /// Armies moved between owned territories.
    FortificationPerformed {
        /// Game being played.
        game: GameId,
        /// Acting player.
        player: PlayerId,
        /// Turn number.
        turn: u32,
        /// Source territory name.
        from: String,
        /// Destination territory name.
        to: String,
        /// Armies moved.
        armies: u32,
    },
}

impl TelemetryEvent {
    /// Kind of this event.
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::TurnStarted { .. } => EventType::TurnStarted,
            Self::TurnEnded { .. } => EventType::TurnEnded,
            Self::AttackPerformed { .. } => EventType::AttackPerformed,
            Self::TerritoryConquered { .. } => EventType::TerritoryConquered,
            Self::ReinforcementsPlaced { .. } => EventType::ReinforcementsPlaced,
            Self::FortificationPerformed { .. } => EventType::FortificationPerformed,
        }
    }

    /// Player the event belongs to.
    pub const fn player(&self) -> PlayerId {
        match self {
            Self::TurnStarted { player, .. }
            | Self::TurnEnded { player, .. }
            | Self::AttackPerformed { player, .. }
            | Self::TerritoryConquered { player, .. }
            | Self::ReinforcementsPlaced { player, .. }
            | Self::FortificationPerformed { player, .. } => *player,
        }
    }
}

/// A stored telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TelemetryRecord {
    /// The event.
    pub event: TelemetryEvent,
    /// When the host stored it.
    pub recorded_at: DateTime<Utc>,
}
