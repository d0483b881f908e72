//! Core entity structs: territories, players, bot profiles, objectives and
//! the game itself.
//!
//! These are the read-side views the bot engine works from. The host owns
//! the authoritative copies; every mutation goes through a gateway.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    BotLevel, BotStrategy, GameState, ObjectiveType, PlayerColor, PlayerStatus, TurnPhase,
};
use crate::error::ObjectiveError;
use crate::ids::{GameId, ObjectiveId, PlayerId, TerritoryId};

/// Display name used whenever a player cannot be resolved.
pub const UNKNOWN_PLAYER: &str = "Unknown player";

// ---------------------------------------------------------------------------
// Territory
// ---------------------------------------------------------------------------

/// A country on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Territory {
    /// Unique identifier.
    pub id: TerritoryId,
    /// Country name, unique within a game.
    pub name: String,
    /// Current owner, `None` before the territories are dealt.
    pub owner: Option<PlayerId>,
    /// Armies stationed here.
    pub armies: u32,
    /// Name of the continent this country belongs to.
    pub continent: String,
    /// Adjacent countries.
    pub neighbors: BTreeSet<TerritoryId>,
    /// Turn in which this territory last changed hands by conquest.
    pub last_conquered_turn: Option<u32>,
}

impl Territory {
    /// Whether the given player owns this territory.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Whether enough armies are stationed here to launch an attack.
    /// One army must always stay behind.
    pub const fn can_attack(&self) -> bool {
        self.armies >= 2
    }

    /// Armies that could leave this territory while keeping one behind.
    pub const fn movable_armies(&self) -> u32 {
        self.armies.saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Players and bots
// ---------------------------------------------------------------------------

/// Skill tier and disposition of a bot seat. Fixed for the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BotProfile {
    /// Name shown at the table.
    pub name: String,
    /// Skill tier.
    pub level: BotLevel,
    /// Disposition.
    pub strategy: BotStrategy,
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,
    /// Name shown at the table.
    pub display_name: String,
    /// Seat colour.
    pub color: PlayerColor,
    /// Whether the player is still in the game.
    pub status: PlayerStatus,
    /// Present for bot seats only.
    pub bot_profile: Option<BotProfile>,
    /// Secret objective, dealt once per game.
    pub objective: Option<Objective>,
}

impl Player {
    /// Whether this seat is played by a bot.
    pub const fn is_bot(&self) -> bool {
        self.bot_profile.is_some()
    }

    /// Whether the player is still in the game.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}

// ---------------------------------------------------------------------------
// Objectives
// ---------------------------------------------------------------------------

/// What a secret objective asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum ObjectiveKind {
    /// Hold the common territory target.
    Common,
    /// Control every listed continent.
    Occupation {
        /// Continent names. An empty list never counts as achieved.
        continents: Vec<String>,
    },
    /// Eliminate every player of a colour.
    Destruction {
        /// Colour to eliminate.
        color: PlayerColor,
    },
}

/// A secret objective card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Objective {
    /// Unique identifier.
    pub id: ObjectiveId,
    /// Card text.
    pub description: String,
    /// Structured goal.
    pub kind: ObjectiveKind,
}

impl Objective {
    /// Decode an objective from its stored form: a type tag plus free-form
    /// target data (comma-separated continents, or a colour name).
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::MissingTarget`] when an occupation or
    /// destruction objective has no target data, and
    /// [`ObjectiveError::UnknownColor`] when the destruction colour does not
    /// parse.
    pub fn from_record(
        id: ObjectiveId,
        objective_type: ObjectiveType,
        description: &str,
        target_data: Option<&str>,
    ) -> Result<Self, ObjectiveError> {
        let missing = || ObjectiveError::MissingTarget { objective_type };
        let kind = match objective_type {
            ObjectiveType::Common => ObjectiveKind::Common,
            ObjectiveType::Occupation => ObjectiveKind::Occupation {
                continents: target_data
                    .ok_or_else(missing)?
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect(),
            },
            ObjectiveType::Destruction => {
                let raw = target_data
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty())
                    .ok_or_else(missing)?;
                ObjectiveKind::Destruction {
                    color: raw.parse()?,
                }
            }
        };
        Ok(Self {
            id,
            description: description.to_owned(),
            kind,
        })
    }

    /// The type tag of this objective.
    pub const fn objective_type(&self) -> ObjectiveType {
        match self.kind {
            ObjectiveKind::Common => ObjectiveType::Common,
            ObjectiveKind::Occupation { .. } => ObjectiveType::Occupation,
            ObjectiveKind::Destruction { .. } => ObjectiveType::Destruction,
        }
    }

    /// Re-encode the target data in its stored form.
    pub fn target_data(&self) -> Option<String> {
        match &self.kind {
            ObjectiveKind::Common => None,
            ObjectiveKind::Occupation { continents } => Some(continents.join(",")),
            ObjectiveKind::Destruction { color } => Some(color.as_str().to_owned()),
        }
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Snapshot of a game as seen by the bot engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Game {
    /// Unique identifier.
    pub id: GameId,
    /// Short join code shown in the lobby.
    pub code: String,
    /// Coarse state.
    pub state: GameState,
    /// Phase of the current turn.
    pub phase: TurnPhase,
    /// Turn counter, starting at 1.
    pub turn: u32,
    /// Seats in turn order.
    pub players: Vec<Player>,
}

impl Game {
    /// Look up a seated player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Display name of a player, or [`UNKNOWN_PLAYER`] when the seat cannot
    /// be resolved.
    pub fn display_name(&self, id: PlayerId) -> &str {
        self.player(id)
            .map_or(UNKNOWN_PLAYER, |p| p.display_name.as_str())
    }

    /// Players of the given colour, in seat order.
    pub fn players_with_color(&self, color: PlayerColor) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.color == color)
    }
}
