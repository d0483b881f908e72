//! Enumeration types for the TEG bot engine.
//!
//! Coarse game states, the per-turn phase machine, player attributes, bot
//! profiles and telemetry event kinds. Wire names follow the web client's
//! `SCREAMING_SNAKE_CASE` convention.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ObjectiveError;

// ---------------------------------------------------------------------------
// Game flow
// ---------------------------------------------------------------------------

/// Coarse state of a game, above the per-turn phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum GameState {
    /// Lobby: seats are still being filled.
    WaitingForPlayers,
    /// First initial-placement round, 5 armies per player.
    #[serde(rename = "REINFORCEMENT_5")]
    Reinforcement5,
    /// Second initial-placement round, 3 armies per player.
    #[serde(rename = "REINFORCEMENT_3")]
    Reinforcement3,
    /// Attacks and fortification only, no reinforcement.
    HostilityOnly,
    /// Full turns: reinforcement, attack, fortify.
    NormalPlay,
    /// Game suspended by the host.
    Paused,
    /// Game over.
    Finished,
}

impl GameState {
    /// Armies each player places during an initial-placement round, or
    /// `None` when the state is not a placement round.
    pub const fn initial_allotment(self) -> Option<u32> {
        match self {
            Self::Reinforcement5 => Some(5),
            Self::Reinforcement3 => Some(3),
            Self::WaitingForPlayers
            | Self::HostilityOnly
            | Self::NormalPlay
            | Self::Paused
            | Self::Finished => None,
        }
    }
}

/// Phase within a single player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TurnPhase {
    /// Place reinforcement armies.
    Reinforcement,
    /// Launch attacks.
    Attack,
    /// Move armies between owned territories.
    Fortify,
    /// Turn finished, control passes to the next player.
    EndTurn,
}

impl TurnPhase {
    /// The phase that follows this one. The cycle wraps from
    /// [`EndTurn`](Self::EndTurn) back to [`Reinforcement`](Self::Reinforcement).
    pub const fn next(self) -> Self {
        match self {
            Self::Reinforcement => Self::Attack,
            Self::Attack => Self::Fortify,
            Self::Fortify => Self::EndTurn,
            Self::EndTurn => Self::Reinforcement,
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Whether a player is still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum PlayerStatus {
    /// Still holds territories and takes turns.
    Active,
    /// Lost every territory.
    Eliminated,
}

/// Seat colour. Destruction objectives name a colour, not a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum PlayerColor {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Black.
    Black,
    /// Magenta.
    Magenta,
}

impl PlayerColor {
    /// Every seat colour in table order.
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Black,
        Self::Magenta,
    ];

    /// Upper-case wire name, as stored in objective target data.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Blue => "BLUE",
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Black => "BLACK",
            Self::Magenta => "MAGENTA",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerColor {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ObjectiveError::UnknownColor {
                value: wanted.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Bots
// ---------------------------------------------------------------------------

/// Skill tier of a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum BotLevel {
    /// Simple greedy heuristics.
    Novice,
    /// Probability-gated attacks and threat-weighted reinforcement.
    Balanced,
    /// Objective-driven planning.
    Expert,
}

/// Disposition of a bot, modulating how readily it fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum BotStrategy {
    /// Attacks at the tier's base thresholds.
    Aggressive,
    /// Slightly more cautious than aggressive.
    Balanced,
    /// Attacks only on clearly favourable odds.
    Defensive,
}

// ---------------------------------------------------------------------------
// Objectives and telemetry
// ---------------------------------------------------------------------------

/// Kind of secret objective, as stored alongside its target data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum ObjectiveType {
    /// Hold a fixed number of territories.
    Common,
    /// Control every listed continent.
    Occupation,
    /// Eliminate every player of a colour.
    Destruction,
}

/// Kind of a telemetry record emitted while a bot plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum EventType {
    /// A bot turn began.
    TurnStarted,
    /// A bot turn ended.
    TurnEnded,
    /// An attack was resolved.
    AttackPerformed,
    /// An attack conquered its target.
    TerritoryConquered,
    /// Armies were placed on a territory.
    ReinforcementsPlaced,
    /// Armies moved between owned territories.
    FortificationPerformed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycle_wraps() {
        assert_eq!(TurnPhase::Reinforcement.next(), TurnPhase::Attack);
        assert_eq!(TurnPhase::Attack.next(), TurnPhase::Fortify);
        assert_eq!(TurnPhase::Fortify.next(), TurnPhase::EndTurn);
        assert_eq!(TurnPhase::EndTurn.next(), TurnPhase::Reinforcement);
    }

    #[test]
    fn only_placement_rounds_have_an_allotment() {
        assert_eq!(GameState::Reinforcement5.initial_allotment(), Some(5));
        assert_eq!(GameState::Reinforcement3.initial_allotment(), Some(3));
        assert_eq!(GameState::NormalPlay.initial_allotment(), None);
        assert_eq!(GameState::Finished.initial_allotment(), None);
    }

    #[test]
    fn color_parses_case_insensitively() {
        assert_eq!("red".parse::<PlayerColor>().ok(), Some(PlayerColor::Red));
        assert_eq!(" Magenta ".parse::<PlayerColor>().ok(), Some(PlayerColor::Magenta));
        assert!("purple".parse::<PlayerColor>().is_err());
    }

    #[test]
    fn wire_names_match_client() {
        let json = serde_json::to_string(&GameState::Reinforcement5).unwrap_or_default();
        assert_eq!(json, "\"REINFORCEMENT_5\"");
        let json = serde_json::to_string(&TurnPhase::EndTurn).unwrap_or_default();
        assert_eq!(json, "\"END_TURN\"");
    }
}
