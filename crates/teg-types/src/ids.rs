//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity on the board has a strongly-typed ID so that a territory
//! identifier can never be passed where a player identifier is expected.
//! All IDs use UUID v7 (time-ordered).

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a game (one match around one board).
    GameId
}

define_id! {
    /// Unique identifier for a seated player, human or bot.
    PlayerId
}

define_id! {
    /// Unique identifier for a territory (country) on the board.
    TerritoryId
}

define_id! {
    /// Unique identifier for a secret objective card.
    ObjectiveId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let player = PlayerId::new();
        let territory = TerritoryId::new();
        assert_ne!(player.into_inner(), Uuid::nil());
        assert_ne!(territory.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrips_through_json() {
        let id = GameId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        let back: Result<GameId, _> = serde_json::from_str(&json);
        assert!(back.is_ok());
        assert_eq!(back.ok(), Some(id));
    }
}
