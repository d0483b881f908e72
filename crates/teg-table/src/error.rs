//! Error types for the `teg-table` crate.
//!
//! Board construction returns [`TableError`]. Commands issued through the
//! gateways report [`GatewayError`] instead; [`TableError`] converts into it.

use teg_core::GatewayError;

/// Errors that can occur while building or seating a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A territory with this name already exists.
    #[error("duplicate territory: {name}")]
    DuplicateTerritory {
        /// Country name.
        name: String,
    },

    /// No territory has this name.
    #[error("unknown territory: {name}")]
    UnknownTerritory {
        /// Country name.
        name: String,
    },

    /// No continent has this name.
    #[error("unknown continent: {name}")]
    UnknownContinent {
        /// Continent name.
        name: String,
    },

    /// A territory cannot border itself.
    #[error("territory {name} cannot border itself")]
    SelfBorder {
        /// Country name.
        name: String,
    },

    /// Territories cannot be dealt to an empty table.
    #[error("no players seated")]
    NoPlayers,
}

impl From<TableError> for GatewayError {
    fn from(error: TableError) -> Self {
        Self::rejected(error.to_string())
    }
}
