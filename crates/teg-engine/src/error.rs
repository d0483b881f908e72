//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop a table from being
//! seated. Once play starts, gateway faults are folded into turn outcomes
//! and never reach `main`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: teg_core::ConfigError,
    },

    /// Board construction or dealing failed.
    #[error("table error: {source}")]
    Table {
        /// The underlying table error.
        #[from]
        source: teg_table::TableError,
    },

    /// The objective deck could not be built or dealt.
    #[error("objective error: {source}")]
    Objective {
        /// The underlying objective error.
        #[from]
        source: teg_types::ObjectiveError,
    },

    /// The configuration seats nobody.
    #[error("no seats configured")]
    NoSeats,
}
