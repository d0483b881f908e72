//! Error types for the `teg-types` crate.

use crate::enums::ObjectiveType;

/// Errors raised while decoding or dealing objectives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectiveError {
    /// A colour name did not match any seat colour.
    #[error("unknown player color: {value:?}")]
    UnknownColor {
        /// The rejected text.
        value: String,
    },

    /// The stored objective lacks the data its type requires.
    #[error("{objective_type:?} objective is missing its target data")]
    MissingTarget {
        /// Type of the malformed objective.
        objective_type: ObjectiveType,
    },

    /// Objectives were requested from an empty pool.
    #[error("objective pool is empty")]
    EmptyPool,
}
