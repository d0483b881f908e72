//! In-memory TEG host for the bot engine.
//!
//! This crate owns what `teg-core` only reads through its gateways: the
//! territory graph, dice, the objective deck and the game loop.
//!
//! # Modules
//!
//! - [`board`] -- Territory graph with continents and symmetric borders
//! - [`classic`] -- The classic 50-country map
//! - [`dice`] -- Dice rolls and battle resolution
//! - [`objectives`] -- The secret objective deck for the classic map
//! - [`table`] -- [`Table`], which implements every gateway over a [`Board`]
//! - [`session`] -- Game loop from initial placement to a winner
//! - [`error`] -- Board construction errors

pub mod board;
pub mod classic;
pub mod dice;
pub mod error;
pub mod objectives;
pub mod session;
pub mod table;

pub use board::{Board, Continent};
pub use classic::classic;
pub use error::TableError;
pub use objectives::{classic_objectives, deal_classic_objectives};
pub use session::{GameEndReason, GameResult, run_game};
pub use table::Table;
