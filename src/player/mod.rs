//! The shark the player controls.

pub mod logic;
pub mod types;

pub use types::{Player, PlayerStatus, PLAYER_HEIGHT, PLAYER_WIDTH, RUNNING_BOXES};
