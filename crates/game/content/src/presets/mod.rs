//! Built-in scenario content.
//!
//! The simulator and the integration tests start from these presets when no
//! scenario is supplied.

mod dungeon;
mod party;

pub use dungeon::preset_dungeon;
pub use party::starting_party;

use despair_core::{GameState, InitializationError};

/// The starting party dropped into the preset dungeon.
pub fn preset_session(seed: u64) -> Result<GameState, InitializationError> {
    GameState::new(starting_party(), preset_dungeon(), seed)
}
