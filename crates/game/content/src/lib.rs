//! Static content and configuration for Dungeon Despair.
//!
//! This crate houses the built-in presets and the TOML loader for
//! [`GameConfig`](despair_core::GameConfig):
//! - the starting party of four heroes
//! - a preset dungeon of hostile areas
//! - game configuration (data-driven via TOML)
//!
//! Presets are plain constructors over `despair-core` builders; drivers inject
//! them into a [`GameState`](despair_core::GameState) and never mutate them here.

pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::{preset_dungeon, preset_session, starting_party};

#[cfg(feature = "loaders")]
pub use loaders::ConfigLoader;
