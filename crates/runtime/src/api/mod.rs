//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the simulation loop and provider implementations stay focused on driving
//! the engine.

pub mod errors;
pub mod providers;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{ActionProvider, PassActionProvider};
