//! Asynchronous abstraction for sourcing combat decisions.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with scripted fixtures, random play or AI policies.
use async_trait::async_trait;
use despair_core::{ActionKind, GameState};

use super::errors::{Result, RuntimeError};

/// Trait for choosing actions based on the current game state.
///
/// Different implementations can handle:
/// - Random play
/// - Greedy stress-driven AI
/// - Scripted/replayed choices
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Index into [`GameState::legal_actions`] for the current attacker.
    async fn pick_action(&self, state: &GameState) -> Result<usize>;

    /// Destination slot for an in-flight MOVE, or `None` to cancel it.
    async fn pick_slot(&self, state: &GameState) -> Result<Option<usize>>;
}

/// A provider that always passes and never moves.
/// Useful for testing or as a fallback.
pub struct PassActionProvider;

#[async_trait]
impl ActionProvider for PassActionProvider {
    async fn pick_action(&self, state: &GameState) -> Result<usize> {
        state
            .legal_actions()
            .iter()
            .position(|action| action.kind == ActionKind::Pass)
            .ok_or(RuntimeError::NoAttacker)
    }

    async fn pick_slot(&self, _state: &GameState) -> Result<Option<usize>> {
        Ok(None)
    }
}
