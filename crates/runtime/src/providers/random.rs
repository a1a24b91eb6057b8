//! Uniformly random play.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::Mutex;

use despair_core::GameState;

use crate::api::{ActionProvider, Result, RuntimeError};

/// Picks a random active action, and a random destination when moving.
pub struct RandomProvider {
    rng: Mutex<StdRng>,
}

impl RandomProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionProvider for RandomProvider {
    async fn pick_action(&self, state: &GameState) -> Result<usize> {
        let active: Vec<usize> = state
            .legal_actions()
            .iter()
            .enumerate()
            .filter(|(_, action)| action.active)
            .map(|(index, _)| index)
            .collect();

        let mut rng = self.rng.lock().await;
        active.choose(&mut *rng).copied().ok_or_else(|| {
            let name = state
                .current_attacker()
                .map(|(attacker, _)| attacker.name.clone())
                .unwrap_or_default();
            RuntimeError::NoActiveActions { name }
        })
    }

    async fn pick_slot(&self, state: &GameState) -> Result<Option<usize>> {
        let Some(targets) = state
            .move_action_index()
            .and_then(|index| state.targets_for(index))
        else {
            return Ok(None);
        };

        let mut rng = self.rng.lock().await;
        Ok(targets.choose(&mut *rng).copied())
    }
}
