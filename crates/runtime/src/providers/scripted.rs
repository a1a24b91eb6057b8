//! Replays a fixed sequence of choices.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use despair_core::GameState;

use crate::api::{ActionProvider, Result, RuntimeError};

/// One queued decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptedChoice {
    Action(usize),
    /// `None` cancels the move.
    Slot(Option<usize>),
}

/// FIFO of choices, consumed one per request.
///
/// Requests must arrive in the scripted order; asking for an action when a
/// slot is queued is an error.
pub struct ScriptedProvider {
    choices: Mutex<VecDeque<ScriptedChoice>>,
}

impl ScriptedProvider {
    pub fn new(choices: impl IntoIterator<Item = ScriptedChoice>) -> Self {
        Self {
            choices: Mutex::new(choices.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.choices.lock().await.len()
    }

    async fn next(&self) -> Result<ScriptedChoice> {
        self.choices
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted)
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn pick_action(&self, _state: &GameState) -> Result<usize> {
        match self.next().await? {
            ScriptedChoice::Action(index) => Ok(index),
            ScriptedChoice::Slot(_) => Err(RuntimeError::ScriptMismatch { expected: "a slot" }),
        }
    }

    async fn pick_slot(&self, _state: &GameState) -> Result<Option<usize>> {
        match self.next().await? {
            ScriptedChoice::Slot(slot) => Ok(slot),
            ScriptedChoice::Action(_) => Err(RuntimeError::ScriptMismatch {
                expected: "an action",
            }),
        }
    }
}
