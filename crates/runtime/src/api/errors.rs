//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules engine, session setup and action providers
//! so clients can bubble them up with consistent context.
use std::fmt;

use despair_core::{GameEngineError, InitializationError, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no combatant is waiting for a decision")]
    NoAttacker,

    #[error("{name} has no active action")]
    NoActiveActions { name: String },

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("scripted provider ran out of choices")]
    ScriptExhausted,

    #[error("scripted provider expected {expected} choice next")]
    ScriptMismatch { expected: &'static str },

    #[error(transparent)]
    Engine(#[from] GameEngineError),

    #[error("failed to initialize game state")]
    InitialState(#[from] InitializationError),
}

/// Which side a provider decides for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Hero,
    Enemy,
}

impl From<Side> for ProviderKind {
    fn from(side: Side) -> Self {
        match side {
            Side::Hero => ProviderKind::Hero,
            Side::Enemy => ProviderKind::Enemy,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Hero => "hero",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
