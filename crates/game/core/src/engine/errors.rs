//! Error types for the combat and game engines.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatPhase, CombatantId, GamePhase};

/// Invalid combat input. State is left untouched when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("no encounter is in progress")]
    NoCombat,

    #[error("expected {expected} but combat is in {actual}")]
    WrongPhase {
        expected: CombatPhase,
        actual: CombatPhase,
    },

    #[error("action {index} does not exist (attacker has {len} actions)")]
    ActionOutOfRange { index: usize, len: usize },

    #[error("{name} cannot be used right now")]
    InactiveAction { index: usize, name: String },

    #[error("{name} can only move within its own lineup")]
    MoveOffSide { name: String, slot: usize },

    #[error("{name} is already in slot {slot}")]
    MoveOntoSelf { name: String, slot: usize },

    #[error("combatant {0} is in the initiative order but not positioned")]
    MissingAttacker(CombatantId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InactiveAction { .. } | MoveOffSide { .. } | MoveOntoSelf { .. } => {
                ErrorSeverity::Recoverable
            }
            NoCombat | WrongPhase { .. } | ActionOutOfRange { .. } => ErrorSeverity::Validation,
            MissingAttacker(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            NoCombat => "COMBAT_NOT_IN_PROGRESS",
            WrongPhase { .. } => "COMBAT_WRONG_PHASE",
            ActionOutOfRange { .. } => "COMBAT_ACTION_OUT_OF_RANGE",
            InactiveAction { .. } => "COMBAT_INACTIVE_ACTION",
            MoveOffSide { .. } => "COMBAT_MOVE_OFF_SIDE",
            MoveOntoSelf { .. } => "COMBAT_MOVE_ONTO_SELF",
            MissingAttacker(_) => "COMBAT_MISSING_ATTACKER",
        }
    }
}

/// Orchestrator misuse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameEngineError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("area {index} does not exist (dungeon has {len} areas)")]
    UnknownArea { index: usize, len: usize },

    #[error("cannot do that while {phase}")]
    Busy { phase: GamePhase },

    #[error("expected {expected} but game is {actual}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("no hero in slot {slot}")]
    InvalidHero { slot: usize },

    #[error("the current area has nothing of that kind left")]
    NothingToSettle,
}

impl GameError for GameEngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(inner) => inner.severity(),
            Self::InvalidHero { .. } => ErrorSeverity::Recoverable,
            Self::UnknownArea { .. } | Self::Busy { .. } | Self::WrongPhase { .. } => {
                ErrorSeverity::Validation
            }
            Self::NothingToSettle => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Combat(inner) => inner.error_code(),
            Self::UnknownArea { .. } => "GAME_UNKNOWN_AREA",
            Self::Busy { .. } => "GAME_BUSY",
            Self::WrongPhase { .. } => "GAME_WRONG_PHASE",
            Self::InvalidHero { .. } => "GAME_INVALID_HERO",
            Self::NothingToSettle => "GAME_NOTHING_TO_SETTLE",
        }
    }
}
