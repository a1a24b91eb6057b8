//! Session construction errors.

use crate::error::{ErrorSeverity, GameError};

use super::types::Side;

/// Errors raised while assembling a [`GameState`](super::GameState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("{side} lineup has {count} combatants (max: {max})")]
    LineupTooLarge { side: Side, count: usize, max: usize },

    #[error("{name} is tagged {found} but was placed in the {expected} lineup")]
    WrongSide {
        name: String,
        expected: Side,
        found: Side,
    },

    #[error("{name} has no attacks")]
    NoAttacks { name: String },
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LineupTooLarge { .. } => "INIT_LINEUP_TOO_LARGE",
            Self::WrongSide { .. } => "INIT_WRONG_SIDE",
            Self::NoAttacks { .. } => "INIT_NO_ATTACKS",
        }
    }
}
