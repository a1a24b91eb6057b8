//! Common error infrastructure for despair-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `MaskError`, `CombatError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No I/O**: Nothing here allocates beyond the error payload itself

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Player input that can be retried with a different choice
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Malformed content; the operation cannot proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - pick another action or slot.
    ///
    /// Examples: inactive action selected, move onto own slot
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: action index out of range, entering an unknown area
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: initiative entry without a positioned combatant
    Internal,

    /// Fatal error - content violates a data invariant.
    ///
    /// Examples: position mask of the wrong length
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all despair-core errors.
///
/// This trait provides a uniform interface for error classification
/// across all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
