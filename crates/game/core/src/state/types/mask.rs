//! Positional slot masks.
//!
//! Authored content encodes slot eligibility as four characters over `{X, O}`.
//! Masks are parsed once into [`PositionMask`], so the combat engine never
//! indexes a raw string.

use std::fmt;
use std::str::FromStr;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

const SLOTS: usize = GameConfig::MAX_SLOTS;

/// Malformed position mask found in content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    #[error("position mask must be {expected} characters long, got {actual} in {mask:?}")]
    WrongLength {
        mask: String,
        expected: usize,
        actual: usize,
    },

    #[error("position mask {mask:?} contains {found:?} at {index}; only 'X' and 'O' are allowed")]
    InvalidChar {
        mask: String,
        found: char,
        index: usize,
    },
}

impl GameError for MaskError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongLength { .. } => "MASK_WRONG_LENGTH",
            Self::InvalidChar { .. } => "MASK_INVALID_CHAR",
        }
    }
}

/// Four-slot eligibility mask; `true` marks an eligible slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "String", into = "String")
)]
pub struct PositionMask([bool; SLOTS]);

impl PositionMask {
    pub const ALL: Self = Self([true; SLOTS]);
    pub const NONE: Self = Self([false; SLOTS]);

    pub const fn from_bits(bits: [bool; SLOTS]) -> Self {
        Self(bits)
    }

    /// Parses a mask at compile time. Intended for `const` content tables.
    ///
    /// # Panics
    ///
    /// Panics (a compile error in const context) on a malformed literal.
    pub const fn literal(mask: &str) -> Self {
        let bytes = mask.as_bytes();
        assert!(bytes.len() == SLOTS, "position mask must be 4 characters");
        let mut bits = [false; SLOTS];
        let mut i = 0;
        while i < SLOTS {
            bits[i] = match bytes[i] {
                b'X' => true,
                b'O' => false,
                _ => panic!("position mask may only contain 'X' or 'O'"),
            };
            i += 1;
        }
        Self(bits)
    }

    pub fn parse(mask: &str) -> Result<Self, MaskError> {
        let actual = mask.chars().count();
        if actual != SLOTS {
            return Err(MaskError::WrongLength {
                mask: mask.to_owned(),
                expected: SLOTS,
                actual,
            });
        }

        let mut bits = [false; SLOTS];
        for (index, found) in mask.chars().enumerate() {
            bits[index] = match found {
                'X' => true,
                'O' => false,
                _ => {
                    return Err(MaskError::InvalidChar {
                        mask: mask.to_owned(),
                        found,
                        index,
                    });
                }
            };
        }
        Ok(Self(bits))
    }

    /// Mask with slot order mirrored.
    pub fn reversed(self) -> Self {
        let mut bits = self.0;
        bits.reverse();
        Self(bits)
    }

    /// Out-of-range slots are never set.
    pub fn is_set(&self, slot: usize) -> bool {
        self.0.get(slot).copied().unwrap_or(false)
    }

    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(slot, set)| set.then_some(slot))
    }

    pub fn bits(&self) -> [bool; SLOTS] {
        self.0
    }
}

impl FromStr for PositionMask {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PositionMask {
    type Error = MaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PositionMask> for String {
    fn from(mask: PositionMask) -> Self {
        mask.to_string()
    }
}

impl fmt::Display for PositionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for set in self.0 {
            f.write_str(if set { "X" } else { "O" })?;
        }
        Ok(())
    }
}
