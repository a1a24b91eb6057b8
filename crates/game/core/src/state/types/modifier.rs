//! Status modifiers carried by combatants.
//!
//! Modifiers decay once per turn boundary. A modifier with `turns == -1`
//! never expires; any other modifier is removed when its counter reaches
//! exactly zero.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Kinds of status modifier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ModifierKind {
    /// Damage over time.
    Bleed,
    /// Healing over time.
    HealOverTime,
    /// Skipped by the turn scheduler.
    Stun,
    /// Lowers effective stress resistance while active.
    Scare,
}

/// A single modifier instance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub kind: ModifierKind,
    /// Probability of sticking when offered.
    pub chance: f64,
    /// Remaining turn boundaries; `-1` is infinite.
    pub turns: i32,
    /// Tick magnitude for bleed/heal, resistance reduction for scare.
    pub amount: f64,
}

impl Modifier {
    pub const INFINITE: i32 = -1;

    pub fn new(kind: ModifierKind, chance: f64, turns: i32, amount: f64) -> Self {
        Self {
            kind,
            chance,
            turns,
            amount,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.turns == Self::INFINITE
    }
}

/// Ordered set of active modifiers, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    active: ArrayVec<Modifier, { GameConfig::MAX_MODIFIERS }>,
}

impl Modifiers {
    pub fn empty() -> Self {
        Self {
            active: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: ModifierKind) -> bool {
        self.active.iter().any(|m| m.kind == kind)
    }

    pub fn get(&self, kind: ModifierKind) -> Option<&Modifier> {
        self.active.iter().find(|m| m.kind == kind)
    }

    /// Refreshes `turns` of an existing modifier of the same kind, or appends
    /// a copy. `amount` of an existing modifier is left untouched.
    ///
    /// Returns `true` when the modifier was refreshed rather than appended.
    pub fn refresh_or_push(&mut self, modifier: Modifier) -> bool {
        if let Some(existing) = self.active.iter_mut().find(|m| m.kind == modifier.kind) {
            existing.turns = modifier.turns;
            return true;
        }
        // One slot per kind, so capacity is never reached.
        let _ = self.active.try_push(modifier);
        false
    }

    /// Decrements every finite modifier and drops the ones that reach zero.
    pub fn tick_durations(&mut self) {
        for modifier in self.active.iter_mut() {
            if !modifier.is_infinite() {
                modifier.turns -= 1;
            }
        }
        self.active.retain(|m| m.turns != 0);
    }

    /// Sum of all scare magnitudes.
    pub fn scare_total(&self) -> f64 {
        self.active
            .iter()
            .filter(|m| m.kind == ModifierKind::Scare)
            .map(|m| m.amount)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        let mut modifiers = Self::empty();
        for modifier in iter {
            modifiers.refresh_or_push(modifier);
        }
        modifiers
    }
}
