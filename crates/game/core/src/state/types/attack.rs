use super::mask::PositionMask;
use super::modifier::Modifier;

/// What an action does when resolved.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ActionKind {
    Damage,
    Heal,
    Move,
    Pass,
}

/// An attack authored on a combatant.
///
/// Heals store a negative `base_dmg`; the healed amount is its magnitude.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub name: String,
    pub description: String,
    pub kind: ActionKind,
    pub starting_positions: PositionMask,
    pub target_positions: PositionMask,
    pub base_dmg: f64,
    pub accuracy: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Option<Modifier>,
}

impl Attack {
    pub fn damage(name: impl Into<String>, base_dmg: f64, accuracy: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: ActionKind::Damage,
            starting_positions: PositionMask::ALL,
            target_positions: PositionMask::ALL,
            base_dmg,
            accuracy,
            modifier: None,
        }
    }

    /// A heal restoring up to `amount` HP per target.
    pub fn heal(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: ActionKind::Heal,
            starting_positions: PositionMask::ALL,
            target_positions: PositionMask::ALL,
            base_dmg: -amount.abs(),
            accuracy: 1.0,
            modifier: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn from_slots(mut self, starting: PositionMask) -> Self {
        self.starting_positions = starting;
        self
    }

    pub fn targeting(mut self, targets: PositionMask) -> Self {
        self.target_positions = targets;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }
}
