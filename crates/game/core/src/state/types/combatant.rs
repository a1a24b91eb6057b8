use std::fmt;

use super::attack::Attack;
use super::modifier::{Modifier, ModifierKind, Modifiers};

/// Session-unique identifier assigned when a combatant enters the game state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which lineup a combatant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Hero,
    Enemy,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Hero => Self::Enemy,
            Self::Enemy => Self::Hero,
        }
    }

    pub fn is_hero(self) -> bool {
        matches!(self, Self::Hero)
    }
}

/// A hero or enemy. The side tag drives every side-relative rule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: CombatantId,
    pub side: Side,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub hp: f64,
    pub max_hp: f64,
    pub dodge: f64,
    pub prot: f64,
    pub spd: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trap_resist: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stress_resist: f64,
    pub attacks: Vec<Attack>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Modifiers,
}

impl Combatant {
    /// Creates a combatant at full health.
    pub fn new(side: Side, name: impl Into<String>, hp: f64) -> Self {
        Self {
            id: CombatantId::default(),
            side,
            name: name.into(),
            description: String::new(),
            hp,
            max_hp: hp,
            dodge: 0.0,
            prot: 0.0,
            spd: 0.0,
            trap_resist: 0.0,
            stress_resist: 0.0,
            attacks: Vec::new(),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn hero(name: impl Into<String>, hp: f64) -> Self {
        Self::new(Side::Hero, name, hp)
    }

    pub fn enemy(name: impl Into<String>, hp: f64) -> Self {
        Self::new(Side::Enemy, name, hp)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stats(mut self, dodge: f64, prot: f64, spd: f64) -> Self {
        self.dodge = dodge;
        self.prot = prot;
        self.spd = spd;
        self
    }

    pub fn with_resists(mut self, trap_resist: f64, stress_resist: f64) -> Self {
        self.trap_resist = trap_resist;
        self.stress_resist = stress_resist;
        self
    }

    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.refresh_or_push(modifier);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_stunned(&self) -> bool {
        self.modifiers.has(ModifierKind::Stun)
    }

    /// Stress resistance after active scare modifiers, floored at zero.
    pub fn effective_stress_resist(&self) -> f64 {
        (self.stress_resist - self.modifiers.scare_total()).max(0.0)
    }

    /// Subtracts `amount` HP, clamping at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let lost = amount.max(0.0).min(self.hp.max(0.0));
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        lost
    }

    /// Adds up to `amount` HP without exceeding `max_hp`. Returns the HP gained.
    pub fn restore(&mut self, amount: f64) -> f64 {
        let gained = amount.max(0.0).min((self.max_hp - self.hp).max(0.0));
        self.hp += gained;
        gained
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{} hp)", self.name, self.hp, self.max_hp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_and_heal_stay_in_bounds() {
        let mut hero = Combatant::hero("Gareth", 10.0);
        assert_eq!(hero.take_damage(4.0), 4.0);
        assert_eq!(hero.restore(10.0), 4.0);
        assert_eq!(hero.hp, 10.0);
        assert_eq!(hero.take_damage(25.0), 10.0);
        assert_eq!(hero.hp, 0.0);
        assert!(!hero.is_alive());
    }

    #[test]
    fn scare_reduces_effective_resist() {
        let hero = Combatant::hero("Milo", 6.0)
            .with_resists(0.0, 0.3)
            .with_modifier(Modifier::new(ModifierKind::Scare, 1.0, 2, 0.5));
        assert_eq!(hero.effective_stress_resist(), 0.0);
        assert_eq!(hero.stress_resist, 0.3);
    }
}
