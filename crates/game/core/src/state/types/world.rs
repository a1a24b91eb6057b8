//! Party, encounters and the dungeon they are spread across.
//!
//! Scenario content arrives already validated; these types only carry it.

use super::combatant::Combatant;
use super::modifier::Modifier;

/// A trap placed in an area.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trap {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Damage dealt to the hero that triggers it.
    pub dmg: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Option<Modifier>,
}

/// A treasure chest, optionally trapped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Treasure {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trapped: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dmg: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Option<Modifier>,
}

/// Contents of one area. Enemy order is slot order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Encounter {
    pub enemies: Vec<Combatant>,
    pub traps: Vec<Trap>,
    pub treasures: Vec<Treasure>,
}

impl Encounter {
    pub fn with_enemies(enemies: Vec<Combatant>) -> Self {
        Self {
            enemies,
            ..Self::default()
        }
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.traps.is_empty() && self.treasures.is_empty()
    }

    /// Short human-readable summary used in run reports.
    pub fn describe(&self) -> String {
        if self.has_enemies() {
            let names: Vec<&str> = self.enemies.iter().map(|e| e.name.as_str()).collect();
            format!("enemies: {}", names.join(", "))
        } else if let Some(trap) = self.traps.first() {
            format!("trap: {}", trap.name)
        } else if let Some(treasure) = self.treasures.first() {
            format!("treasure: {}", treasure.name)
        } else {
            "empty".to_owned()
        }
    }
}

/// Ordered heroes; index is the combat slot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    pub heroes: Vec<Combatant>,
}

impl Party {
    pub fn new(heroes: Vec<Combatant>) -> Self {
        Self { heroes }
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }
}

/// A named location holding a single encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounter: Encounter,
}

impl Area {
    pub fn new(name: impl Into<String>, encounter: Encounter) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            encounter,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The areas a party can visit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    pub areas: Vec<Area>,
    /// Area the party currently stands in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current: Option<usize>,
}

impl Dungeon {
    pub fn new(areas: Vec<Area>) -> Self {
        Self {
            areas,
            current: None,
        }
    }

    pub fn current_area(&self) -> Option<&Area> {
        self.current.and_then(|i| self.areas.get(i))
    }

    pub fn current_encounter_mut(&mut self) -> Option<&mut Encounter> {
        let index = self.current?;
        self.areas.get_mut(index).map(|area| &mut area.encounter)
    }

    /// True while any area still holds a living enemy.
    pub fn has_enemies_left(&self) -> bool {
        self.areas.iter().any(|area| area.encounter.has_enemies())
    }

    /// First area that still holds enemies.
    pub fn next_hostile_area(&self) -> Option<usize> {
        self.areas.iter().position(|area| area.encounter.has_enemies())
    }

    /// First area with anything left to resolve.
    pub fn next_pending_area(&self) -> Option<usize> {
        self.areas.iter().position(|area| !area.encounter.is_empty())
    }

    pub fn enemy_count(&self) -> usize {
        self.areas.iter().map(|a| a.encounter.enemies.len()).sum()
    }
}
