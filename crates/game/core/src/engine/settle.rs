//! Non-combat encounter settlement.
//!
//! Whether a disarm or loot attempt succeeds is decided outside the rules
//! engine. These entry points accept the decided outcome and apply its
//! consequences: incidental damage, an optional modifier, and the matching
//! ledger delta.

use crate::combat::{ModifierSystem, ResolveContext};
use crate::state::{CombatEvent, Encounter, GamePhase, GameState, Modifier};
use crate::stress::StressEvent;

use super::{GameEngine, GameEngineError, remove_dead};

/// Resolved result of inspecting a trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrapOutcome {
    Disarmed { hero: usize },
    Triggered { hero: usize },
    /// The party walks past; the trap stays.
    Ignored,
}

/// Resolved result of inspecting a treasure.
///
/// `inspected` records whether the hero checked the chest for traps first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreasureOutcome {
    /// Looted an untrapped chest.
    Looted { hero: usize, inspected: bool },
    /// Disarmed the chest's trap, then looted.
    Disarmed { hero: usize, inspected: bool },
    /// Set off the chest's trap.
    Triggered { hero: usize, inspected: bool },
    Ignored,
}

impl GameEngine<'_> {
    /// Applies a trap outcome to the first trap of the current area.
    pub fn settle_trap(&mut self, outcome: TrapOutcome) -> Result<(), GameEngineError> {
        self.ensure_phase(GamePhase::InspectingTrap)?;
        let table = self.state.config.stress.clone();
        let trap = self
            .current_encounter()?
            .traps
            .first()
            .cloned()
            .ok_or(GameEngineError::NothingToSettle)?;

        match outcome {
            TrapOutcome::Ignored => {
                self.state.phase = GamePhase::Idle;
                return Ok(());
            }
            TrapOutcome::Disarmed { hero } => {
                let name = self.hero_name(hero)?;
                self.record_hero_delta(hero, table.disarm_trap as f64)?;
                self.state.log.push(CombatEvent::TrapDisarmed {
                    hero: name,
                    trap: trap.name,
                });
            }
            TrapOutcome::Triggered { hero } => {
                let name = self.hero_name(hero)?;
                let damage = self.wound_hero(hero, trap.dmg, trap.modifier.as_ref())?;
                self.record_hero_delta(hero, table.trigger_trap as f64 + damage)?;
                self.state.log.push(CombatEvent::TrapTriggered {
                    hero: name,
                    trap: trap.name,
                    damage,
                });
            }
        }

        self.current_encounter()?.traps.remove(0);
        self.finish_settlement();
        Ok(())
    }

    /// Applies a treasure outcome to the first treasure of the current area.
    pub fn settle_treasure(&mut self, outcome: TreasureOutcome) -> Result<(), GameEngineError> {
        self.ensure_phase(GamePhase::InspectingTreasure)?;
        let table = self.state.config.stress.clone();
        let treasure = self
            .current_encounter()?
            .treasures
            .first()
            .cloned()
            .ok_or(GameEngineError::NothingToSettle)?;
        let uninspected = |inspected: bool| {
            if inspected {
                0.0
            } else {
                table.no_inspect_treasure as f64
            }
        };

        match outcome {
            TreasureOutcome::Ignored => {
                let ignored = StressEvent::Settlement {
                    delta: table.ignore_treasure as f64,
                    resist: 0.0,
                };
                self.state.stress.record(ignored, &table);
                self.state.log.push(CombatEvent::TreasureIgnored {
                    treasure: treasure.name,
                });
                self.state.phase = GamePhase::Idle;
                return Ok(());
            }
            TreasureOutcome::Looted { hero, inspected } => {
                let name = self.hero_name(hero)?;
                let delta = table.loot_treasure as f64 + uninspected(inspected);
                self.record_hero_delta(hero, delta)?;
                self.state.log.push(CombatEvent::TreasureLooted {
                    hero: name,
                    treasure: treasure.name,
                });
            }
            TreasureOutcome::Disarmed { hero, inspected } => {
                let name = self.hero_name(hero)?;
                let delta = table.loot_treasure as f64
                    + table.disarm_trap as f64
                    + uninspected(inspected);
                self.record_hero_delta(hero, delta)?;
                self.state.log.push(CombatEvent::TreasureLooted {
                    hero: name,
                    treasure: treasure.name,
                });
            }
            TreasureOutcome::Triggered { hero, inspected } => {
                let name = self.hero_name(hero)?;
                let damage = self.wound_hero(hero, treasure.dmg, treasure.modifier.as_ref())?;
                let delta =
                    table.trigger_trapped_treasure as f64 + damage - uninspected(inspected);
                self.record_hero_delta(hero, delta)?;
                self.state.log.push(CombatEvent::TrapTriggered {
                    hero: name,
                    trap: treasure.name,
                    damage,
                });
            }
        }

        self.current_encounter()?.treasures.remove(0);
        self.finish_settlement();
        Ok(())
    }

    fn current_encounter(&mut self) -> Result<&mut Encounter, GameEngineError> {
        self.state
            .dungeon
            .current_encounter_mut()
            .ok_or(GameEngineError::NothingToSettle)
    }

    fn hero_name(&self, hero: usize) -> Result<String, GameEngineError> {
        self.state
            .party
            .heroes
            .get(hero)
            .map(|h| h.name.clone())
            .ok_or(GameEngineError::InvalidHero { slot: hero })
    }

    /// Records a settlement delta damped by the hero's resistance.
    fn record_hero_delta(&mut self, hero: usize, delta: f64) -> Result<i64, GameEngineError> {
        let resist = self
            .state
            .party
            .heroes
            .get(hero)
            .map(|h| h.effective_stress_resist())
            .ok_or(GameEngineError::InvalidHero { slot: hero })?;
        Ok(self
            .state
            .stress
            .record(StressEvent::Settlement { delta, resist }, &self.state.config.stress))
    }

    /// Deals up to `dmg` to a hero and offers `modifier`. Returns damage taken.
    fn wound_hero(
        &mut self,
        hero: usize,
        dmg: f64,
        modifier: Option<&Modifier>,
    ) -> Result<f64, GameEngineError> {
        let GameState {
            config,
            party,
            stress,
            rng,
            log,
            ..
        } = &mut *self.state;
        let target = party
            .heroes
            .get_mut(hero)
            .ok_or(GameEngineError::InvalidHero { slot: hero })?;
        let damage = target.take_damage(dmg.min(target.hp));
        let mut ctx = ResolveContext::new(stress, rng, log, &config.stress);
        ModifierSystem::try_apply(target, modifier, &mut ctx);
        Ok(damage)
    }

    /// Buries fallen heroes and returns to exploration.
    fn finish_settlement(&mut self) {
        let GameState {
            config,
            party,
            stress,
            rng,
            log,
            ..
        } = &mut *self.state;
        let mut ctx = ResolveContext::new(stress, rng, log, &config.stress);
        remove_dead(&mut party.heroes, &mut ctx);

        self.state.phase = GamePhase::Idle;
        self.check_gameover();
    }
}
