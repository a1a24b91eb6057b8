//! Authoritative session state.
//!
//! [`GameState`] owns every piece of mutable session data: lineups, the
//! dungeon, the combat session, the stress ledger, the random source and the
//! event log. Runtime layers read it freely but mutate it only through
//! [`GameEngine`](crate::engine::GameEngine).
//!
//! The whole state is a plain value. [`GameState::snapshot`] is a deep copy
//! sharing nothing with the live session, which is what speculative AI
//! planning relies on.
mod error;
pub mod log;
pub mod types;

pub use error::InitializationError;
pub use log::{CombatEvent, EventLog};
pub use types::{
    ActionKind, ActionSource, Area, Attack, CombatPhase, CombatState, Combatant, CombatantId,
    Dungeon, Encounter, LegalAction, MaskError, Modifier, ModifierKind, Modifiers, Party,
    PositionMask, Side, Trap, Treasure,
};

use crate::combat::Formation;
use crate::config::GameConfig;
use crate::rng::SessionRng;
use crate::stress::StressLedger;

/// Top-level lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    #[default]
    Idle,
    InCombat,
    InspectingTrap,
    InspectingTreasure,
    /// The hero party was wiped out.
    WaveOver,
    /// No enemies remain anywhere in the dungeon.
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::WaveOver | Self::GameOver)
    }
}

/// Canonical snapshot of a play session.
///
/// The engine only ever appends to `log`. Drivers drain it after each step;
/// otherwise it grows for the whole session and every snapshot copies it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed the session RNG was created from.
    pub seed: u64,
    pub config: GameConfig,
    pub party: Party,
    pub dungeon: Dungeon,
    /// Present only while an encounter is being fought.
    pub combat: Option<CombatState>,
    pub stress: StressLedger,
    pub rng: SessionRng,
    pub phase: GamePhase,
    /// Events since the driver last drained it.
    pub log: EventLog,
    /// Final stress, set once the game is over.
    pub score: Option<i64>,
    next_id: u32,
}

impl GameState {
    /// Builds a session, assigning ids and validating lineup sizes.
    pub fn new(party: Party, dungeon: Dungeon, seed: u64) -> Result<Self, InitializationError> {
        let mut state = Self {
            seed,
            config: GameConfig::default(),
            party,
            dungeon,
            combat: None,
            stress: StressLedger::new(),
            rng: SessionRng::from_seed(seed),
            phase: GamePhase::Idle,
            log: EventLog::new(),
            score: None,
            next_id: 1,
        };

        validate_lineup(&state.party.heroes, Side::Hero)?;
        for area in &state.dungeon.areas {
            validate_lineup(&area.encounter.enemies, Side::Enemy)?;
        }

        let mut next_id = state.next_id;
        let areas = state.dungeon.areas.iter_mut();
        let lineups = std::iter::once(&mut state.party.heroes)
            .chain(areas.map(|area| &mut area.encounter.enemies));
        for lineup in lineups {
            for combatant in lineup.iter_mut() {
                combatant.id = CombatantId(next_id);
                next_id += 1;
            }
        }
        state.next_id = next_id;

        Ok(state)
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Deep, independent copy of the whole session.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Replaces the live session with a previously taken snapshot.
    pub fn restore(&mut self, snapshot: Self) {
        *self = snapshot;
    }

    pub fn stress_value(&self) -> i64 {
        self.stress.current_value()
    }

    pub fn heroes(&self) -> &[Combatant] {
        &self.party.heroes
    }

    /// Enemies of the encounter being fought; empty outside combat.
    pub fn enemies(&self) -> &[Combatant] {
        self.combat
            .as_ref()
            .and_then(|combat| self.dungeon.areas.get(combat.area))
            .map(|area| area.encounter.enemies.as_slice())
            .unwrap_or(&[])
    }

    pub fn formation(&self) -> Formation {
        Formation::new(self.heroes().len(), self.enemies().len())
    }

    pub fn combat_phase(&self) -> Option<CombatPhase> {
        self.combat.as_ref().map(|combat| combat.phase)
    }

    /// Absolute slot of a positioned combatant.
    pub fn slot_of(&self, id: CombatantId) -> Option<usize> {
        if let Some(slot) = self.heroes().iter().position(|c| c.id == id) {
            return Some(slot);
        }
        self.enemies()
            .iter()
            .position(|c| c.id == id)
            .map(|slot| slot + self.heroes().len())
    }

    /// Combatant at an absolute slot.
    pub fn at_slot(&self, slot: usize) -> Option<&Combatant> {
        let heroes = self.heroes();
        if slot < heroes.len() {
            heroes.get(slot)
        } else {
            self.enemies().get(slot - heroes.len())
        }
    }

    /// Active attacker and its absolute slot, while an action is pending.
    pub fn current_attacker(&self) -> Option<(&Combatant, usize)> {
        let combat = self.combat.as_ref()?;
        if !matches!(
            combat.phase,
            CombatPhase::PickAttack | CombatPhase::ChoosePosition
        ) {
            return None;
        }
        let slot = self.slot_of(combat.active_id()?)?;
        Some((self.at_slot(slot)?, slot))
    }

    /// Action menu of the current attacker.
    pub fn legal_actions(&self) -> &[LegalAction] {
        self.combat
            .as_ref()
            .map(|combat| combat.actions.as_slice())
            .unwrap_or(&[])
    }

    pub fn targets_for(&self, action_index: usize) -> Option<&[usize]> {
        self.legal_actions()
            .get(action_index)
            .map(|action| action.targets.as_slice())
    }

    /// Index of the MOVE entry in the current action menu.
    pub fn move_action_index(&self) -> Option<usize> {
        self.legal_actions()
            .iter()
            .position(|action| action.kind == ActionKind::Move)
    }
}

fn validate_lineup(lineup: &[Combatant], side: Side) -> Result<(), InitializationError> {
    if lineup.len() > GameConfig::MAX_SLOTS {
        return Err(InitializationError::LineupTooLarge {
            side,
            count: lineup.len(),
            max: GameConfig::MAX_SLOTS,
        });
    }
    for combatant in lineup {
        if combatant.side != side {
            return Err(InitializationError::WrongSide {
                name: combatant.name.clone(),
                expected: side,
                found: combatant.side,
            });
        }
        if combatant.attacks.is_empty() {
            return Err(InitializationError::NoAttacks {
                name: combatant.name.clone(),
            });
        }
    }
    Ok(())
}
