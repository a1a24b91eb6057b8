//! Per-encounter combat session bookkeeping.

use super::attack::ActionKind;
use super::combatant::CombatantId;

/// Scheduler phase within an encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    /// Waiting for the active attacker to pick an action.
    #[default]
    PickAttack,
    /// A MOVE is in flight; waiting for the destination slot.
    ChoosePosition,
    /// Every eligible combatant acted this turn.
    EndOfTurn,
    /// One side has no combatants left.
    EndOfCombat,
}

/// Where a legal action comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionSource {
    /// Index into the attacker's own attack list.
    Attack(usize),
    Pass,
    Move,
}

/// One entry of the attacker's action menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegalAction {
    pub name: String,
    pub kind: ActionKind,
    pub active: bool,
    /// Absolute slot indices (heroes first, then enemies).
    pub targets: Vec<usize>,
    pub source: ActionSource,
}

/// Combat session state; exists only while an encounter is running.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// Area whose encounter is being fought.
    pub area: usize,
    pub turn_number: u32,
    /// Living combatants in the order they act this turn.
    pub initiative: Vec<CombatantId>,
    /// Cursor into `initiative`.
    pub active_index: usize,
    pub phase: CombatPhase,
    /// Action menu of the current attacker.
    pub actions: Vec<LegalAction>,
}

impl CombatState {
    pub fn new(area: usize) -> Self {
        Self {
            area,
            turn_number: 0,
            initiative: Vec::new(),
            active_index: 0,
            phase: CombatPhase::PickAttack,
            actions: Vec::new(),
        }
    }

    pub fn active_id(&self) -> Option<CombatantId> {
        self.initiative.get(self.active_index).copied()
    }

    pub fn is_over(&self) -> bool {
        self.phase == CombatPhase::EndOfCombat
    }
}
