//! Typed record of what happened during a session.
//!
//! The engine appends events instead of printing. Drivers drain the log and
//! render it however they like; every event has a plain-text `Display`.

use std::fmt;

use super::types::{ModifierKind, Side};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    EnteredArea { area: String },
    EncounterStarted,
    TurnStarted { turn: u32 },
    Attacking { name: String },
    Passed { name: String },
    MoveStarted { name: String },
    MoveCancelled { name: String },
    Moved { name: String, displaced: String },
    Hit { attacker: String, target: String, attack: String, damage: f64 },
    Missed { attacker: String, target: String, attack: String },
    Healed { healer: String, target: String, amount: f64 },
    ModifierApplied { target: String, kind: ModifierKind },
    BleedTick { name: String, amount: f64 },
    HealTick { name: String, amount: f64 },
    Died { name: String, side: Side },
    Rejected { reason: String },
    TrapDisarmed { hero: String, trap: String },
    TrapTriggered { hero: String, trap: String, damage: f64 },
    TreasureLooted { hero: String, treasure: String },
    TreasureIgnored { treasure: String },
    EncounterEnded,
    WaveOver,
    GameOver { score: i64 },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CombatEvent::*;
        match self {
            EnteredArea { area } => write!(f, "The party enters {area}."),
            EncounterStarted => f.write_str("### NEW ENCOUNTER"),
            TurnStarted { turn } => write!(f, "Turn {turn}:"),
            Attacking { name } => write!(f, "Attacking: {name}"),
            Passed { name } => write!(f, "{name} passes!"),
            MoveStarted { name } => write!(f, "{name} prepares to move."),
            MoveCancelled { name } => write!(f, "{name} stays in place."),
            Moved { name, displaced } => write!(f, "{name} moves in {displaced} position!"),
            Hit {
                attacker,
                target,
                attack,
                damage,
            } => write!(f, "{attacker}: {attack} deals {damage} damage to {target}!"),
            Missed {
                attacker,
                target,
                attack,
            } => write!(f, "{attacker}: {attack} misses {target}!"),
            Healed {
                healer,
                target,
                amount,
            } => write!(f, "{healer} heals {target} for {amount}!"),
            ModifierApplied { target, kind } => write!(f, "{target} is affected by {kind}."),
            BleedTick { name, amount } => write!(f, "{name} bleeds for {amount}."),
            HealTick { name, amount } => write!(f, "{name} regenerates {amount}."),
            Died { name, .. } => write!(f, "{name} is dead!"),
            Rejected { reason } => f.write_str(reason),
            TrapDisarmed { hero, trap } => write!(f, "{hero} disarms {trap}."),
            TrapTriggered { hero, trap, damage } => {
                write!(f, "{hero} triggers {trap} and takes {damage} damage!")
            }
            TreasureLooted { hero, treasure } => write!(f, "{hero} loots {treasure}."),
            TreasureIgnored { treasure } => write!(f, "You ignore {treasure}... For now."),
            EncounterEnded => f.write_str("### END OF ENCOUNTER"),
            WaveOver => f.write_str("GAME OVER: Enemies won!"),
            GameOver { score } => write!(f, "GAME OVER: Heroes won! Final stress: {score}"),
        }
    }
}

/// Buffer of [`CombatEvent`]s, emptied only by [`EventLog::drain`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&CombatEvent> {
        self.events.last()
    }

    /// Takes every buffered event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
