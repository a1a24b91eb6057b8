//! Stress ledger.
//!
//! Stress is a single signed counter measuring pressure on the hero party.
//! It only changes through [`StressEvent`]s; each event's delta is computed
//! in floating point from the [`StressTable`] and truncated toward zero when
//! it is added. There is no clamp in either direction.
//!
//! Sign conventions (`r` is the acting hero's effective stress resistance):
//!
//! | Event | Hero | Enemy |
//! |-------|------|-------|
//! | area change | +movement | |
//! | new turn | +turn | |
//! | died | +hero_dies | -enemy_dies |
//! | pass | +passing(1-r) | -passing |
//! | move in combat | +switch_position(1-r) | -switch_position |
//! | damage dealt by | -dmg(1-r) | +dmg |
//! | miss by | +hyp/2(1-r) | +hyp/2 |
//! | bleed on | +amount | -amount |
//! | heal on | -amount | +amount |

use crate::config::StressTable;
use crate::state::Side;

/// A ledger-relevant occurrence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StressEvent {
    /// The party entered another area.
    Movement,
    /// A new combat turn began.
    NewTurn,
    Died { side: Side },
    Passed { side: Side, resist: f64 },
    Moved { side: Side, resist: f64 },
    DamageDealt { by: Side, amount: f64, resist: f64 },
    /// Missed attack; `hypothetical` is the damage a hit would have dealt.
    Missed { by: Side, hypothetical: f64, resist: f64 },
    Bleed { on: Side, amount: f64 },
    Healed { on: Side, amount: f64 },
    /// Trap or treasure outcome; negative deltas are damped by `resist`.
    Settlement { delta: f64, resist: f64 },
}

impl StressEvent {
    /// Signed, untruncated delta of this event.
    pub fn delta(&self, table: &StressTable) -> f64 {
        use StressEvent::*;

        let side_sign = |side: Side| if side.is_hero() { 1.0 } else { -1.0 };
        let damp = |side: Side, resist: f64| {
            if side.is_hero() {
                1.0 - resist
            } else {
                1.0
            }
        };

        match *self {
            Movement => table.movement as f64,
            NewTurn => table.turn as f64,
            Died { side } => match side {
                Side::Hero => table.hero_dies as f64,
                Side::Enemy => -(table.enemy_dies as f64),
            },
            Passed { side, resist } => side_sign(side) * table.passing as f64 * damp(side, resist),
            Moved { side, resist } => {
                side_sign(side) * table.switch_position as f64 * damp(side, resist)
            }
            DamageDealt { by, amount, resist } => -side_sign(by) * amount * damp(by, resist),
            Missed {
                by,
                hypothetical,
                resist,
            } => hypothetical / 2.0 * damp(by, resist),
            Bleed { on, amount } => side_sign(on) * amount,
            Healed { on, amount } => -side_sign(on) * amount,
            Settlement { delta, resist } => {
                if delta < 0.0 {
                    delta * (1.0 - resist)
                } else {
                    delta
                }
            }
        }
    }
}

/// Marker returned by [`StressLedger::checkpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StressCheckpoint(i64);

/// Running stress counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StressLedger {
    value: i64,
}

impl StressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_value(&self) -> i64 {
        self.value
    }

    /// Applies the event and returns the truncated delta actually added.
    pub fn record(&mut self, event: StressEvent, table: &StressTable) -> i64 {
        let delta = event.delta(table) as i64;
        self.value += delta;
        delta
    }

    /// Undoes a delta previously returned by [`record`](Self::record).
    pub fn revert(&mut self, delta: i64) {
        self.value -= delta;
    }

    pub fn checkpoint(&self) -> StressCheckpoint {
        StressCheckpoint(self.value)
    }

    pub fn rollback(&mut self, checkpoint: StressCheckpoint) {
        self.value = checkpoint.0;
    }
}
