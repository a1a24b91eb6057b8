//! Single-target strike resolution.

use crate::state::{Attack, Combatant};

use super::damage::mitigated_damage;
use super::hit::check_hit;

/// Outcome of one attack against one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrikeOutcome {
    Hit { damage: f64 },
    /// `hypothetical` is what a hit would have dealt.
    Miss { hypothetical: f64 },
}

/// Resolves `attack` against `target` for a uniform `roll` in `[0, 1)`.
///
/// Pure: the target is not mutated.
pub fn resolve_strike(attack: &Attack, target: &Combatant, roll: f64) -> StrikeOutcome {
    let damage = mitigated_damage(attack.base_dmg, target.prot);
    if check_hit(attack.accuracy, target.dodge, roll) {
        StrikeOutcome::Hit { damage }
    } else {
        StrikeOutcome::Miss {
            hypothetical: damage,
        }
    }
}
