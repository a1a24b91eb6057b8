//! Modifier application and decay.

use crate::rng::RngOracle;
use crate::state::{CombatEvent, Combatant, Modifier, ModifierKind};
use crate::stress::StressEvent;

use super::context::ResolveContext;

/// Applies per-turn modifier effects and offers new modifiers.
pub struct ModifierSystem;

impl ModifierSystem {
    /// Runs one turn boundary for every combatant in `lineup`.
    ///
    /// Bleed and heal-over-time act in list order, then every finite modifier
    /// loses one turn. Stun and scare have no per-tick effect.
    pub fn apply_and_tick(lineup: &mut [Combatant], ctx: &mut ResolveContext<'_>) {
        for combatant in lineup.iter_mut() {
            let active: Vec<Modifier> = combatant.modifiers.iter().copied().collect();
            for modifier in active {
                match modifier.kind {
                    ModifierKind::Bleed => {
                        let amount = combatant.take_damage(modifier.amount.min(combatant.hp));
                        ctx.record(StressEvent::Bleed {
                            on: combatant.side,
                            amount,
                        });
                        ctx.log.push(CombatEvent::BleedTick {
                            name: combatant.name.clone(),
                            amount,
                        });
                    }
                    ModifierKind::HealOverTime => {
                        let amount = combatant.restore(modifier.amount);
                        ctx.record(StressEvent::Healed {
                            on: combatant.side,
                            amount,
                        });
                        ctx.log.push(CombatEvent::HealTick {
                            name: combatant.name.clone(),
                            amount,
                        });
                    }
                    ModifierKind::Stun | ModifierKind::Scare => {}
                }
            }
            combatant.modifiers.tick_durations();
        }
    }

    /// Rolls `modifier.chance` and, on success, refreshes or appends it.
    ///
    /// Returns `true` when the modifier stuck.
    pub fn try_apply(
        target: &mut Combatant,
        modifier: Option<&Modifier>,
        ctx: &mut ResolveContext<'_>,
    ) -> bool {
        let Some(modifier) = modifier else {
            return false;
        };
        if ctx.rng.roll_unit() > modifier.chance {
            return false;
        }
        target.modifiers.refresh_or_push(*modifier);
        ctx.log.push(CombatEvent::ModifierApplied {
            target: target.name.clone(),
            kind: modifier.kind,
        });
        true
    }
}
