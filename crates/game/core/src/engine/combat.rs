//! Turn scheduler and action resolution for a single encounter.
//!
//! ```text
//! PickAttack -> ChoosePosition -> PickAttack -> ... -> EndOfTurn -> PickAttack (next turn)
//!                                                  \-> EndOfCombat
//! ```
//!
//! The cursor always rests on a living, unstunned combatant while the phase is
//! `PickAttack` or `ChoosePosition`. Legal actions are rebuilt whenever the
//! cursor settles, so target lists never outlive a removal or a move.

use crate::combat::{
    Formation, ModifierSystem, ResolveContext, StrikeOutcome, can_start_from, heal_amount,
    resolve_strike, resolve_targets,
};
use crate::rng::RngOracle;
use crate::state::{
    ActionKind, ActionSource, CombatEvent, CombatPhase, CombatState, Combatant, CombatantId,
    LegalAction, Modifier, Side,
};
use crate::stress::StressEvent;

use super::errors::CombatError;

/// Mutable view over one running encounter.
pub struct CombatEngine<'a> {
    combat: &'a mut CombatState,
    heroes: &'a mut Vec<Combatant>,
    enemies: &'a mut Vec<Combatant>,
    ctx: ResolveContext<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(
        combat: &'a mut CombatState,
        heroes: &'a mut Vec<Combatant>,
        enemies: &'a mut Vec<Combatant>,
        ctx: ResolveContext<'a>,
    ) -> Self {
        Self {
            combat,
            heroes,
            enemies,
            ctx,
        }
    }

    // ===== lifecycle =====

    /// Resets the turn counter and starts turn 1.
    pub fn start_encounter(&mut self) {
        self.combat.turn_number = 0;
        self.ctx.log.push(CombatEvent::EncounterStarted);
        self.start_turn();
    }

    /// Rolls a fresh initiative order and settles on the first attacker.
    ///
    /// Order is ascending on `spd * 10 + d10`; equal keys keep lineup order.
    pub fn start_turn(&mut self) {
        self.combat.turn_number += 1;
        self.ctx.record(StressEvent::NewTurn);
        self.ctx.log.push(CombatEvent::TurnStarted {
            turn: self.combat.turn_number,
        });

        let mut keyed: Vec<(f64, CombatantId)> = Vec::with_capacity(self.formation().total());
        for combatant in self.heroes.iter().chain(self.enemies.iter()) {
            let roll = f64::from(self.ctx.rng.roll_die(10));
            keyed.push((combatant.spd * 10.0 + roll, combatant.id));
        }
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.combat.initiative = keyed.into_iter().map(|(_, id)| id).collect();
        self.combat.active_index = 0;
        self.combat.phase = CombatPhase::PickAttack;
        self.settle(None);
    }

    /// One turn boundary of modifier effects for both lineups.
    pub fn apply_and_tick(&mut self) {
        ModifierSystem::apply_and_tick(self.heroes, &mut self.ctx);
        ModifierSystem::apply_and_tick(self.enemies, &mut self.ctx);
    }

    pub fn is_over(&self) -> bool {
        self.heroes.is_empty() || self.enemies.is_empty()
    }

    // ===== queries =====

    pub fn phase(&self) -> CombatPhase {
        self.combat.phase
    }

    pub fn formation(&self) -> Formation {
        Formation::new(self.heroes.len(), self.enemies.len())
    }

    pub fn legal_actions(&self) -> &[LegalAction] {
        &self.combat.actions
    }

    pub fn targets_for(&self, action_index: usize) -> Option<&[usize]> {
        self.combat
            .actions
            .get(action_index)
            .map(|action| action.targets.as_slice())
    }

    /// Active attacker with its absolute slot.
    pub fn current_attacker(&self) -> Option<(&Combatant, usize)> {
        let (side, slot) = self.locate(self.combat.active_id()?)?;
        let combatant = self.lineup(side).get(slot)?;
        Some((combatant, self.formation().offset(side) + slot))
    }

    fn locate(&self, id: CombatantId) -> Option<(Side, usize)> {
        if let Some(slot) = self.heroes.iter().position(|c| c.id == id) {
            return Some((Side::Hero, slot));
        }
        self.enemies
            .iter()
            .position(|c| c.id == id)
            .map(|slot| (Side::Enemy, slot))
    }

    fn lineup(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Hero => self.heroes.as_slice(),
            Side::Enemy => self.enemies.as_slice(),
        }
    }

    fn lineup_mut(&mut self, side: Side) -> &mut Vec<Combatant> {
        match side {
            Side::Hero => &mut *self.heroes,
            Side::Enemy => &mut *self.enemies,
        }
    }

    fn attacker(&self) -> Result<(Side, usize), CombatError> {
        let id = self.combat.active_id().ok_or(CombatError::WrongPhase {
            expected: CombatPhase::PickAttack,
            actual: self.combat.phase,
        })?;
        self.locate(id).ok_or(CombatError::MissingAttacker(id))
    }

    // ===== cursor =====

    /// Moves the cursor forward to the next living, unstunned combatant.
    ///
    /// Announces the attacker when it differs from `previous`.
    fn settle(&mut self, previous: Option<CombatantId>) {
        if self.is_over() {
            self.combat.phase = CombatPhase::EndOfCombat;
            self.combat.actions.clear();
            return;
        }

        while let Some(id) = self.combat.active_id() {
            let ready = self
                .locate(id)
                .and_then(|(side, slot)| self.lineup(side).get(slot))
                .is_some_and(|c| c.is_alive() && !c.is_stunned());
            if ready {
                break;
            }
            self.combat.active_index += 1;
        }

        let Some(id) = self.combat.active_id() else {
            self.combat.phase = CombatPhase::EndOfTurn;
            self.combat.actions.clear();
            return;
        };

        self.combat.phase = CombatPhase::PickAttack;
        self.refresh_actions();
        if previous == Some(id) {
            return;
        }
        if let Some((attacker, _)) = self.current_attacker() {
            let name = attacker.name.clone();
            self.ctx.log.push(CombatEvent::Attacking { name });
        }
    }

    fn advance(&mut self) {
        let previous = self.combat.active_id();
        self.combat.active_index += 1;
        self.settle(previous);
    }

    /// Rebuilds the action menu for the active attacker.
    fn refresh_actions(&mut self) {
        let Ok((side, slot)) = self.attacker() else {
            self.combat.actions.clear();
            return;
        };
        let formation = self.formation();
        let attacker = &self.lineup(side)[slot];

        let mut actions: Vec<LegalAction> = attacker
            .attacks
            .iter()
            .enumerate()
            .map(|(index, attack)| {
                let (active, targets) = match attack.kind {
                    ActionKind::Damage | ActionKind::Heal => {
                        let targets = resolve_targets(
                            side,
                            attack.kind,
                            attack.target_positions,
                            formation,
                        );
                        let from_slot = can_start_from(side, attack.starting_positions, slot);
                        (from_slot && !targets.is_empty(), targets)
                    }
                    ActionKind::Pass => (true, Vec::new()),
                    ActionKind::Move => move_targets(side, slot, formation),
                };
                LegalAction {
                    name: attack.name.clone(),
                    kind: attack.kind,
                    active,
                    targets,
                    source: ActionSource::Attack(index),
                }
            })
            .collect();

        actions.push(LegalAction {
            name: "Pass".to_owned(),
            kind: ActionKind::Pass,
            active: true,
            targets: Vec::new(),
            source: ActionSource::Pass,
        });
        let (active, targets) = move_targets(side, slot, formation);
        actions.push(LegalAction {
            name: "Move".to_owned(),
            kind: ActionKind::Move,
            active,
            targets,
            source: ActionSource::Move,
        });

        self.combat.actions = actions;
    }

    // ===== mutators =====

    fn reject<T>(&mut self, err: CombatError) -> Result<T, CombatError> {
        self.ctx.log.push(CombatEvent::Rejected {
            reason: err.to_string(),
        });
        Err(err)
    }

    /// Resolves the action at `action_index` of the current menu.
    ///
    /// Re-selecting MOVE while a move is in flight cancels it.
    pub fn process_attack(&mut self, action_index: usize) -> Result<(), CombatError> {
        match self.combat.phase {
            CombatPhase::PickAttack => {}
            CombatPhase::ChoosePosition => {
                if self.try_cancel_move(action_index) {
                    return Ok(());
                }
                return self.reject(CombatError::WrongPhase {
                    expected: CombatPhase::PickAttack,
                    actual: CombatPhase::ChoosePosition,
                });
            }
            actual => {
                return self.reject(CombatError::WrongPhase {
                    expected: CombatPhase::PickAttack,
                    actual,
                });
            }
        }

        let Some(action) = self.combat.actions.get(action_index).cloned() else {
            let len = self.combat.actions.len();
            return self.reject(CombatError::ActionOutOfRange {
                index: action_index,
                len,
            });
        };
        if !action.active {
            return self.reject(CombatError::InactiveAction {
                index: action_index,
                name: action.name,
            });
        }

        let (side, slot) = match self.attacker() {
            Ok(found) => found,
            Err(err) => return self.reject(err),
        };
        let attacker = &self.lineup(side)[slot];
        let name = attacker.name.clone();
        let resist = attacker.effective_stress_resist();

        match action.kind {
            ActionKind::Pass => {
                self.ctx.record(StressEvent::Passed { side, resist });
                self.ctx.log.push(CombatEvent::Passed { name });
                self.advance();
            }
            ActionKind::Move => {
                self.combat.phase = CombatPhase::ChoosePosition;
                self.ctx.log.push(CombatEvent::MoveStarted { name });
            }
            ActionKind::Damage => {
                let ActionSource::Attack(attack_index) = action.source else {
                    return self.reject(CombatError::ActionOutOfRange {
                        index: action_index,
                        len: self.combat.actions.len(),
                    });
                };
                let attack = self.lineup(side)[slot].attacks[attack_index].clone();
                let formation = self.formation();
                for target_slot in action.targets {
                    let Some((target_side, index)) = formation.locate(target_slot) else {
                        continue;
                    };
                    let roll = self.ctx.rng.roll_unit();
                    let target = &self.lineup(target_side)[index];
                    let target_name = target.name.clone();
                    match resolve_strike(&attack, target, roll) {
                        StrikeOutcome::Hit { damage } => {
                            self.lineup_mut(target_side)[index].take_damage(damage);
                            self.ctx.record(StressEvent::DamageDealt {
                                by: side,
                                amount: damage,
                                resist,
                            });
                            self.ctx.log.push(CombatEvent::Hit {
                                attacker: name.clone(),
                                target: target_name,
                                attack: attack.name.clone(),
                                damage,
                            });
                            self.offer_modifier(target_side, index, attack.modifier.as_ref());
                        }
                        StrikeOutcome::Miss { hypothetical } => {
                            self.ctx.record(StressEvent::Missed {
                                by: side,
                                hypothetical,
                                resist,
                            });
                            self.ctx.log.push(CombatEvent::Missed {
                                attacker: name.clone(),
                                target: target_name,
                                attack: attack.name.clone(),
                            });
                        }
                    }
                }
                self.advance();
            }
            ActionKind::Heal => {
                let ActionSource::Attack(attack_index) = action.source else {
                    return self.reject(CombatError::ActionOutOfRange {
                        index: action_index,
                        len: self.combat.actions.len(),
                    });
                };
                let attack = self.lineup(side)[slot].attacks[attack_index].clone();
                let formation = self.formation();
                for target_slot in action.targets {
                    let Some((target_side, index)) = formation.locate(target_slot) else {
                        continue;
                    };
                    let target = &mut self.lineup_mut(target_side)[index];
                    let amount = heal_amount(attack.base_dmg, target.hp, target.max_hp);
                    target.restore(amount);
                    let target_name = target.name.clone();
                    self.ctx.record(StressEvent::Healed {
                        on: target_side,
                        amount,
                    });
                    self.ctx.log.push(CombatEvent::Healed {
                        healer: name.clone(),
                        target: target_name,
                        amount,
                    });
                    self.offer_modifier(target_side, index, attack.modifier.as_ref());
                }
                self.advance();
            }
        }
        Ok(())
    }

    /// Moves the attacker to absolute `target_slot` within its own lineup.
    ///
    /// The attacker is removed and reinserted, shifting the others.
    pub fn process_move(&mut self, target_slot: usize) -> Result<(), CombatError> {
        if self.combat.phase != CombatPhase::ChoosePosition {
            let actual = self.combat.phase;
            return self.reject(CombatError::WrongPhase {
                expected: CombatPhase::ChoosePosition,
                actual,
            });
        }
        let (side, slot) = match self.attacker() {
            Ok(found) => found,
            Err(err) => return self.reject(err),
        };
        let name = self.lineup(side)[slot].name.clone();

        let destination = match self.formation().locate(target_slot) {
            Some((target_side, index)) if target_side == side => index,
            _ => {
                return self.reject(CombatError::MoveOffSide {
                    name,
                    slot: target_slot,
                });
            }
        };
        if destination == slot {
            return self.reject(CombatError::MoveOntoSelf {
                name,
                slot: target_slot,
            });
        }

        let lineup = self.lineup_mut(side);
        let displaced = lineup[destination].name.clone();
        let mover = lineup.remove(slot);
        let resist = mover.effective_stress_resist();
        lineup.insert(destination, mover);

        self.ctx.record(StressEvent::Moved { side, resist });
        self.ctx.log.push(CombatEvent::Moved { name, displaced });
        self.combat.phase = CombatPhase::PickAttack;
        self.advance();
        Ok(())
    }

    /// Cancels an in-flight MOVE if `action_index` names the MOVE action.
    ///
    /// Returns `true` when a move was cancelled. The cursor does not advance.
    pub fn try_cancel_move(&mut self, action_index: usize) -> bool {
        let is_move = self
            .combat
            .actions
            .get(action_index)
            .is_some_and(|action| action.kind == ActionKind::Move);
        if self.combat.phase != CombatPhase::ChoosePosition || !is_move {
            return false;
        }
        self.combat.phase = CombatPhase::PickAttack;
        if let Some((attacker, _)) = self.current_attacker() {
            let name = attacker.name.clone();
            self.ctx.log.push(CombatEvent::MoveCancelled { name });
        }
        true
    }

    /// Removes every combatant with `hp <= 0` from its lineup and the
    /// initiative order. Safe to call repeatedly.
    ///
    /// Returns the number of combatants removed.
    pub fn process_dead(&mut self) -> usize {
        let previous = self.combat.active_id();
        let mut removed = Vec::new();
        removed.extend(remove_dead(self.heroes, &mut self.ctx));
        removed.extend(remove_dead(self.enemies, &mut self.ctx));

        if removed.is_empty() {
            return 0;
        }

        for id in &removed {
            if let Some(position) = self.combat.initiative.iter().position(|i| i == id) {
                self.combat.initiative.remove(position);
                if position < self.combat.active_index {
                    self.combat.active_index -= 1;
                }
            }
        }

        match self.combat.phase {
            CombatPhase::PickAttack | CombatPhase::ChoosePosition => self.settle(previous),
            CombatPhase::EndOfTurn if self.is_over() => {
                self.combat.phase = CombatPhase::EndOfCombat;
            }
            CombatPhase::EndOfTurn | CombatPhase::EndOfCombat => {}
        }
        removed.len()
    }

    fn offer_modifier(&mut self, side: Side, index: usize, modifier: Option<&Modifier>) {
        let lineup = match side {
            Side::Hero => &mut *self.heroes,
            Side::Enemy => &mut *self.enemies,
        };
        if let Some(target) = lineup.get_mut(index) {
            ModifierSystem::try_apply(target, modifier, &mut self.ctx);
        }
    }
}

/// Same-side slots a combatant at `slot` could move to.
fn move_targets(side: Side, slot: usize, formation: Formation) -> (bool, Vec<usize>) {
    let offset = formation.offset(side);
    let targets: Vec<usize> = (0..formation.len(side))
        .filter(|&i| i != slot)
        .map(|i| offset + i)
        .collect();
    (formation.len(side) > 1, targets)
}

/// Removes dead combatants from `lineup`, recording a death for each.
pub fn remove_dead(lineup: &mut Vec<Combatant>, ctx: &mut ResolveContext<'_>) -> Vec<CombatantId> {
    let mut removed = Vec::new();
    lineup.retain(|combatant| {
        if combatant.is_alive() {
            return true;
        }
        ctx.record(StressEvent::Died {
            side: combatant.side,
        });
        ctx.log.push(CombatEvent::Died {
            name: combatant.name.clone(),
            side: combatant.side,
        });
        removed.push(combatant.id);
        false
    });
    removed
}
