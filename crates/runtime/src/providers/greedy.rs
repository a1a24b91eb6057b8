//! Greedy stress-driven AI.
//!
//! Every candidate action is played out on a snapshot of the session and
//! scored by the stress it produces. Heroes want the ledger low, enemies want
//! it high, so the enemy score is negated and the lowest score wins.
//!
//! Each snapshot's RNG is reseeded from the live session before the trial so
//! that all candidates face the same rolls and the live stream is untouched.

use async_trait::async_trait;

use despair_core::combat::{can_start_from, resolve_targets};
use despair_core::{ActionKind, CombatantId, GameEngine, GameState, Side, compute_seed};

use crate::api::{ActionProvider, Result, RuntimeError};

/// Score of an action that cannot be taken.
const INACTIVE_SCORE: f64 = f64::INFINITY;

/// Picks the action with the best one-step stress outcome for its side.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyProvider;

impl GreedyProvider {
    pub fn new() -> Self {
        Self
    }

    /// Stress-driven score of every entry of the current action menu.
    pub fn score_actions(&self, state: &GameState) -> Result<Vec<f64>> {
        let (attacker, _) = state.current_attacker().ok_or(RuntimeError::NoAttacker)?;
        let sign = side_sign(attacker.side);
        let seed = trial_seed(state, attacker.id);
        let before = state.stress_value();

        let mut scores: Vec<f64> = Vec::with_capacity(state.legal_actions().len());
        for (index, action) in state.legal_actions().iter().enumerate() {
            let score = if !action.active {
                INACTIVE_SCORE
            } else if action.kind == ActionKind::Move {
                match self.trial_move(state, index, seed)? {
                    Some(after) => sign * (after - before) as f64,
                    // Only worth it if nothing else is.
                    None => scores.last().copied().unwrap_or(0.0) + 1.0,
                }
            } else {
                sign * (self.trial(state, index, seed)? - before) as f64
            };
            scores.push(score);
        }
        Ok(scores)
    }

    /// Ledger value after playing `index` and one engine tick.
    fn trial(&self, state: &GameState, index: usize, seed: u64) -> Result<i64> {
        let mut trial = state.snapshot();
        trial.rng.reseed(seed);
        let mut engine = GameEngine::new(&mut trial);
        engine.process_attack(index)?;
        engine.tick()?;
        Ok(trial.stress_value())
    }

    /// Ledger value after moving to the best slot, if any slot helps.
    fn trial_move(&self, state: &GameState, index: usize, seed: u64) -> Result<Option<i64>> {
        let mut trial = state.snapshot();
        trial.rng.reseed(seed);
        GameEngine::new(&mut trial).process_attack(index)?;

        let Some(slot) = self.best_slot(&trial)? else {
            return Ok(None);
        };
        GameEngine::new(&mut trial).process_move(slot)?;
        Ok(Some(trial.stress_value()))
    }

    /// Same-side slot that most increases the mover's usable attacks.
    ///
    /// Expects a MOVE in flight. `None` when staying put is at least as good.
    pub fn best_slot(&self, state: &GameState) -> Result<Option<usize>> {
        let (mover, _) = state.current_attacker().ok_or(RuntimeError::NoAttacker)?;
        let mover = mover.id;
        let Some(candidates) = state
            .move_action_index()
            .and_then(|index| state.targets_for(index))
        else {
            return Ok(None);
        };

        let mut best_count = usable_attacks(state, mover);
        let mut best = None;
        for &slot in candidates {
            let mut trial = state.snapshot();
            if GameEngine::new(&mut trial).process_move(slot).is_err() {
                continue;
            }
            let count = usable_attacks(&trial, mover);
            if count > best_count {
                best_count = count;
                best = Some(slot);
            }
        }
        Ok(best)
    }
}

#[async_trait]
impl ActionProvider for GreedyProvider {
    async fn pick_action(&self, state: &GameState) -> Result<usize> {
        let scores = self.score_actions(state)?;
        let choice = scores
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
            .ok_or(RuntimeError::NoAttacker)?;

        tracing::debug!(
            "Greedy scores {:?} -> {}",
            scores,
            state.legal_actions()[choice].name
        );
        Ok(choice)
    }

    async fn pick_slot(&self, state: &GameState) -> Result<Option<usize>> {
        let slot = self.best_slot(state)?;
        tracing::debug!("Greedy move target: {:?}", slot);
        Ok(slot)
    }
}

fn side_sign(side: Side) -> f64 {
    match side {
        Side::Hero => 1.0,
        Side::Enemy => -1.0,
    }
}

/// Seed shared by all trials of one decision.
fn trial_seed(state: &GameState, actor: CombatantId) -> u64 {
    let (turn, index) = state
        .combat
        .as_ref()
        .map(|combat| (combat.turn_number, combat.active_index))
        .unwrap_or_default();
    compute_seed(state.seed, u64::from(turn), actor.0, index as u32)
}

/// Damage and heal attacks `id` could use from where it stands.
fn usable_attacks(state: &GameState, id: CombatantId) -> usize {
    let formation = state.formation();
    let Some(absolute) = state.slot_of(id) else {
        return 0;
    };
    let (Some((side, slot)), Some(combatant)) = (formation.locate(absolute), state.at_slot(absolute))
    else {
        return 0;
    };

    combatant
        .attacks
        .iter()
        .filter(|attack| matches!(attack.kind, ActionKind::Damage | ActionKind::Heal))
        .filter(|attack| {
            can_start_from(side, attack.starting_positions, slot)
                && !resolve_targets(side, attack.kind, attack.target_positions, formation)
                    .is_empty()
        })
        .count()
}

#[cfg(test)]
mod tests {
    use despair_core::{Area, Attack, Combatant, Dungeon, Encounter, Party, PositionMask};

    use super::*;

    fn duel(attack: Attack) -> GameState {
        // Initiative is ascending, so the slow knight always opens.
        let hero = Combatant::hero("Knight", 20.0)
            .with_stats(0.0, 0.0, 0.0)
            .with_attack(attack);
        let enemy = Combatant::enemy("Ghoul", 20.0)
            .with_stats(0.0, 0.0, 0.9)
            .with_attack(Attack::damage("Claw", 1.0, 1.0));
        let dungeon = Dungeon::new(vec![Area::new(
            "Crypt",
            Encounter::with_enemies(vec![enemy]),
        )]);
        let mut state = GameState::new(Party::new(vec![hero]), dungeon, 11).unwrap();
        GameEngine::new(&mut state).enter_area(0).unwrap();
        state
    }

    #[test]
    fn hero_prefers_landing_a_blow_over_passing() {
        let state = duel(Attack::damage("Cleave", 5.0, 1.0));
        let (attacker, _) = state.current_attacker().unwrap();
        assert_eq!(attacker.name, "Knight");

        let scores = GreedyProvider::new().score_actions(&state).unwrap();
        let cleave = state
            .legal_actions()
            .iter()
            .position(|a| a.name == "Cleave")
            .unwrap();
        let pass = state
            .legal_actions()
            .iter()
            .position(|a| a.kind == ActionKind::Pass)
            .unwrap();
        assert!(scores[cleave] < scores[pass]);
    }

    #[test]
    fn inactive_actions_are_never_chosen() {
        let blocked = Attack::damage("Lunge", 5.0, 1.0).from_slots(PositionMask::literal("XOOO"));
        let state = duel(blocked);
        let scores = GreedyProvider::new().score_actions(&state).unwrap();
        let lunge = state
            .legal_actions()
            .iter()
            .position(|a| a.name == "Lunge")
            .unwrap();
        assert!(!state.legal_actions()[lunge].active);
        assert_eq!(scores[lunge], INACTIVE_SCORE);
    }

    #[test]
    fn scoring_leaves_live_state_untouched() {
        let state = duel(Attack::damage("Cleave", 5.0, 1.0));
        let before = state.clone();
        GreedyProvider::new().score_actions(&state).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn lone_hero_has_nowhere_to_move() {
        let state = duel(Attack::damage("Cleave", 5.0, 1.0));
        assert_eq!(usable_attacks(&state, state.party.heroes[0].id), 1);

        let index = state.move_action_index().unwrap();
        assert!(!state.legal_actions()[index].active);
        assert_eq!(GreedyProvider::new().best_slot(&state).unwrap(), None);
    }
}
