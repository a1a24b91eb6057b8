//! Encounter lifecycle orchestration.
//!
//! The [`GameEngine`] is the only mutator of [`GameState`]. It moves the party
//! between areas, starts and finishes encounters, forwards player input to the
//! [`CombatEngine`], and checks wave and game termination after every step.
//!
//! ```text
//! Idle --enter_area--> InCombat | InspectingTrap | InspectingTreasure | Idle
//! InCombat --tick (end of combat)--> Idle | WaveOver | GameOver
//! Inspecting* --settle_*--> Idle | WaveOver
//! ```

mod combat;
mod errors;
mod settle;

pub use combat::{CombatEngine, remove_dead};
pub use errors::{CombatError, GameEngineError};
pub use settle::{TrapOutcome, TreasureOutcome};

use crate::combat::ResolveContext;
use crate::state::{CombatEvent, CombatPhase, CombatState, GamePhase, GameState};
use crate::stress::StressEvent;

/// Drives a [`GameState`] through its lifecycle.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Borrows the running encounter as a [`CombatEngine`].
    fn combat(&mut self) -> Result<CombatEngine<'_>, CombatError> {
        let GameState {
            config,
            party,
            dungeon,
            combat,
            stress,
            rng,
            log,
            ..
        } = &mut *self.state;
        let combat = combat.as_mut().ok_or(CombatError::NoCombat)?;
        let area = dungeon
            .areas
            .get_mut(combat.area)
            .ok_or(CombatError::NoCombat)?;
        let ctx = ResolveContext::new(stress, rng, log, &config.stress);
        Ok(CombatEngine::new(
            combat,
            &mut party.heroes,
            &mut area.encounter.enemies,
            ctx,
        ))
    }

    fn ensure_phase(&self, expected: GamePhase) -> Result<(), GameEngineError> {
        if self.state.phase != expected {
            return Err(GameEngineError::WrongPhase {
                expected,
                actual: self.state.phase,
            });
        }
        Ok(())
    }

    // ===== exploration =====

    /// Moves the party into area `index` and reacts to what it holds.
    pub fn enter_area(&mut self, index: usize) -> Result<GamePhase, GameEngineError> {
        if self.state.phase != GamePhase::Idle {
            return Err(GameEngineError::Busy {
                phase: self.state.phase,
            });
        }
        let len = self.state.dungeon.areas.len();
        let Some(area) = self.state.dungeon.areas.get(index) else {
            return Err(GameEngineError::UnknownArea { index, len });
        };

        let name = area.name.clone();
        self.state.dungeon.current = Some(index);
        self.state
            .stress
            .record(StressEvent::Movement, &self.state.config.stress);
        self.state.log.push(CombatEvent::EnteredArea { area: name });

        self.update_state()
    }

    /// Dispatches on the contents of the current area.
    fn update_state(&mut self) -> Result<GamePhase, GameEngineError> {
        let Some(index) = self.state.dungeon.current else {
            self.state.phase = GamePhase::Idle;
            return Ok(self.state.phase);
        };
        let encounter = &self.state.dungeon.areas[index].encounter;

        if encounter.has_enemies() {
            self.start_encounter(index)?;
        } else if !encounter.traps.is_empty() {
            self.state.phase = GamePhase::InspectingTrap;
        } else if !encounter.treasures.is_empty() {
            self.state.phase = GamePhase::InspectingTreasure;
        } else {
            self.state.phase = GamePhase::Idle;
        }
        Ok(self.state.phase)
    }

    // ===== combat lifecycle =====

    /// Opens a combat session in `area`.
    ///
    /// Modifiers tick once before the first turn so pre-existing stuns and
    /// bleeds take effect.
    pub fn start_encounter(&mut self, area: usize) -> Result<(), GameEngineError> {
        if self.state.combat.is_some() {
            return Err(GameEngineError::Busy {
                phase: self.state.phase,
            });
        }
        let len = self.state.dungeon.areas.len();
        if area >= len {
            return Err(GameEngineError::UnknownArea { index: area, len });
        }

        self.state.combat = Some(CombatState::new(area));
        self.state.phase = GamePhase::InCombat;

        let mut engine = self.combat()?;
        engine.apply_and_tick();
        engine.process_dead();
        engine.start_encounter();
        Ok(())
    }

    /// Rerolls initiative and begins the next turn.
    pub fn start_turn(&mut self) -> Result<(), GameEngineError> {
        self.combat()?.start_turn();
        Ok(())
    }

    /// Advances through turn and encounter boundaries.
    ///
    /// At the end of a turn both lineups tick their modifiers, deaths are
    /// processed and a new turn starts. At the end of combat the session is
    /// closed and termination is checked. Otherwise nothing happens.
    pub fn tick(&mut self) -> Result<(), GameEngineError> {
        let Some(phase) = self.state.combat_phase() else {
            return Ok(());
        };

        match phase {
            CombatPhase::PickAttack | CombatPhase::ChoosePosition => return Ok(()),
            CombatPhase::EndOfTurn => {
                let mut engine = self.combat()?;
                engine.apply_and_tick();
                engine.process_dead();
                if !engine.is_over() {
                    engine.start_turn();
                }
            }
            CombatPhase::EndOfCombat => {}
        }

        let over = {
            let engine = self.combat()?;
            engine.is_over() || engine.phase() == CombatPhase::EndOfCombat
        };
        if over {
            self.finish_encounter()?;
        }
        Ok(())
    }

    fn finish_encounter(&mut self) -> Result<(), GameEngineError> {
        self.combat()?.process_dead();
        self.state.combat = None;
        self.state.phase = GamePhase::Idle;
        self.state.log.push(CombatEvent::EncounterEnded);

        if !self.check_gameover().is_terminal() {
            self.update_state()?;
        }
        Ok(())
    }

    /// Resolves an action of the current attacker, then processes deaths.
    pub fn process_attack(&mut self, action_index: usize) -> Result<(), GameEngineError> {
        self.ensure_phase(GamePhase::InCombat)?;
        let mut engine = self.combat()?;
        engine.process_attack(action_index)?;
        engine.process_dead();
        Ok(())
    }

    /// Completes an in-flight MOVE to absolute `target_slot`.
    pub fn process_move(&mut self, target_slot: usize) -> Result<(), GameEngineError> {
        self.ensure_phase(GamePhase::InCombat)?;
        self.combat()?.process_move(target_slot)?;
        Ok(())
    }

    /// Removes fallen combatants from the running encounter.
    ///
    /// Runs automatically after every attack; calling it again is a no-op.
    pub fn process_dead(&mut self) -> Result<usize, GameEngineError> {
        Ok(self.combat()?.process_dead())
    }

    /// Cancels an in-flight MOVE; see [`CombatEngine::try_cancel_move`].
    pub fn try_cancel_move(&mut self, action_index: usize) -> Result<bool, GameEngineError> {
        self.ensure_phase(GamePhase::InCombat)?;
        Ok(self.combat()?.try_cancel_move(action_index))
    }

    // ===== termination =====

    /// `WaveOver` when the party is gone, `GameOver` when no enemies remain
    /// anywhere. The final score is the ledger value at that moment.
    pub fn check_gameover(&mut self) -> GamePhase {
        if self.state.phase.is_terminal() {
            return self.state.phase;
        }
        if self.state.party.is_empty() {
            self.state.phase = GamePhase::WaveOver;
            self.state.log.push(CombatEvent::WaveOver);
        } else if !self.state.dungeon.has_enemies_left() {
            let score = self.state.stress.current_value();
            self.state.phase = GamePhase::GameOver;
            self.state.score = Some(score);
            self.state.log.push(CombatEvent::GameOver { score });
        }
        self.state.phase
    }
}
