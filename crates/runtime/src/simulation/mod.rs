//! Headless simulation loop.
//!
//! The [`Simulator`] drives a [`GameState`] to completion with one
//! [`ActionProvider`] per side. Each step performs exactly one decision:
//!
//! ```text
//! Idle               -> enter the first area that still holds enemies
//! InspectingTrap     -> walk past the trap
//! InspectingTreasure -> leave the treasure
//! InCombat           -> ask the attacker's provider for an action or a slot
//! ```
//!
//! After every step the engine ticks once and the ledger value is appended to
//! the run's stress trace.

mod report;

pub use report::{RunData, RunSummary, SimulationReport, Termination};

use despair_core::{
    CombatPhase, GameConfig, GameEngine, GameEngineError, GameError, GamePhase, GameState,
    TrapOutcome, TreasureOutcome,
};

use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};

/// Simulator configuration.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub game_config: GameConfig,
    /// Steps after which a run is cut short.
    pub max_steps: usize,
}

impl SimulatorConfig {
    pub const DEFAULT_MAX_STEPS: usize = 2000;
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

/// Combat encounter currently being measured.
struct OpenEncounter {
    desc: String,
    stress_before: i64,
}

/// Runs sessions to completion with one provider per side.
pub struct Simulator {
    config: SimulatorConfig,
    players: String,
    hero_provider: Box<dyn ActionProvider>,
    enemy_provider: Box<dyn ActionProvider>,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Plays `state` until the game or the wave is over, or the step budget
    /// runs out.
    ///
    /// The session's own `config` is replaced by the simulator's
    /// `game_config`, so every run of a batch scores against the same table.
    pub async fn run(&self, mut state: GameState) -> Result<RunData> {
        state.config = self.config.game_config.clone();
        let mut run = RunData::new(state.seed);
        let mut open: Option<OpenEncounter> = None;

        loop {
            match state.phase {
                GamePhase::GameOver => {
                    let score = state.score.unwrap_or_else(|| state.stress_value());
                    run.termination = Termination::GameOver { score };
                    break;
                }
                GamePhase::WaveOver => {
                    run.termination = Termination::WaveOver;
                    break;
                }
                _ if run.n_steps >= self.config.max_steps => {
                    run.termination = Termination::MaxSteps;
                    break;
                }
                _ => {}
            }

            let stress_before = state.stress_value();
            self.step(&mut state).await?;
            run.n_steps += 1;
            GameEngine::new(&mut state).tick()?;
            run.stress_trace.push(state.stress_value());

            track_encounter(&state, &mut open, &mut run, stress_before);
            for event in state.log.drain() {
                tracing::debug!("{}", event);
            }
        }

        if let Some(encounter) = open.take() {
            run.encounters_desc.push(encounter.desc);
            run.encounters_stress_delta
                .push(state.stress_value() - encounter.stress_before);
        }

        tracing::info!(
            "Run (seed {}) finished after {} steps: {}",
            run.seed,
            run.n_steps,
            run.termination
        );
        Ok(run)
    }

    /// Runs `runs` sessions built by `scenario` and collects a report.
    ///
    /// `scenario` receives the run index.
    pub async fn run_batch<F>(&self, runs: usize, mut scenario: F) -> Result<SimulationReport>
    where
        F: FnMut(usize) -> Result<GameState>,
    {
        let mut data = Vec::with_capacity(runs);
        for index in 0..runs {
            tracing::info!("Starting run {}/{}", index + 1, runs);
            data.push(self.run(scenario(index)?).await?);
        }
        Ok(SimulationReport::new(
            self.players.clone(),
            self.config.game_config.clone(),
            data,
        ))
    }

    /// Performs the single decision the current phase calls for.
    async fn step(&self, state: &mut GameState) -> Result<()> {
        match state.phase {
            GamePhase::Idle => match state.dungeon.next_hostile_area() {
                Some(area) => {
                    GameEngine::new(state).enter_area(area)?;
                }
                None => {
                    GameEngine::new(state).check_gameover();
                }
            },
            GamePhase::InspectingTrap => {
                GameEngine::new(state).settle_trap(TrapOutcome::Ignored)?;
            }
            GamePhase::InspectingTreasure => {
                GameEngine::new(state).settle_treasure(TreasureOutcome::Ignored)?;
            }
            GamePhase::InCombat => self.combat_step(state).await?,
            GamePhase::WaveOver | GamePhase::GameOver => {}
        }
        Ok(())
    }

    async fn combat_step(&self, state: &mut GameState) -> Result<()> {
        match state.combat_phase() {
            Some(CombatPhase::PickAttack) => {
                let index = self.provider_for(state)?.pick_action(state).await?;
                tolerate(GameEngine::new(state).process_attack(index))
            }
            Some(CombatPhase::ChoosePosition) => {
                match self.provider_for(state)?.pick_slot(state).await? {
                    Some(slot) => tolerate(GameEngine::new(state).process_move(slot)),
                    None => {
                        let index = state.move_action_index().ok_or(RuntimeError::NoAttacker)?;
                        GameEngine::new(state).try_cancel_move(index)?;
                        Ok(())
                    }
                }
            }
            // Turn and combat boundaries are handled by the tick.
            Some(CombatPhase::EndOfTurn | CombatPhase::EndOfCombat) | None => Ok(()),
        }
    }

    fn provider_for(&self, state: &GameState) -> Result<&dyn ActionProvider> {
        let (attacker, _) = state.current_attacker().ok_or(RuntimeError::NoAttacker)?;
        Ok(match ProviderKind::from(attacker.side) {
            ProviderKind::Hero => self.hero_provider.as_ref(),
            ProviderKind::Enemy => self.enemy_provider.as_ref(),
        })
    }
}

/// Rejected combat input leaves the state untouched; the run goes on.
fn tolerate(result: std::result::Result<(), GameEngineError>) -> Result<()> {
    match result {
        Err(err @ GameEngineError::Combat(_)) if !err.severity().is_internal() => {
            tracing::warn!("Rejected combat input [{}]: {}", err.error_code(), err);
            Ok(())
        }
        other => other.map_err(RuntimeError::from),
    }
}

/// Opens a measurement when a combat starts and closes it when it ends.
fn track_encounter(
    state: &GameState,
    open: &mut Option<OpenEncounter>,
    run: &mut RunData,
    stress_before: i64,
) {
    match (open.is_some(), state.combat.as_ref()) {
        (false, Some(combat)) => {
            let desc = state
                .dungeon
                .areas
                .get(combat.area)
                .map(|area| format!("{}: {}", area.name, area.encounter.describe()))
                .unwrap_or_default();
            tracing::info!("Encounter started: {}", desc);
            *open = Some(OpenEncounter {
                desc,
                stress_before,
            });
        }
        (true, None) => {
            if let Some(encounter) = open.take() {
                let delta = state.stress_value() - encounter.stress_before;
                tracing::info!("Encounter over: {} (stress {:+})", encounter.desc, delta);
                run.encounters_desc.push(encounter.desc);
                run.encounters_stress_delta.push(delta);
            }
        }
        _ => {}
    }
}

/// Builder for [`Simulator`].
pub struct SimulatorBuilder {
    config: SimulatorConfig,
    players: String,
    hero_provider: Option<Box<dyn ActionProvider>>,
    enemy_provider: Option<Box<dyn ActionProvider>>,
}

impl SimulatorBuilder {
    fn new() -> Self {
        Self {
            config: SimulatorConfig::default(),
            players: "custom".to_owned(),
            hero_provider: None,
            enemy_provider: None,
        }
    }

    pub fn config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    /// Label recorded in the report.
    pub fn players(mut self, players: impl Into<String>) -> Self {
        self.players = players.into();
        self
    }

    pub fn hero_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.hero_provider = Some(Box::new(provider));
        self
    }

    pub fn enemy_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.enemy_provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> Result<Simulator> {
        let hero_provider = self.hero_provider.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Hero,
        })?;
        let enemy_provider = self.enemy_provider.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Enemy,
        })?;

        Ok(Simulator {
            config: self.config,
            players: self.players,
            hero_provider,
            enemy_provider,
        })
    }
}
