use despair_content::preset_session;
use despair_core::{
    Area, Attack, Combatant, Dungeon, Encounter, GameConfig, GameState, Party, Trap,
};
use despair_runtime::{
    GreedyProvider, PassActionProvider, ProviderKind, RandomProvider, RuntimeError,
    ScriptedChoice, ScriptedProvider, Simulator, SimulationReport, SimulatorConfig, Termination,
};

/// One hero who always opens, facing a single frail enemy.
fn execution() -> GameState {
    let hero = Combatant::hero("Ada", 20.0)
        .with_stats(0.0, 0.0, 0.0)
        .with_attack(Attack::damage("Execute", 10.0, 1.0));
    let victim = Combatant::enemy("Rat", 1.0)
        .with_stats(0.0, 0.0, 0.9)
        .with_attack(Attack::damage("Bite", 1.0, 1.0));
    let dungeon = Dungeon::new(vec![Area::new(
        "Cellar",
        Encounter::with_enemies(vec![victim]),
    )]);
    GameState::new(Party::new(vec![hero]), dungeon, 42).unwrap()
}

#[tokio::test]
async fn builder_requires_both_providers() {
    let err = Simulator::builder()
        .hero_provider(PassActionProvider)
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        RuntimeError::ProviderNotSet {
            kind: ProviderKind::Enemy
        }
    ));
}

#[tokio::test]
async fn scripted_kill_clears_the_dungeon() {
    let simulator = Simulator::builder()
        .hero_provider(ScriptedProvider::new([ScriptedChoice::Action(0)]))
        .enemy_provider(PassActionProvider)
        .build()
        .unwrap();

    let run = simulator.run(execution()).await.unwrap();

    // movement 2, turn 1, 10 damage dealt, enemy death
    assert_eq!(run.termination, Termination::GameOver { score: -107 });
    assert_eq!(run.n_steps, 2);
    assert_eq!(run.stress_trace, vec![3, -107]);
    assert_eq!(run.encounters_desc, vec!["Cellar: enemies: Rat".to_owned()]);
    assert_eq!(run.encounters_stress_delta, vec![-107]);
}

#[tokio::test]
async fn simulator_config_replaces_the_session_table() {
    let mut config = GameConfig::default();
    config.stress.movement = 12;
    let kill = || ScriptedProvider::new([ScriptedChoice::Action(0)]);

    let stock = Simulator::builder()
        .hero_provider(kill())
        .enemy_provider(PassActionProvider)
        .build()
        .unwrap();
    let run = stock
        .run(execution().with_config(config.clone()))
        .await
        .unwrap();
    assert_eq!(run.termination, Termination::GameOver { score: -107 });

    let tuned = Simulator::builder()
        .config(SimulatorConfig {
            game_config: config,
            ..SimulatorConfig::default()
        })
        .hero_provider(kill())
        .enemy_provider(PassActionProvider)
        .build()
        .unwrap();
    let run = tuned.run(execution()).await.unwrap();
    assert_eq!(run.termination, Termination::GameOver { score: -97 });
}

#[tokio::test]
async fn leftover_trap_is_walked_past() {
    let rat = || {
        Combatant::enemy("Rat", 1.0)
            .with_stats(0.0, 0.0, 0.9)
            .with_attack(Attack::damage("Bite", 1.0, 1.0))
    };
    let mut cellar = Encounter::with_enemies(vec![rat()]);
    cellar.traps.push(Trap {
        name: "Tripwire".into(),
        description: String::new(),
        dmg: 2.0,
        modifier: None,
    });
    let dungeon = Dungeon::new(vec![
        Area::new("Cellar", cellar),
        Area::new("Sewer", Encounter::with_enemies(vec![rat()])),
    ]);
    let hero = Combatant::hero("Ada", 20.0)
        .with_stats(0.0, 0.0, 0.0)
        .with_attack(Attack::damage("Execute", 10.0, 1.0));
    let state = GameState::new(Party::new(vec![hero]), dungeon, 42).unwrap();

    let simulator = Simulator::builder()
        .hero_provider(ScriptedProvider::new([
            ScriptedChoice::Action(0),
            ScriptedChoice::Action(0),
        ]))
        .enemy_provider(PassActionProvider)
        .build()
        .unwrap();

    let run = simulator.run(state).await.unwrap();

    // enter, kill, ignore trap, enter, kill
    assert_eq!(run.n_steps, 5);
    assert_eq!(run.termination, Termination::GameOver { score: -214 });
    assert_eq!(run.encounters_stress_delta, vec![-107, -107]);
    assert_eq!(
        run.encounters_desc,
        vec!["Cellar: enemies: Rat".to_owned(), "Sewer: enemies: Rat".to_owned()]
    );
}

#[tokio::test]
async fn step_budget_cuts_runs_short() {
    let simulator = Simulator::builder()
        .max_steps(5)
        .hero_provider(PassActionProvider)
        .enemy_provider(PassActionProvider)
        .build()
        .unwrap();

    let run = simulator.run(preset_session(1).unwrap()).await.unwrap();
    assert_eq!(run.termination, Termination::MaxSteps);
    assert_eq!(run.n_steps, 5);
    assert_eq!(run.stress_trace.len(), 5);
    // The open encounter is still measured.
    assert_eq!(run.encounters_desc.len(), 1);
    assert_eq!(run.encounters_stress_delta.len(), 1);
}

#[tokio::test]
async fn random_players_finish_the_preset() {
    let simulator = Simulator::builder()
        .players("random")
        .hero_provider(RandomProvider::seeded(8))
        .enemy_provider(RandomProvider::seeded(9))
        .build()
        .unwrap();

    let run = simulator.run(preset_session(8).unwrap()).await.unwrap();
    assert!(run.n_steps <= simulator.config().max_steps);
    assert_eq!(run.stress_trace.len(), run.n_steps);
    assert_eq!(run.encounters_desc.len(), run.encounters_stress_delta.len());
    assert!(!run.encounters_desc.is_empty());
    if let Termination::GameOver { score } = run.termination {
        assert_eq!(score, run.final_stress());
    }
}

#[tokio::test]
async fn greedy_runs_are_deterministic() {
    let simulator = Simulator::builder()
        .players("ai")
        .max_steps(300)
        .hero_provider(GreedyProvider::new())
        .enemy_provider(GreedyProvider::new())
        .build()
        .unwrap();

    let first = simulator.run(preset_session(21).unwrap()).await.unwrap();
    let second = simulator.run(preset_session(21).unwrap()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn batch_report_round_trips_through_a_file() {
    let simulator = Simulator::builder()
        .players("random")
        .max_steps(200)
        .hero_provider(RandomProvider::seeded(1))
        .enemy_provider(RandomProvider::seeded(2))
        .build()
        .unwrap();

    let report = simulator
        .run_batch(3, |run| Ok(preset_session(100 + run as u64)?))
        .await
        .unwrap();
    assert_eq!(report.runs.len(), 3);
    assert_eq!(report.summary.runs, 3);
    assert_eq!(report.players, "random");
    assert_eq!(
        report.runs.iter().map(|r| r.seed).collect::<Vec<_>>(),
        vec![100, 101, 102]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, report.to_json().unwrap()).unwrap();
    let parsed: SimulationReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, report);
}
