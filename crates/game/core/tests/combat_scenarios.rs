//! End-to-end encounter scenarios driven through the public engine API.

use despair_core::{
    ActionKind, Area, Attack, CombatEvent, CombatPhase, Combatant, Dungeon, Encounter, GameEngine,
    GamePhase, GameState, Modifier, ModifierKind, Party, PositionMask, TrapOutcome,
    TreasureOutcome, Trap, Treasure,
};
use proptest::prelude::*;

fn jab() -> Attack {
    Attack::damage("Jab", 1.0, 0.5)
}

fn hero(name: &str, hp: f64, spd: f64) -> Combatant {
    Combatant::hero(name, hp)
        .with_stats(0.0, 0.0, spd)
        .with_attack(jab())
}

fn enemy(name: &str, hp: f64, spd: f64) -> Combatant {
    Combatant::enemy(name, hp)
        .with_stats(0.0, 0.0, spd)
        .with_attack(jab())
}

fn stunned(combatant: Combatant) -> Combatant {
    combatant.with_modifier(Modifier::new(
        ModifierKind::Stun,
        1.0,
        Modifier::INFINITE,
        0.0,
    ))
}

fn session(heroes: Vec<Combatant>, enemies: Vec<Combatant>, seed: u64) -> GameState {
    let dungeon = Dungeon::new(vec![Area::new("Crypt", Encounter::with_enemies(enemies))]);
    GameState::new(Party::new(heroes), dungeon, seed).expect("valid session")
}

fn enter(state: &mut GameState) {
    let phase = GameEngine::new(state).enter_area(0).expect("enter area");
    assert_eq!(phase, GamePhase::InCombat);
}

fn index_of(state: &GameState, kind: ActionKind) -> usize {
    state
        .legal_actions()
        .iter()
        .position(|action| action.kind == kind)
        .expect("action present")
}

#[test]
fn passing_for_five_turns_never_touches_hp() {
    let mut state = session(
        vec![hero("Gareth", 15.0, 0.2)],
        vec![enemy("Banshee", 10.0, 1.0)],
        7,
    );
    enter(&mut state);

    while state.combat.as_ref().expect("combat").turn_number <= 5 {
        match state.combat_phase() {
            Some(CombatPhase::PickAttack) => {
                let (attacker, _) = state.current_attacker().expect("attacker");
                let is_hero = attacker.side.is_hero();
                let pass = index_of(&state, ActionKind::Pass);
                let before = state.stress_value();

                GameEngine::new(&mut state).process_attack(pass).expect("pass");

                let delta = state.stress_value() - before;
                if is_hero {
                    assert!(delta > 0, "hero pass must raise stress, got {delta}");
                } else {
                    assert!(delta < 0, "enemy pass must lower stress, got {delta}");
                }
            }
            _ => GameEngine::new(&mut state).tick().expect("tick"),
        }
    }

    assert_eq!(state.party.heroes[0].hp, 15.0);
    assert_eq!(state.enemies()[0].hp, 10.0);
}

#[test]
fn guaranteed_hit_deals_protection_scaled_damage() {
    let slash = Attack::damage("Slash", 10.0, 1.0);
    let mut state = session(
        vec![Combatant::hero("Gareth", 15.0).with_attack(slash)],
        vec![stunned(
            Combatant::enemy("Mummy", 20.0)
                .with_stats(0.0, 0.5, 0.1)
                .with_attack(jab()),
        )],
        3,
    );
    enter(&mut state);

    let before = state.stress_value();
    GameEngine::new(&mut state).process_attack(0).expect("slash");

    assert_eq!(state.enemies()[0].hp, 15.0);
    assert_eq!(state.stress_value() - before, -5);
    assert!(matches!(
        state.log.events().iter().rev().find(|e| matches!(e, CombatEvent::Hit { .. })),
        Some(CombatEvent::Hit { damage, .. }) if *damage == 5.0
    ));
}

#[test]
fn move_then_cancel_leaves_positions_and_cursor_unchanged() {
    let mut state = session(
        vec![hero("Gareth", 15.0, 0.2), hero("Elira", 8.0, 0.2)],
        vec![stunned(enemy("Mummy", 20.0, 0.1))],
        11,
    );
    enter(&mut state);
    let combat_before = state.combat.clone();
    let heroes_before = state.party.heroes.clone();
    let stress_before = state.stress_value();

    let mv = index_of(&state, ActionKind::Move);
    GameEngine::new(&mut state).process_attack(mv).expect("start move");
    assert_eq!(state.combat_phase(), Some(CombatPhase::ChoosePosition));

    GameEngine::new(&mut state).process_attack(mv).expect("cancel move");

    assert_eq!(state.combat, combat_before);
    assert_eq!(state.party.heroes, heroes_before);
    assert_eq!(state.stress_value(), stress_before);
}

#[test]
fn move_reinserts_attacker_and_rejects_other_side() {
    // Gareth is slowest, so he opens every turn from slot 0.
    let mut state = session(
        vec![
            hero("Gareth", 15.0, 0.0),
            hero("Elira", 8.0, 0.9),
            hero("Milo", 6.0, 0.9),
        ],
        vec![stunned(enemy("Mummy", 20.0, 0.1))],
        5,
    );
    enter(&mut state);
    let (attacker, slot) = state.current_attacker().expect("attacker");
    assert_eq!((attacker.name.as_str(), slot), ("Gareth", 0));

    let mv = index_of(&state, ActionKind::Move);
    let mut engine = GameEngine::new(&mut state);
    engine.process_attack(mv).expect("start move");

    // Slot 3 belongs to the enemy lineup; own slot is not a move either.
    assert!(engine.process_move(3).is_err());
    assert!(engine.process_move(0).is_err());
    assert_eq!(engine.state().combat_phase(), Some(CombatPhase::ChoosePosition));
    assert!(matches!(
        engine.state().log.last(),
        Some(CombatEvent::Rejected { .. })
    ));

    let before = engine.state().stress_value();
    engine.process_move(2).expect("move");

    // Reinsertion shifts the others forward; a swap would give Milo, Elira, Gareth.
    let order: Vec<&str> = state.party.heroes.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(order, ["Elira", "Milo", "Gareth"]);
    assert_eq!(state.stress_value() - before, 5);
}

#[test]
fn modifiers_only_stick_to_struck_targets() {
    let bleed = Modifier::new(ModifierKind::Bleed, 1.0, 3, 1.0);
    let mut state = session(
        vec![
            Combatant::hero("Gareth", 15.0)
                .with_attack(Attack::damage("Feint", 2.0, 0.0).with_modifier(bleed))
                .with_attack(Attack::damage("Rend", 2.0, 1.0).with_modifier(bleed)),
        ],
        vec![stunned(enemy("Mummy", 20.0, 0.1))],
        9,
    );
    enter(&mut state);

    GameEngine::new(&mut state).process_attack(0).expect("feint");
    assert_eq!(state.enemies()[0].hp, 20.0);
    assert_eq!(state.enemies()[0].modifiers.len(), 1);
    assert!(!state.enemies()[0].modifiers.has(ModifierKind::Bleed));
    assert!(
        !state
            .log
            .events()
            .iter()
            .any(|e| matches!(e, CombatEvent::ModifierApplied { .. }))
    );

    // The stunned enemy is skipped, so the next turn hands the cursor back.
    GameEngine::new(&mut state).tick().expect("tick");
    assert_eq!(state.current_attacker().expect("attacker").0.name, "Gareth");

    GameEngine::new(&mut state).process_attack(1).expect("rend");
    let mummy = &state.enemies()[0];
    assert_eq!(mummy.modifiers.len(), 2);
    assert_eq!(mummy.modifiers.get(ModifierKind::Bleed), Some(&bleed));
    assert!(matches!(
        state.log.events().iter().rev().find(|e| matches!(e, CombatEvent::ModifierApplied { .. })),
        Some(CombatEvent::ModifierApplied { kind: ModifierKind::Bleed, .. })
    ));
}

#[test]
fn heal_tops_up_ally_and_carries_its_modifier() {
    let regen = Modifier::new(ModifierKind::HealOverTime, 1.0, 2, 1.0);
    let mut patient = hero("Gareth", 10.0, 1.0);
    patient.hp = 8.0;
    let mut state = session(
        vec![
            patient,
            Combatant::hero("Elira", 8.0)
                .with_stats(0.0, 0.0, 0.0)
                .with_attack(Attack::heal("Healing Wave", 5.0).with_modifier(regen)),
        ],
        vec![stunned(enemy("Mummy", 20.0, 0.1))],
        4,
    );
    enter(&mut state);
    assert_eq!(state.current_attacker().expect("attacker").0.name, "Elira");

    let before = state.stress_value();
    GameEngine::new(&mut state).process_attack(0).expect("heal");

    let gareth = &state.party.heroes[0];
    assert_eq!(gareth.hp, 10.0);
    assert_eq!(state.party.heroes[1].hp, 8.0);
    assert_eq!(state.stress_value() - before, -2);
    assert!(gareth.modifiers.has(ModifierKind::HealOverTime));
    assert!(state.party.heroes[1].modifiers.has(ModifierKind::HealOverTime));
}

#[test]
fn inactive_action_is_rejected_without_state_change() {
    let back_only = Attack::damage("Lob", 3.0, 1.0).from_slots(PositionMask::literal("XOOO"));
    let mut state = session(
        vec![Combatant::hero("Gareth", 15.0).with_attack(back_only)],
        vec![stunned(enemy("Mummy", 20.0, 0.1))],
        1,
    );
    enter(&mut state);
    // A lone hero stands in slot 0; the mirrored mask only allows slot 3.
    assert!(!state.legal_actions()[0].active);

    let before = state.clone();
    let err = GameEngine::new(&mut state).process_attack(0).unwrap_err();

    assert!(err.to_string().contains("Lob"));
    assert_eq!(state.combat, before.combat);
    assert_eq!(state.stress_value(), before.stress_value());
    assert_eq!(state.log.len(), before.log.len() + 1);
}

#[test]
fn hero_xoxo_damage_targets_first_and_third_enemy() {
    let mask = PositionMask::literal("XOXO");
    let strike = Attack::damage("Sweep", 2.0, 1.0).targeting(mask);
    let enemies = (0..4)
        .map(|i| stunned(enemy(&format!("Ghoul {i}"), 10.0, 0.1)))
        .collect();
    let mut state = session(
        vec![
            Combatant::hero("Gareth", 15.0).with_attack(strike),
            stunned(hero("Elira", 8.0, 0.2)),
        ],
        enemies,
        2,
    );
    enter(&mut state);

    let n_heroes = state.heroes().len();
    assert_eq!(state.targets_for(0), Some(&[n_heroes, n_heroes + 2][..]));
}

#[test]
fn stunned_combatants_stay_in_initiative() {
    let mut state = session(
        vec![hero("Gareth", 15.0, 0.2)],
        vec![stunned(enemy("Mummy", 20.0, 0.1))],
        9,
    );
    enter(&mut state);

    let combat = state.combat.as_ref().expect("combat");
    assert_eq!(combat.initiative.len(), 2);
    let (attacker, _) = state.current_attacker().expect("attacker");
    assert_eq!(attacker.name, "Gareth");
}

#[test]
fn killing_last_enemy_ends_the_game_and_death_is_idempotent() {
    let finisher = Attack::damage("Execute", 10.0, 1.0);
    let mut state = session(
        vec![Combatant::hero("Gareth", 15.0).with_attack(finisher)],
        vec![stunned(enemy("Imp", 1.0, 0.1))],
        4,
    );
    enter(&mut state);

    let mut engine = GameEngine::new(&mut state);
    engine.process_attack(0).expect("execute");
    assert!(engine.state().enemies().is_empty());
    assert_eq!(engine.state().combat_phase(), Some(CombatPhase::EndOfCombat));

    let stress = engine.state().stress_value();
    assert_eq!(engine.process_dead().expect("no-op"), 0);
    assert_eq!(engine.state().stress_value(), stress);

    engine.tick().expect("finish encounter");
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.score, Some(state.stress_value()));
    assert!(state.combat.is_none());
}

#[test]
fn party_wipe_ends_the_wave() {
    let crush = Attack::damage("Crush", 50.0, 1.0);
    let mut state = session(
        vec![stunned(hero("Milo", 1.0, 0.0))],
        vec![Combatant::enemy("Golem", 40.0).with_attack(crush)],
        6,
    );
    enter(&mut state);

    let mut engine = GameEngine::new(&mut state);
    engine.process_attack(0).expect("crush");
    engine.tick().expect("finish encounter");

    assert_eq!(state.phase, GamePhase::WaveOver);
    assert!(state.party.is_empty());
}

#[test]
fn bleed_ticks_at_turn_boundary() {
    let mut state = session(
        vec![hero("Gareth", 15.0, 0.2)],
        vec![enemy("Mummy", 20.0, 0.1).with_modifier(Modifier::new(
            ModifierKind::Bleed,
            1.0,
            3,
            2.0,
        ))],
        8,
    );
    // Entering the area ticks modifiers once before turn one.
    enter(&mut state);
    assert_eq!(state.enemies()[0].hp, 18.0);

    let mut guard = 0;
    while state.combat.as_ref().expect("combat").turn_number < 2 {
        if state.combat_phase() == Some(CombatPhase::PickAttack) {
            let pass = index_of(&state, ActionKind::Pass);
            GameEngine::new(&mut state).process_attack(pass).expect("pass");
        } else {
            GameEngine::new(&mut state).tick().expect("tick");
        }
        guard += 1;
        assert!(guard < 10);
    }
    assert_eq!(state.enemies()[0].hp, 16.0);
}

#[test]
fn entering_unknown_or_while_busy_is_rejected() {
    let mut state = session(
        vec![hero("Gareth", 15.0, 0.2)],
        vec![enemy("Mummy", 20.0, 0.1)],
        0,
    );
    let mut engine = GameEngine::new(&mut state);
    assert!(engine.enter_area(3).is_err());
    engine.enter_area(0).expect("enter");
    assert!(engine.enter_area(0).is_err());
}

#[test]
fn trap_and_treasure_settlement_update_the_ledger() {
    let trap = Trap {
        name: "Spike pit".into(),
        description: String::new(),
        dmg: 4.0,
        modifier: None,
    };
    let treasure = Treasure {
        name: "Chest".into(),
        description: String::new(),
        trapped: false,
        dmg: 0.0,
        modifier: None,
    };
    let dungeon = Dungeon::new(vec![
        Area::new(
            "Hall",
            Encounter {
                traps: vec![trap],
                ..Encounter::default()
            },
        ),
        Area::new(
            "Vault",
            Encounter {
                treasures: vec![treasure],
                ..Encounter::default()
            },
        ),
        Area::new("Lair", Encounter::with_enemies(vec![enemy("Mummy", 5.0, 0.1)])),
    ]);
    let party = Party::new(vec![
        Combatant::hero("Milo", 6.0)
            .with_resists(0.0, 0.5)
            .with_attack(jab()),
    ]);
    let mut state = GameState::new(party, dungeon, 1).expect("session");
    let mut engine = GameEngine::new(&mut state);

    assert_eq!(engine.enter_area(0).expect("hall"), GamePhase::InspectingTrap);
    assert!(engine.settle_treasure(TreasureOutcome::Ignored).is_err());
    engine
        .settle_trap(TrapOutcome::Triggered { hero: 0 })
        .expect("trap");
    // movement 2 + trigger 10 + damage 4
    assert_eq!(engine.state().stress_value(), 16);
    assert_eq!(engine.state().party.heroes[0].hp, 2.0);
    assert_eq!(engine.state().phase, GamePhase::Idle);

    assert_eq!(
        engine.enter_area(1).expect("vault"),
        GamePhase::InspectingTreasure
    );
    engine
        .settle_treasure(TreasureOutcome::Looted {
            hero: 0,
            inspected: true,
        })
        .expect("loot");
    // movement 2, then loot -10 damped by resist 0.5
    assert_eq!(engine.state().stress_value(), 13);
    assert!(engine.state().dungeon.areas[1].encounter.treasures.is_empty());
}

fn skirmish(seed: u64) -> GameState {
    let heavy = Attack::damage("Cleave", 6.0, 0.9).with_modifier(Modifier::new(
        ModifierKind::Bleed,
        0.5,
        2,
        1.0,
    ));
    let mend = Attack::heal("Mend", 3.0).with_modifier(Modifier::new(
        ModifierKind::HealOverTime,
        0.5,
        2,
        1.0,
    ));
    let heroes = vec![
        hero("Gareth", 15.0, 0.2).with_attack(heavy.clone()),
        hero("Elira", 8.0, 0.3).with_attack(mend.clone()),
        hero("Milo", 6.0, 0.8),
    ];
    let enemies = vec![
        enemy("Mummy", 12.0, 0.1).with_attack(heavy),
        enemy("Banshee", 9.0, 0.6).with_attack(mend),
        enemy("Jellyfin", 7.0, 0.4).with_attack(Attack::damage("Sting", 3.0, 0.7).with_modifier(
            Modifier::new(ModifierKind::Stun, 0.3, 1, 0.0),
        )),
    ];
    session(heroes, enemies, seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn hp_stays_within_bounds(seed in any::<u64>(), picks in proptest::collection::vec(any::<u8>(), 1..200)) {
        let mut state = skirmish(seed);
        enter(&mut state);

        for pick in picks {
            if state.phase != GamePhase::InCombat {
                break;
            }
            let mut engine = GameEngine::new(&mut state);
            match engine.state().combat_phase() {
                Some(CombatPhase::PickAttack) => {
                    let active: Vec<usize> = engine
                        .state()
                        .legal_actions()
                        .iter()
                        .enumerate()
                        .filter(|(_, a)| a.active)
                        .map(|(i, _)| i)
                        .collect();
                    let choice = active[pick as usize % active.len()];
                    prop_assert!(engine.process_attack(choice).is_ok());
                }
                Some(CombatPhase::ChoosePosition) => {
                    let (_, slot) = engine.state().current_attacker().expect("attacker");
                    let mv = engine.state().move_action_index().expect("move");
                    let targets = engine.state().targets_for(mv).expect("targets").to_vec();
                    prop_assert!(!targets.contains(&slot));
                    let target = targets[pick as usize % targets.len()];
                    prop_assert!(engine.process_move(target).is_ok());
                }
                _ => prop_assert!(engine.tick().is_ok()),
            }

            for combatant in state.heroes().iter().chain(state.enemies()) {
                prop_assert!(combatant.hp >= 0.0 && combatant.hp <= combatant.max_hp);
            }
            if let Some(combat) = state.combat.as_ref()
                && combat.phase != CombatPhase::EndOfCombat
            {
                prop_assert_eq!(
                    combat.initiative.len(),
                    state.heroes().len() + state.enemies().len()
                );
            }
        }
    }

    #[test]
    fn speculative_copies_never_touch_the_live_session(seed in any::<u64>()) {
        let mut live = skirmish(seed);
        enter(&mut live);
        let frozen = live.clone();

        let mut copy = live.snapshot();
        let mut engine = GameEngine::new(&mut copy);
        for _ in 0..20 {
            match engine.state().combat_phase() {
                Some(CombatPhase::PickAttack) => {
                    let pass = engine.state().legal_actions().len() - 2;
                    let _ = engine.process_attack(pass);
                }
                Some(_) => { let _ = engine.tick(); }
                None => break,
            }
        }

        prop_assert_eq!(&live, &frozen);
        prop_assert_ne!(&copy, &live);
    }
}
