use despair_core::{
    Area, Attack, Combatant, Dungeon, Encounter, Modifier, ModifierKind, PositionMask, Trap,
    Treasure,
};

/// Enemies fight from the front two slots of their own side.
const ENEMY_RANKS: PositionMask = PositionMask::literal("XXOO");

const ENEMY_ACCURACY: f64 = 0.8;

fn strike(name: &str, dmg: f64, targets: &'static str) -> Attack {
    Attack::damage(name, dmg, ENEMY_ACCURACY)
        .from_slots(ENEMY_RANKS)
        .targeting(PositionMask::literal(targets))
}

fn clocktower() -> Area {
    let banshee = Combatant::enemy("Banshee", 10.0)
        .with_description("A wailing spirit whose cry saps the will to go on.")
        .with_stats(0.2, 0.1, 0.2)
        .with_attack(
            strike("Wail of Despair", 3.0, "XOOX")
                .with_modifier(Modifier::new(ModifierKind::Scare, 0.5, 2, 0.25)),
        )
        .with_attack(strike("Ethereal Slash", 5.0, "OOXX"));
    let hacker = Combatant::enemy("Hacktivist Hacker", 10.0)
        .with_description("A hooded figure hunched over a glowing terminal.")
        .with_stats(0.1, 0.05, 0.3)
        .with_attack(strike("Data Spike", 6.0, "OOXX"));
    let priest = Combatant::enemy("Mummy Priest", 20.0)
        .with_description("A bandaged hierophant muttering forgotten rites.")
        .with_stats(0.3, 0.2, 0.1)
        .with_attack(
            strike("Curse of the Pharaoh", 3.0, "XOXO")
                .with_modifier(Modifier::new(ModifierKind::Bleed, 0.5, 3, 1.0)),
        )
        .with_attack(strike("Sandstorm Shroud", 2.0, "OXOX"))
        .with_attack(strike("Ankh's Drain", 2.0, "XXOO"));

    Area::new(
        "Clocktower Observatory",
        Encounter::with_enemies(vec![banshee, hacker, priest]),
    )
    .with_description("Brass gears grind overhead beneath a cracked glass dome.")
}

fn throne_room() -> Area {
    let guardian = Combatant::enemy("Spectral Guardian", 15.0)
        .with_description("The translucent sentinel of a long-dead king.")
        .with_stats(0.4, 0.3, 0.5)
        .with_attack(strike("Phantom Step", 7.0, "OXOX"))
        .with_attack(strike("Atlantian Shield", 2.0, "OXXO"));
    let swarm = Combatant::enemy("Luminescent Jellyfin Swarm", 10.0)
        .with_description("A drifting cloud of glowing, stinging jellyfin.")
        .with_stats(0.2, 0.4, 0.2)
        .with_attack(strike("Electric Shock", 4.0, "XXOO"))
        .with_attack(
            strike("Blinding Flash", 1.0, "OXOX")
                .with_description(
                    "A burst of bioluminescence that blinds enemies and slows their reactions.",
                )
                .with_modifier(Modifier::new(ModifierKind::Stun, 0.3, 1, 0.0)),
        )
        .with_attack(strike("Swarm Surge", 4.0, "XOXO"));

    let mut encounter = Encounter::with_enemies(vec![guardian, swarm]);
    encounter.traps.push(Trap {
        name: "Collapsing Dais".into(),
        description: "Loose flagstones around the throne give way underfoot.".into(),
        dmg: 3.0,
        modifier: None,
    });
    encounter.treasures.push(Treasure {
        name: "Royal Coffer".into(),
        description: "A gilded chest resting at the foot of the throne.".into(),
        trapped: true,
        dmg: 2.0,
        modifier: Some(Modifier::new(ModifierKind::Bleed, 1.0, 2, 1.0)),
    });

    Area::new("Forgotten Throne Room", encounter)
        .with_description("Dust-choked banners hang over an empty, cracked throne.")
}

/// Two hostile areas, explored in order.
pub fn preset_dungeon() -> Dungeon {
    Dungeon::new(vec![clocktower(), throne_room()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throne_room_holds_loot_after_the_fight() {
        let dungeon = preset_dungeon();
        let encounter = &dungeon.areas[1].encounter;
        assert!(encounter.has_enemies());
        assert_eq!(encounter.traps.len(), 1);
        assert!(encounter.treasures[0].trapped);
    }

    #[test]
    fn enemies_start_from_front_ranks() {
        for area in preset_dungeon().areas {
            for enemy in &area.encounter.enemies {
                assert!(enemy.attacks.iter().all(|a| a.starting_positions == ENEMY_RANKS));
            }
        }
    }
}
