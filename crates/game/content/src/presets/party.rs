use despair_core::{Attack, Combatant, Party, PositionMask};

/// Heroes fight from the back two slots of their own side.
const HERO_RANKS: PositionMask = PositionMask::literal("OOXX");

const XXOX: PositionMask = PositionMask::literal("XXOX");
const OXXO: PositionMask = PositionMask::literal("OXXO");
const XOXO: PositionMask = PositionMask::literal("XOXO");
const XOOX: PositionMask = PositionMask::literal("XOOX");
const OXOX: PositionMask = PositionMask::literal("OXOX");
const XXOO: PositionMask = PositionMask::literal("XXOO");

const HERO_ACCURACY: f64 = 0.5;

fn strike(name: &str, description: &str, dmg: f64, targets: PositionMask) -> Attack {
    Attack::damage(name, dmg, HERO_ACCURACY)
        .with_description(description)
        .from_slots(HERO_RANKS)
        .targeting(targets)
}

/// Gareth, Elira, Aelarion and Milo, in slot order.
pub fn starting_party() -> Party {
    Party::new(vec![
        Combatant::hero("Gareth Ironclad", 15.0)
            .with_description("A stalwart knight in dented plate, sworn to shield his companions.")
            .with_stats(0.1, 0.8, 0.2)
            .with_resists(0.1, 0.0)
            .with_attack(strike(
                "Blade of Valor",
                "A sweeping strike of a consecrated longsword.",
                3.0,
                XXOX,
            ))
            .with_attack(strike(
                "Shield Bash",
                "Slams his tower shield into the nearest foe.",
                1.0,
                OXXO,
            ))
            .with_attack(strike(
                "Heroic Charge",
                "Rushes the enemy line, heedless of danger.",
                4.0,
                XXOX,
            )),
        Combatant::hero("Elira Moonwhisper", 8.0)
            .with_description("A soft-spoken priestess whose prayers mend flesh and burn the unholy.")
            .with_stats(0.2, 0.2, 0.1)
            .with_resists(0.1, 0.0)
            .with_attack(strike(
                "Divine Light",
                "A lance of radiance that sears the wicked.",
                2.0,
                XOXO,
            ))
            .with_attack(
                Attack::heal("Healing Wave", 1.0)
                    .with_description("A gentle wave of light that closes wounds.")
                    .from_slots(HERO_RANKS)
                    .targeting(XOOX),
            )
            .with_attack(strike(
                "Holy Smite",
                "Calls down judgement on a single foe.",
                2.0,
                OXOX,
            )),
        Combatant::hero("Aelarion Starfire", 10.0)
            .with_description("An elven archmage who bends starlight into fire and frost.")
            .with_stats(0.1, 0.2, 0.5)
            .with_resists(0.1, 0.0)
            .with_attack(strike(
                "Arcane Blast",
                "A raw bolt of arcane force.",
                2.0,
                OXOX,
            ))
            .with_attack(strike(
                "Fireball",
                "An exploding sphere of flame.",
                5.0,
                XXOO,
            ))
            .with_attack(strike(
                "Frost Nova",
                "A ring of biting cold.",
                1.0,
                OXOX,
            )),
        Combatant::hero("Milo Underfoot", 6.0)
            .with_description("A nimble halfling thief who moves with silent grace.")
            .with_stats(0.9, 0.2, 0.8)
            .with_resists(0.1, 0.0)
            .with_attack(strike(
                "Shadow Strike",
                "Darts through the shadows, striking from an unexpected angle.",
                3.0,
                OXOX,
            ))
            .with_attack(strike(
                "Sneak Attack",
                "Sneaks up on a target and delivers a precise blow.",
                5.0,
                XOOX,
            ))
            .with_attack(strike(
                "Smoke Bomb",
                "Disorients the enemy line with a cloud of smoke.",
                1.0,
                XOXO,
            )),
    ])
}
