//! Position-mask orientation and target resolution.
//!
//! Combatants are laid out left to right in one absolute row: heroes first
//! (slots `0..n_heroes`), then enemies. Hero-side masks are authored from the
//! heroes' point of view and must be mirrored before use; enemy-side masks are
//! used as written. Every orientation decision goes through [`mirrors`].

use crate::state::{ActionKind, PositionMask, Side};

/// Which mask of an attack is being oriented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskRole {
    /// Slots the attacker may act from.
    Starting,
    /// Slots the attack may land on.
    Target(ActionKind),
}

/// Whether a mask must be reversed for an attacker on `side`.
///
/// | attacker | role | mirrored |
/// |----------|------|----------|
/// | Hero | starting | yes |
/// | Enemy | starting | no |
/// | Hero | DAMAGE target | no |
/// | Enemy | DAMAGE target | yes |
/// | Hero | HEAL target | yes |
/// | Enemy | HEAL target | no |
pub const fn mirrors(side: Side, role: MaskRole) -> bool {
    match (side, role) {
        (Side::Hero, MaskRole::Starting) => true,
        (Side::Enemy, MaskRole::Starting) => false,
        (Side::Hero, MaskRole::Target(ActionKind::Damage)) => false,
        (Side::Enemy, MaskRole::Target(ActionKind::Damage)) => true,
        (Side::Hero, MaskRole::Target(ActionKind::Heal)) => true,
        (Side::Enemy, MaskRole::Target(ActionKind::Heal)) => false,
        // MOVE and PASS carry no positional target mask.
        (_, MaskRole::Target(ActionKind::Move | ActionKind::Pass)) => false,
    }
}

/// Returns `mask` oriented for `side` and `role`.
pub fn oriented(mask: PositionMask, side: Side, role: MaskRole) -> PositionMask {
    if mirrors(side, role) {
        mask.reversed()
    } else {
        mask
    }
}

/// Sizes of both lineups at the moment of resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formation {
    pub heroes: usize,
    pub enemies: usize,
}

impl Formation {
    pub fn new(heroes: usize, enemies: usize) -> Self {
        Self { heroes, enemies }
    }

    pub fn len(&self, side: Side) -> usize {
        match side {
            Side::Hero => self.heroes,
            Side::Enemy => self.enemies,
        }
    }

    /// First absolute slot of `side`.
    pub fn offset(&self, side: Side) -> usize {
        match side {
            Side::Hero => 0,
            Side::Enemy => self.heroes,
        }
    }

    pub fn total(&self) -> usize {
        self.heroes + self.enemies
    }

    /// Splits an absolute slot into its side and side-relative index.
    pub fn locate(&self, absolute: usize) -> Option<(Side, usize)> {
        if absolute < self.heroes {
            Some((Side::Hero, absolute))
        } else if absolute < self.total() {
            Some((Side::Enemy, absolute - self.heroes))
        } else {
            None
        }
    }
}

/// Side an action of `kind` lands on.
pub fn target_side(attacker: Side, kind: ActionKind) -> Side {
    match kind {
        ActionKind::Damage => attacker.opposite(),
        ActionKind::Heal | ActionKind::Move | ActionKind::Pass => attacker,
    }
}

/// Absolute slots selected by `mask` for an attacker on `side`.
///
/// The oriented mask is truncated to the slots actually occupied on the
/// target side. MOVE and PASS resolve to no targets.
pub fn resolve_targets(
    side: Side,
    kind: ActionKind,
    mask: PositionMask,
    formation: Formation,
) -> Vec<usize> {
    if matches!(kind, ActionKind::Move | ActionKind::Pass) {
        return Vec::new();
    }

    let targets = target_side(side, kind);
    let occupied = formation.len(targets);
    let offset = formation.offset(targets);

    oriented(mask, side, MaskRole::Target(kind))
        .iter_set()
        .filter(|&slot| slot < occupied)
        .map(|slot| offset + slot)
        .collect()
}

/// Whether an attacker standing at side-relative `slot` may use the mask.
pub fn can_start_from(side: Side, mask: PositionMask, slot: usize) -> bool {
    oriented(mask, side, MaskRole::Starting).is_set(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hero_damage_mask_is_not_mirrored() {
        let targets = resolve_targets(
            Side::Hero,
            ActionKind::Damage,
            PositionMask::literal("XOXO"),
            Formation::new(3, 4),
        );
        assert_eq!(targets, vec![3, 5]);
    }

    #[test]
    fn enemy_damage_mask_is_mirrored_onto_heroes() {
        let targets = resolve_targets(
            Side::Enemy,
            ActionKind::Damage,
            PositionMask::literal("XXOO"),
            Formation::new(4, 2),
        );
        assert_eq!(targets, vec![2, 3]);
    }

    #[test]
    fn heal_masks_follow_healer_side() {
        let mask = PositionMask::literal("XOOO");
        assert_eq!(
            resolve_targets(Side::Hero, ActionKind::Heal, mask, Formation::new(4, 4)),
            vec![3]
        );
        assert_eq!(
            resolve_targets(Side::Enemy, ActionKind::Heal, mask, Formation::new(4, 4)),
            vec![4]
        );
    }

    #[test]
    fn mask_is_truncated_to_occupied_slots() {
        let targets = resolve_targets(
            Side::Hero,
            ActionKind::Damage,
            PositionMask::literal("OXXX"),
            Formation::new(4, 2),
        );
        assert_eq!(targets, vec![5]);
    }

    #[test]
    fn starting_mask_mirrors_only_heroes() {
        let front_only = PositionMask::literal("XOOO");
        assert!(can_start_from(Side::Enemy, front_only, 0));
        assert!(!can_start_from(Side::Hero, front_only, 0));
        assert!(can_start_from(Side::Hero, front_only, 3));
        assert!(!can_start_from(Side::Hero, front_only, 7));
    }

    #[test]
    fn locate_splits_absolute_slots() {
        let formation = Formation::new(2, 3);
        assert_eq!(formation.locate(1), Some((Side::Hero, 1)));
        assert_eq!(formation.locate(2), Some((Side::Enemy, 0)));
        assert_eq!(formation.locate(5), None);
    }

    fn any_mask() -> impl Strategy<Value = PositionMask> {
        proptest::array::uniform4(any::<bool>()).prop_map(PositionMask::from_bits)
    }

    proptest! {
        #[test]
        fn targets_stay_on_the_target_side(
            mask in any_mask(),
            heroes in 1usize..=4,
            enemies in 1usize..=4,
            hero_attacker in any::<bool>(),
            heal in any::<bool>(),
        ) {
            let side = if hero_attacker { Side::Hero } else { Side::Enemy };
            let kind = if heal { ActionKind::Heal } else { ActionKind::Damage };
            let formation = Formation::new(heroes, enemies);

            let first = resolve_targets(side, kind, mask, formation);
            let second = resolve_targets(side, kind, mask, formation);
            prop_assert_eq!(&first, &second);

            let expected = target_side(side, kind);
            for slot in first {
                prop_assert_eq!(formation.locate(slot).map(|(s, _)| s), Some(expected));
            }
        }
    }
}
