//! Damage and heal magnitudes.

/// Damage after protection.
///
/// # Formula
///
/// ```text
/// damage = floor(base_dmg * (1 - prot))
/// ```
pub fn mitigated_damage(base_dmg: f64, prot: f64) -> f64 {
    (base_dmg * (1.0 - prot)).floor()
}

/// HP restored by a heal with (negative) `base_dmg`; never overheals.
pub fn heal_amount(base_dmg: f64, hp: f64, max_hp: f64) -> f64 {
    (max_hp - hp).min(-base_dmg).max(0.0)
}
