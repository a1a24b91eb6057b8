//! Hit chance calculation.

/// Chance that an attack lands on a target.
///
/// # Formula
///
/// ```text
/// hit_chance = max(0, accuracy - dodge)
/// ```
pub fn hit_chance(accuracy: f64, dodge: f64) -> f64 {
    (accuracy - dodge).max(0.0)
}

/// `roll` is uniform in `[0, 1)`; the attack hits when it falls under the chance.
pub fn check_hit(accuracy: f64, dodge: f64, roll: f64) -> bool {
    roll < hit_chance(accuracy, dodge)
}
