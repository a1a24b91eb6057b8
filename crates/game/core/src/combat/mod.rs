//! Combat resolution rules.
//!
//! Pure helpers (hit chance, damage, mask orientation) plus the modifier
//! system. The stateful scheduler that drives them lives in
//! [`CombatEngine`](crate::engine::CombatEngine).

pub mod context;
pub mod damage;
pub mod hit;
pub mod modifiers;
pub mod result;
pub mod targeting;

pub use context::ResolveContext;
pub use damage::{heal_amount, mitigated_damage};
pub use hit::{check_hit, hit_chance};
pub use modifiers::ModifierSystem;
pub use result::{StrikeOutcome, resolve_strike};
pub use targeting::{
    Formation, MaskRole, can_start_from, mirrors, oriented, resolve_targets, target_side,
};
