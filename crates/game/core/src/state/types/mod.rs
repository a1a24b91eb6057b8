pub mod attack;
pub mod combat;
pub mod combatant;
pub mod mask;
pub mod modifier;
pub mod world;

pub use attack::{ActionKind, Attack};
pub use combat::{ActionSource, CombatPhase, CombatState, LegalAction};
pub use combatant::{Combatant, CombatantId, Side};
pub use mask::{MaskError, PositionMask};
pub use modifier::{Modifier, ModifierKind, Modifiers};
pub use world::{Area, Dungeon, Encounter, Party, Trap, Treasure};
