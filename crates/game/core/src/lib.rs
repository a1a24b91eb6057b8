//! Deterministic combat rules for Dungeon Despair.
//!
//! `despair-core` defines the canonical rules (entity model, position masks,
//! modifiers, the stress ledger, the combat scheduler and the encounter
//! lifecycle) as pure in-memory state transitions. All state mutation flows
//! through [`engine::GameEngine`]; drivers and AI planners depend on the types
//! re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;
pub mod stress;

pub use combat::{Formation, MaskRole, ModifierSystem, resolve_targets};
pub use config::{GameConfig, StressTable};
pub use engine::{
    CombatEngine, CombatError, GameEngine, GameEngineError, TrapOutcome, TreasureOutcome,
};
pub use error::{ErrorSeverity, GameError};
pub use rng::{RngOracle, SessionRng, compute_seed};
pub use state::{
    ActionKind, ActionSource, Area, Attack, CombatEvent, CombatPhase, CombatState, Combatant,
    CombatantId, Dungeon, Encounter, EventLog, GamePhase, GameState, InitializationError,
    LegalAction, MaskError, Modifier, ModifierKind, Modifiers, Party, PositionMask, Side, Trap,
    Treasure,
};
pub use stress::{StressCheckpoint, StressEvent, StressLedger};
