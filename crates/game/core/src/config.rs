/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Fixed magnitudes fed into the stress ledger.
    pub stress: StressTable,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Positional slots per side.
    pub const MAX_SLOTS: usize = 4;
    /// Active modifiers a single combatant can carry.
    pub const MAX_MODIFIERS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stress(stress: StressTable) -> Self {
        Self { stress }
    }
}

/// Fixed stress deltas for every named ledger event.
///
/// Values are magnitudes; the sign for side-relative events is decided by the
/// ledger. Trap and treasure entries are signed as written.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StressTable {
    pub movement: i64,
    pub turn: i64,
    pub hero_dies: i64,
    pub enemy_dies: i64,
    pub passing: i64,
    pub switch_position: i64,
    pub disarm_trap: i64,
    pub trigger_trap: i64,
    pub loot_treasure: i64,
    pub no_inspect_treasure: i64,
    pub trigger_trapped_treasure: i64,
    pub ignore_treasure: i64,
}

impl StressTable {
    pub const DEFAULT_MOVEMENT: i64 = 2;
    pub const DEFAULT_TURN: i64 = 1;
    pub const DEFAULT_HERO_DIES: i64 = 100;
    pub const DEFAULT_ENEMY_DIES: i64 = 100;
    pub const DEFAULT_PASSING: i64 = 10;
    pub const DEFAULT_SWITCH_POSITION: i64 = 5;
    pub const DEFAULT_DISARM_TRAP: i64 = -10;
    pub const DEFAULT_TRIGGER_TRAP: i64 = 10;
    pub const DEFAULT_LOOT_TREASURE: i64 = -10;
    pub const DEFAULT_NO_INSPECT_TREASURE: i64 = 5;
    pub const DEFAULT_TRIGGER_TRAPPED_TREASURE: i64 = 15;
    pub const DEFAULT_IGNORE_TREASURE: i64 = 5;
}

impl Default for StressTable {
    fn default() -> Self {
        Self {
            movement: Self::DEFAULT_MOVEMENT,
            turn: Self::DEFAULT_TURN,
            hero_dies: Self::DEFAULT_HERO_DIES,
            enemy_dies: Self::DEFAULT_ENEMY_DIES,
            passing: Self::DEFAULT_PASSING,
            switch_position: Self::DEFAULT_SWITCH_POSITION,
            disarm_trap: Self::DEFAULT_DISARM_TRAP,
            trigger_trap: Self::DEFAULT_TRIGGER_TRAP,
            loot_treasure: Self::DEFAULT_LOOT_TREASURE,
            no_inspect_treasure: Self::DEFAULT_NO_INSPECT_TREASURE,
            trigger_trapped_treasure: Self::DEFAULT_TRIGGER_TRAPPED_TREASURE,
            ignore_treasure: Self::DEFAULT_IGNORE_TREASURE,
        }
    }
}
