//! Seedable random source for combat rolls.
//!
//! Every stochastic decision in the rules engine (initiative jitter, hit rolls,
//! modifier application) draws from a single [`SessionRng`] owned by the game
//! state. Cloning the state clones the generator, so a snapshot replays the
//! exact same rolls.
//!
//! # Determinism
//!
//! Given the same seed, a [`SessionRng`] yields the same sequence on every
//! platform. Simulations that need independent streams derive child seeds
//! with [`compute_seed`].

/// Random source consumed by the rules engine.
pub trait RngOracle {
    /// Advance the generator and return 32 random bits.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn roll_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32() % sides) + 1
    }
}

/// PCG-XSH-RR generator with 64-bit state and 32-bit output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRng {
    state: u64,
}

impl SessionRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.reseed(seed);
        rng
    }

    /// Reset the stream so subsequent rolls depend only on `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.state = Self::pcg_step(seed.wrapping_add(Self::INCREMENT));
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for SessionRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

impl RngOracle for SessionRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Derive a child seed from a base seed and contextual counters.
///
/// * `game_seed` - Seed set at session start
/// * `nonce` - Step counter of the caller (e.g. simulated turn number)
/// * `actor_id` - Combatant the roll belongs to
/// * `context` - Distinguishes several streams within the same step
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
