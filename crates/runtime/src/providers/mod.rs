//! Action provider implementations for the two sides of a combat.

pub mod greedy;
pub mod random;
pub mod scripted;

pub use greedy::GreedyProvider;
pub use random::RandomProvider;
pub use scripted::{ScriptedChoice, ScriptedProvider};
