//! Runtime drivers for the Dungeon Despair rules engine.
//!
//! This crate wires the action provider abstraction and the simulation loop
//! around `despair-core`. Consumers plug an [`ActionProvider`] in for each
//! side and let the [`Simulator`] play sessions to completion.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] hosts the random, greedy and scripted players
//! - [`simulation`] runs sessions and collects reports
pub mod api;
pub mod providers;
pub mod simulation;

pub use api::{ActionProvider, PassActionProvider, ProviderKind, Result, RuntimeError};
pub use providers::{GreedyProvider, RandomProvider, ScriptedChoice, ScriptedProvider};
pub use simulation::{
    RunData, RunSummary, SimulationReport, Simulator, SimulatorBuilder, SimulatorConfig,
    Termination,
};
