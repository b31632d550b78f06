//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the world and executes gameplay commands; the
//! script worker runs fight scripts off the simulation's critical path.

mod script;
mod simulation;

pub use script::ScriptWorker;
pub use simulation::{Command, Oracles, Schedule, SimulationWorker, spawn_profile};
