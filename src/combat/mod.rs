//! Turn-based combat: encounter state machine, action types, enemy AI.

pub mod ai;
pub mod engine;
pub mod types;

pub use engine::Encounter;
pub use types::{Action, CombatError, CombatEvent, CombatantRef, EncounterPhase, ItemEffect, Outcome};
