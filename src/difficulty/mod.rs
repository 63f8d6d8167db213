//! Adaptive difficulty: telemetry, session state, and the controller.

pub mod controller;
pub mod state;
pub mod telemetry;

pub use controller::DifficultyController;
pub use state::{DifficultyState, FlowState};
pub use telemetry::EncounterTelemetry;
