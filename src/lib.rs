//! Saga - Single-Player RPG Simulation Core
//!
//! Character/class data model, turn-based combat resolution, and an
//! adaptive difficulty controller that modulates enemy scaling and reward
//! pacing. Presentation, persistence location, and the item economy are
//! external collaborators driven through [`core::session::GameSession`].

pub mod abilities;
pub mod character;
pub mod combat;
pub mod core;
pub mod difficulty;
pub mod enemies;
pub mod persist;
pub mod rewards;

pub use crate::character::class::{ClassId, ClassTemplate};
pub use crate::character::factory::{create_character, create_character_by_key, CreationError};
pub use crate::character::Character;
pub use crate::core::session::{GameSession, SessionSnapshot, TurnReport};
