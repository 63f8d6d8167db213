use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::class::ClassId;
use crate::combat::types::Outcome;

/// Per-encounter outcome record. Built once by the combat engine at
/// resolution and consumed exactly once by the difficulty controller;
/// immutable in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTelemetry {
    pub encounter_id: Uuid,
    pub outcome: Outcome,
    /// Individual combatant turns taken, both sides.
    pub turns: u32,
    /// Abstract resource points the character spent on abilities and items.
    pub resources: u32,
    /// Class the character fought as, for per-class baseline normalization.
    pub class: ClassId,
    pub timestamp: DateTime<Utc>,
}
