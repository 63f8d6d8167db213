use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::abilities::Ability;
use crate::enemies::EnemyId;

/// One action per turn, selected by the acting side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Attack,
    Defend,
    UseAbility(Ability),
    /// The inventory collaborator resolves the item id to its effect when
    /// offering the action; the core only applies it and reports consumption.
    UseItem { id: Uuid, effect: ItemEffect },
    Flee,
}

/// Effect payload attached to a consumable by the external inventory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    /// Restores HP on the character.
    Restore(u32),
    /// Flat damage to the current target, bypassing mitigation.
    Strike(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
}

/// Encounter state machine. `InitiativeRoll` is transient inside `begin`;
/// callers observe `NotStarted`, `TurnLoop`, and `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    NotStarted,
    InitiativeRoll,
    TurnLoop,
    Resolved(Outcome),
}

/// A slot in the initiative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantRef {
    Player,
    Enemy(usize),
}

/// Everything that happened during one call into the engine, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    InitiativeRolled { order: Vec<CombatantRef> },
    PlayerAttack { target: usize, ability: Ability, damage: u32 },
    PlayerHealed { amount: u32 },
    PlayerDefending,
    ItemUsed { id: Uuid },
    ItemDamage { target: usize, damage: u32 },
    FleeAttempt { succeeded: bool },
    EnemyAttack { enemy: usize, damage: u32 },
    EnemyDefending { enemy: usize },
    EnemyHealed { enemy: usize, target: usize, amount: u32 },
    EnemyDied { enemy: usize, xp: u64 },
    BossPhaseShift { enemy: usize, phase: u8 },
    LevelUp { level: u32 },
    Resolved { outcome: Outcome },
}

/// Integration errors: acting in the wrong state or with an ability the
/// character does not own. Fatal to the current encounter, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("action not valid in encounter phase {phase:?}")]
    InvalidPhase { phase: EncounterPhase },
    #[error("ability {0:?} is not in the character's kit")]
    UnavailableAbility(Ability),
    #[error("enemy template {0:?} is not in the catalog")]
    UnknownEnemy(EnemyId),
}
