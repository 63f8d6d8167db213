//! Enemy templates and spawn-time instances.
//!
//! Templates are static data in [`catalog`]; behavior is a closed tag set
//! dispatched in the combat AI, never per-enemy subclassing. Instances
//! snapshot their stats once at spawn time with the difficulty scaling
//! factor applied; a later scaling change never touches live instances.

pub mod catalog;

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityKind;

/// Catalog-stable enemy identifier: tier * 100 + slot.
/// Regular slots are 0..20, boss slots 50..55.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u16);

/// Enumerated AI strategy, dispatched in `combat::ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorTag {
    /// Always picks the hardest available hit.
    Aggressive,
    /// Defends when hurt, trades conservatively otherwise.
    Defensive,
    /// Strong magical strikes, fragile.
    Caster,
    /// Heals wounded allies before attacking.
    Supportive,
    /// HP-threshold phase script; bosses only.
    BossScripted,
}

/// Static enemy archetype from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub tier: u8,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub dexterity: u32,
    pub behavior: BehaviorTag,
    pub weakness: Option<AbilityKind>,
    pub xp_value: u64,
}

impl EnemyTemplate {
    pub fn is_boss(&self) -> bool {
        self.behavior == BehaviorTag::BossScripted
    }

    /// Snapshots the template into a live instance with the given scaling
    /// factor applied. Scaling is applied exactly once, here.
    pub fn spawn(&self, scaling: f64) -> EnemyInstance {
        let max_hp = ((self.max_hp as f64 * scaling).round() as u32).max(1);
        let attack = ((self.attack as f64 * scaling).round() as u32).max(1);
        let defense = (self.defense as f64 * scaling).round() as u32;
        EnemyInstance {
            template_id: self.id,
            name: self.name.clone(),
            tier: self.tier,
            max_hp,
            current_hp: max_hp,
            attack,
            defense,
            dexterity: self.dexterity,
            behavior: self.behavior,
            weakness: self.weakness,
            xp_value: self.xp_value,
            phase: 0,
            defending: false,
        }
    }
}

/// A live combatant spawned from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub template_id: EnemyId,
    pub name: String,
    pub tier: u8,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub dexterity: u32,
    pub behavior: BehaviorTag,
    pub weakness: Option<AbilityKind>,
    pub xp_value: u64,
    /// Current phase index for scripted bosses.
    pub phase: u8,
    /// Halves incoming damage until this enemy's next turn.
    pub defending: bool,
}

impl EnemyInstance {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }
}
