//! Runtime character entity and its creation/progression rules.

pub mod attributes;
pub mod class;
pub mod factory;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::abilities::{Ability, AbilityKind};
use crate::character::attributes::{AttributeType, Attributes};
use crate::character::class::{ClassId, ClassTemplate};
use crate::core::balance::{HP_CON_OFFSET, HP_PER_CON, XP_CURVE_BASE, XP_CURVE_EXPONENT};

/// The player's mutable runtime entity. Created once by the factory,
/// mutated by the combat engine (HP, gold, XP, level), never destroyed
/// within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: ClassId,
    pub level: u32,
    pub attributes: Attributes,
    pub current_hp: u32,
    pub max_hp: u32,
    pub gold: u32,
    pub xp: u64,
    pub abilities: Vec<Ability>,
    /// Opaque item references; the item catalog lives in the external
    /// inventory collaborator.
    pub inventory: Vec<Uuid>,
}

impl Character {
    /// Populates a character directly from a class template. Attributes and
    /// abilities are copied, not shared; no randomness is involved.
    pub(crate) fn from_template(name: String, template: &ClassTemplate) -> Self {
        let max_hp = template.max_hp();
        Self {
            name,
            class: template.id,
            level: 1,
            attributes: template.attributes,
            current_hp: max_hp,
            max_hp,
            gold: template.starting_gold(),
            xp: 0,
            abilities: template.abilities.clone(),
            inventory: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }

    /// The attribute that scales an ability of the given kind.
    pub fn offense(&self, kind: AbilityKind) -> u32 {
        match kind {
            AbilityKind::Physical => self.attributes.get(AttributeType::Strength),
            AbilityKind::Magical => self.attributes.get(AttributeType::Intelligence),
            AbilityKind::Healing => self.attributes.get(AttributeType::Wisdom),
            AbilityKind::Defensive => 0,
        }
    }

    /// Flat damage mitigation from Constitution. Never negative.
    pub fn mitigation(&self) -> u32 {
        self.attributes.modifier(AttributeType::Constitution).max(0) as u32
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    /// XP needed to go from `level` to `level + 1`.
    pub fn xp_to_next(level: u32) -> u64 {
        (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)) as u64
    }

    /// Banks XP and applies any level-ups. Each level raises the class's
    /// primary offensive attribute and Constitution by one, re-derives max
    /// HP, and restores the character to full. Returns the levels gained.
    pub fn gain_xp(&mut self, amount: u64) -> Vec<u32> {
        self.xp += amount;
        let mut gained = Vec::new();
        while self.xp >= Self::xp_to_next(self.level) {
            self.xp -= Self::xp_to_next(self.level);
            self.level += 1;
            self.apply_level_up();
            gained.push(self.level);
        }
        gained
    }

    fn apply_level_up(&mut self) {
        let template = ClassTemplate::of(self.class);
        let favored = if template.attributes.get(AttributeType::Strength)
            >= template.attributes.get(AttributeType::Intelligence)
        {
            AttributeType::Strength
        } else {
            AttributeType::Intelligence
        };
        self.attributes.increment(favored);
        self.attributes.increment(AttributeType::Constitution);
        self.max_hp = HP_PER_CON * self.attributes.get(AttributeType::Constitution) - HP_CON_OFFSET;
        self.current_hp = self.max_hp;
    }
}
