//! Class catalog: the closed set of 23 playable class templates.
//!
//! Classes are data, not code. Each template carries base attributes and a
//! starting ability kit; max HP and the power score are derived so the
//! balance tests can check the whole catalog without duplicated numbers.

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::character::attributes::{AttributeType, Attributes};
use crate::core::balance::{HP_CON_OFFSET, HP_PER_CON, POWER_HP_WEIGHT, STARTING_GOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassId {
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Paladin,
    Ranger,
    Bard,
    Druid,
    Monk,
    Barbarian,
    Sorcerer,
    Warlock,
    Necromancer,
    Assassin,
    Knight,
    Hunter,
    Shaman,
    Alchemist,
    Templar,
    Berserker,
    Illusionist,
    Summoner,
    Gladiator,
}

impl ClassId {
    pub fn all() -> [ClassId; 23] {
        [
            ClassId::Warrior,
            ClassId::Mage,
            ClassId::Rogue,
            ClassId::Cleric,
            ClassId::Paladin,
            ClassId::Ranger,
            ClassId::Bard,
            ClassId::Druid,
            ClassId::Monk,
            ClassId::Barbarian,
            ClassId::Sorcerer,
            ClassId::Warlock,
            ClassId::Necromancer,
            ClassId::Assassin,
            ClassId::Knight,
            ClassId::Hunter,
            ClassId::Shaman,
            ClassId::Alchemist,
            ClassId::Templar,
            ClassId::Berserker,
            ClassId::Illusionist,
            ClassId::Summoner,
            ClassId::Gladiator,
        ]
    }

    /// Stable string key used by creation requests and external tooling.
    pub fn key(&self) -> &'static str {
        match self {
            ClassId::Warrior => "warrior",
            ClassId::Mage => "mage",
            ClassId::Rogue => "rogue",
            ClassId::Cleric => "cleric",
            ClassId::Paladin => "paladin",
            ClassId::Ranger => "ranger",
            ClassId::Bard => "bard",
            ClassId::Druid => "druid",
            ClassId::Monk => "monk",
            ClassId::Barbarian => "barbarian",
            ClassId::Sorcerer => "sorcerer",
            ClassId::Warlock => "warlock",
            ClassId::Necromancer => "necromancer",
            ClassId::Assassin => "assassin",
            ClassId::Knight => "knight",
            ClassId::Hunter => "hunter",
            ClassId::Shaman => "shaman",
            ClassId::Alchemist => "alchemist",
            ClassId::Templar => "templar",
            ClassId::Berserker => "berserker",
            ClassId::Illusionist => "illusionist",
            ClassId::Summoner => "summoner",
            ClassId::Gladiator => "gladiator",
        }
    }

    pub fn from_key(key: &str) -> Option<ClassId> {
        ClassId::all().into_iter().find(|c| c.key() == key)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClassId::Warrior => "Warrior",
            ClassId::Mage => "Mage",
            ClassId::Rogue => "Rogue",
            ClassId::Cleric => "Cleric",
            ClassId::Paladin => "Paladin",
            ClassId::Ranger => "Ranger",
            ClassId::Bard => "Bard",
            ClassId::Druid => "Druid",
            ClassId::Monk => "Monk",
            ClassId::Barbarian => "Barbarian",
            ClassId::Sorcerer => "Sorcerer",
            ClassId::Warlock => "Warlock",
            ClassId::Necromancer => "Necromancer",
            ClassId::Assassin => "Assassin",
            ClassId::Knight => "Knight",
            ClassId::Hunter => "Hunter",
            ClassId::Shaman => "Shaman",
            ClassId::Alchemist => "Alchemist",
            ClassId::Templar => "Templar",
            ClassId::Berserker => "Berserker",
            ClassId::Illusionist => "Illusionist",
            ClassId::Summoner => "Summoner",
            ClassId::Gladiator => "Gladiator",
        }
    }
}

/// Static creation template for one class.
#[derive(Debug, Clone)]
pub struct ClassTemplate {
    pub id: ClassId,
    pub attributes: Attributes,
    pub abilities: Vec<Ability>,
}

/// Attribute rows are STR, DEX, CON, INT, WIS, CHA.
fn template(id: ClassId, row: [u32; 6], abilities: &[Ability]) -> ClassTemplate {
    ClassTemplate {
        id,
        attributes: Attributes::new(row[0], row[1], row[2], row[3], row[4], row[5]),
        abilities: abilities.to_vec(),
    }
}

impl ClassTemplate {
    pub fn of(id: ClassId) -> ClassTemplate {
        use Ability::*;
        match id {
            ClassId::Warrior => template(id, [15, 10, 14, 8, 10, 8], &[Attack, Defend, PowerStrike]),
            ClassId::Mage => template(id, [8, 12, 8, 16, 14, 10], &[Attack, Defend, Fireball]),
            ClassId::Rogue => template(id, [10, 16, 10, 10, 8, 10], &[Attack, Defend, Backstab]),
            ClassId::Cleric => {
                template(id, [10, 8, 12, 10, 16, 12], &[Attack, Defend, HolyLight, Heal])
            }
            ClassId::Paladin => {
                template(id, [14, 8, 13, 8, 12, 12], &[Attack, Defend, DivineSmite, Heal])
            }
            ClassId::Ranger => template(id, [12, 15, 11, 9, 11, 8], &[Attack, Defend, PiercingShot]),
            ClassId::Bard => template(id, [9, 12, 10, 11, 10, 16], &[Attack, Defend, InspiringSong]),
            ClassId::Druid => {
                template(id, [10, 10, 12, 12, 15, 9], &[Attack, Defend, Entangle, Heal])
            }
            ClassId::Monk => template(id, [12, 15, 11, 8, 12, 8], &[Attack, Defend, FlurryOfBlows]),
            ClassId::Barbarian => template(id, [17, 11, 15, 5, 8, 7], &[Attack, Defend, Rage]),
            ClassId::Sorcerer => {
                template(id, [7, 11, 9, 17, 12, 11], &[Attack, Defend, ChainLightning])
            }
            ClassId::Warlock => template(id, [8, 10, 9, 16, 12, 13], &[Attack, Defend, ShadowBolt]),
            ClassId::Necromancer => {
                template(id, [7, 9, 10, 17, 13, 10], &[Attack, Defend, SoulDrain])
            }
            ClassId::Assassin => template(id, [11, 17, 9, 10, 9, 9], &[Attack, Defend, Shadowstep]),
            ClassId::Knight => template(id, [14, 7, 14, 8, 10, 10], &[Attack, Defend, ShieldBash]),
            ClassId::Hunter => template(id, [11, 14, 11, 9, 12, 8], &[Attack, Defend, SnareTrap]),
            ClassId::Shaman => {
                template(id, [11, 9, 11, 13, 14, 10], &[Attack, Defend, Stormcall, Heal])
            }
            ClassId::Alchemist => template(id, [8, 12, 10, 15, 12, 10], &[Attack, Defend, AcidFlask]),
            ClassId::Templar => template(id, [13, 8, 12, 10, 13, 11], &[Attack, Defend, Consecrate]),
            ClassId::Berserker => {
                template(id, [16, 12, 14, 5, 7, 8], &[Attack, Defend, RecklessSwing])
            }
            ClassId::Illusionist => {
                template(id, [6, 13, 8, 16, 13, 11], &[Attack, Defend, MindSpike])
            }
            ClassId::Summoner => template(id, [6, 10, 9, 16, 14, 12], &[Attack, Defend, SpiritSwarm]),
            ClassId::Gladiator => template(id, [15, 13, 13, 6, 8, 10], &[Attack, Defend, NetThrow]),
        }
    }

    /// Max HP derived from Constitution, never stored on the template.
    pub fn max_hp(&self) -> u32 {
        HP_PER_CON * self.attributes.get(AttributeType::Constitution) - HP_CON_OFFSET
    }

    pub fn starting_gold(&self) -> u32 {
        STARTING_GOLD
    }

    /// Monotonic summary of combat strength: attribute sum plus weighted HP.
    pub fn power_score(&self) -> f64 {
        self.attributes.sum() as f64 + self.max_hp() as f64 * POWER_HP_WEIGHT
    }

    /// The stat that scales this class's best damage output.
    pub fn primary_offense(&self) -> u32 {
        self.attributes
            .get(AttributeType::Strength)
            .max(self.attributes.get(AttributeType::Intelligence))
    }

    /// Expected turns to clear a reference encounter, used to normalize
    /// performance telemetry so slow classes are not punished for kit speed.
    pub fn baseline_turns(&self) -> f64 {
        72.0 / self.primary_offense() as f64
    }

    /// Expected resource spend per encounter: roughly two casts of the kit's
    /// non-basic abilities.
    pub fn baseline_resources(&self) -> f64 {
        let costs: Vec<u32> = self
            .abilities
            .iter()
            .filter(|a| a.cost() > 0)
            .map(|a| a.cost())
            .collect();
        if costs.is_empty() {
            return 1.0;
        }
        let avg = costs.iter().sum::<u32>() as f64 / costs.len() as f64;
        avg * 2.0
    }
}
