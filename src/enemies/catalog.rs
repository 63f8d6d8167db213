//! Static enemy catalog: 200 regular templates and 50 bosses across 10 tiers.
//!
//! Each tier pairs five species with four combat roles, so the catalog is a
//! pair of small tables rather than two hundred hand-written entries. Bosses
//! are individually named, five per tier.

use crate::abilities::AbilityKind;
use crate::core::balance::{BOSS_XP_MULTIPLIER, XP_PER_TIER};
use crate::enemies::{BehaviorTag, EnemyId, EnemyTemplate};

pub const TIER_COUNT: usize = 10;
pub const SPECIES_PER_TIER: usize = 5;
pub const ROLES_PER_SPECIES: usize = 4;
pub const BOSSES_PER_TIER: usize = 5;

/// Baseline stats per tier: (hp, attack, defense, dexterity).
const TIER_BASE_STATS: [(u32, u32, u32, u32); TIER_COUNT] = [
    (18, 6, 0, 8),    // Tier 1: Verdant Hollow
    (26, 9, 1, 9),    // Tier 2: Gloomwood
    (36, 12, 2, 10),  // Tier 3: Cragfall Pass
    (48, 16, 4, 10),  // Tier 4: Sunken Crypts
    (62, 20, 6, 11),  // Tier 5: Cinder Wastes
    (78, 25, 8, 12),  // Tier 6: Frostreach
    (96, 30, 10, 13), // Tier 7: Shardspire
    (116, 36, 13, 14), // Tier 8: Drowned Realm
    (138, 43, 16, 15), // Tier 9: Skyreach
    (162, 50, 20, 16), // Tier 10: The Maelstrom
];

const TIER_SPECIES: [[&str; SPECIES_PER_TIER]; TIER_COUNT] = [
    ["Boar", "Wasp", "Toadkin", "Bandit", "Sprite"],
    ["Wolf", "Spider", "Treant", "Wisp", "Marauder"],
    ["Harpy", "Golem", "Yeti", "Raider", "Shade"],
    ["Skeleton", "Ghoul", "Wraith", "Cultist", "Gargoyle"],
    ["Imp", "Salamander", "Drake", "Ashborn", "Cinderhound"],
    ["Wendigo", "Icemaw", "Rimewolf", "Frostling", "Revenant"],
    ["Construct", "Sentinel", "Shardling", "Facetborn", "Oracle"],
    ["Naga", "Deepspawn", "Siren", "Tidecaller", "Lurker"],
    ["Wyvern", "Djinn", "Stormcrow", "Zephyrkin", "Roc"],
    ["Thunderkin", "Voidcaller", "Colossus", "Tempestborn", "Herald"],
];

const BOSS_NAMES: [[&str; BOSSES_PER_TIER]; TIER_COUNT] = [
    [
        "Rootmaw",
        "Sow Queen Bristle",
        "The Bramble Witch",
        "Veska the Hivemother",
        "Toadlord Gurm",
    ],
    [
        "Fangmother Sylra",
        "Websinger Arvax",
        "The Heartrot Treant",
        "Pale King of Wisps",
        "Corvin the Outlaw",
    ],
    [
        "Skyreaver Talon",
        "The Granite Colossus",
        "Frostbeard Yarga",
        "Chief Redscar",
        "Umbral Stalker",
    ],
    [
        "The Bone Regent",
        "Mourner Ezekiah",
        "Lady of Hollow Veils",
        "High Cultist Maro",
        "The Waking Gargoyle",
    ],
    [
        "Pyrelord Cindral",
        "Mother of Salamanders",
        "Ashwing the Drake",
        "The Furnace Saint",
        "Magmaw Prime",
    ],
    [
        "The Pale Wendigo",
        "Glacier Mother",
        "Rimefang",
        "Tsarina of Sleet",
        "The Hollow Revenant",
    ],
    [
        "The First Construct",
        "Warden of Facets",
        "Shardmother Lumen",
        "The Silent Oracle",
        "Prism Tyrant",
    ],
    [
        "Queen Amphele",
        "The Deep Chorus",
        "Tidecaller Morvan",
        "Mother of Lurkers",
        "The Drowned King",
    ],
    [
        "Zephyr Lord Anselm",
        "The Thunder Roc",
        "Djinn of the High Gale",
        "Stormcrow Matriarch",
        "Wyvern King Vael",
    ],
    [
        "Herald of the Eye",
        "The Twin Tempest",
        "Voidcaller Supreme",
        "Colossus of Storms",
        "The Maelstrom Itself",
    ],
];

/// Role rows: epithet, behavior, hp multiplier, attack multiplier,
/// flat defense bonus, weakness.
struct Role {
    epithet: &'static str,
    behavior: BehaviorTag,
    hp_mult: f64,
    atk_mult: f64,
    def_bonus: u32,
    weakness: Option<AbilityKind>,
}

const ROLES: [Role; ROLES_PER_SPECIES] = [
    Role {
        epithet: "Ravager",
        behavior: BehaviorTag::Aggressive,
        hp_mult: 0.9,
        atk_mult: 1.25,
        def_bonus: 0,
        weakness: None,
    },
    Role {
        epithet: "Warden",
        behavior: BehaviorTag::Defensive,
        hp_mult: 1.15,
        atk_mult: 0.9,
        def_bonus: 2,
        weakness: Some(AbilityKind::Magical),
    },
    Role {
        epithet: "Hexer",
        behavior: BehaviorTag::Caster,
        hp_mult: 0.8,
        atk_mult: 1.35,
        def_bonus: 0,
        weakness: Some(AbilityKind::Physical),
    },
    Role {
        epithet: "Chanter",
        behavior: BehaviorTag::Supportive,
        hp_mult: 1.0,
        atk_mult: 0.85,
        def_bonus: 0,
        weakness: None,
    },
];

fn regular_template(tier_idx: usize, species_idx: usize, role_idx: usize) -> EnemyTemplate {
    let (base_hp, base_atk, base_def, base_dex) = TIER_BASE_STATS[tier_idx];
    let role = &ROLES[role_idx];
    let tier = (tier_idx + 1) as u8;
    let slot = (species_idx * ROLES_PER_SPECIES + role_idx) as u16;
    EnemyTemplate {
        id: EnemyId(tier as u16 * 100 + slot),
        name: format!("{} {}", TIER_SPECIES[tier_idx][species_idx], role.epithet),
        tier,
        max_hp: ((base_hp as f64 * role.hp_mult).round() as u32).max(1),
        attack: ((base_atk as f64 * role.atk_mult).round() as u32).max(1),
        defense: base_def + role.def_bonus,
        dexterity: base_dex,
        behavior: role.behavior,
        weakness: role.weakness,
        xp_value: XP_PER_TIER * tier as u64,
    }
}

fn boss_template(tier_idx: usize, rank: usize) -> EnemyTemplate {
    let (base_hp, base_atk, base_def, base_dex) = TIER_BASE_STATS[tier_idx];
    let tier = (tier_idx + 1) as u8;
    let hp_mult = 2.5 + 0.5 * rank as f64;
    let atk_mult = 1.2 + 0.15 * rank as f64;
    EnemyTemplate {
        id: EnemyId(tier as u16 * 100 + 50 + rank as u16),
        name: BOSS_NAMES[tier_idx][rank].to_string(),
        tier,
        max_hp: (base_hp as f64 * hp_mult).round() as u32,
        attack: (base_atk as f64 * atk_mult).round() as u32,
        defense: base_def + 2 + rank as u32,
        dexterity: base_dex + (rank as u32) / 2,
        behavior: BehaviorTag::BossScripted,
        weakness: None,
        xp_value: XP_PER_TIER * tier as u64 * BOSS_XP_MULTIPLIER,
    }
}

/// All 200 regular enemy templates.
pub fn all_regular() -> Vec<EnemyTemplate> {
    let mut out = Vec::with_capacity(TIER_COUNT * SPECIES_PER_TIER * ROLES_PER_SPECIES);
    for tier_idx in 0..TIER_COUNT {
        for species_idx in 0..SPECIES_PER_TIER {
            for role_idx in 0..ROLES_PER_SPECIES {
                out.push(regular_template(tier_idx, species_idx, role_idx));
            }
        }
    }
    out
}

/// All 50 boss templates.
pub fn all_bosses() -> Vec<EnemyTemplate> {
    let mut out = Vec::with_capacity(TIER_COUNT * BOSSES_PER_TIER);
    for tier_idx in 0..TIER_COUNT {
        for rank in 0..BOSSES_PER_TIER {
            out.push(boss_template(tier_idx, rank));
        }
    }
    out
}

/// Looks up a template by id. Regular slots are 0..20, boss slots 50..55.
pub fn template(id: EnemyId) -> Option<EnemyTemplate> {
    let tier = (id.0 / 100) as usize;
    let slot = (id.0 % 100) as usize;
    if tier == 0 || tier > TIER_COUNT {
        return None;
    }
    let tier_idx = tier - 1;
    if slot < SPECIES_PER_TIER * ROLES_PER_SPECIES {
        Some(regular_template(
            tier_idx,
            slot / ROLES_PER_SPECIES,
            slot % ROLES_PER_SPECIES,
        ))
    } else if (50..50 + BOSSES_PER_TIER).contains(&slot) {
        Some(boss_template(tier_idx, slot - 50))
    } else {
        None
    }
}
