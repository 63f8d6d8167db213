//! The closed set of combat abilities.
//!
//! Abilities are tagged variants dispatched by lookup, not a trait hierarchy:
//! every class ability shares the same resolution path in the combat engine,
//! differing only in kind, multiplier, and resource cost.

use serde::{Deserialize, Serialize};

/// What an ability does when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Damage scaled by Strength.
    Physical,
    /// Damage scaled by Intelligence.
    Magical,
    /// Restores HP scaled by Wisdom.
    Healing,
    /// Halves incoming damage until the user's next turn.
    Defensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    // Shared by every class
    Attack,
    Defend,
    // Shared by the devout classes
    Heal,
    // One signature ability per class
    PowerStrike,
    Fireball,
    Backstab,
    HolyLight,
    DivineSmite,
    PiercingShot,
    InspiringSong,
    Entangle,
    FlurryOfBlows,
    Rage,
    ChainLightning,
    ShadowBolt,
    SoulDrain,
    Shadowstep,
    ShieldBash,
    SnareTrap,
    Stormcall,
    AcidFlask,
    Consecrate,
    RecklessSwing,
    MindSpike,
    SpiritSwarm,
    NetThrow,
}

impl Ability {
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Attack => "Attack",
            Ability::Defend => "Defend",
            Ability::Heal => "Heal",
            Ability::PowerStrike => "Power Strike",
            Ability::Fireball => "Fireball",
            Ability::Backstab => "Backstab",
            Ability::HolyLight => "Holy Light",
            Ability::DivineSmite => "Divine Smite",
            Ability::PiercingShot => "Piercing Shot",
            Ability::InspiringSong => "Inspiring Song",
            Ability::Entangle => "Entangle",
            Ability::FlurryOfBlows => "Flurry of Blows",
            Ability::Rage => "Rage",
            Ability::ChainLightning => "Chain Lightning",
            Ability::ShadowBolt => "Shadow Bolt",
            Ability::SoulDrain => "Soul Drain",
            Ability::Shadowstep => "Shadowstep",
            Ability::ShieldBash => "Shield Bash",
            Ability::SnareTrap => "Snare Trap",
            Ability::Stormcall => "Stormcall",
            Ability::AcidFlask => "Acid Flask",
            Ability::Consecrate => "Consecrate",
            Ability::RecklessSwing => "Reckless Swing",
            Ability::MindSpike => "Mind Spike",
            Ability::SpiritSwarm => "Spirit Swarm",
            Ability::NetThrow => "Net Throw",
        }
    }

    pub fn kind(&self) -> AbilityKind {
        match self {
            Ability::Defend => AbilityKind::Defensive,
            Ability::Heal | Ability::HolyLight | Ability::InspiringSong => AbilityKind::Healing,
            Ability::Fireball
            | Ability::Entangle
            | Ability::ChainLightning
            | Ability::ShadowBolt
            | Ability::SoulDrain
            | Ability::Stormcall
            | Ability::AcidFlask
            | Ability::Consecrate
            | Ability::MindSpike
            | Ability::SpiritSwarm => AbilityKind::Magical,
            _ => AbilityKind::Physical,
        }
    }

    /// Damage (or healing) multiplier applied to the governing attribute.
    pub fn multiplier(&self) -> f64 {
        match self {
            Ability::Attack => 1.0,
            Ability::Defend => 0.0,
            Ability::Heal => 1.5,
            Ability::PowerStrike => 1.5,
            Ability::Fireball => 1.8,
            Ability::Backstab => 1.7,
            Ability::HolyLight => 1.8,
            Ability::DivineSmite => 1.4,
            Ability::PiercingShot => 1.6,
            Ability::InspiringSong => 1.4,
            Ability::Entangle => 1.3,
            Ability::FlurryOfBlows => 1.4,
            Ability::Rage => 1.9,
            Ability::ChainLightning => 1.7,
            Ability::ShadowBolt => 1.6,
            Ability::SoulDrain => 1.4,
            Ability::Shadowstep => 1.8,
            Ability::ShieldBash => 1.3,
            Ability::SnareTrap => 1.4,
            Ability::Stormcall => 1.5,
            Ability::AcidFlask => 1.5,
            Ability::Consecrate => 1.4,
            Ability::RecklessSwing => 2.0,
            Ability::MindSpike => 1.5,
            Ability::SpiritSwarm => 1.4,
            Ability::NetThrow => 1.3,
        }
    }

    /// Abstract resource cost, accumulated into encounter telemetry.
    pub fn cost(&self) -> u32 {
        match self {
            Ability::Attack | Ability::Defend => 0,
            Ability::Entangle | Ability::ShieldBash | Ability::NetThrow => 1,
            Ability::Rage | Ability::RecklessSwing => 4,
            Ability::Fireball
            | Ability::HolyLight
            | Ability::DivineSmite
            | Ability::ChainLightning
            | Ability::Shadowstep => 3,
            _ => 2,
        }
    }
}
