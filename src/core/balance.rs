//! Shared balance constants used across the simulation core.
//!
//! All core tuning numbers should be defined here.
//! Change once, test everywhere.

// =============================================================================
// CHARACTER CREATION - Attribute ranges and derived HP
// =============================================================================

/// Attribute array is always STR, DEX, CON, INT, WIS, CHA.
pub const NUM_ATTRIBUTES: usize = 6;

/// Reference value for the modifier formula: (value - 10) / 2.
pub const BASE_ATTRIBUTE_VALUE: u32 = 10;

/// Physical attributes (STR, DEX) must fall in this range on class templates.
pub const PHYSICAL_ATTR_MIN: u32 = 5;
pub const PHYSICAL_ATTR_MAX: u32 = 18;

/// Mental attributes (INT, WIS, CHA) must fall in this range on class templates.
pub const MENTAL_ATTR_MIN: u32 = 4;
pub const MENTAL_ATTR_MAX: u32 = 18;

/// Constitution range on class templates.
pub const CON_MIN: u32 = 6;
pub const CON_MAX: u32 = 16;

/// Max HP is derived from Constitution: 6 * CON - 24.
/// Warrior (CON 14) lands on 60, Mage (CON 8) on 24.
pub const HP_PER_CON: u32 = 6;
pub const HP_CON_OFFSET: u32 = 24;

/// Template HP must land inside this band.
pub const CLASS_HP_MIN: u32 = 20;
pub const CLASS_HP_MAX: u32 = 80;

/// Every class starts with exactly this much gold.
pub const STARTING_GOLD: u32 = 100;

/// Character names are 1..=50 characters.
pub const NAME_MAX_LEN: usize = 50;

/// Minimum starting abilities per class.
pub const MIN_STARTING_ABILITIES: usize = 3;

/// No class's power score may exceed another's by more than this fraction.
pub const POWER_SPREAD_LIMIT: f64 = 0.15;

/// Weight of max HP in the power score: power = sum(attributes) + hp * weight.
pub const POWER_HP_WEIGHT: f64 = 0.25;

// =============================================================================
// COMBAT - Initiative, damage, flee
// =============================================================================

/// Initiative score = DEX * weight + U[0, jitter).
pub const INITIATIVE_DEX_WEIGHT: u32 = 2;

/// Upper bound (exclusive) of the random initiative perturbation.
pub const INITIATIVE_JITTER: u32 = 6;

/// Incoming damage is multiplied by this while the defender is defending.
pub const DEFEND_DAMAGE_FACTOR: f64 = 0.5;

/// Pre-mitigation damage bonus when hitting an enemy's weakness.
pub const WEAKNESS_MULTIPLIER: f64 = 1.5;

/// Flee chance = base + step * (player DEX - mean enemy DEX), clamped.
pub const FLEE_BASE_CHANCE: f64 = 0.4;
pub const FLEE_DEX_STEP: f64 = 0.05;
pub const FLEE_MIN_CHANCE: f64 = 0.05;
pub const FLEE_MAX_CHANCE: f64 = 0.95;

// =============================================================================
// XP AND LEVELING
// =============================================================================

/// XP required for next level = base * level^exponent.
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

/// Base XP granted per slain enemy, scaled by tier in the catalog.
pub const XP_PER_TIER: u64 = 8;

/// Boss kills grant this multiple of the tier XP.
pub const BOSS_XP_MULTIPLIER: u64 = 5;

// =============================================================================
// DIFFICULTY CONTROLLER
// =============================================================================

/// Reference difficulty that the scaling multiplier is applied to.
pub const BASE_DIFFICULTY: f64 = 100.0;

/// Performance the controller steers the player toward.
pub const TARGET_PERFORMANCE: f64 = 1.0;

/// Heavy recalculation runs every N recorded encounters.
pub const RECALC_CADENCE: u32 = 10;

/// Micro-adjustments run every N recorded encounters between cadence points.
pub const MICRO_ADJUST_CADENCE: u32 = 2;

/// Bounded step size for a micro-adjustment.
pub const MICRO_ADJUST_STEP: f64 = 0.03;

/// The scaling multiplier never leaves base +/- this fraction.
pub const SCALING_CLAMP: f64 = 0.15;

/// Encounters required before cadence recomputes trust the data.
pub const MIN_TELEMETRY_SAMPLES: u32 = 2;

/// EWMA smoothing factors for the rolling score and the skill estimate.
pub const PERFORMANCE_EWMA_ALPHA: f64 = 0.3;
pub const SKILL_EWMA_ALPHA: f64 = 0.2;

/// Performance score component weights (success, time, resources).
pub const PERF_WEIGHT_SUCCESS: f64 = 0.5;
pub const PERF_WEIGHT_TIME: f64 = 0.3;
pub const PERF_WEIGHT_RESOURCES: f64 = 0.2;

/// Success component per outcome.
pub const PERF_SUCCESS_VICTORY: f64 = 1.0;
pub const PERF_SUCCESS_FLED: f64 = 0.4;
pub const PERF_SUCCESS_DEFEAT: f64 = 0.0;

/// Spawn-time enemy scaling is sampled from N(multiplier, stddev).
pub const SPAWN_SCALING_STDDEV: f64 = 0.15;
pub const SPAWN_SCALING_MIN: f64 = 0.5;
pub const SPAWN_SCALING_MAX: f64 = 2.0;

/// Flow band: challenge/skill ratio inside [low, high] counts as optimal.
pub const FLOW_BAND_LOW: f64 = 0.9;
pub const FLOW_BAND_HIGH: f64 = 1.2;

/// Ratios outside [disrupted_low, disrupted_high] classify as disrupted.
pub const FLOW_DISRUPTED_LOW: f64 = 0.7;
pub const FLOW_DISRUPTED_HIGH: f64 = 1.4;

/// A disrupted classification older than this forces an immediate rebalance.
pub const DISRUPTED_REBALANCE_SECONDS: i64 = 30;

// =============================================================================
// REWARDS - Variable-ratio schedule and rare pacing
// =============================================================================

/// Asymptotic rare-reward probability.
pub const RARE_REWARD_CEILING: f64 = 0.05;

/// Pity curve time constant: P(n) = ceiling * (1 - e^(-n / constant)).
pub const RARE_PITY_CONSTANT: f64 = 20.0;

/// Variable-ratio mean interval bounds (VR-5 to VR-10) and default.
pub const VR_MIN_INTERVAL: f64 = 5.0;
pub const VR_MAX_INTERVAL: f64 = 10.0;
pub const VR_DEFAULT_INTERVAL: f64 = 7.0;

/// Common reward gold range (inclusive).
pub const COMMON_GOLD_MIN: u32 = 8;
pub const COMMON_GOLD_MAX: u32 = 25;

/// Nominal value of a rare item grant, used for the prediction error.
pub const RARE_REWARD_VALUE: f64 = 100.0;

/// Motivation index = prediction_error * novelty_factor * this.
pub const MOTIVATION_INDEX_FACTOR: f64 = 0.73;

/// Recent-action window used by the novelty factor.
pub const NOVELTY_WINDOW: usize = 16;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Save blob magic: "SAGARPG\0" in hex. Bump on incompatible layout changes.
pub const SAVE_VERSION_MAGIC: u64 = 0x5341474152504700;
