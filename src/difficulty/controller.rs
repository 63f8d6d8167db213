//! Adaptive difficulty: per-encounter scoring, cadence-based rebalancing,
//! flow classification, and rare-reward pacing.
//!
//! The controller owns no state of its own beyond configuration; the
//! session's [`DifficultyState`] is passed in explicitly. Telemetry is
//! consumed by value, once.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::character::class::ClassTemplate;
use crate::combat::types::Outcome;
use crate::core::balance::{
    BASE_DIFFICULTY, DISRUPTED_REBALANCE_SECONDS, FLOW_BAND_HIGH, FLOW_BAND_LOW,
    FLOW_DISRUPTED_HIGH, FLOW_DISRUPTED_LOW, MICRO_ADJUST_CADENCE, MICRO_ADJUST_STEP,
    MIN_TELEMETRY_SAMPLES, PERFORMANCE_EWMA_ALPHA, PERF_SUCCESS_DEFEAT, PERF_SUCCESS_FLED,
    PERF_SUCCESS_VICTORY, PERF_WEIGHT_RESOURCES, PERF_WEIGHT_SUCCESS, PERF_WEIGHT_TIME,
    RARE_PITY_CONSTANT, RARE_REWARD_CEILING, RECALC_CADENCE, SCALING_CLAMP, SKILL_EWMA_ALPHA,
    SPAWN_SCALING_MAX, SPAWN_SCALING_MIN, SPAWN_SCALING_STDDEV, TARGET_PERFORMANCE,
};
use crate::difficulty::state::{DifficultyState, FlowState};
use crate::difficulty::telemetry::EncounterTelemetry;

/// Length of the short-window win/loss pattern kept for micro-adjustments.
const SHORT_WINDOW: usize = 4;

#[derive(Debug, Clone)]
pub struct DifficultyController {
    pub base_difficulty: f64,
    pub target_performance: f64,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self {
            base_difficulty: BASE_DIFFICULTY,
            target_performance: TARGET_PERFORMANCE,
        }
    }
}

impl DifficultyController {
    /// Effective difficulty value external systems consume.
    pub fn difficulty(&self, state: &DifficultyState) -> f64 {
        self.base_difficulty * state.scaling
    }

    /// Ingests one encounter record. Runs the micro-adjustment every
    /// [`MICRO_ADJUST_CADENCE`] encounters, the heavy recompute every
    /// [`RECALC_CADENCE`], and a priority rebalance when the flow
    /// classification has been disrupted for more than 30 seconds.
    pub fn record_encounter(&self, state: &mut DifficultyState, telemetry: EncounterTelemetry) {
        let score = Self::performance_score(&telemetry);
        state.performance =
            PERFORMANCE_EWMA_ALPHA * score + (1.0 - PERFORMANCE_EWMA_ALPHA) * state.performance;
        state.skill_estimate = (SKILL_EWMA_ALPHA * score
            + (1.0 - SKILL_EWMA_ALPHA) * state.skill_estimate)
            .max(0.05);

        state.recent_wins.push_back(telemetry.outcome == Outcome::Victory);
        while state.recent_wins.len() > SHORT_WINDOW {
            state.recent_wins.pop_front();
        }

        state.encounters_recorded += 1;
        state.encounters_since_rare += 1;

        if state.encounters_recorded % RECALC_CADENCE == 0 {
            self.recalculate(state, telemetry.timestamp);
        } else if state.encounters_recorded % MICRO_ADJUST_CADENCE == 0 {
            self.micro_adjust(state, telemetry.timestamp);
        }

        state.flow = self.classify_flow(state);
        if state.flow == FlowState::Disrupted {
            let since = *state.disrupted_since.get_or_insert(telemetry.timestamp);
            if telemetry.timestamp - since >= Duration::seconds(DISRUPTED_REBALANCE_SECONDS) {
                // Priority interrupt: rebalance now instead of waiting for
                // the next cadence point
                self.recalculate(state, telemetry.timestamp);
                state.disrupted_since = None;
                state.flow = self.classify_flow(state);
            }
        } else {
            state.disrupted_since = None;
        }

        debug!(
            encounter = %telemetry.encounter_id,
            score,
            performance = state.performance,
            scaling = state.scaling,
            flow = ?state.flow,
            "telemetry recorded"
        );
    }

    /// Weighted performance score for one encounter, normalized against the
    /// class baseline so a slow kit is not read as a struggling player.
    pub fn performance_score(telemetry: &EncounterTelemetry) -> f64 {
        let success = match telemetry.outcome {
            Outcome::Victory => PERF_SUCCESS_VICTORY,
            Outcome::Fled => PERF_SUCCESS_FLED,
            Outcome::Defeat => PERF_SUCCESS_DEFEAT,
        };
        let template = ClassTemplate::of(telemetry.class);
        let time_factor =
            (template.baseline_turns() / telemetry.turns.max(1) as f64).clamp(0.0, 2.0);
        let resource_factor = ((template.baseline_resources() + 1.0)
            / (telemetry.resources as f64 + 1.0))
            .clamp(0.0, 2.0);
        PERF_WEIGHT_SUCCESS * success
            + PERF_WEIGHT_TIME * time_factor
            + PERF_WEIGHT_RESOURCES * resource_factor
    }

    /// Heavy cadence recompute:
    /// `new = base * (0.7 + 0.3 * target / measured)`, clamped to +/-15%.
    ///
    /// Degenerate telemetry (no samples yet, zero measured performance)
    /// leaves the difficulty unchanged and flags the session instead of
    /// dividing by zero. This never surfaces to the caller.
    pub fn recalculate(&self, state: &mut DifficultyState, now: DateTime<Utc>) {
        if state.encounters_recorded < MIN_TELEMETRY_SAMPLES || state.performance <= 0.0 {
            state.insufficient_data = true;
            state.last_adjustment = now;
            return;
        }
        state.insufficient_data = false;
        let raw = 0.7 + 0.3 * (self.target_performance / state.performance);
        state.scaling = raw.clamp(1.0 - SCALING_CLAMP, 1.0 + SCALING_CLAMP);
        state.last_adjustment = now;
        debug!(scaling = state.scaling, "difficulty recalculated");
    }

    /// Small bounded nudge from the short-window win pattern, avoiding
    /// visible spikes between cadence points.
    fn micro_adjust(&self, state: &mut DifficultyState, now: DateTime<Utc>) {
        let window: Vec<bool> = state
            .recent_wins
            .iter()
            .rev()
            .take(MICRO_ADJUST_CADENCE as usize)
            .copied()
            .collect();
        if window.len() < MICRO_ADJUST_CADENCE as usize {
            return;
        }
        if window.iter().all(|w| *w) {
            state.scaling += MICRO_ADJUST_STEP;
        } else if window.iter().all(|w| !*w) {
            state.scaling -= MICRO_ADJUST_STEP;
        } else {
            return;
        }
        state.scaling = state
            .scaling
            .clamp(1.0 - SCALING_CLAMP, 1.0 + SCALING_CLAMP);
        state.last_adjustment = now;
    }

    /// Challenge/skill ratio against the flow band.
    fn classify_flow(&self, state: &DifficultyState) -> FlowState {
        let ratio = state.scaling / state.skill_estimate;
        if (FLOW_BAND_LOW..=FLOW_BAND_HIGH).contains(&ratio) {
            FlowState::Optimal
        } else if (FLOW_DISRUPTED_LOW..FLOW_BAND_LOW).contains(&ratio) {
            FlowState::UnderChallenged
        } else if ratio > FLOW_BAND_HIGH && ratio <= FLOW_DISRUPTED_HIGH {
            FlowState::OverChallenged
        } else {
            FlowState::Disrupted
        }
    }

    /// Spawn-time scaling factor for new enemy instances: a Gaussian sample
    /// centered on the skill estimate (stddev 0.15), scaled by the current
    /// multiplier and clamped to a sane band. Applied once at spawn, never
    /// retroactively.
    pub fn sample_spawn_scaling(&self, state: &DifficultyState, rng: &mut impl Rng) -> f64 {
        let sample = match Normal::new(state.skill_estimate, SPAWN_SCALING_STDDEV) {
            Ok(dist) => dist.sample(rng),
            Err(_) => state.skill_estimate,
        };
        (sample * state.scaling).clamp(SPAWN_SCALING_MIN, SPAWN_SCALING_MAX)
    }

    /// Soft pity curve: P(n) = 0.05 * (1 - e^(-n/20)), monotonically
    /// increasing from 0 toward the 5% ceiling.
    pub fn rare_reward_probability(encounters_since_rare: u32) -> f64 {
        RARE_REWARD_CEILING * (1.0 - (-(encounters_since_rare as f64) / RARE_PITY_CONSTANT).exp())
    }

    /// Multiplicative bias applied to the reward scheduler's grant
    /// probability. Over-challenged sessions pay out slightly more, calm
    /// under-challenged stretches slightly less.
    pub fn reward_bias(&self, state: &DifficultyState) -> f64 {
        match state.flow {
            FlowState::Optimal => 1.0,
            FlowState::UnderChallenged => 0.9,
            FlowState::OverChallenged => 1.15,
            FlowState::Disrupted => 1.0,
        }
    }

    /// Resets the pity counter after a rare grant.
    pub fn on_rare_reward(&self, state: &mut DifficultyState) {
        state.encounters_since_rare = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::ClassId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn telemetry(outcome: Outcome, turns: u32, resources: u32) -> EncounterTelemetry {
        EncounterTelemetry {
            encounter_id: Uuid::new_v4(),
            outcome,
            turns,
            resources,
            class: ClassId::Warrior,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_dda_formula_reference_case() {
        // base 100, target 1.0, measured 0.8 -> 100 * (0.7 + 0.3 * 1.25) = 107.5
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        state.encounters_recorded = 10;
        state.performance = 0.8;
        controller.recalculate(&mut state, Utc::now());
        assert!((controller.difficulty(&state) - 107.5).abs() < 1e-9);
    }

    #[test]
    fn test_dda_clamps_to_fifteen_percent() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        state.encounters_recorded = 10;

        // Terrible performance would push far above base; clamp at 115
        state.performance = 0.1;
        controller.recalculate(&mut state, Utc::now());
        assert!((controller.difficulty(&state) - 115.0).abs() < 1e-9);

        // Stellar performance clamps at 85
        state.performance = 10.0;
        controller.recalculate(&mut state, Utc::now());
        assert!((controller.difficulty(&state) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_performance_falls_back_to_base() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        state.encounters_recorded = 10;
        state.performance = 0.0;
        controller.recalculate(&mut state, Utc::now());
        assert_eq!(state.scaling, 1.0);
        assert!(state.insufficient_data);
        assert!((controller.difficulty(&state) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_samples_flags_insufficient_data() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        state.encounters_recorded = 1;
        state.performance = 0.5;
        controller.recalculate(&mut state, Utc::now());
        assert!(state.insufficient_data);
        assert_eq!(state.scaling, 1.0);
    }

    #[test]
    fn test_rare_probability_curve() {
        assert_eq!(DifficultyController::rare_reward_probability(0), 0.0);
        let p20 = DifficultyController::rare_reward_probability(20);
        assert!((p20 - 0.05 * (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        assert!((p20 - 0.0316).abs() < 0.001);
        let p_large = DifficultyController::rare_reward_probability(10_000);
        assert!(p_large < 0.05);
        assert!(p_large > 0.0499);
    }

    #[test]
    fn test_rare_probability_is_monotonic() {
        let mut prev = -1.0;
        for n in 0..200 {
            let p = DifficultyController::rare_reward_probability(n);
            assert!(p > prev, "P({n}) = {p} should exceed P({}) = {prev}", n as i64 - 1);
            prev = p;
        }
    }

    #[test]
    fn test_performance_score_at_baseline_is_target() {
        // A victory at exactly the class baseline scores ~1.0
        let template = ClassTemplate::of(ClassId::Warrior);
        let t = telemetry(
            Outcome::Victory,
            template.baseline_turns().round() as u32,
            template.baseline_resources().round() as u32,
        );
        let score = DifficultyController::performance_score(&t);
        assert!((score - 1.0).abs() < 0.15, "score {score}");
    }

    #[test]
    fn test_performance_score_orders_outcomes() {
        let win = DifficultyController::performance_score(&telemetry(Outcome::Victory, 6, 4));
        let fled = DifficultyController::performance_score(&telemetry(Outcome::Fled, 6, 4));
        let loss = DifficultyController::performance_score(&telemetry(Outcome::Defeat, 6, 4));
        assert!(win > fled);
        assert!(fled > loss);
    }

    #[test]
    fn test_micro_adjustment_steps_are_bounded() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());

        // Two straight wins nudge the multiplier up by exactly one step
        controller.record_encounter(&mut state, telemetry(Outcome::Victory, 4, 2));
        assert_eq!(state.scaling, 1.0);
        controller.record_encounter(&mut state, telemetry(Outcome::Victory, 4, 2));
        assert!((state.scaling - (1.0 + MICRO_ADJUST_STEP)).abs() < 1e-9);

        // Micro steps can never leave the clamp band
        for _ in 0..40 {
            controller.record_encounter(&mut state, telemetry(Outcome::Victory, 4, 2));
        }
        assert!(state.scaling <= 1.0 + SCALING_CLAMP + 1e-9);
    }

    #[test]
    fn test_losses_nudge_difficulty_down() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        controller.record_encounter(&mut state, telemetry(Outcome::Defeat, 12, 9));
        controller.record_encounter(&mut state, telemetry(Outcome::Defeat, 12, 9));
        assert!(state.scaling < 1.0);
        assert!(state.scaling >= 1.0 - SCALING_CLAMP - 1e-9);
    }

    #[test]
    fn test_cadence_recompute_fires_every_ten() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        for _ in 0..10 {
            controller.record_encounter(&mut state, telemetry(Outcome::Victory, 3, 1));
        }
        // Tenth encounter ran the heavy recompute; sustained strong play
        // pulls the multiplier below 1.0 toward the clamp floor
        assert!(!state.insufficient_data);
        assert!(state.scaling < 1.0);
    }

    #[test]
    fn test_disrupted_flow_forces_rebalance_after_window() {
        let controller = DifficultyController::default();
        let start = Utc::now();
        let mut state = DifficultyState::new(start);
        // Skill estimate far above the multiplier: ratio well under 0.7
        state.skill_estimate = 2.0;

        let mut t0 = telemetry(Outcome::Victory, 3, 1);
        t0.timestamp = start;
        controller.record_encounter(&mut state, t0);
        assert_eq!(state.flow, FlowState::Disrupted);
        assert!(state.disrupted_since.is_some());
        let adjustment_before = state.last_adjustment;

        // 40 seconds later, still disrupted: the priority rebalance fires
        // without waiting for the ten-encounter cadence
        let mut t1 = telemetry(Outcome::Victory, 3, 1);
        t1.timestamp = start + Duration::seconds(40);
        controller.record_encounter(&mut state, t1);
        assert!(state.last_adjustment > adjustment_before);
        assert!(state.disrupted_since.is_none());
    }

    #[test]
    fn test_flow_classification_bands() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());

        state.scaling = 1.0;
        state.skill_estimate = 1.0;
        assert_eq!(controller.classify_flow(&state), FlowState::Optimal);

        state.skill_estimate = 1.25; // ratio 0.8
        assert_eq!(controller.classify_flow(&state), FlowState::UnderChallenged);

        state.skill_estimate = 0.78; // ratio ~1.28
        assert_eq!(controller.classify_flow(&state), FlowState::OverChallenged);

        state.skill_estimate = 0.5; // ratio 2.0
        assert_eq!(controller.classify_flow(&state), FlowState::Disrupted);

        state.skill_estimate = 2.0; // ratio 0.5
        assert_eq!(controller.classify_flow(&state), FlowState::Disrupted);
    }

    #[test]
    fn test_spawn_scaling_is_seeded_and_clamped() {
        let controller = DifficultyController::default();
        let state = DifficultyState::new(Utc::now());

        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            controller.sample_spawn_scaling(&state, &mut a),
            controller.sample_spawn_scaling(&state, &mut b)
        );

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let factor = controller.sample_spawn_scaling(&state, &mut rng);
            assert!((SPAWN_SCALING_MIN..=SPAWN_SCALING_MAX).contains(&factor));
        }
    }

    #[test]
    fn test_pity_counter_resets_on_rare() {
        let controller = DifficultyController::default();
        let mut state = DifficultyState::new(Utc::now());
        controller.record_encounter(&mut state, telemetry(Outcome::Victory, 4, 2));
        controller.record_encounter(&mut state, telemetry(Outcome::Victory, 4, 2));
        assert_eq!(state.encounters_since_rare, 2);
        controller.on_rare_reward(&mut state);
        assert_eq!(state.encounters_since_rare, 0);
    }
}
