//! Variable-ratio reward scheduling.
//!
//! Each qualifying action rolls independently; the mean interval between
//! grants is parameterizable between 5 and 10 actions (VR-5 to VR-10).
//! The difficulty controller biases the grant probability and paces rare
//! grants through the pity counter; the scheduler never pushes the final
//! probability outside [0, 1].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;
use uuid::Uuid;

use crate::core::balance::{
    COMMON_GOLD_MAX, COMMON_GOLD_MIN, MOTIVATION_INDEX_FACTOR, NOVELTY_WINDOW, RARE_REWARD_VALUE,
    VR_DEFAULT_INTERVAL, VR_MAX_INTERVAL, VR_MIN_INTERVAL,
};
use crate::difficulty::{DifficultyController, DifficultyState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardClass {
    Common,
    Rare,
}

/// What the external economy/inventory collaborator receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardPayload {
    Gold(u32),
    /// Opaque item id; the item catalog lives outside the core.
    Item(Uuid),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEvent {
    pub action_id: Uuid,
    pub granted: bool,
    pub class: RewardClass,
    pub payload: Option<RewardPayload>,
    /// Diagnostic only: prediction_error * novelty_factor * 0.73.
    /// Never gates the grant decision and is not persisted.
    pub motivation_index: f64,
}

#[derive(Debug, Clone)]
pub struct RewardScheduler {
    mean_interval: f64,
    /// Recent trigger actions, for the novelty factor.
    recent_actions: VecDeque<Uuid>,
}

impl Default for RewardScheduler {
    fn default() -> Self {
        Self::new(VR_DEFAULT_INTERVAL)
    }
}

impl RewardScheduler {
    /// Mean interval is clamped into the VR-5..VR-10 band.
    pub fn new(mean_interval: f64) -> Self {
        Self {
            mean_interval: mean_interval.clamp(VR_MIN_INTERVAL, VR_MAX_INTERVAL),
            recent_actions: VecDeque::new(),
        }
    }

    pub fn mean_interval(&self) -> f64 {
        self.mean_interval
    }

    /// Base per-action grant probability before the controller bias.
    pub fn base_probability(&self) -> f64 {
        1.0 / self.mean_interval
    }

    /// Rolls one qualifying action. A rare grant resets the controller's
    /// pity counter through [`DifficultyController::on_rare_reward`].
    pub fn evaluate(
        &mut self,
        action_id: Uuid,
        controller: &DifficultyController,
        state: &mut DifficultyState,
        rng: &mut impl Rng,
    ) -> RewardEvent {
        let probability =
            (self.base_probability() * controller.reward_bias(state)).clamp(0.0, 1.0);
        let granted = rng.gen::<f64>() < probability;

        let (class, payload) = if granted {
            let rare_probability =
                DifficultyController::rare_reward_probability(state.encounters_since_rare);
            if rng.gen::<f64>() < rare_probability {
                controller.on_rare_reward(state);
                (RewardClass::Rare, Some(RewardPayload::Item(Uuid::new_v4())))
            } else {
                let gold = rng.gen_range(COMMON_GOLD_MIN..=COMMON_GOLD_MAX);
                (RewardClass::Common, Some(RewardPayload::Gold(gold)))
            }
        } else {
            (RewardClass::Common, None)
        };

        let received = match payload {
            Some(RewardPayload::Gold(gold)) => gold as f64,
            Some(RewardPayload::Item(_)) => RARE_REWARD_VALUE,
            None => 0.0,
        };
        let expected =
            probability * (COMMON_GOLD_MIN + COMMON_GOLD_MAX) as f64 / 2.0;
        let motivation_index =
            (received - expected) * self.novelty_factor(action_id) * MOTIVATION_INDEX_FACTOR;

        self.remember(action_id);

        debug!(
            %action_id,
            granted,
            ?class,
            motivation_index,
            "reward evaluated"
        );

        RewardEvent {
            action_id,
            granted,
            class,
            payload,
            motivation_index,
        }
    }

    /// Decays with repetitions of the same trigger in the recent window:
    /// 1 / (1 + repeats).
    fn novelty_factor(&self, action_id: Uuid) -> f64 {
        let repeats = self
            .recent_actions
            .iter()
            .filter(|a| **a == action_id)
            .count();
        1.0 / (1.0 + repeats as f64)
    }

    fn remember(&mut self, action_id: Uuid) {
        if self.recent_actions.len() >= NOVELTY_WINDOW {
            self.recent_actions.pop_front();
        }
        self.recent_actions.push_back(action_id);
    }
}
