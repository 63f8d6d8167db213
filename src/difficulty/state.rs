use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Challenge/skill classification driving rebalancing and reward bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    Optimal,
    UnderChallenged,
    OverChallenged,
    Disrupted,
}

/// Session-scoped adaptive state. One instance per active session, mutated
/// only by the [`DifficultyController`](super::controller::DifficultyController);
/// everything else reads it. Passed explicitly through the call chain so the
/// controller stays testable and a multi-session server stays safe.
///
/// Fields round-trip through serde bit-for-bit in value; the save blob
/// carries the whole struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Rolling (EWMA) performance score.
    pub performance: f64,
    /// Current scaling multiplier around 1.0, clamped to +/-15% of base.
    pub scaling: f64,
    pub flow: FlowState,
    pub last_adjustment: DateTime<Utc>,
    /// Pity counter: encounters since the last rare reward grant.
    pub encounters_since_rare: u32,
    pub encounters_recorded: u32,
    /// Smoothed estimate of player skill, floor 0.05.
    pub skill_estimate: f64,
    /// Set while too few encounters exist for a trustworthy recompute.
    pub insufficient_data: bool,
    /// Win/loss pattern of the short adjustment window.
    pub recent_wins: VecDeque<bool>,
    /// When the flow classification first went disrupted, if it still is.
    pub disrupted_since: Option<DateTime<Utc>>,
}

impl DifficultyState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            performance: 1.0,
            scaling: 1.0,
            flow: FlowState::Optimal,
            last_adjustment: now,
            encounters_since_rare: 0,
            encounters_recorded: 0,
            skill_estimate: 1.0,
            insufficient_data: true,
            recent_wins: VecDeque::new(),
            disrupted_since: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_neutral() {
        let state = DifficultyState::new(Utc::now());
        assert_eq!(state.scaling, 1.0);
        assert_eq!(state.flow, FlowState::Optimal);
        assert!(state.insufficient_data);
        assert_eq!(state.encounters_since_rare, 0);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let mut state = DifficultyState::new(Utc::now());
        state.performance = 0.87;
        state.scaling = 1.08;
        state.flow = FlowState::OverChallenged;
        state.encounters_since_rare = 13;
        state.recent_wins.push_back(true);
        state.recent_wins.push_back(false);

        let json = serde_json::to_string(&state).unwrap();
        let back: DifficultyState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
