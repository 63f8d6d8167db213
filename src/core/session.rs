//! Session wiring: one character, one difficulty state, one seeded RNG.
//!
//! The session is the synchronous, single-threaded integration surface the
//! external layers drive: it spawns encounters with the controller's
//! sampled scaling, forwards one action per turn, and at each encounter
//! boundary feeds telemetry to the controller and rolls the victory reward
//! before the next encounter can begin.

use chrono::Utc;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use serde::Serialize;

use crate::character::class::ClassId;
use crate::character::factory::{create_character, CreationError};
use crate::character::Character;
use crate::combat::types::{Action, CombatError, CombatEvent, EncounterPhase, Outcome};
use crate::combat::Encounter;
use crate::difficulty::{DifficultyController, DifficultyState, FlowState};
use crate::enemies::catalog;
use crate::enemies::EnemyId;
use crate::persist::{self, PersistError};
use crate::rewards::{RewardEvent, RewardPayload, RewardScheduler};

/// Result of one player turn, including the reward roll when the turn
/// resolved the encounter.
#[derive(Debug)]
pub struct TurnReport {
    pub events: Vec<CombatEvent>,
    pub outcome: Option<Outcome>,
    pub reward: Option<RewardEvent>,
}

pub struct GameSession {
    character: Character,
    difficulty: DifficultyState,
    controller: DifficultyController,
    scheduler: RewardScheduler,
    rng: ChaCha8Rng,
    encounter: Option<Encounter>,
}

impl GameSession {
    pub fn new(name: &str, class: ClassId, seed: u64) -> Result<Self, CreationError> {
        Ok(Self {
            character: create_character(name, class)?,
            difficulty: DifficultyState::new(Utc::now()),
            controller: DifficultyController::default(),
            scheduler: RewardScheduler::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            encounter: None,
        })
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn difficulty_state(&self) -> &DifficultyState {
        &self.difficulty
    }

    pub fn encounter_phase(&self) -> EncounterPhase {
        self.encounter
            .as_ref()
            .map_or(EncounterPhase::NotStarted, |e| e.phase())
    }

    /// Spawns the given templates with freshly sampled difficulty scaling
    /// and opens the encounter. Fails if an encounter is already running or
    /// a template id is unknown.
    pub fn start_encounter(
        &mut self,
        template_ids: &[EnemyId],
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if self.encounter.is_some() {
            return Err(CombatError::InvalidPhase {
                phase: EncounterPhase::TurnLoop,
            });
        }
        let mut instances = Vec::with_capacity(template_ids.len());
        for id in template_ids {
            let template = catalog::template(*id).ok_or(CombatError::UnknownEnemy(*id))?;
            let scaling = self
                .controller
                .sample_spawn_scaling(&self.difficulty, &mut self.rng);
            instances.push(template.spawn(scaling));
        }
        let mut encounter = Encounter::new(instances);
        let events = encounter.begin(&mut self.character, &mut self.rng)?;
        if encounter.outcome().is_some() {
            // The character fell to the initiative lead-in; close the books
            self.finalize(encounter);
        } else {
            self.encounter = Some(encounter);
        }
        Ok(events)
    }

    /// Forwards one action into the running encounter. On resolution the
    /// telemetry is consumed by the controller and, on victory, the reward
    /// scheduler rolls once, all before this call returns.
    pub fn act(&mut self, action: Action) -> Result<TurnReport, CombatError> {
        let Some(encounter) = self.encounter.as_mut() else {
            return Err(CombatError::InvalidPhase {
                phase: EncounterPhase::NotStarted,
            });
        };
        let events = encounter.submit(&mut self.character, action, &mut self.rng)?;
        let outcome = encounter.outcome();
        let reward = match outcome {
            Some(_) => match self.encounter.take() {
                Some(resolved) => self.finalize(resolved),
                None => None,
            },
            None => None,
        };
        Ok(TurnReport {
            events,
            outcome,
            reward,
        })
    }

    fn finalize(&mut self, encounter: Encounter) -> Option<RewardEvent> {
        let outcome = encounter.outcome()?;
        let trigger = encounter.id();
        let telemetry = encounter.into_telemetry(&self.character, Utc::now()).ok()?;
        self.controller
            .record_encounter(&mut self.difficulty, telemetry);

        // Encounter-boundary recovery: regenerate after a victory, revive
        // after a defeat. Fleeing keeps the wounds.
        if outcome != Outcome::Fled {
            self.character.current_hp = self.character.max_hp;
        }

        if outcome != Outcome::Victory {
            return None;
        }
        let event = self.scheduler.evaluate(
            trigger,
            &self.controller,
            &mut self.difficulty,
            &mut self.rng,
        );
        match event.payload {
            Some(RewardPayload::Gold(gold)) => self.character.gold += gold,
            Some(RewardPayload::Item(id)) => self.character.inventory.push(id),
            None => {}
        }
        Some(event)
    }

    /// Renderable view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        let enemies = self
            .encounter
            .as_ref()
            .map(|e| {
                e.enemies()
                    .iter()
                    .map(|enemy| EnemySnapshot {
                        name: enemy.name.clone(),
                        current_hp: enemy.current_hp,
                        max_hp: enemy.max_hp,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let available_actions = if self.encounter_phase() == EncounterPhase::TurnLoop {
            let mut actions: Vec<String> = self
                .character
                .abilities
                .iter()
                .map(|a| a.name().to_string())
                .collect();
            actions.push("Flee".to_string());
            actions
        } else {
            Vec::new()
        };
        SessionSnapshot {
            name: self.character.name.clone(),
            class: self.character.class.display_name().to_string(),
            level: self.character.level,
            current_hp: self.character.current_hp,
            max_hp: self.character.max_hp,
            gold: self.character.gold,
            phase: self.encounter_phase(),
            flow: self.difficulty.flow,
            enemies,
            available_actions,
        }
    }

    /// Serializes character and difficulty state into a save blob.
    pub fn save(&self) -> Result<Vec<u8>, PersistError> {
        persist::save(&self.character, &self.difficulty)
    }

    /// Rebuilds a session from a save blob. The RNG stream and scheduler
    /// window restart; persisted value state is restored exactly.
    pub fn restore(blob: &[u8], seed: u64) -> Result<Self, PersistError> {
        let (character, difficulty) = persist::load(blob)?;
        Ok(Self {
            character,
            difficulty,
            controller: DifficultyController::default(),
            scheduler: RewardScheduler::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            encounter: None,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemySnapshot {
    pub name: String,
    pub current_hp: u32,
    pub max_hp: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub name: String,
    pub class: String,
    pub level: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub gold: u32,
    pub phase: EncounterPhase,
    pub flow: FlowState,
    pub enemies: Vec<EnemySnapshot>,
    pub available_actions: Vec<String>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
