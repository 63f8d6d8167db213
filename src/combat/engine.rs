//! Turn-based encounter resolution.
//!
//! One `Encounter` runs one fight between the character and a set of enemy
//! instances. Turn order is fixed at initiative roll; the engine advances
//! enemy turns automatically and pauses whenever the character must act.
//! The encounter is not resumable after a crash mid-fight; external
//! checkpointing happens only between encounters.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::abilities::{Ability, AbilityKind};
use crate::character::Character;
use crate::combat::ai::{self, EnemyMove};
use crate::combat::types::{
    Action, CombatError, CombatEvent, CombatantRef, EncounterPhase, ItemEffect, Outcome,
};
use crate::core::balance::{
    DEFEND_DAMAGE_FACTOR, FLEE_BASE_CHANCE, FLEE_DEX_STEP, FLEE_MAX_CHANCE, FLEE_MIN_CHANCE,
    INITIATIVE_DEX_WEIGHT, INITIATIVE_JITTER, WEAKNESS_MULTIPLIER,
};
use crate::difficulty::telemetry::EncounterTelemetry;
use crate::enemies::{BehaviorTag, EnemyInstance};

pub struct Encounter {
    id: Uuid,
    phase: EncounterPhase,
    enemies: Vec<EnemyInstance>,
    order: Vec<CombatantRef>,
    cursor: usize,
    round: u32,
    turns_elapsed: u32,
    resources_spent: u32,
    player_defending: bool,
}

impl Encounter {
    pub fn new(enemies: Vec<EnemyInstance>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: EncounterPhase::NotStarted,
            enemies,
            order: Vec::new(),
            cursor: 0,
            round: 1,
            turns_elapsed: 0,
            resources_spent: 0,
            player_defending: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn enemies(&self) -> &[EnemyInstance] {
        &self.enemies
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            EncounterPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Initiative order, once rolled.
    pub fn initiative_order(&self) -> &[CombatantRef] {
        &self.order
    }

    /// Rolls initiative and plays any enemy turns that precede the
    /// character's first turn. Initiative score is DEX-derived plus a
    /// bounded perturbation; ties resolve by insertion order (character
    /// first, then enemies in spawn order).
    pub fn begin(
        &mut self,
        character: &mut Character,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if self.phase != EncounterPhase::NotStarted {
            return Err(CombatError::InvalidPhase { phase: self.phase });
        }
        self.phase = EncounterPhase::InitiativeRoll;

        let player_dex = character
            .attributes
            .get(crate::character::attributes::AttributeType::Dexterity);
        let mut scored: Vec<(CombatantRef, u32)> = Vec::with_capacity(1 + self.enemies.len());
        scored.push((
            CombatantRef::Player,
            player_dex * INITIATIVE_DEX_WEIGHT + rng.gen_range(0..INITIATIVE_JITTER),
        ));
        for (i, enemy) in self.enemies.iter().enumerate() {
            scored.push((
                CombatantRef::Enemy(i),
                enemy.dexterity * INITIATIVE_DEX_WEIGHT + rng.gen_range(0..INITIATIVE_JITTER),
            ));
        }
        // Stable sort keeps insertion order on equal scores
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.order = scored.into_iter().map(|(c, _)| c).collect();
        self.phase = EncounterPhase::TurnLoop;
        self.cursor = 0;

        let mut events = vec![CombatEvent::InitiativeRolled {
            order: self.order.clone(),
        }];
        self.run_enemy_turns(character, &mut events, rng);
        Ok(events)
    }

    /// Applies the character's action, then advances enemy turns until the
    /// character's next turn or resolution.
    pub fn submit(
        &mut self,
        character: &mut Character,
        action: Action,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if self.phase != EncounterPhase::TurnLoop {
            return Err(CombatError::InvalidPhase { phase: self.phase });
        }
        // Validate before touching any state
        if let Action::UseAbility(ability) = action {
            if !character.has_ability(ability) {
                return Err(CombatError::UnavailableAbility(ability));
            }
        }

        // The character's turn begins: a previous Defend expires now
        self.player_defending = false;
        let mut events = Vec::new();

        match action {
            Action::Attack => {
                self.player_strike(character, Ability::Attack, &mut events);
            }
            Action::Defend => {
                self.player_defending = true;
                events.push(CombatEvent::PlayerDefending);
            }
            Action::UseAbility(ability) => {
                self.resources_spent += ability.cost();
                match ability.kind() {
                    AbilityKind::Defensive => {
                        self.player_defending = true;
                        events.push(CombatEvent::PlayerDefending);
                    }
                    AbilityKind::Healing => {
                        let amount = (character.offense(AbilityKind::Healing) as f64
                            * ability.multiplier())
                        .round() as u32;
                        character.heal(amount);
                        events.push(CombatEvent::PlayerHealed { amount });
                    }
                    AbilityKind::Physical | AbilityKind::Magical => {
                        self.player_strike(character, ability, &mut events);
                    }
                }
            }
            Action::UseItem { id, effect } => {
                self.resources_spent += 1;
                events.push(CombatEvent::ItemUsed { id });
                match effect {
                    ItemEffect::Restore(amount) => {
                        character.heal(amount);
                        events.push(CombatEvent::PlayerHealed { amount });
                    }
                    ItemEffect::Strike(damage) => {
                        if let Some(target) = self.first_living_enemy() {
                            self.enemies[target].take_damage(damage);
                            events.push(CombatEvent::ItemDamage { target, damage });
                            self.note_kill(target, &mut events);
                        }
                    }
                }
            }
            Action::Flee => {
                let chance = self.flee_chance(character);
                let succeeded = rng.gen::<f64>() < chance;
                events.push(CombatEvent::FleeAttempt { succeeded });
                if succeeded {
                    // Successful flee ends the encounter immediately; no
                    // further damage may land after the roll.
                    self.turns_elapsed += 1;
                    self.resolve(Outcome::Fled, character, &mut events);
                    return Ok(events);
                }
            }
        }

        self.turns_elapsed += 1;

        if self.all_enemies_dead() {
            self.resolve(Outcome::Victory, character, &mut events);
            return Ok(events);
        }

        self.advance_cursor();
        self.run_enemy_turns(character, &mut events, rng);
        Ok(events)
    }

    /// Consumes the resolved encounter into its telemetry record. Exactly
    /// one record per encounter; calling before resolution is an error.
    pub fn into_telemetry(
        self,
        character: &Character,
        timestamp: DateTime<Utc>,
    ) -> Result<EncounterTelemetry, CombatError> {
        let outcome = match self.phase {
            EncounterPhase::Resolved(outcome) => outcome,
            phase => return Err(CombatError::InvalidPhase { phase }),
        };
        Ok(EncounterTelemetry {
            encounter_id: self.id,
            outcome,
            turns: self.turns_elapsed,
            resources: self.resources_spent,
            class: character.class,
            timestamp,
        })
    }

    fn flee_chance(&self, character: &Character) -> f64 {
        let living: Vec<&EnemyInstance> =
            self.enemies.iter().filter(|e| e.is_alive()).collect();
        if living.is_empty() {
            return FLEE_MAX_CHANCE;
        }
        let mean_dex =
            living.iter().map(|e| e.dexterity as f64).sum::<f64>() / living.len() as f64;
        let player_dex = character
            .attributes
            .get(crate::character::attributes::AttributeType::Dexterity)
            as f64;
        (FLEE_BASE_CHANCE + FLEE_DEX_STEP * (player_dex - mean_dex))
            .clamp(FLEE_MIN_CHANCE, FLEE_MAX_CHANCE)
    }

    fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(|e| e.is_alive())
    }

    fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    fn player_strike(
        &mut self,
        character: &Character,
        ability: Ability,
        events: &mut Vec<CombatEvent>,
    ) {
        let Some(target) = self.first_living_enemy() else {
            return;
        };
        let kind = ability.kind();
        let mut raw = character.offense(kind) as f64 * ability.multiplier();
        if self.enemies[target].weakness == Some(kind) {
            raw *= WEAKNESS_MULTIPLIER;
        }
        let mut damage = (raw - self.enemies[target].defense as f64).max(0.0);
        if self.enemies[target].defending {
            damage *= DEFEND_DAMAGE_FACTOR;
        }
        let damage = damage.round() as u32;
        self.enemies[target].take_damage(damage);
        events.push(CombatEvent::PlayerAttack {
            target,
            ability,
            damage,
        });
        self.note_kill(target, events);
    }

    fn note_kill(&mut self, target: usize, events: &mut Vec<CombatEvent>) {
        if !self.enemies[target].is_alive() {
            events.push(CombatEvent::EnemyDied {
                enemy: target,
                xp: self.enemies[target].xp_value,
            });
        }
    }

    /// Plays enemy turns from the cursor until it is the character's turn
    /// again or the encounter resolves.
    fn run_enemy_turns(
        &mut self,
        character: &mut Character,
        events: &mut Vec<CombatEvent>,
        rng: &mut impl Rng,
    ) {
        loop {
            if self.phase != EncounterPhase::TurnLoop {
                return;
            }
            let actor = match self.order[self.cursor] {
                CombatantRef::Player => return,
                CombatantRef::Enemy(i) => i,
            };
            if !self.enemies[actor].is_alive() {
                self.advance_cursor();
                continue;
            }

            // The enemy's turn begins: its Defend expires now
            self.enemies[actor].defending = false;

            if self.enemies[actor].behavior == BehaviorTag::BossScripted {
                let phase = ai::boss_phase(self.enemies[actor].hp_fraction());
                if phase > self.enemies[actor].phase {
                    self.enemies[actor].phase = phase;
                    events.push(CombatEvent::BossPhaseShift {
                        enemy: actor,
                        phase,
                    });
                }
            }

            match ai::choose_move(actor, &self.enemies, self.round, rng) {
                EnemyMove::Strike { multiplier } => {
                    let raw = self.enemies[actor].attack as f64 * multiplier;
                    let mut damage = (raw - character.mitigation() as f64).max(0.0);
                    if self.player_defending {
                        damage *= DEFEND_DAMAGE_FACTOR;
                    }
                    let damage = damage.round() as u32;
                    character.take_damage(damage);
                    events.push(CombatEvent::EnemyAttack {
                        enemy: actor,
                        damage,
                    });
                    if !character.is_alive() {
                        self.turns_elapsed += 1;
                        self.resolve(Outcome::Defeat, character, events);
                        return;
                    }
                }
                EnemyMove::Defend => {
                    self.enemies[actor].defending = true;
                    events.push(CombatEvent::EnemyDefending { enemy: actor });
                }
                EnemyMove::HealAlly { target } => {
                    let amount = (self.enemies[actor].attack as f64 * 1.2).round() as u32;
                    self.enemies[target].heal(amount);
                    events.push(CombatEvent::EnemyHealed {
                        enemy: actor,
                        target,
                        amount,
                    });
                }
            }

            self.turns_elapsed += 1;
            self.advance_cursor();
        }
    }

    fn advance_cursor(&mut self) {
        self.cursor = (self.cursor + 1) % self.order.len();
        if self.cursor == 0 {
            self.round += 1;
        }
    }

    fn resolve(&mut self, outcome: Outcome, character: &mut Character, events: &mut Vec<CombatEvent>) {
        self.phase = EncounterPhase::Resolved(outcome);
        if outcome == Outcome::Victory {
            let xp: u64 = self.enemies.iter().map(|e| e.xp_value).sum();
            for level in character.gain_xp(xp) {
                events.push(CombatEvent::LevelUp { level });
            }
        }
        events.push(CombatEvent::Resolved { outcome });
        debug!(
            encounter = %self.id,
            ?outcome,
            turns = self.turns_elapsed,
            resources = self.resources_spent,
            "encounter resolved"
        );
    }
}
