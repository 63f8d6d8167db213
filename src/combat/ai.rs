//! Enemy turn selection: one strategy per behavior tag.
//!
//! The tag set is closed and dispatched by match. Bosses run an
//! HP-threshold phase script layered on the same move vocabulary.

use rand::Rng;

use crate::enemies::{BehaviorTag, EnemyInstance};

/// The move an enemy resolved to this turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyMove {
    /// Attack the character at the given multiplier of base attack.
    Strike { multiplier: f64 },
    /// Halve incoming damage until this enemy's next turn.
    Defend,
    /// Restore an ally (by index) for attack * 1.2.
    HealAlly { target: usize },
}

/// Boss phases by remaining HP fraction: 0 above 2/3, 1 above 1/3, 2 below.
pub fn boss_phase(hp_fraction: f64) -> u8 {
    if hp_fraction > 2.0 / 3.0 {
        0
    } else if hp_fraction > 1.0 / 3.0 {
        1
    } else {
        2
    }
}

/// Picks the acting enemy's move. `round` drives scripted patterns so boss
/// behavior stays reproducible under a fixed seed.
pub fn choose_move(
    actor: usize,
    enemies: &[EnemyInstance],
    round: u32,
    _rng: &mut impl Rng,
) -> EnemyMove {
    let me = &enemies[actor];
    match me.behavior {
        BehaviorTag::Aggressive => EnemyMove::Strike { multiplier: 1.2 },
        BehaviorTag::Defensive => {
            if me.hp_fraction() < 0.5 && !me.defending {
                EnemyMove::Defend
            } else {
                EnemyMove::Strike { multiplier: 1.0 }
            }
        }
        BehaviorTag::Caster => EnemyMove::Strike { multiplier: 1.35 },
        BehaviorTag::Supportive => match most_wounded_ally(actor, enemies) {
            Some(target) => EnemyMove::HealAlly { target },
            None => EnemyMove::Strike { multiplier: 1.0 },
        },
        BehaviorTag::BossScripted => match me.phase {
            0 => EnemyMove::Strike { multiplier: 1.0 },
            1 => {
                // Guarded phase: alternate a heavy swing with a defensive turn
                if round % 2 == 0 {
                    EnemyMove::Defend
                } else {
                    EnemyMove::Strike { multiplier: 1.3 }
                }
            }
            _ => EnemyMove::Strike { multiplier: 1.6 },
        },
    }
}

/// The living ally below 60% HP with the lowest HP fraction, self excluded.
fn most_wounded_ally(actor: usize, enemies: &[EnemyInstance]) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(i, e)| *i != actor && e.is_alive() && e.hp_fraction() < 0.6)
        .min_by(|(_, a), (_, b)| a.hp_fraction().total_cmp(&b.hp_fraction()))
        .map(|(i, _)| i)
}
