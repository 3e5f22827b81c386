//! Accuracy - chance to hit, clamped to [30, 100]
//!
//! `final = clamp(30, 100, (base + speed_delta*2 + size + agility terms)
//!                          * status_mult * (1 - env_accuracy_penalty))`
//!
//! The defender's size offsets the attacker's chance to hit; weight
//! buckets contribute a symmetric agility term, added for the attacker
//! and subtracted for the defender. The environment slows both sides
//! through its fractional speed penalty before the speed delta is taken.

use crate::ability::Ability;
use crate::combatant::Combatant;
use crate::environment::EnvironmentModifiers;
use rand::Rng;

pub const MIN_ACCURACY: i32 = 30;
pub const MAX_ACCURACY: i32 = 100;

/// Speed after the environment's fractional penalty, floored
pub fn effective_speed(combatant: &Combatant, speed_penalty: f64) -> i32 {
    (combatant.speed() as f64 * (1.0 - speed_penalty)).floor() as i32
}

/// Compute the final chance to hit in percentage points
///
/// `status_accuracy_mult` is the product of the attacker's active status
/// multipliers. The environment modifiers are per-side (defaults when
/// there is no environment): the attacker's accuracy penalty scales the
/// whole chance, and each side's speed penalty slows its speed term.
pub fn final_accuracy(
    attacker: &Combatant,
    defender: &Combatant,
    ability: &Ability,
    status_accuracy_mult: f64,
    attacker_env: EnvironmentModifiers,
    defender_env: EnvironmentModifiers,
) -> i32 {
    let attacker_speed = effective_speed(attacker, attacker_env.speed_penalty);
    let defender_speed = effective_speed(defender, defender_env.speed_penalty);
    let speed_term = (attacker_speed - defender_speed) * 2;
    let size_term = defender.size_category().hit_offset();
    let attacker_agility = attacker.weight_category().agility_offset();
    let defender_agility = -defender.weight_category().agility_offset();

    let raw = (ability.accuracy + speed_term + size_term + attacker_agility + defender_agility)
        as f64;
    let scaled = raw * status_accuracy_mult * (1.0 - attacker_env.accuracy_penalty);

    (scaled.floor() as i32).clamp(MIN_ACCURACY, MAX_ACCURACY)
}

/// Roll 1-100; hits iff the roll is at or under the final accuracy
pub fn roll_hit(final_accuracy: i32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=100) <= final_accuracy
}
