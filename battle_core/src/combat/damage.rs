//! Damage formula - base roll, bonuses, multipliers, crit, defense
//!
//! Pipeline: roll base damage, add the physical-only weight/size/dive
//! terms, scale by type effectiveness, mastery, and the environment's
//! damage penalty, apply the crit multiplier, then subtract the matching
//! defense. The result never goes below zero.

use crate::ability::Ability;
use crate::combatant::Combatant;
use crate::effectiveness::{effectiveness, mastery_bonus, Effectiveness};
use crate::status::ids;
use crate::types::{attr_modifier, ActionCategory, Side};
use rand::Rng;

/// Multiplier on a physical attack delivered from the air
pub const DIVE_MULTIPLIER: f64 = 1.6;

/// Base crit chance in percentage points
pub const BASE_CRIT_CHANCE: i32 = 5;

/// Crit chance cap for the human-controlled side
pub const PLAYER_CRIT_CAP: i32 = 100;

/// Crit chance cap for the automated side
pub const ENEMY_CRIT_CAP: i32 = 50;

/// Outcome of one damage calculation
#[derive(Debug, Clone, Copy)]
pub struct DamageRoll {
    /// Final damage after every multiplier and defense, floored at 0
    pub amount: i32,
    pub crit: bool,
    pub effectiveness: Effectiveness,
    /// The attacker attacked from the air (physical only)
    pub dive: bool,
}

/// Weight bonus for physical abilities that flag `uses_weight`
pub fn weight_bonus(weight_kg: f64) -> i32 {
    ((weight_kg / 15.0).floor() as i32).max(1)
}

/// Size-difference bonus: 5 points per ordinal step in the attacker's favour
pub fn size_bonus(attacker: &Combatant, defender: &Combatant) -> i32 {
    (attacker.size_category().ordinal() - defender.size_category().ordinal()) * 5
}

/// Critical hit chance in percentage points
///
/// Asymmetric by design: the human side scales dexterity through the
/// attribute modifier with a cap of 100; the automated side adds raw
/// dexterity with a cap of 50.
pub fn crit_chance(side: Side, dexterity: i32, ability: &Ability) -> i32 {
    let ability_bonus = (ability.crit_chance_bonus * 100.0).floor() as i32;
    match side {
        Side::Player => {
            let dex_bonus = attr_modifier(dexterity).max(0);
            (BASE_CRIT_CHANCE + dex_bonus + ability_bonus).clamp(0, PLAYER_CRIT_CAP)
        }
        Side::Enemy => {
            (BASE_CRIT_CHANCE + dexterity + ability_bonus).clamp(0, ENEMY_CRIT_CAP)
        }
    }
}

/// Calculate damage for a committed, accuracy-checked hit
///
/// `env_damage_penalty` is the environment's damage penalty for the
/// *attacker's* element (0.0 without an environment).
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    ability: &Ability,
    side: Side,
    env_damage_penalty: f64,
    rng: &mut impl Rng,
) -> DamageRoll {
    let mut raw = ability.roll_damage(rng) as f64;
    let mut dive = false;

    if ability.category == ActionCategory::Physical {
        if ability.uses_weight {
            raw += weight_bonus(attacker.weight_kg) as f64;
        }
        raw += size_bonus(attacker, defender) as f64;
        if attacker.has_status(ids::FLIGHT) {
            raw *= DIVE_MULTIPLIER;
            dive = true;
        }
    }

    let eff = effectiveness(attacker.element, defender.element);
    let mastery = mastery_bonus(attacker.element, ability.element);
    let mut amount =
        (raw * eff.multiplier() * mastery * (1.0 - env_damage_penalty)).floor() as i32;

    let mut crit = false;
    if ability.is_damaging() && amount > 0 {
        let chance = crit_chance(side, attacker.dexterity, ability);
        if rng.gen_range(1..=100) <= chance {
            amount = (amount as f64 * ability.crit_multiplier).floor() as i32;
            crit = true;
        }
    }

    let defense = if ability.breaks_defense {
        0
    } else {
        match ability.category {
            ActionCategory::Physical => defender.physical_defense(),
            ActionCategory::Magic => defender.magic_defense(),
            _ => 0,
        }
    };

    DamageRoll {
        amount: (amount - defense).max(0),
        crit,
        effectiveness: eff,
        dive,
    }
}


#[cfg(test)]
mod props {
    use super::*;
    use crate::types::Element;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn element(index: u8) -> Element {
        match index % 5 {
            0 => Element::Fire,
            1 => Element::Water,
            2 => Element::Earth,
            3 => Element::Air,
            _ => Element::Neutral,
        }
    }

    proptest! {
        #[test]
        fn damage_is_never_negative(
            seed in any::<u64>(),
            min in 0i32..30,
            span in 0i32..20,
            con in 0i32..60,
            a_elem in 0u8..5,
            d_elem in 0u8..5,
            a_height in 10.0f64..5000.0,
            d_height in 10.0f64..5000.0,
            weight in 1.0f64..1000.0,
            env_penalty in 0.0f64..1.0,
            uses_weight in any::<bool>(),
        ) {
            let a = Combatant::new("a", "A", 100, 50, [10, 10, 10, 10, 10, 10])
                .with_physique(a_height, weight)
                .with_element(element(a_elem));
            // Extreme constitution makes defense dwarf the roll
            let mut d = Combatant::new("d", "D", 100, 50, [10, 10, con, 10, 10, 10])
                .with_physique(d_height, weight)
                .with_element(element(d_elem));
            d.recompute_derived();

            let mut ability: Ability = toml::from_str(&format!(
                "id = \"strike\"\nname = \"Strike\"\ncategory = \"physical\"\ndamage_min = {min}\ndamage_max = {}",
                min + span
            ))
            .unwrap();
            ability.uses_weight = uses_weight;

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let roll = calculate_damage(&a, &d, &ability, Side::Player, env_penalty, &mut rng);
            prop_assert!(roll.amount >= 0);
        }
    }
}
