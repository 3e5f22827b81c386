//! Type effectiveness table and same-type mastery bonus
//!
//! The elemental cycle Fire -> Earth -> Air -> Water -> Fire is
//! super-effective; the reverse of each arrow is resisted. Same-type
//! matchups resolve to the resisted value. Neutral (untyped) is 1.0
//! in both directions, as is any pairing outside the cycle.

use crate::types::Element;
use serde::{Deserialize, Serialize};

/// Outcome of an attacker-element vs defender-element lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Immune,
    Resisted,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    /// Damage multiplier for this outcome
    pub fn multiplier(&self) -> f64 {
        match self {
            Effectiveness::Immune => 0.0,
            Effectiveness::Resisted => 0.7,
            Effectiveness::Neutral => 1.0,
            Effectiveness::SuperEffective => 1.5,
        }
    }

    /// Flavor suffix for hit messages
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Effectiveness::Immune => Some("it has no effect"),
            Effectiveness::Resisted => Some("it's not very effective"),
            Effectiveness::Neutral => None,
            Effectiveness::SuperEffective => Some("it's super effective"),
        }
    }
}

/// Multiplier applied when the attacker's own element matches the ability's
pub const MASTERY_BONUS: f64 = 1.2;

/// Look up attacker-element vs defender-element effectiveness
pub fn effectiveness(attacker: Element, defender: Element) -> Effectiveness {
    use Element::*;
    match (attacker, defender) {
        (Neutral, _) | (_, Neutral) => Effectiveness::Neutral,
        (a, d) if a == d => Effectiveness::Resisted,
        (Fire, Earth) | (Earth, Air) | (Air, Water) | (Water, Fire) => {
            Effectiveness::SuperEffective
        }
        (Earth, Fire) | (Air, Earth) | (Water, Air) | (Fire, Water) => Effectiveness::Resisted,
        _ => Effectiveness::Neutral,
    }
}

/// Same-type mastery: >1.0 when the attacker's element matches the ability's
pub fn mastery_bonus(attacker_element: Element, ability_element: Element) -> f64 {
    if attacker_element != Element::Neutral && attacker_element == ability_element {
        MASTERY_BONUS
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element::*;

    #[test]
    fn test_fire_row() {
        assert!((effectiveness(Fire, Water).multiplier() - 0.7).abs() < f64::EPSILON);
        assert!((effectiveness(Fire, Earth).multiplier() - 1.5).abs() < f64::EPSILON);
        assert!((effectiveness(Fire, Air).multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((effectiveness(Fire, Fire).multiplier() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_is_super_effective() {
        assert_eq!(effectiveness(Earth, Air), Effectiveness::SuperEffective);
        assert_eq!(effectiveness(Air, Water), Effectiveness::SuperEffective);
        assert_eq!(effectiveness(Water, Fire), Effectiveness::SuperEffective);
    }

    #[test]
    fn test_unknown_type_is_neutral_both_ways() {
        for other in [Fire, Water, Earth, Air, Neutral] {
            assert_eq!(effectiveness(Neutral, other), Effectiveness::Neutral);
            assert_eq!(effectiveness(other, Neutral), Effectiveness::Neutral);
        }
    }

    #[test]
    fn test_mastery_bonus() {
        assert!((mastery_bonus(Fire, Fire) - MASTERY_BONUS).abs() < f64::EPSILON);
        assert!((mastery_bonus(Fire, Water) - 1.0).abs() < f64::EPSILON);
        // Untyped attackers get no mastery
        assert!((mastery_bonus(Neutral, Neutral) - 1.0).abs() < f64::EPSILON);
    }
}
