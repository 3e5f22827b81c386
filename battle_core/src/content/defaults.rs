//! Compiled-in default content

use super::{parse_content, ContentSet};
use crate::ability::Ability;
use crate::status::StatusDefinition;

/// Get the default content set
///
/// Loads the compiled-in content file; falls back to a bare-minimum set
/// if the file ever fails to parse.
pub fn default_content() -> ContentSet {
    let toml = include_str!("../../config/content.toml");
    parse_content(toml).unwrap_or_else(|_| {
        let mut set = ContentSet::empty();
        let basic: Ability = Ability {
            id: "basic_attack".to_string(),
            name: "Basic Attack".to_string(),
            category: crate::types::ActionCategory::Physical,
            damage_min: 3,
            damage_max: 6,
            heal_amount: 0,
            accuracy: 95,
            element: crate::types::Element::Neutral,
            mana_cost: 0,
            cooldown: 0,
            max_uses: None,
            combo_follows: Vec::new(),
            requires_self_status: None,
            forbids_self_status: None,
            requires_target_status: None,
            status_payload: None,
            crit_chance_bonus: 0.0,
            crit_multiplier: 2.0,
            life_steal: 0.0,
            breaks_defense: false,
            uses_weight: false,
            is_ranged: false,
        };
        set.abilities.insert(basic.id.clone(), basic);
        set.statuses.insert(StatusDefinition {
            id: "stun".to_string(),
            name: "Stunned".to_string(),
            tick_damage: 0,
            accuracy_mult: 1.0,
            incapacitates: true,
            attribute_delta: None,
        });
        set
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ids;

    #[test]
    fn test_default_content_loads() {
        let set = default_content();
        for id in [
            "quick_attack",
            "heavy_slash",
            "fireball",
            "venom_fang",
            "grapple",
            "take_flight",
            "dive_strike",
            "mend",
            "war_cry",
            "crushing_blow",
            "drain_touch",
            "stunning_roar",
        ] {
            assert!(set.abilities.contains(id), "missing ability {id}");
        }
        for id in [ids::FLIGHT, ids::RESTRAINED, ids::STUN, "poison", "burn"] {
            assert!(set.statuses.get(id).is_some(), "missing status {id}");
        }
        for id in ["volcano", "storm_peak", "swamp"] {
            assert!(set.environments.contains(id), "missing environment {id}");
        }
    }

    #[test]
    fn test_default_combo_and_caps() {
        let set = default_content();
        let heavy = set.abilities.get("heavy_slash").unwrap();
        assert_eq!(heavy.combo_follows, vec!["quick_attack".to_string()]);
        let crushing = set.abilities.get("crushing_blow").unwrap();
        assert_eq!(crushing.max_uses, Some(2));
        assert!(crushing.breaks_defense);
    }
}
