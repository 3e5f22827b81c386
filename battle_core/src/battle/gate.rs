//! Ability legality gate - pure predicate plus paired bookkeeping mutator
//!
//! `can_use` never mutates anything, so callers can preview legality (for
//! disabling controls) without committing. `mark_used` applies the
//! bookkeeping exactly once per committed action.

use super::state::BattleState;
use crate::ability::Ability;
use crate::combatant::Combatant;
use crate::types::Side;

/// Pure legality predicate, checked in order: mana, self status, target
/// status, cooldown, remaining uses, combo prerequisite
pub fn can_use(
    actor: &Combatant,
    target: &Combatant,
    ability: &Ability,
    state: &BattleState,
    side: Side,
) -> bool {
    if actor.current_mana < ability.mana_cost {
        return false;
    }
    if let Some(required) = &ability.requires_self_status {
        if !actor.has_status(required) {
            return false;
        }
    }
    if let Some(forbidden) = &ability.forbids_self_status {
        if actor.has_status(forbidden) {
            return false;
        }
    }
    if let Some(required) = &ability.requires_target_status {
        if !target.has_status(required) {
            return false;
        }
    }
    if state.cooldown(&ability.id) > 0 {
        return false;
    }
    if ability.max_uses.is_some() {
        if state.uses_left(&ability.id).unwrap_or(0) == 0 {
            return false;
        }
    }
    if !ability.combo_follows.is_empty() {
        match state.last_used(side) {
            Some(last) => {
                if !ability.combo_follows.iter().any(|id| id == last) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Commit the bookkeeping side effects of a use
///
/// Sets the cooldown, decrements remaining uses, and records the side's
/// combo memory. Mana is spent by the turn manager alongside this call.
pub fn mark_used(ability: &Ability, state: &mut BattleState, side: Side) {
    state.set_cooldown(&ability.id, ability.cooldown);
    if ability.max_uses.is_some() {
        state.consume_use(&ability.id);
    }
    state.set_last_used(side, &ability.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::KnownAbility;
    use crate::content::default_content;
    use crate::status::ActiveStatus;

    fn setup() -> (Combatant, Combatant, BattleState) {
        let content = default_content();
        let player = Combatant::new("p", "P", 100, 50, [10; 6])
            .with_ability(KnownAbility::new("quick_attack"))
            .with_ability(KnownAbility::new("heavy_slash"))
            .with_ability(KnownAbility::new("crushing_blow"))
            .with_ability(KnownAbility::new("take_flight"))
            .with_ability(KnownAbility::new("dive_strike"));
        let enemy = Combatant::new("e", "E", 100, 50, [10; 6]);
        let state = BattleState::new(&player, &enemy, &content.abilities);
        (player, enemy, state)
    }

    fn ability(id: &str) -> Ability {
        default_content().abilities.get(id).unwrap().clone()
    }

    #[test]
    fn test_mana_gate() {
        let (mut player, enemy, state) = setup();
        let crushing = ability("crushing_blow");
        assert!(can_use(&player, &enemy, &crushing, &state, Side::Player));
        player.current_mana = 5;
        assert!(!can_use(&player, &enemy, &crushing, &state, Side::Player));
    }

    #[test]
    fn test_predicate_is_pure() {
        let (player, enemy, state) = setup();
        let quick = ability("quick_attack");
        let first = can_use(&player, &enemy, &quick, &state, Side::Player);
        let second = can_use(&player, &enemy, &quick, &state, Side::Player);
        assert_eq!(first, second);
        assert_eq!(state.cooldown("quick_attack"), 0);
    }

    #[test]
    fn test_cooldown_gate() {
        let (player, enemy, mut state) = setup();
        let dive = ability("dive_strike");
        let mut flier = player.clone();
        flier.statuses.push(ActiveStatus::permanent("flight"));

        assert!(can_use(&flier, &enemy, &dive, &state, Side::Player));
        mark_used(&dive, &mut state, Side::Player);
        assert!(!can_use(&flier, &enemy, &dive, &state, Side::Player));
        state.tick_cooldowns();
        state.tick_cooldowns();
        assert!(can_use(&flier, &enemy, &dive, &state, Side::Player));
    }

    #[test]
    fn test_uses_cap_gate() {
        let (player, enemy, mut state) = setup();
        let crushing = ability("crushing_blow");
        mark_used(&crushing, &mut state, Side::Player);
        state.tick_cooldowns();
        state.tick_cooldowns();
        state.tick_cooldowns();
        assert_eq!(state.uses_left("crushing_blow"), Some(1));
        mark_used(&crushing, &mut state, Side::Player);
        state.tick_cooldowns();
        state.tick_cooldowns();
        state.tick_cooldowns();
        assert_eq!(state.uses_left("crushing_blow"), Some(0));
        assert!(!can_use(&player, &enemy, &crushing, &state, Side::Player));
    }

    #[test]
    fn test_combo_gate() {
        let (player, enemy, mut state) = setup();
        let heavy = ability("heavy_slash");

        // Illegal at battle start: no prior action
        assert!(!can_use(&player, &enemy, &heavy, &state, Side::Player));

        // Legal immediately after quick_attack
        mark_used(&ability("quick_attack"), &mut state, Side::Player);
        assert!(can_use(&player, &enemy, &heavy, &state, Side::Player));

        // An unrelated ability breaks the chain
        mark_used(&ability("take_flight"), &mut state, Side::Player);
        assert!(!can_use(&player, &enemy, &heavy, &state, Side::Player));
    }

    #[test]
    fn test_combo_memory_is_per_side() {
        let (player, enemy, mut state) = setup();
        let heavy = ability("heavy_slash");
        // The enemy's quick_attack does not open the player's combo
        mark_used(&ability("quick_attack"), &mut state, Side::Enemy);
        assert!(!can_use(&player, &enemy, &heavy, &state, Side::Player));
    }

    #[test]
    fn test_status_prerequisites() {
        let (mut player, enemy, state) = setup();
        let dive = ability("dive_strike");
        let takeoff = ability("take_flight");

        assert!(!can_use(&player, &enemy, &dive, &state, Side::Player));
        assert!(can_use(&player, &enemy, &takeoff, &state, Side::Player));

        player.statuses.push(ActiveStatus::permanent("flight"));
        assert!(can_use(&player, &enemy, &dive, &state, Side::Player));
        // Already airborne: takeoff is forbidden
        assert!(!can_use(&player, &enemy, &takeoff, &state, Side::Player));
    }

    #[test]
    fn test_mark_used_applies_once_per_call() {
        let (_, _, mut state) = setup();
        let crushing = ability("crushing_blow");
        mark_used(&crushing, &mut state, Side::Player);
        assert_eq!(state.cooldown("crushing_blow"), 3);
        assert_eq!(state.uses_left("crushing_blow"), Some(1));
        mark_used(&crushing, &mut state, Side::Player);
        assert_eq!(state.uses_left("crushing_blow"), Some(0));
    }
}
