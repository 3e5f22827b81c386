//! Enemy action selection - rarity-weighted random choice
//!
//! Candidates are first narrowed to abilities whose status prerequisites
//! hold (falling back to the full known set if none qualify), then to
//! those the legality gate allows, and finally drawn from a flat pool
//! where each id appears once per point of rarity weight.

use super::gate::can_use;
use super::state::BattleState;
use crate::ability::Ability;
use crate::combatant::Combatant;
use crate::content::Registry;
use crate::types::Side;
use rand::Rng;

/// Pick the automated side's next ability id, or None when nothing is legal
pub fn select_action_with_rng(
    enemy: &Combatant,
    player: &Combatant,
    state: &BattleState,
    abilities: &Registry<Ability>,
    rng: &mut impl Rng,
) -> Option<String> {
    let known: Vec<_> = enemy
        .abilities
        .iter()
        .filter_map(|k| abilities.get(&k.id).map(|a| (k, a)))
        .collect();

    let prereqs_hold = |ability: &Ability| -> bool {
        if let Some(required) = &ability.requires_self_status {
            if !enemy.has_status(required) {
                return false;
            }
        }
        if let Some(forbidden) = &ability.forbids_self_status {
            if enemy.has_status(forbidden) {
                return false;
            }
        }
        if let Some(required) = &ability.requires_target_status {
            if !player.has_status(required) {
                return false;
            }
        }
        true
    };

    let filtered: Vec<_> = known
        .iter()
        .filter(|(_, a)| prereqs_hold(a))
        .copied()
        .collect();
    let candidates = if filtered.is_empty() { known } else { filtered };

    // Flat pool: each legal id duplicated `weight` times
    let mut pool: Vec<&str> = Vec::new();
    for (known_ability, ability) in &candidates {
        if !can_use(enemy, player, ability, state, Side::Enemy) {
            continue;
        }
        for _ in 0..known_ability.rarity.weight() {
            pool.push(known_ability.id.as_str());
        }
    }

    if pool.is_empty() {
        return None;
    }
    let pick = rng.gen_range(0..pool.len());
    Some(pool[pick].to_string())
}
