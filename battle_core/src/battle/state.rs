//! BattleState - ephemeral per-battle bookkeeping
//!
//! Cooldowns, remaining uses, combo memory, and turn tracking. Created at
//! battle start from the known ability sets of both sides, mutated every
//! action, discarded at battle end. Never persisted.

use crate::ability::Ability;
use crate::combatant::Combatant;
use crate::content::Registry;
use crate::types::Side;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct BattleState {
    /// Remaining cooldown per ability id
    cooldowns: HashMap<String, u32>,
    /// Remaining uses per ability id (capped abilities only)
    uses_left: HashMap<String, u32>,
    /// Last ability id used by each side, for combo gating
    last_used_player: Option<String>,
    last_used_enemy: Option<String>,
    /// Turn counter, incremented on every side slot
    pub turn: u32,
    /// Whose slot is next
    pub side_to_act: Side,
}

impl BattleState {
    /// Build fresh bookkeeping from both sides' known abilities
    pub fn new(player: &Combatant, enemy: &Combatant, abilities: &Registry<Ability>) -> Self {
        let mut uses_left = HashMap::new();
        for known in player.abilities.iter().chain(enemy.abilities.iter()) {
            if let Some(cap) = abilities.get(&known.id).and_then(|a| a.max_uses) {
                uses_left.insert(known.id.clone(), cap);
            }
        }
        BattleState {
            cooldowns: HashMap::new(),
            uses_left,
            last_used_player: None,
            last_used_enemy: None,
            turn: 0,
            side_to_act: Side::Player,
        }
    }

    /// Remaining cooldown for an ability (0 = ready)
    pub fn cooldown(&self, ability_id: &str) -> u32 {
        self.cooldowns.get(ability_id).copied().unwrap_or(0)
    }

    pub fn set_cooldown(&mut self, ability_id: &str, turns: u32) {
        if turns > 0 {
            self.cooldowns.insert(ability_id.to_string(), turns);
        }
    }

    /// Remaining uses for a capped ability (None = uncapped)
    pub fn uses_left(&self, ability_id: &str) -> Option<u32> {
        self.uses_left.get(ability_id).copied()
    }

    pub fn consume_use(&mut self, ability_id: &str) {
        if let Some(remaining) = self.uses_left.get_mut(ability_id) {
            *remaining = remaining.saturating_sub(1);
        }
    }

    /// Decrement every cooldown by one, flooring at zero
    pub fn tick_cooldowns(&mut self) {
        for remaining in self.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0);
    }

    /// A side's last-used ability id (combo memory)
    pub fn last_used(&self, side: Side) -> Option<&str> {
        match side {
            Side::Player => self.last_used_player.as_deref(),
            Side::Enemy => self.last_used_enemy.as_deref(),
        }
    }

    pub fn set_last_used(&mut self, side: Side, ability_id: &str) {
        let slot = match side {
            Side::Player => &mut self.last_used_player,
            Side::Enemy => &mut self.last_used_enemy,
        };
        *slot = Some(ability_id.to_string());
    }

    /// Incapacitation clears combo memory for the side
    pub fn clear_last_used(&mut self, side: Side) {
        match side {
            Side::Player => self.last_used_player = None,
            Side::Enemy => self.last_used_enemy = None,
        }
    }

    pub fn switch_side(&mut self) {
        self.side_to_act = self.side_to_act.opponent();
    }
}
