//! Environment bundle resolution
//!
//! Resolution order for one combatant:
//! 1. hard immunity (declared immune element, or an interaction whose
//!    damage multiplier is exactly 0) short-circuits to a zero bundle;
//! 2. the intensity-bucketed row supplies base damage, penalties, and
//!    the status trigger;
//! 3. the combatant's interaction entry applies on top, additive for
//!    accuracy/speed/damage penalties and multiplicative for damage;
//! 4. each special mechanic rolls independently per call.

use super::descriptor::EnvironmentDescriptor;
use crate::combatant::Combatant;
use rand::Rng;

/// Deterministic per-combatant modifiers (no probability rolls)
///
/// Consulted by the accuracy and damage formulas every action.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentModifiers {
    pub accuracy_penalty: f64,
    pub speed_penalty: f64,
    pub damage_penalty: f64,
    pub life_regen: i32,
    pub has_immunity: bool,
}

/// Full per-tick effect bundle, probability rolls included
#[derive(Debug, Clone, Default)]
pub struct EnvironmentBundle {
    pub damage: i32,
    pub status_id: Option<String>,
    pub status_duration: u32,
    pub accuracy_penalty: f64,
    pub speed_penalty: f64,
    pub damage_penalty: f64,
    pub special_damage: i32,
    pub special_messages: Vec<String>,
    pub has_immunity: bool,
}

/// An environment bound to its battle intensity
#[derive(Debug, Clone)]
pub struct EnvironmentContext {
    pub descriptor: EnvironmentDescriptor,
    pub intensity: u32,
}

impl EnvironmentContext {
    pub fn new(descriptor: EnvironmentDescriptor, intensity: u32) -> Self {
        EnvironmentContext {
            descriptor,
            intensity: intensity.clamp(1, 10),
        }
    }

    fn is_immune(&self, combatant: &Combatant) -> bool {
        if self.descriptor.immune_element == Some(combatant.element) {
            return true;
        }
        self.descriptor
            .interaction_for(combatant.element)
            .map(|i| i.damage_mult == 0.0)
            .unwrap_or(false)
    }

    /// Deterministic modifiers for a combatant (steps 1-3, no rolls)
    ///
    /// Immunity zeroes damage and penalties but keeps the interaction's
    /// life regen; a native of the arena loses the hazard, not the benefit.
    pub fn modifiers_for(&self, combatant: &Combatant) -> EnvironmentModifiers {
        if self.is_immune(combatant) {
            return EnvironmentModifiers {
                has_immunity: true,
                life_regen: self
                    .descriptor
                    .interaction_for(combatant.element)
                    .map(|i| i.life_regen)
                    .unwrap_or(0),
                ..EnvironmentModifiers::default()
            };
        }

        let mut modifiers = EnvironmentModifiers::default();
        if let Some(row) = self.descriptor.row_for(self.intensity) {
            modifiers.accuracy_penalty = row.accuracy_penalty;
            modifiers.speed_penalty = row.speed_penalty;
            modifiers.damage_penalty = row.damage_penalty;
        }
        if let Some(interaction) = self.descriptor.interaction_for(combatant.element) {
            modifiers.accuracy_penalty =
                (modifiers.accuracy_penalty - interaction.accuracy_bonus).max(0.0);
            modifiers.speed_penalty = (modifiers.speed_penalty - interaction.speed_bonus).max(0.0);
            modifiers.damage_penalty =
                (modifiers.damage_penalty - interaction.damage_bonus).max(0.0);
            modifiers.life_regen = interaction.life_regen;
        }
        modifiers
    }

    /// Resolve the full per-tick bundle for a combatant
    ///
    /// Every probability here rolls independently per call: the status
    /// trigger and each special mechanic are uncorrelated.
    pub fn resolve_with_rng(&self, combatant: &Combatant, rng: &mut impl Rng) -> EnvironmentBundle {
        if self.is_immune(combatant) {
            return EnvironmentBundle {
                has_immunity: true,
                ..EnvironmentBundle::default()
            };
        }

        let modifiers = self.modifiers_for(combatant);
        let mut bundle = EnvironmentBundle {
            accuracy_penalty: modifiers.accuracy_penalty,
            speed_penalty: modifiers.speed_penalty,
            damage_penalty: modifiers.damage_penalty,
            ..EnvironmentBundle::default()
        };

        let Some(row) = self.descriptor.row_for(self.intensity) else {
            return bundle;
        };

        let damage_mult = self
            .descriptor
            .interaction_for(combatant.element)
            .map(|i| i.damage_mult)
            .unwrap_or(1.0);
        bundle.damage = (row.damage as f64 * damage_mult).floor() as i32;

        if let Some(status_id) = &row.status_id {
            if row.status_chance > 0.0 && rng.gen::<f64>() < row.status_chance {
                bundle.status_id = Some(status_id.clone());
                bundle.status_duration = row.status_duration;
            }
        }

        for special in &row.specials {
            if rng.gen::<f64>() < special.chance {
                bundle.special_damage += special.damage;
                bundle.special_messages.push(special.message.clone());
            }
        }

        bundle
    }
}
