//! StatusRegistry - apply, tick, and summarize status effects

use super::{ActiveStatus, StatusDefinition};
use crate::combatant::Combatant;
use std::collections::HashMap;
use tracing::warn;

/// Lookup of status definitions for one battle session
///
/// Injected into the engine at battle start. Unknown status ids degrade
/// to no-ops with a logged warning; they never abort a battle.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    definitions: HashMap<String, StatusDefinition>,
}

/// One status that dealt damage or expired during a round tick
#[derive(Debug, Clone)]
pub struct TickedStatus {
    pub status_id: String,
    pub damage: i32,
    pub expired: bool,
}

/// Everything that happened to one combatant during a round tick
#[derive(Debug, Clone, Default)]
pub struct StatusTickReport {
    pub ticked: Vec<TickedStatus>,
    pub total_damage: i32,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a status definition, replacing any previous one with the same id
    pub fn insert(&mut self, definition: StatusDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    /// Look up a definition; warns once per call on unknown ids
    pub fn get(&self, status_id: &str) -> Option<&StatusDefinition> {
        let def = self.definitions.get(status_id);
        if def.is_none() {
            warn!(status_id, "unknown status id, treating as inert");
        }
        def
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Grant a status or refresh an existing instance
    ///
    /// Re-application refreshes duration only; the payload magnitude never
    /// stacks. Returns false when the status id is unknown.
    pub fn apply(
        &self,
        target: &mut Combatant,
        status_id: &str,
        duration: u32,
        permanent: bool,
    ) -> bool {
        let Some(definition) = self.get(status_id) else {
            return false;
        };

        if let Some(existing) = target.status_mut(status_id) {
            existing.refresh(duration, permanent);
            return true;
        }

        let mut instance = if permanent {
            ActiveStatus::permanent(status_id)
        } else {
            ActiveStatus::timed(status_id, duration)
        };
        if let Some(delta) = definition.attribute_delta {
            target.shift_attribute(delta.attribute, delta.amount);
            instance.applied_delta = Some(delta);
        }
        target.statuses.push(instance);
        true
    }

    /// Existence predicate for a status on a combatant
    pub fn is_active(&self, target: &Combatant, status_id: &str) -> bool {
        target.has_status(status_id)
    }

    /// Remove a status, reversing its payload; returns whether it was present
    pub fn clear(&self, target: &mut Combatant, status_id: &str) -> bool {
        let Some(index) = target
            .statuses
            .iter()
            .position(|s| s.status_id == status_id)
        else {
            return false;
        };
        let removed = target.statuses.remove(index);
        if let Some(delta) = removed.applied_delta {
            target.shift_attribute(delta.attribute, -delta.amount);
        }
        true
    }

    /// Remove every status, reversing payloads (battle end)
    pub fn clear_all(&self, target: &mut Combatant) {
        let removed = std::mem::take(&mut target.statuses);
        for status in removed {
            if let Some(delta) = status.applied_delta {
                target.shift_attribute(delta.attribute, -delta.amount);
            }
        }
    }

    /// Run one round tick: damage-over-time, countdown, and expiry reversal
    ///
    /// Expired buffs reverse their originally-applied delta exactly, so a
    /// fully-expired buff leaves the attribute at its pre-buff value.
    pub fn tick_all(&self, target: &mut Combatant) -> StatusTickReport {
        let mut report = StatusTickReport::default();

        let mut statuses = std::mem::take(&mut target.statuses);
        for status in statuses.iter_mut() {
            let tick_damage = self
                .definitions
                .get(&status.status_id)
                .map(|d| d.tick_damage)
                .unwrap_or(0);
            if tick_damage > 0 {
                target.apply_damage(tick_damage);
                report.total_damage += tick_damage;
            }
            status.tick_down();
            let expired = status.is_expired();
            if expired {
                if let Some(delta) = status.applied_delta {
                    target.shift_attribute(delta.attribute, -delta.amount);
                }
            }
            if tick_damage > 0 || expired {
                report.ticked.push(TickedStatus {
                    status_id: status.status_id.clone(),
                    damage: tick_damage,
                    expired,
                });
            }
        }
        statuses.retain(|s| !s.is_expired());
        target.statuses = statuses;

        report
    }

    /// Product of accuracy multipliers over the holder's active statuses
    pub fn accuracy_multiplier(&self, target: &Combatant) -> f64 {
        target
            .statuses
            .iter()
            .filter_map(|s| self.definitions.get(&s.status_id))
            .map(|d| d.accuracy_mult)
            .product()
    }

    /// Whether any active status forfeits the holder's action
    pub fn incapacitated(&self, target: &Combatant) -> bool {
        target
            .statuses
            .iter()
            .filter_map(|s| self.definitions.get(&s.status_id))
            .any(|d| d.incapacitates)
    }

    /// Human-readable aggregate of active statuses for display
    pub fn summary(&self, target: &Combatant) -> String {
        let parts: Vec<String> = target
            .statuses
            .iter()
            .map(|s| {
                let name = self
                    .definitions
                    .get(&s.status_id)
                    .map(|d| d.name.as_str())
                    .unwrap_or(s.status_id.as_str());
                match (s.permanent, s.remaining) {
                    (true, _) => format!("{name} (permanent)"),
                    (false, Some(r)) => format!("{name} ({r} turns)"),
                    (false, None) => name.to_string(),
                }
            })
            .collect();
        if parts.is_empty() {
            "No active effects".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{AttributeDelta, StatusDefinition};
    use crate::types::Attribute;

    fn registry() -> StatusRegistry {
        let mut reg = StatusRegistry::new();
        reg.insert(StatusDefinition {
            id: "poison".to_string(),
            name: "Poisoned".to_string(),
            tick_damage: 3,
            accuracy_mult: 1.0,
            incapacitates: false,
            attribute_delta: None,
        });
        reg.insert(StatusDefinition {
            id: "stun".to_string(),
            name: "Stunned".to_string(),
            tick_damage: 0,
            accuracy_mult: 1.0,
            incapacitates: true,
            attribute_delta: None,
        });
        reg.insert(StatusDefinition {
            id: "war_cry".to_string(),
            name: "War Cry".to_string(),
            tick_damage: 0,
            accuracy_mult: 1.0,
            incapacitates: false,
            attribute_delta: Some(AttributeDelta {
                attribute: Attribute::Strength,
                amount: 4,
            }),
        });
        reg.insert(StatusDefinition {
            id: "blinded".to_string(),
            name: "Blinded".to_string(),
            tick_damage: 0,
            accuracy_mult: 0.5,
            incapacitates: false,
            attribute_delta: None,
        });
        reg
    }

    fn target() -> Combatant {
        Combatant::new("t", "Target", 100, 50, [14, 12, 13, 10, 11, 10])
    }

    #[test]
    fn test_apply_and_tick_dot() {
        let reg = registry();
        let mut c = target();
        assert!(reg.apply(&mut c, "poison", 2, false));
        assert!(reg.is_active(&c, "poison"));

        let report = reg.tick_all(&mut c);
        assert_eq!(report.total_damage, 3);
        assert_eq!(c.current_life, 97);
        assert!(reg.is_active(&c, "poison"));

        let report = reg.tick_all(&mut c);
        assert_eq!(report.total_damage, 3);
        assert!(report.ticked.iter().any(|t| t.expired));
        assert!(!reg.is_active(&c, "poison"));
    }

    #[test]
    fn test_unknown_status_is_inert() {
        let reg = registry();
        let mut c = target();
        assert!(!reg.apply(&mut c, "does_not_exist", 3, false));
        assert!(!reg.is_active(&c, "does_not_exist"));
    }

    #[test]
    fn test_buff_expiry_restores_attribute_exactly() {
        let reg = registry();
        let mut c = target();
        let before = c.strength;

        reg.apply(&mut c, "war_cry", 2, false);
        assert_eq!(c.strength, before + 4);

        reg.tick_all(&mut c);
        assert_eq!(c.strength, before + 4);
        reg.tick_all(&mut c);
        assert_eq!(c.strength, before);
        assert!(!reg.is_active(&c, "war_cry"));
    }

    #[test]
    fn test_reapply_refreshes_without_stacking() {
        let reg = registry();
        let mut c = target();
        let before = c.strength;

        reg.apply(&mut c, "war_cry", 2, false);
        reg.apply(&mut c, "war_cry", 5, false);
        // Magnitude did not stack, duration was refreshed
        assert_eq!(c.strength, before + 4);
        assert_eq!(c.status("war_cry").unwrap().remaining, Some(5));
    }

    #[test]
    fn test_clear_reverses_payload() {
        let reg = registry();
        let mut c = target();
        let before = c.strength;
        reg.apply(&mut c, "war_cry", 10, false);
        assert!(reg.clear(&mut c, "war_cry"));
        assert_eq!(c.strength, before);
        assert!(!reg.clear(&mut c, "war_cry"));
    }

    #[test]
    fn test_permanent_status_survives_ticks() {
        let reg = registry();
        let mut c = target();
        reg.apply(&mut c, "stun", 0, true);
        for _ in 0..5 {
            reg.tick_all(&mut c);
        }
        assert!(reg.is_active(&c, "stun"));
        assert!(reg.incapacitated(&c));
    }

    #[test]
    fn test_accuracy_multiplier_product() {
        let reg = registry();
        let mut c = target();
        assert!((reg.accuracy_multiplier(&c) - 1.0).abs() < f64::EPSILON);
        reg.apply(&mut c, "blinded", 3, false);
        assert!((reg.accuracy_multiplier(&c) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary() {
        let reg = registry();
        let mut c = target();
        assert_eq!(reg.summary(&c), "No active effects");
        reg.apply(&mut c, "poison", 3, false);
        reg.apply(&mut c, "stun", 0, true);
        let summary = reg.summary(&c);
        assert!(summary.contains("Poisoned (3 turns)"));
        assert!(summary.contains("Stunned (permanent)"));
    }

    #[test]
    fn test_clear_all_reverses_payloads() {
        let reg = registry();
        let mut c = target();
        let before = c.strength;
        reg.apply(&mut c, "war_cry", 10, false);
        reg.apply(&mut c, "poison", 3, false);
        reg.clear_all(&mut c);
        assert_eq!(c.strength, before);
        assert!(c.statuses.is_empty());
    }
}
