//! EnvironmentDescriptor - authored environment content

use crate::types::Element;
use serde::{Deserialize, Serialize};

/// How an environment treats one elemental type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeInteraction {
    /// Element this entry applies to
    pub element: Element,
    /// Multiplier on the environment's flat damage (0.0 = hard immunity)
    #[serde(default = "default_mult")]
    pub damage_mult: f64,
    /// Subtracted from the intensity row's accuracy penalty
    #[serde(default)]
    pub accuracy_bonus: f64,
    /// Subtracted from the intensity row's speed penalty
    #[serde(default)]
    pub speed_bonus: f64,
    /// Subtracted from the intensity row's damage penalty
    #[serde(default)]
    pub damage_bonus: f64,
    /// Life restored to this element's combatants each of their turns
    #[serde(default)]
    pub life_regen: i32,
    /// Descriptive text for the caller to render
    #[serde(default)]
    pub text: String,
}

fn default_mult() -> f64 {
    1.0
}

/// A rare chance-based hazard (tripping, lightning strike, falling rock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialMechanic {
    /// Independent trigger probability per tick (0.0 to 1.0)
    pub chance: f64,
    /// Flat damage on trigger
    #[serde(default)]
    pub damage: i32,
    /// Message on trigger
    pub message: String,
}

/// Effect bundle for one intensity bucket
///
/// Rows are thresholds: the row with the highest `level <= intensity`
/// applies. Missing coverage degrades to a zero-effect row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityRow {
    /// Lowest intensity (1-10) this row applies from
    pub level: u32,
    /// Flat damage dealt to each non-immune combatant per tick
    #[serde(default)]
    pub damage: i32,
    /// Chance per tick of inflicting the row's status
    #[serde(default)]
    pub status_chance: f64,
    /// Status inflicted by the environment
    #[serde(default)]
    pub status_id: Option<String>,
    /// Duration of the inflicted status
    #[serde(default = "default_status_duration")]
    pub status_duration: u32,
    /// Accuracy penalty (0.0 to 1.0) while acting here
    #[serde(default)]
    pub accuracy_penalty: f64,
    /// Speed penalty (0.0 to 1.0) while acting here
    #[serde(default)]
    pub speed_penalty: f64,
    /// Damage penalty (0.0 to 1.0) on outgoing damage
    #[serde(default)]
    pub damage_penalty: f64,
    /// Independent chance-based hazards
    #[serde(default)]
    pub specials: Vec<SpecialMechanic>,
}

fn default_status_duration() -> u32 {
    3
}

/// Authored environment definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
    /// Unique environment identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Combatants of this element ignore the environment entirely
    #[serde(default)]
    pub immune_element: Option<Element>,
    /// Per-element interaction entries
    #[serde(default)]
    pub interactions: Vec<TypeInteraction>,
    /// Intensity-bucketed effect rows (ascending by level)
    #[serde(default)]
    pub levels: Vec<IntensityRow>,
}

impl EnvironmentDescriptor {
    /// The interaction entry for an element, if one is authored
    pub fn interaction_for(&self, element: Element) -> Option<&TypeInteraction> {
        self.interactions.iter().find(|i| i.element == element)
    }

    /// The effect row for an intensity, clamped to 1-10
    ///
    /// Picks the row with the highest level not above the intensity.
    pub fn row_for(&self, intensity: u32) -> Option<&IntensityRow> {
        let intensity = intensity.clamp(1, 10);
        self.levels
            .iter()
            .filter(|row| row.level <= intensity)
            .max_by_key(|row| row.level)
    }
}
