//! StatusDefinition - data-driven status effect behavior

use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// A reversible attribute change carried by a buff or debuff
///
/// Applied when the status is granted and subtracted exactly on expiry,
/// so grant and revert are inverse operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDelta {
    /// Which attribute is modified
    pub attribute: Attribute,
    /// Signed change (negative for debuffs)
    pub amount: i32,
}

/// Immutable status effect definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDefinition {
    /// Unique status identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Damage dealt to the holder once per completed round
    #[serde(default)]
    pub tick_damage: i32,
    /// Multiplier folded into the holder's accuracy while active
    #[serde(default = "default_accuracy_mult")]
    pub accuracy_mult: f64,
    /// Holder forfeits its action while active
    #[serde(default)]
    pub incapacitates: bool,
    /// Attribute change applied on grant and reversed on expiry
    #[serde(default)]
    pub attribute_delta: Option<AttributeDelta>,
}

fn default_accuracy_mult() -> f64 {
    1.0
}
