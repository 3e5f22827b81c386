//! Ability definitions - immutable, data-driven action records
//!
//! Abilities are authored in TOML and loaded once per battle session.
//! A combatant references abilities it knows either as a bare string id
//! or as an `{ id, rarity }` table; both shapes normalize to
//! [`KnownAbility`] at load time so downstream code never branches on shape.

use crate::types::{ActionCategory, Element, Rarity};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Who receives an ability's attached status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTarget {
    /// The acting combatant
    SelfSide,
    /// The opposing combatant
    Other,
}

/// A status effect an ability may apply on a successful use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Status definition id to apply
    pub status_id: String,
    /// Recipient of the status
    pub target: StatusTarget,
    /// Trigger probability (0.0 to 1.0)
    #[serde(default = "default_chance")]
    pub chance: f64,
    /// Duration in rounds (ignored when permanent)
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Persists until battle end or explicit removal
    #[serde(default)]
    pub permanent: bool,
}

fn default_chance() -> f64 {
    1.0
}

fn default_duration() -> u32 {
    3
}

/// Immutable ability definition
///
/// Loaded from TOML configuration. Numeric fields default so content
/// authors only write what the ability actually uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    /// Unique ability identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Action category
    pub category: ActionCategory,

    // === Effect magnitude ===
    /// Minimum damage roll
    #[serde(default)]
    pub damage_min: i32,
    /// Maximum damage roll
    #[serde(default)]
    pub damage_max: i32,
    /// Fixed heal amount (heal category only)
    #[serde(default)]
    pub heal_amount: i32,

    // === Accuracy & element ===
    /// Base accuracy in percentage points
    #[serde(default = "default_accuracy")]
    pub accuracy: i32,
    /// Elemental type of the ability
    #[serde(default)]
    pub element: Element,

    // === Legality ===
    /// Mana cost to use
    #[serde(default)]
    pub mana_cost: i32,
    /// Cooldown length in turn-advances
    #[serde(default)]
    pub cooldown: u32,
    /// Maximum uses per battle (None = unlimited)
    #[serde(default)]
    pub max_uses: Option<u32>,
    /// Legal only immediately after one of these ability ids (empty = unrestricted)
    #[serde(default)]
    pub combo_follows: Vec<String>,
    /// Actor must have this status active
    #[serde(default)]
    pub requires_self_status: Option<String>,
    /// Actor must NOT have this status active
    #[serde(default)]
    pub forbids_self_status: Option<String>,
    /// Target must have this status active
    #[serde(default)]
    pub requires_target_status: Option<String>,

    // === Attached status ===
    /// Status effect applied on a successful use
    #[serde(default)]
    pub status_payload: Option<StatusPayload>,

    // === Crit & special flags ===
    /// Added crit chance as a fraction (0.05 = +5 percentage points)
    #[serde(default)]
    pub crit_chance_bonus: f64,
    /// Damage multiplier on a critical hit
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    /// Fraction of dealt damage returned to the attacker as life
    #[serde(default)]
    pub life_steal: f64,
    /// Target defense is ignored entirely
    #[serde(default)]
    pub breaks_defense: bool,
    /// Physical damage gains the attacker weight bonus
    #[serde(default)]
    pub uses_weight: bool,
    /// Delivered at range (magic is always treated as ranged)
    #[serde(default)]
    pub is_ranged: bool,
}

fn default_accuracy() -> i32 {
    100
}

fn default_crit_multiplier() -> f64 {
    2.0
}

impl Ability {
    /// Whether this ability goes through the damage pipeline
    pub fn is_damaging(&self) -> bool {
        self.category.is_damaging()
    }

    /// Close-range delivery: physical and not flagged ranged
    ///
    /// Close-range attacks cannot reach an airborne defender.
    pub fn is_close_range(&self) -> bool {
        self.category == ActionCategory::Physical && !self.is_ranged
    }

    /// Roll base damage uniformly in `[damage_min, damage_max]`
    pub fn roll_damage(&self, rng: &mut impl Rng) -> i32 {
        if self.damage_max <= self.damage_min {
            return self.damage_min.max(0);
        }
        rng.gen_range(self.damage_min..=self.damage_max)
    }

    /// Whether the attached status payload applies this status id
    pub fn applies_status(&self, status_id: &str) -> bool {
        self.status_payload
            .as_ref()
            .map(|p| p.status_id == status_id)
            .unwrap_or(false)
    }
}

/// An ability a combatant knows, tagged with its selection rarity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownAbility {
    /// Ability definition id
    pub id: String,
    /// Weighted-selection tag for the automated side
    pub rarity: Rarity,
}

impl KnownAbility {
    /// Create a known ability with default (normal) rarity
    pub fn new(id: impl Into<String>) -> Self {
        KnownAbility {
            id: id.into(),
            rarity: Rarity::default(),
        }
    }

    /// Create a known ability with an explicit rarity
    pub fn with_rarity(id: impl Into<String>, rarity: Rarity) -> Self {
        KnownAbility {
            id: id.into(),
            rarity,
        }
    }
}

impl<'de> Deserialize<'de> for KnownAbility {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum AbilityRef {
            Id(String),
            Tagged {
                id: String,
                #[serde(default)]
                rarity: Rarity,
            },
        }

        Ok(match AbilityRef::deserialize(deserializer)? {
            AbilityRef::Id(id) => KnownAbility::new(id),
            AbilityRef::Tagged { id, rarity } => KnownAbility::with_rarity(id, rarity),
        })
    }
}
