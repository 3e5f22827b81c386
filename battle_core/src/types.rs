//! Core types shared across the battle engine

use serde::{Deserialize, Serialize};

/// Elemental type of a combatant, ability, or environment interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    /// Untyped - always neutral in both directions
    Neutral,
}

impl Default for Element {
    fn default() -> Self {
        Element::Neutral
    }
}

/// What kind of action an ability performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Physical,
    Magic,
    Heal,
    Buff,
    Debuff,
}

impl ActionCategory {
    /// Whether this category goes through the damage pipeline
    pub fn is_damaging(&self) -> bool {
        matches!(self, ActionCategory::Physical | ActionCategory::Magic)
    }
}

/// Which participant a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The opposing side
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Terminal result of a battle, as reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Win,
    Lose,
    Escape,
    /// Defeat reported as a respawn when the battle is configured for it
    Respawn,
}

/// One of the six base attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

/// How often the automated side favours an ability it knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Preferred,
    Frequent,
    Normal,
    Rare,
    SuperRare,
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Normal
    }
}

impl Rarity {
    /// Relative weight for weighted-random enemy selection
    pub fn weight(&self) -> u32 {
        match self {
            Rarity::Preferred => 5,
            Rarity::Frequent => 4,
            Rarity::Normal => 3,
            Rarity::Rare => 2,
            Rarity::SuperRare => 1,
        }
    }
}

/// Height bucket used by the accuracy and damage formulas
///
/// Bigger targets are easier to hit; the ordinal difference between
/// attacker and defender feeds the physical damage size bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeCategory {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
    Colossal,
}

impl SizeCategory {
    /// Bucket a height (in centimetres) into a size category
    pub fn from_height(height_cm: f64) -> Self {
        if height_cm < 50.0 {
            SizeCategory::Tiny
        } else if height_cm < 100.0 {
            SizeCategory::Small
        } else if height_cm < 200.0 {
            SizeCategory::Medium
        } else if height_cm < 350.0 {
            SizeCategory::Large
        } else if height_cm < 600.0 {
            SizeCategory::Huge
        } else if height_cm < 1000.0 {
            SizeCategory::Gargantuan
        } else {
            SizeCategory::Colossal
        }
    }

    /// Offset to the attacker's chance to hit a defender of this size
    pub fn hit_offset(&self) -> i32 {
        match self {
            SizeCategory::Tiny => -15,
            SizeCategory::Small => -10,
            SizeCategory::Medium => 0,
            SizeCategory::Large => 5,
            SizeCategory::Huge => 10,
            SizeCategory::Gargantuan => 15,
            SizeCategory::Colossal => 20,
        }
    }

    /// Ordinal (0 = Tiny .. 6 = Colossal) for the size-difference damage bonus
    pub fn ordinal(&self) -> i32 {
        match self {
            SizeCategory::Tiny => 0,
            SizeCategory::Small => 1,
            SizeCategory::Medium => 2,
            SizeCategory::Large => 3,
            SizeCategory::Huge => 4,
            SizeCategory::Gargantuan => 5,
            SizeCategory::Colossal => 6,
        }
    }
}

/// Weight bucket contributing an agility offset to accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeightCategory {
    Feather,
    Light,
    Medium,
    Heavy,
    Massive,
}

impl WeightCategory {
    /// Bucket a weight (in kilograms) into a weight category
    pub fn from_weight(weight_kg: f64) -> Self {
        if weight_kg < 30.0 {
            WeightCategory::Feather
        } else if weight_kg < 70.0 {
            WeightCategory::Light
        } else if weight_kg < 150.0 {
            WeightCategory::Medium
        } else if weight_kg < 400.0 {
            WeightCategory::Heavy
        } else {
            WeightCategory::Massive
        }
    }

    /// Agility offset: added for the attacker, subtracted for the defender
    pub fn agility_offset(&self) -> i32 {
        match self {
            WeightCategory::Feather => 10,
            WeightCategory::Light => 5,
            WeightCategory::Medium => 0,
            WeightCategory::Heavy => -5,
            WeightCategory::Massive => -10,
        }
    }
}

/// D&D-style attribute modifier: floor((value - 10) / 2)
pub fn attr_modifier(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}
