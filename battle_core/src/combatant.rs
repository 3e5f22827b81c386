//! Combatant - a mutable battle participant

use crate::ability::KnownAbility;
use crate::status::ActiveStatus;
use crate::types::{attr_modifier, Attribute, Element, SizeCategory, WeightCategory};
use serde::{Deserialize, Serialize};

/// Flat bonuses contributed by equipped gear
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EquipmentBonus {
    #[serde(default)]
    pub attack_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
    #[serde(default)]
    pub speed_bonus: i32,
}

/// Secondary stats derived from attributes and equipment
///
/// A pure function of the combatant's attributes and equipment; must be
/// recomputed after either changes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    pub speed: i32,
    pub physical_attack: i32,
    pub magic_attack: i32,
    pub physical_defense: i32,
    pub magic_defense: i32,
}

/// A battle participant (human-controlled or automated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    // === Identity ===
    pub id: String,
    pub name: String,

    // === Resources ===
    pub max_life: i32,
    pub current_life: i32,
    pub max_mana: i32,
    pub current_mana: i32,
    /// Mana restored at the start of each of this side's turns
    #[serde(default)]
    pub mana_regen: i32,

    // === Attributes ===
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,

    // === Equipment ===
    #[serde(default)]
    pub equipment: EquipmentBonus,

    // === Derived (recomputed, never authored) ===
    #[serde(default)]
    derived: DerivedStats,

    // === Typing & physique ===
    #[serde(default)]
    pub element: Element,
    pub height_cm: f64,
    pub weight_kg: f64,

    // === Abilities & statuses ===
    #[serde(default)]
    pub abilities: Vec<KnownAbility>,
    #[serde(default)]
    pub statuses: Vec<ActiveStatus>,
}

impl Combatant {
    /// Create a combatant with the given identity, resources, and attributes
    ///
    /// Attributes are `[str, dex, con, int, wis, cha]`. Derived stats are
    /// computed immediately.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        life: i32,
        mana: i32,
        attributes: [i32; 6],
    ) -> Self {
        let mut combatant = Combatant {
            id: id.into(),
            name: name.into(),
            max_life: life,
            current_life: life,
            max_mana: mana,
            current_mana: mana,
            mana_regen: 2,
            strength: attributes[0],
            dexterity: attributes[1],
            constitution: attributes[2],
            intelligence: attributes[3],
            wisdom: attributes[4],
            charisma: attributes[5],
            equipment: EquipmentBonus::default(),
            derived: DerivedStats::default(),
            element: Element::Neutral,
            height_cm: 175.0,
            weight_kg: 75.0,
            abilities: Vec::new(),
            statuses: Vec::new(),
        };
        combatant.recompute_derived();
        combatant
    }

    /// Set the elemental type (builder-style)
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    /// Set height and weight (builder-style)
    pub fn with_physique(mut self, height_cm: f64, weight_kg: f64) -> Self {
        self.height_cm = height_cm;
        self.weight_kg = weight_kg;
        self
    }

    /// Add a known ability (builder-style)
    pub fn with_ability(mut self, ability: KnownAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    // === Derived stats ===

    /// Recompute secondary stats from attributes and equipment
    ///
    /// Call after any attribute or equipment change.
    pub fn recompute_derived(&mut self) {
        self.derived = DerivedStats {
            speed: 10 + attr_modifier(self.dexterity) + self.equipment.speed_bonus,
            physical_attack: self.strength + self.equipment.attack_bonus,
            magic_attack: self.intelligence + self.equipment.attack_bonus,
            physical_defense: (attr_modifier(self.constitution) + self.equipment.defense_bonus)
                .max(0),
            magic_defense: (attr_modifier(self.wisdom) + self.equipment.defense_bonus).max(0),
        };
    }

    pub fn speed(&self) -> i32 {
        self.derived.speed
    }

    pub fn physical_defense(&self) -> i32 {
        self.derived.physical_defense
    }

    pub fn magic_defense(&self) -> i32 {
        self.derived.magic_defense
    }

    // === Resources ===

    pub fn is_alive(&self) -> bool {
        self.current_life > 0
    }

    /// Apply damage, returning the unclamped life value for overkill checks
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let unclamped = self.current_life - amount.max(0);
        self.current_life = unclamped.clamp(0, self.max_life);
        unclamped
    }

    /// Heal, clamped to max life; returns the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_life;
        self.current_life = (self.current_life + amount.max(0)).clamp(0, self.max_life);
        self.current_life - before
    }

    /// Spend mana; returns false (and changes nothing) when short
    pub fn spend_mana(&mut self, amount: i32) -> bool {
        if self.current_mana < amount {
            return false;
        }
        self.current_mana -= amount;
        true
    }

    /// Restore mana, clamped to max; returns the amount actually restored
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.current_mana;
        self.current_mana = (self.current_mana + amount.max(0)).clamp(0, self.max_mana);
        self.current_mana - before
    }

    // === Attributes ===

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Shift an attribute by a signed amount and recompute derived stats
    pub fn shift_attribute(&mut self, attribute: Attribute, amount: i32) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        };
        *slot += amount;
        self.recompute_derived();
    }

    // === Physique buckets ===

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::from_height(self.height_cm)
    }

    pub fn weight_category(&self) -> WeightCategory {
        WeightCategory::from_weight(self.weight_kg)
    }

    // === Statuses ===

    pub fn has_status(&self, status_id: &str) -> bool {
        self.statuses.iter().any(|s| s.status_id == status_id)
    }

    pub fn status(&self, status_id: &str) -> Option<&ActiveStatus> {
        self.statuses.iter().find(|s| s.status_id == status_id)
    }

    pub fn status_mut(&mut self, status_id: &str) -> Option<&mut ActiveStatus> {
        self.statuses.iter_mut().find(|s| s.status_id == status_id)
    }
}
