//! battle_core - Turn-based combat resolution for game encounters
//!
//! This library provides:
//! - Combatant: A mutable battle participant with derived stats
//! - Combat resolution: accuracy, damage, crits, and elemental effectiveness
//! - StatusRegistry: apply/tick/clear status effects with payload reversal
//! - EnvironmentContext: arena hazards scaled by battle intensity
//! - Battle: the legality-gated turn state machine with enemy selection

pub mod ability;
pub mod battle;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod effectiveness;
pub mod environment;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use ability::{Ability, KnownAbility, StatusPayload, StatusTarget};
pub use battle::{
    can_use, select_action_with_rng, start_battle, Battle, BattleConfig, BattleState, ItemEffect,
    PlayerChoice,
};
pub use combat::{
    calculate_damage, final_accuracy, resolve_action, ActionContext, BattleEvent, DamageRoll,
};
pub use combatant::{Combatant, EquipmentBonus};
pub use content::{
    default_content, load_content, parse_content, ContentError, ContentPack, ContentSet, Registry,
};
pub use effectiveness::{effectiveness, Effectiveness};
pub use environment::{EnvironmentContext, EnvironmentDescriptor, EnvironmentModifiers};
pub use status::{ActiveStatus, StatusDefinition, StatusRegistry};
pub use types::{ActionCategory, BattleOutcome, Element, Rarity, Side};
