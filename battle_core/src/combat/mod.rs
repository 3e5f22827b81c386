//! Combat resolution - accuracy, damage, crits, and special interactions

mod accuracy;
mod damage;
mod resolution;
mod result;

pub use accuracy::{effective_speed, final_accuracy, roll_hit, MAX_ACCURACY, MIN_ACCURACY};
pub use damage::{
    calculate_damage, crit_chance, size_bonus, weight_bonus, DamageRoll, BASE_CRIT_CHANCE,
    DIVE_MULTIPLIER, ENEMY_CRIT_CAP, PLAYER_CRIT_CAP,
};
pub use resolution::{resolve_action, ActionContext, MIN_FALL_DAMAGE};
pub use result::BattleEvent;
