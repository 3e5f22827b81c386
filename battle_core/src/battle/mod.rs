//! Battle orchestration - legality gating, turn loop, enemy selection
//!
//! The [`Battle`] struct owns a whole encounter; [`start_battle`] is the
//! convenience entry point that runs one to completion and maps the raw
//! outcome through the configured defeat policy.

mod enemy;
mod gate;
mod state;
mod turn;

pub use enemy::select_action_with_rng;
pub use gate::{can_use, mark_used};
pub use state::BattleState;
pub use turn::{Battle, BattleConfig, ItemEffect, PlayerChoice};

use crate::combatant::Combatant;
use crate::content::ContentSet;
use crate::types::BattleOutcome;
use rand::Rng;

/// Run one battle to completion and report the outcome
///
/// When the config enables respawn-on-defeat, a loss is reported as
/// [`BattleOutcome::Respawn`]; the engine-level outcome inside the event
/// log is unaffected.
#[allow(clippy::too_many_arguments)]
pub fn start_battle<C, R>(
    player: Combatant,
    enemy: Combatant,
    content: ContentSet,
    environment_id: Option<&str>,
    intensity: u32,
    config: BattleConfig,
    controller: C,
    rng: &mut R,
) -> (Battle, BattleOutcome)
where
    C: FnMut(&Battle) -> PlayerChoice,
    R: Rng,
{
    let respawn = config.respawn_on_defeat;
    let mut battle = Battle::new(player, enemy, content, environment_id, intensity, config);
    let outcome = battle.run(controller, rng);
    let reported = match outcome {
        BattleOutcome::Lose if respawn => BattleOutcome::Respawn,
        other => other,
    };
    (battle, reported)
}
