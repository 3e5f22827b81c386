//! BattleEvent - the ordered record of everything a resolution step did
//!
//! Each resolution step returns events instead of threading a logging
//! callback through the call tree; the caller renders them and the core
//! stays UI-free.

use crate::effectiveness::Effectiveness;
use crate::types::{BattleOutcome, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One thing that happened during battle resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum BattleEvent {
    TurnStarted {
        turn: u32,
        side: Side,
    },
    ActionUsed {
        side: Side,
        ability_id: String,
        name: String,
    },
    /// The accuracy roll failed
    Missed {
        side: Side,
        ability_id: String,
    },
    /// A close-range attack could not reach an airborne defender
    OutOfReach {
        side: Side,
        ability_id: String,
    },
    DamageDealt {
        side: Side,
        ability_id: String,
        amount: i32,
        effectiveness: Effectiveness,
        crit: bool,
        overkill: bool,
    },
    Healed {
        side: Side,
        amount: i32,
    },
    LifeStolen {
        side: Side,
        amount: i32,
    },
    StatusApplied {
        target: Side,
        status_id: String,
        duration: u32,
        permanent: bool,
    },
    StatusCleared {
        target: Side,
        status_id: String,
    },
    StatusTicked {
        target: Side,
        status_id: String,
        damage: i32,
    },
    StatusExpired {
        target: Side,
        status_id: String,
    },
    /// A ranged hit knocked an airborne defender to the ground
    KnockedFromAir {
        target: Side,
        fall_damage: i32,
    },
    /// A restrained attacker landed a hit and escaped the grapple
    BrokeFree {
        side: Side,
    },
    /// A restrained defender was released by a non-restraining hit
    Released {
        target: Side,
    },
    EnvironmentDamage {
        target: Side,
        amount: i32,
    },
    EnvironmentStatus {
        target: Side,
        status_id: String,
    },
    EnvironmentSpecial {
        target: Side,
        message: String,
    },
    Incapacitated {
        side: Side,
    },
    EscapeAttempted {
        side: Side,
        roll: i32,
        total: i32,
        success: bool,
    },
    ItemUsed {
        side: Side,
        life_restored: i32,
        mana_restored: i32,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Player => "Player",
        Side::Enemy => "Enemy",
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BattleEvent::*;
        match self {
            TurnStarted { turn, side } => {
                write!(f, "-- Turn {turn}: {} acts --", side_label(*side))
            }
            ActionUsed { side, name, .. } => write!(f, "{} uses {name}", side_label(*side)),
            Missed { side, .. } => write!(f, "{}'s attack misses", side_label(*side)),
            OutOfReach { side, .. } => {
                write!(f, "{}'s attack cannot reach the airborne target", side_label(*side))
            }
            DamageDealt {
                side,
                amount,
                effectiveness,
                crit,
                overkill,
                ..
            } => {
                write!(f, "{} deals {amount} damage", side_label(*side))?;
                if *crit {
                    write!(f, " (critical hit!)")?;
                }
                if let Some(label) = effectiveness.label() {
                    write!(f, " - {label}")?;
                }
                if *overkill {
                    write!(f, " - a devastating blow")?;
                }
                Ok(())
            }
            Healed { side, amount } => write!(f, "{} recovers {amount} life", side_label(*side)),
            LifeStolen { side, amount } => {
                write!(f, "{} drains {amount} life", side_label(*side))
            }
            StatusApplied {
                target,
                status_id,
                duration,
                permanent,
            } => {
                if *permanent {
                    write!(f, "{} is afflicted by {status_id}", side_label(*target))
                } else {
                    write!(
                        f,
                        "{} is afflicted by {status_id} for {duration} turns",
                        side_label(*target)
                    )
                }
            }
            StatusCleared { target, status_id } => {
                write!(f, "{} is no longer {status_id}", side_label(*target))
            }
            StatusTicked {
                target,
                status_id,
                damage,
            } => write!(
                f,
                "{} takes {damage} damage from {status_id}",
                side_label(*target)
            ),
            StatusExpired { target, status_id } => {
                write!(f, "{}'s {status_id} wears off", side_label(*target))
            }
            KnockedFromAir {
                target,
                fall_damage,
            } => write!(
                f,
                "{} is knocked from the air and takes {fall_damage} fall damage",
                side_label(*target)
            ),
            BrokeFree { side } => write!(f, "{} breaks free of the grapple", side_label(*side)),
            Released { target } => write!(f, "{} is released", side_label(*target)),
            EnvironmentDamage { target, amount } => write!(
                f,
                "{} takes {amount} damage from the surroundings",
                side_label(*target)
            ),
            EnvironmentStatus { target, status_id } => write!(
                f,
                "The surroundings afflict {} with {status_id}",
                side_label(*target)
            ),
            EnvironmentSpecial { target, message } => {
                write!(f, "{message} ({})", side_label(*target))
            }
            Incapacitated { side } => {
                write!(f, "{} is incapacitated and forfeits the turn", side_label(*side))
            }
            EscapeAttempted {
                side,
                roll,
                total,
                success,
            } => {
                if *success {
                    write!(f, "{} escapes! (rolled {roll}, total {total})", side_label(*side))
                } else {
                    write!(
                        f,
                        "{} fails to escape (rolled {roll}, total {total})",
                        side_label(*side)
                    )
                }
            }
            ItemUsed {
                side,
                life_restored,
                mana_restored,
            } => write!(
                f,
                "{} uses an item (+{life_restored} life, +{mana_restored} mana)",
                side_label(*side)
            ),
            BattleEnded { outcome } => write!(f, "Battle over: {outcome:?}"),
        }
    }
}
