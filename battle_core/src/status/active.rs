//! ActiveStatus - a live status effect instance on a combatant

use super::AttributeDelta;
use serde::{Deserialize, Serialize};

/// A live status instance
///
/// At most one instance per status id exists on a combatant;
/// re-application refreshes the duration rather than stacking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveStatus {
    /// Status definition id
    pub status_id: String,
    /// Rounds remaining (None when permanent)
    pub remaining: Option<u32>,
    /// Persists until explicitly cleared or battle end
    pub permanent: bool,
    /// The delta that was applied on grant, reversed exactly on expiry
    pub applied_delta: Option<AttributeDelta>,
}

impl ActiveStatus {
    /// Create a timed instance
    pub fn timed(status_id: impl Into<String>, duration: u32) -> Self {
        ActiveStatus {
            status_id: status_id.into(),
            remaining: Some(duration),
            permanent: false,
            applied_delta: None,
        }
    }

    /// Create a permanent instance
    pub fn permanent(status_id: impl Into<String>) -> Self {
        ActiveStatus {
            status_id: status_id.into(),
            remaining: None,
            permanent: true,
            applied_delta: None,
        }
    }

    /// Whether the instance has run out
    pub fn is_expired(&self) -> bool {
        !self.permanent && self.remaining.map(|r| r == 0).unwrap_or(true)
    }

    /// Refresh duration on re-application; magnitude never stacks
    pub fn refresh(&mut self, duration: u32, permanent: bool) {
        if permanent {
            self.permanent = true;
            self.remaining = None;
        } else if !self.permanent {
            self.remaining = Some(duration);
        }
    }

    /// Count down one round; permanent instances never tick down
    pub fn tick_down(&mut self) {
        if self.permanent {
            return;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }
}
