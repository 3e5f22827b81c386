//! Status effects - timed or permanent modifiers attached to a combatant

mod active;
mod definition;
mod registry;

pub use active::ActiveStatus;
pub use definition::{AttributeDelta, StatusDefinition};
pub use registry::{StatusRegistry, StatusTickReport, TickedStatus};

/// Well-known status ids the combat rules recognize directly
///
/// These are ordinary data-driven statuses; only their interaction rules
/// (aerial combat, grappling, stun forfeiture) are hard-wired.
pub mod ids {
    /// Airborne: close-range attacks cannot reach, diving attacks gain 1.6x
    pub const FLIGHT: &str = "flight";
    /// Grappled: landing a hit breaks free, escape uses the strength roll
    pub const RESTRAINED: &str = "restrained";
    /// Incapacitated for the remaining duration
    pub const STUN: &str = "stun";
}
