//! Environment modifier engine - data-driven battle-wide hazard effects

mod descriptor;
mod engine;

pub use descriptor::{EnvironmentDescriptor, IntensityRow, SpecialMechanic, TypeInteraction};
pub use engine::{EnvironmentBundle, EnvironmentContext, EnvironmentModifiers};
