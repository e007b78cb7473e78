//! TRAJECT Core Types
//!
//! Pure types for single-particle checkpoint replay: particle state,
//! run context, and energy-group structures. No I/O lives here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod energy;
pub mod error;
pub mod particle;
pub mod vector;

// Re-exports
pub use context::{RunContext, RunMode, SimulationProgress};
pub use energy::{EnergyMode, GroupStructure};
pub use error::{CoreError, CoreResult};
pub use particle::{ParticleKind, ParticleState};
pub use vector::Vec3;
