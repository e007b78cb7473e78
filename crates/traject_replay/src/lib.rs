//! TRAJECT Replay Engine
//!
//! Reconstructs the pseudo-random stream position a particle's original
//! history consumed, then drives one isolated replay of that history.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod report;
pub mod seed;
pub mod tally;
pub mod transport;

pub use driver::{ReplayDriver, ReplayOptions, ReplayOutcome, ReplayPhase, MAX_VERBOSITY};
pub use report::{ParticleReport, ReportSink, WriterSink};
pub use seed::ParticleSeed;
pub use tally::{Tally, TallyBank};
pub use transport::{Termination, Transport};
