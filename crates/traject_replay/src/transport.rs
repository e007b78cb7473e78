//! Seam to the transport physics stepping loop.
//!
//! The stepping loop itself lives in the host simulator; this subsystem
//! hands it a prepared particle and a positioned random stream and takes
//! back the terminal condition, intercepting nothing in between.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use traject_core::{CoreResult, ParticleState};

/// Terminal condition that ended a particle's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Absorbed in a collision
    Absorption,
    /// Leaked through the problem boundary
    Leakage,
    /// Fell below the energy cutoff
    EnergyCutoff,
    /// Fell below the weight cutoff
    WeightCutoff,
    /// Exceeded the history-length cutoff
    HistoryCutoff,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absorption => write!(f, "absorption"),
            Self::Leakage => write!(f, "leakage"),
            Self::EnergyCutoff => write!(f, "energy cutoff"),
            Self::WeightCutoff => write!(f, "weight cutoff"),
            Self::HistoryCutoff => write!(f, "history cutoff"),
        }
    }
}

/// External collaborator advancing one particle to termination.
pub trait Transport {
    /// Advance the particle through its full history.
    ///
    /// Runs until one of the loop's own terminal conditions. Mutates the
    /// particle in place and consumes the random stream.
    ///
    /// # Errors
    ///
    /// Any error propagates untouched to the process boundary; the
    /// replay driver performs no partial-failure handling.
    fn transport(
        &mut self,
        particle: &mut ParticleState,
        rng: &mut ChaCha8Rng,
    ) -> CoreResult<Termination>;
}
