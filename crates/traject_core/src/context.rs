//! Run-context metadata decoded from a checkpoint.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Simulation regime of the original run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunMode {
    /// Criticality run; random stream keyed by generation bookkeeping
    Eigenvalue,
    /// Independent histories; random stream keyed by particle identity
    FixedSource,
}

impl RunMode {
    /// Parse the checkpoint run-mode string
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRunMode` for any tag other than
    /// `"eigenvalue"` or `"fixed source"`.
    pub fn from_tag(tag: &str) -> CoreResult<Self> {
        match tag {
            "eigenvalue" => Ok(Self::Eigenvalue),
            "fixed source" => Ok(Self::FixedSource),
            _ => Err(CoreError::InvalidRunMode {
                mode: tag.to_string(),
            }),
        }
    }

    /// The checkpoint string tag for this mode
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Eigenvalue => "eigenvalue",
            Self::FixedSource => "fixed source",
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Metadata describing the original run, read once per replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// Batch index at the time the checkpoint was written
    pub current_batch: u64,
    /// Generations per batch
    pub generations_per_batch: u64,
    /// Generation index within the batch
    pub current_generation: u64,
    /// Particle population size
    pub n_particles: u64,
    /// Simulation regime
    pub run_mode: RunMode,
}

/// Ambient simulation-progress counters, passed explicitly.
///
/// The eigenvalue seed formula needs counters the decoded context alone
/// cannot supply; the caller provides them so seed reconstruction stays a
/// pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationProgress {
    /// Generations completed before the current batch
    pub total_generations: u64,
    /// Overall generation index across all batches
    pub overall_generation: u64,
}

impl SimulationProgress {
    /// Create progress counters
    #[must_use]
    pub const fn new(total_generations: u64, overall_generation: u64) -> Self {
        Self {
            total_generations,
            overall_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_from_tag() {
        assert_eq!(RunMode::from_tag("eigenvalue").unwrap(), RunMode::Eigenvalue);
        assert_eq!(RunMode::from_tag("fixed source").unwrap(), RunMode::FixedSource);
    }

    #[test]
    fn test_run_mode_from_tag_unknown() {
        let err = RunMode::from_tag("unknown").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidRunMode {
                mode: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_run_mode_tag_roundtrip() {
        for mode in [RunMode::Eigenvalue, RunMode::FixedSource] {
            assert_eq!(RunMode::from_tag(mode.as_tag()).unwrap(), mode);
        }
    }

    #[test]
    fn test_run_mode_rejects_case_variants() {
        assert!(RunMode::from_tag("Eigenvalue").is_err());
        assert!(RunMode::from_tag("fixed-source").is_err());
        assert!(RunMode::from_tag("").is_err());
    }

    #[test]
    fn test_progress_new() {
        let progress = SimulationProgress::new(2, 3);
        assert_eq!(progress.total_generations, 2);
        assert_eq!(progress.overall_generation, 3);
    }
}
