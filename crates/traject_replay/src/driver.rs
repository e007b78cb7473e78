//! Replay driver: one particle, one pass, one report.

use crate::report::{ParticleReport, ReportSink};
use crate::seed::ParticleSeed;
use crate::tally::TallyBank;
use crate::transport::{Termination, Transport};
use serde::{Deserialize, Serialize};
use traject_core::{CoreResult, EnergyMode, ParticleState, RunContext, SimulationProgress};
use traject_snapshot::{Dataset, SnapshotDecoder};

/// Highest recognized diagnostic verbosity level.
pub const MAX_VERBOSITY: u8 = 10;

/// Invocation-level configuration for one replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayOptions {
    /// Record every step of the replayed trajectory
    pub trace_all_tracks: bool,
    /// Diagnostic verbosity; raised to [`MAX_VERBOSITY`] at driver entry
    pub verbosity: u8,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            trace_all_tracks: false,
            verbosity: 7,
        }
    }
}

impl ReplayOptions {
    /// Request full-trajectory tracing
    #[must_use]
    pub fn with_tracing(mut self) -> Self {
        self.trace_all_tracks = true;
        self
    }
}

/// Phase of the replay state machine.
///
/// Transitions are strictly forward; a decode or mode error aborts from
/// `Idle`/`Loaded` without reaching later phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayPhase {
    /// Nothing loaded yet
    Idle,
    /// Particle and context decoded from the checkpoint
    Loaded,
    /// Random stream positioned
    Seeded,
    /// Transport loop running
    Transporting,
    /// Diagnostic report emitted; terminal
    Reported,
}

/// Outcome of one completed replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Terminal particle state
    pub particle: ParticleState,
    /// Run context from the checkpoint
    pub context: RunContext,
    /// Reconstructed stream seed
    pub seed: ParticleSeed,
    /// How the history ended
    pub termination: Termination,
}

/// Drives a single particle's replay from checkpoint to report.
pub struct ReplayDriver {
    options: ReplayOptions,
    decoder: SnapshotDecoder,
    phase: ReplayPhase,
}

impl ReplayDriver {
    /// Create a driver for the given options and energy representation
    #[must_use]
    pub fn new(options: ReplayOptions, energy_mode: EnergyMode) -> Self {
        Self {
            options,
            decoder: SnapshotDecoder::new(energy_mode),
            phase: ReplayPhase::Idle,
        }
    }

    /// Current phase of the state machine
    #[must_use]
    pub fn phase(&self) -> ReplayPhase {
        self.phase
    }

    /// Effective options (verbosity reflects the raise once run)
    #[must_use]
    pub fn options(&self) -> &ReplayOptions {
        &self.options
    }

    /// Execute one full replay pass.
    ///
    /// Decodes the checkpoint, clears the tally bank, positions the
    /// random stream at the reconstructed seed, invokes the transport
    /// loop exactly once, and emits exactly one report. The ambient
    /// progress counters come from the caller so the seed formula stays
    /// a pure function of its inputs.
    ///
    /// # Errors
    ///
    /// Decode and mode errors abort before any transport step; transport
    /// errors propagate untouched. No retries at any stage.
    pub fn run<D, T, R>(
        &mut self,
        dataset: &D,
        progress: &SimulationProgress,
        tallies: &mut TallyBank,
        transport: &mut T,
        sink: &mut R,
    ) -> CoreResult<ReplayOutcome>
    where
        D: Dataset,
        T: Transport,
        R: ReportSink,
    {
        self.options.verbosity = MAX_VERBOSITY;
        tracing::debug!(verbosity = MAX_VERBOSITY, "Replay diagnostics at maximum");

        let (mut particle, context) = self.decoder.decode(dataset)?;
        self.phase = ReplayPhase::Loaded;

        if self.options.trace_all_tracks {
            particle.write_track = true;
        }

        // This run observes one trajectory; nothing may score.
        tallies.clear();

        let seed = ParticleSeed::reconstruct(
            context.run_mode,
            progress,
            context.n_particles,
            particle.id,
        );
        let mut rng = seed.rng();
        self.phase = ReplayPhase::Seeded;
        tracing::debug!(seed = seed.value, particle = particle.id, "Random stream positioned");

        self.phase = ReplayPhase::Transporting;
        let termination = transport.transport(&mut particle, &mut rng)?;

        let report = ParticleReport {
            particle: particle.clone(),
            context,
            seed,
            termination,
        };
        sink.report(&report)?;
        self.phase = ReplayPhase::Reported;

        Ok(ReplayOutcome {
            particle,
            context,
            seed,
            termination,
        })
    }
}
