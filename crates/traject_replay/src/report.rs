//! Diagnostic report of a replayed particle's terminal state.

use crate::seed::ParticleSeed;
use crate::transport::Termination;
use serde::{Deserialize, Serialize};
use traject_core::{CoreResult, ParticleState, RunContext};

/// Structured report emitted once per replay, unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleReport {
    /// Full terminal state of the particle
    pub particle: ParticleState,
    /// Run context the checkpoint described
    pub context: RunContext,
    /// Seed the replay was positioned at
    pub seed: ParticleSeed,
    /// How the history ended
    pub termination: Termination,
}

impl ParticleReport {
    /// Encode the report as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// External collaborator receiving the diagnostic report.
pub trait ReportSink {
    /// Deliver one report
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails
    fn report(&mut self, report: &ParticleReport) -> CoreResult<()>;
}

/// Sink writing JSON reports to any `io::Write`.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: std::io::Write> WriterSink<W> {
    /// Create a sink over a writer
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> ReportSink for WriterSink<W> {
    fn report(&mut self, report: &ParticleReport) -> CoreResult<()> {
        let json = report.to_json()?;
        writeln!(self.writer, "{}", json).map_err(|e| traject_core::CoreError::Internal {
            message: format!("Failed to write report: {}", e),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traject_core::{ParticleKind, RunMode, Vec3};

    fn sample_report() -> ParticleReport {
        ParticleReport {
            particle: ParticleState::new(
                5,
                ParticleKind::Neutron,
                1.0,
                2.0e6,
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ),
            context: RunContext {
                current_batch: 1,
                generations_per_batch: 1,
                current_generation: 1,
                n_particles: 100,
                run_mode: RunMode::FixedSource,
            },
            seed: ParticleSeed::from_literal(5),
            termination: Termination::Leakage,
        }
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        let back: ParticleReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_report_json_contains_terminal_state() {
        let json = sample_report().to_json().unwrap();
        assert!(json.contains("\"id\": 5"));
        assert!(json.contains("Leakage"));
    }

    #[test]
    fn test_writer_sink_emits_one_line() {
        let mut sink = WriterSink::new(Vec::new());
        sink.report(&sample_report()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.ends_with('\n'));
        let parsed: ParticleReport = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed.seed.value, 5);
    }
}
