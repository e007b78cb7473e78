//! Snapshot decoder: checkpoint fields to particle state and run context.

use crate::dataset::Dataset;
use traject_core::{
    CoreError, CoreResult, EnergyMode, ParticleKind, ParticleState, RunContext, RunMode,
};

fn read_counter<D: Dataset>(ds: &D, name: &str) -> CoreResult<u64> {
    let raw = ds.read_int(name)?;
    u64::try_from(raw).map_err(|_| CoreError::MalformedField {
        name: name.to_string(),
        reason: format!("negative value {}", raw),
    })
}

/// Decodes a persisted particle checkpoint.
///
/// The energy representation is chosen by the explicitly supplied
/// [`EnergyMode`], never inferred from the stored bit pattern.
#[derive(Debug, Clone)]
pub struct SnapshotDecoder {
    energy_mode: EnergyMode,
}

impl SnapshotDecoder {
    /// Create a decoder for the given energy representation
    #[must_use]
    pub fn new(energy_mode: EnergyMode) -> Self {
        Self { energy_mode }
    }

    /// The energy representation this decoder applies
    #[must_use]
    pub fn energy_mode(&self) -> &EnergyMode {
        &self.energy_mode
    }

    /// Decode a checkpoint into a particle state and run context.
    ///
    /// In multigroup mode the stored energy scalar is reinterpreted as a
    /// group index and replaced by the group-average energy before the
    /// shadow fields are captured.
    ///
    /// # Errors
    ///
    /// Fatal on any missing or malformed field, unreadable resource,
    /// unrecognized run mode, unknown particle type code, or
    /// out-of-range group index. No partial state escapes.
    pub fn decode<D: Dataset>(&self, ds: &D) -> CoreResult<(ParticleState, RunContext)> {
        tracing::debug!("Decoding particle restart data from {}", ds.path());

        let current_batch = read_counter(ds, "current_batch")?;
        let generations_per_batch = read_counter(ds, "generations_per_batch")?;
        let current_generation = read_counter(ds, "current_generation")?;
        let n_particles = read_counter(ds, "n_particles")?;
        let run_mode = RunMode::from_tag(&ds.read_str("run_mode")?)?;

        let context = RunContext {
            current_batch,
            generations_per_batch,
            current_generation,
            n_particles,
            run_mode,
        };

        let id = read_counter(ds, "id")?;
        let kind = ParticleKind::from_code(ds.read_int("type")?)?;
        let wgt = ds.read_float("weight")?;
        let energy = ds.read_float("energy")?;
        let r = ds.read_vec3("xyz")?;
        let u = ds.read_vec3("uvw")?;

        let mut particle = ParticleState::new(id, kind, wgt, energy, r, u);

        // In multigroup mode the stored scalar encodes the group index;
        // the live energy becomes the group-average energy.
        if let EnergyMode::Multigroup(groups) = &self.energy_mode {
            let group = particle.energy as i64;
            particle.energy = groups.average(group)?;
            particle.group = Some(group as usize);
            particle.capture_last();
        }

        Ok((particle, context))
    }
}
