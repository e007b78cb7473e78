//! Particle state for single-history replay.

use crate::error::{CoreError, CoreResult};
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Particle species, decoded from the checkpoint's integer type code.
///
/// The enumeration is closed: unrecognized codes are rejected at the
/// decoder boundary rather than carried downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Neutron
    Neutron,
    /// Photon
    Photon,
    /// Electron
    Electron,
    /// Positron
    Positron,
}

impl ParticleKind {
    /// Decode from the checkpoint integer code
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParticleKind` for codes outside the
    /// enumeration.
    pub fn from_code(code: i64) -> CoreResult<Self> {
        match code {
            0 => Ok(Self::Neutron),
            1 => Ok(Self::Photon),
            2 => Ok(Self::Electron),
            3 => Ok(Self::Positron),
            _ => Err(CoreError::InvalidParticleKind { code }),
        }
    }

    /// The checkpoint integer code for this kind
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Neutron => 0,
            Self::Photon => 1,
            Self::Electron => 2,
            Self::Positron => 3,
        }
    }
}

impl std::fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neutron => write!(f, "neutron"),
            Self::Photon => write!(f, "photon"),
            Self::Electron => write!(f, "electron"),
            Self::Positron => write!(f, "positron"),
        }
    }
}

/// Full kinematic state of one particle, the unit of replay.
///
/// Live fields hold the current state; the `*_last` shadow fields mirror
/// the state at the most recent sampled event point. The transport loop
/// relies on the shadows, so they are captured equal to the live fields
/// immediately after a checkpoint load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    /// Monotonic id, unique within the original run
    pub id: u64,
    /// Particle species
    pub kind: ParticleKind,
    /// Statistical weight
    pub wgt: f64,
    /// Energy in eV (group-average energy in multigroup mode)
    pub energy: f64,
    /// Energy group index, populated only in multigroup mode
    pub group: Option<usize>,
    /// Position
    pub r: Vec3,
    /// Flight direction; unit length, trusted from the checkpoint
    pub u: Vec3,

    /// Weight at the last event point
    pub wgt_last: f64,
    /// Position at the last event point
    pub r_last: Vec3,
    /// Position of the last collision or boundary crossing
    pub r_last_current: Vec3,
    /// Direction at the last event point
    pub u_last: Vec3,
    /// Energy at the last event point
    pub energy_last: f64,
    /// Group at the last event point
    pub group_last: Option<usize>,

    /// Record every step of this history for trajectory output
    pub write_track: bool,
}

impl ParticleState {
    /// Create a particle with live fields only; shadows start mirrored.
    #[must_use]
    pub fn new(id: u64, kind: ParticleKind, wgt: f64, energy: f64, r: Vec3, u: Vec3) -> Self {
        let mut p = Self {
            id,
            kind,
            wgt,
            energy,
            group: None,
            r,
            u,
            wgt_last: 0.0,
            r_last: Vec3::default(),
            r_last_current: Vec3::default(),
            u_last: Vec3::default(),
            energy_last: 0.0,
            group_last: None,
            write_track: false,
        };
        p.capture_last();
        p
    }

    /// Overwrite every shadow field with its live counterpart.
    ///
    /// Must run after any load-time energy conversion so the shadows see
    /// the final values.
    pub fn capture_last(&mut self) {
        self.wgt_last = self.wgt;
        self.r_last = self.r;
        self.r_last_current = self.r;
        self.u_last = self.u;
        self.energy_last = self.energy;
        self.group_last = self.group;
    }

    /// Check that every shadow field equals its live counterpart
    #[must_use]
    pub fn shadows_mirror_live(&self) -> bool {
        self.wgt_last == self.wgt
            && self.r_last == self.r
            && self.r_last_current == self.r
            && self.u_last == self.u
            && self.energy_last == self.energy
            && self.group_last == self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_code() {
        assert_eq!(ParticleKind::from_code(0).unwrap(), ParticleKind::Neutron);
        assert_eq!(ParticleKind::from_code(1).unwrap(), ParticleKind::Photon);
        assert_eq!(ParticleKind::from_code(2).unwrap(), ParticleKind::Electron);
        assert_eq!(ParticleKind::from_code(3).unwrap(), ParticleKind::Positron);
    }

    #[test]
    fn test_kind_from_code_invalid() {
        let err = ParticleKind::from_code(7).unwrap_err();
        assert_eq!(err, CoreError::InvalidParticleKind { code: 7 });
    }

    #[test]
    fn test_kind_code_roundtrip() {
        for kind in [
            ParticleKind::Neutron,
            ParticleKind::Photon,
            ParticleKind::Electron,
            ParticleKind::Positron,
        ] {
            assert_eq!(ParticleKind::from_code(kind.code()).unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ParticleKind::Neutron.to_string(), "neutron");
    }

    #[test]
    fn test_particle_new_mirrors_shadows() {
        let p = ParticleState::new(
            5,
            ParticleKind::Neutron,
            1.0,
            2.0e6,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert!(p.shadows_mirror_live());
        assert_eq!(p.wgt_last, 1.0);
        assert_eq!(p.energy_last, 2.0e6);
    }

    #[test]
    fn test_capture_last_after_mutation() {
        let mut p = ParticleState::new(
            1,
            ParticleKind::Photon,
            0.5,
            1.0e5,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        p.energy = 4.2e4;
        p.group = Some(3);
        assert!(!p.shadows_mirror_live());

        p.capture_last();
        assert!(p.shadows_mirror_live());
        assert_eq!(p.group_last, Some(3));
    }
}
