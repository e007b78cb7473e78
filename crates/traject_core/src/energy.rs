//! Energy representation: continuous scalar or discrete group index.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Group structure for multigroup runs.
///
/// Holds the group-average energies the decoder substitutes for the
/// stored group code. Groups are indexed from zero in descending-energy
/// order, matching the cross-section library layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStructure {
    bin_avg: Vec<f64>,
}

impl GroupStructure {
    /// Build from a precomputed group-average-energy table
    #[must_use]
    pub fn from_averages(bin_avg: Vec<f64>) -> Self {
        Self { bin_avg }
    }

    /// Build from group boundary energies.
    ///
    /// A structure with `n + 1` boundaries has `n` groups; each group's
    /// average is the midpoint of its bounding energies.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two boundaries are given.
    pub fn from_bounds(bounds: &[f64]) -> CoreResult<Self> {
        if bounds.len() < 2 {
            return Err(CoreError::MalformedField {
                name: "group_bounds".to_string(),
                reason: format!("need at least 2 boundaries, got {}", bounds.len()),
            });
        }
        let bin_avg = bounds.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        Ok(Self { bin_avg })
    }

    /// Number of groups
    #[must_use]
    pub fn n_groups(&self) -> usize {
        self.bin_avg.len()
    }

    /// Group-average energy for a group index
    ///
    /// # Errors
    ///
    /// Returns `CoreError::GroupOutOfRange` if the index does not address
    /// a group.
    pub fn average(&self, group: i64) -> CoreResult<f64> {
        usize::try_from(group)
            .ok()
            .and_then(|g| self.bin_avg.get(g).copied())
            .ok_or(CoreError::GroupOutOfRange {
                group,
                n_groups: self.bin_avg.len(),
            })
    }
}

/// Process-wide energy representation, supplied explicitly to the decoder.
///
/// Exactly one representation is authoritative: continuous runs keep the
/// stored scalar, multigroup runs reinterpret it as a group index and look
/// up the group-average energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnergyMode {
    /// Continuous-energy run; the stored scalar is the energy in eV
    Continuous,
    /// Multigroup run; the stored scalar encodes a group index
    Multigroup(GroupStructure),
}

impl EnergyMode {
    /// Whether this is a multigroup run
    #[must_use]
    pub const fn is_multigroup(&self) -> bool {
        matches!(self, Self::Multigroup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_structure_from_averages() {
        let gs = GroupStructure::from_averages(vec![1.0e7, 1.0e5, 1.0e2]);
        assert_eq!(gs.n_groups(), 3);
        assert_eq!(gs.average(1).unwrap(), 1.0e5);
    }

    #[test]
    fn test_group_structure_from_bounds() {
        let gs = GroupStructure::from_bounds(&[2.0e7, 1.0e6, 1.0e3]).unwrap();
        assert_eq!(gs.n_groups(), 2);
        assert_eq!(gs.average(0).unwrap(), 0.5 * (2.0e7 + 1.0e6));
        assert_eq!(gs.average(1).unwrap(), 0.5 * (1.0e6 + 1.0e3));
    }

    #[test]
    fn test_group_structure_too_few_bounds() {
        assert!(GroupStructure::from_bounds(&[1.0]).is_err());
        assert!(GroupStructure::from_bounds(&[]).is_err());
    }

    #[test]
    fn test_group_out_of_range() {
        let gs = GroupStructure::from_averages(vec![1.0, 2.0]);
        let err = gs.average(2).unwrap_err();
        assert_eq!(err, CoreError::GroupOutOfRange { group: 2, n_groups: 2 });

        let err = gs.average(-1).unwrap_err();
        assert_eq!(err, CoreError::GroupOutOfRange { group: -1, n_groups: 2 });
    }

    #[test]
    fn test_energy_mode_is_multigroup() {
        assert!(!EnergyMode::Continuous.is_multigroup());
        let mg = EnergyMode::Multigroup(GroupStructure::from_averages(vec![1.0]));
        assert!(mg.is_multigroup());
    }
}
