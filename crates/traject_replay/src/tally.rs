//! Accumulated tally state and its reset operations.
//!
//! Replay exists to observe one trajectory, not to score statistics, so
//! the only operation the replay path uses is clearing the bank to empty.

use serde::{Deserialize, Serialize};

/// One named statistical accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    /// Tally name
    pub name: String,
    /// Number of accumulated realizations
    pub n_realizations: u64,
    /// Flat score results
    pub results: Vec<f64>,
}

impl Tally {
    /// Create an empty tally with a given number of score bins
    #[must_use]
    pub fn new(name: &str, n_bins: usize) -> Self {
        Self {
            name: name.to_string(),
            n_realizations: 0,
            results: vec![0.0; n_bins],
        }
    }

    /// Zero all accumulated results in place, keeping the bin layout
    pub fn reset(&mut self) {
        self.n_realizations = 0;
        for r in &mut self.results {
            *r = 0.0;
        }
    }

    /// Add a score to a bin
    pub fn score(&mut self, bin: usize, value: f64) {
        if let Some(r) = self.results.get_mut(bin) {
            *r += value;
        }
    }
}

/// The process-wide collection of tallies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TallyBank {
    tallies: Vec<Tally>,
}

impl TallyBank {
    /// Create an empty bank
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tally to the bank
    pub fn add(&mut self, tally: Tally) {
        self.tallies.push(tally);
    }

    /// Number of tallies in the bank
    #[must_use]
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    /// Whether the bank holds no tallies
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Drop every tally. Irreversible; the replay path calls this before
    /// transport so the history scores nothing.
    pub fn clear(&mut self) {
        self.tallies.clear();
    }

    /// Zero every tally in place without dropping them
    pub fn reset_all(&mut self) {
        for tally in &mut self.tallies {
            tally.reset();
        }
    }

    /// Iterate over tallies
    pub fn iter(&self) -> impl Iterator<Item = &Tally> {
        self.tallies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_new() {
        let tally = Tally::new("flux", 4);
        assert_eq!(tally.name, "flux");
        assert_eq!(tally.n_realizations, 0);
        assert_eq!(tally.results, vec![0.0; 4]);
    }

    #[test]
    fn test_tally_score_and_reset() {
        let mut tally = Tally::new("flux", 2);
        tally.score(0, 1.5);
        tally.score(1, 0.25);
        tally.n_realizations = 3;

        tally.reset();
        assert_eq!(tally.n_realizations, 0);
        assert_eq!(tally.results, vec![0.0, 0.0]);
        assert_eq!(tally.results.len(), 2); // layout survives reset
    }

    #[test]
    fn test_tally_score_out_of_bounds_ignored() {
        let mut tally = Tally::new("flux", 1);
        tally.score(5, 1.0);
        assert_eq!(tally.results, vec![0.0]);
    }

    #[test]
    fn test_bank_clear_empties() {
        let mut bank = TallyBank::new();
        bank.add(Tally::new("flux", 4));
        bank.add(Tally::new("leakage", 1));
        assert_eq!(bank.len(), 2);

        bank.clear();
        assert!(bank.is_empty());
    }

    #[test]
    fn test_bank_reset_all_keeps_tallies() {
        let mut bank = TallyBank::new();
        let mut tally = Tally::new("flux", 1);
        tally.score(0, 2.0);
        bank.add(tally);

        bank.reset_all();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.iter().next().unwrap().results, vec![0.0]);
    }
}
