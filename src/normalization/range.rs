/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Closed energy intervals used to select pre- and post-edge points

use crate::spectrum::SpectrumPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed interval `[start, end]` in eV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRange {
    pub start: f64,
    pub end: f64,
}

impl EnergyRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, energy: f64) -> bool {
        energy >= self.start && energy <= self.end
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Energy spans of the first `pre_count` and last `post_count` points
    ///
    /// `sorted` must be ordered by energy. Counts are clamped to the number of
    /// points; a count of zero yields `None` for that edge.
    pub fn from_edge_counts(
        sorted: &[SpectrumPoint],
        pre_count: usize,
        post_count: usize,
    ) -> (Option<EnergyRange>, Option<EnergyRange>) {
        let n = sorted.len();
        let pre_count = pre_count.min(n);
        let post_count = post_count.min(n);

        let pre = (pre_count > 0)
            .then(|| EnergyRange::new(sorted[0].energy, sorted[pre_count - 1].energy));
        let post = (post_count > 0)
            .then(|| EnergyRange::new(sorted[n - post_count].energy, sorted[n - 1].energy));
        (pre, post)
    }
}

impl fmt::Display for EnergyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] eV", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder(n: usize) -> Vec<SpectrumPoint> {
        (0..n)
            .map(|i| SpectrumPoint::new(280.0 + i as f64, 1.0))
            .collect()
    }

    #[test]
    fn test_contains_is_closed() {
        let range = EnergyRange::new(280.0, 285.0);
        assert!(range.contains(280.0));
        assert!(range.contains(285.0));
        assert!(!range.contains(285.0001));
        assert!(!range.contains(f64::NAN));
        assert_eq!(range.span(), 5.0);
    }

    #[test]
    fn test_from_edge_counts() {
        let points = ladder(10);
        let (pre, post) = EnergyRange::from_edge_counts(&points, 3, 2);
        assert_eq!(pre, Some(EnergyRange::new(280.0, 282.0)));
        assert_eq!(post, Some(EnergyRange::new(288.0, 289.0)));
    }

    #[test]
    fn test_from_edge_counts_clamps() {
        let points = ladder(4);
        let (pre, post) = EnergyRange::from_edge_counts(&points, 0, 100);
        assert_eq!(pre, None);
        assert_eq!(post, Some(EnergyRange::new(280.0, 283.0)));

        let (pre, post) = EnergyRange::from_edge_counts(&[], 5, 5);
        assert_eq!((pre, post), (None, None));
    }
}
