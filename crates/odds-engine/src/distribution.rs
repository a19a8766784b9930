//! Hit-point distributions.
//!
//! An [`HpDistribution`] is a probability vector indexed by remaining hit
//! points, where index 0 means dead. It is the currency passed between the
//! matrix, the combatants, and callers.

use serde::{Deserialize, Serialize};

/// Mass below this is treated as absent when reporting best/worst cases.
pub const NEGLIGIBLE_MASS: f64 = 1e-12;

/// Probability of each possible remaining hp, from 0 (dead) to max hp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HpDistribution(Vec<f64>);

impl HpDistribution {
    /// A distribution with all mass at `hp`.
    ///
    /// # Panics
    ///
    /// Panics if `hp > max_hp`.
    pub fn point(hp: u32, max_hp: u32) -> Self {
        assert!(hp <= max_hp, "hp {hp} exceeds max hp {max_hp}");
        let mut dist = Self::zeros(max_hp);
        dist.0[hp as usize] = 1.0;
        dist
    }

    /// A distribution with no mass anywhere, sized for `max_hp`.
    pub fn zeros(max_hp: u32) -> Self {
        Self(vec![0.0; max_hp as usize + 1])
    }

    /// Wrap a probability vector. Index `i` is the chance of ending with `i` hp.
    ///
    /// # Panics
    ///
    /// Panics if `probabilities` is empty.
    pub fn from_probabilities(probabilities: Vec<f64>) -> Self {
        assert!(
            !probabilities.is_empty(),
            "a distribution needs at least the dead entry"
        );
        Self(probabilities)
    }

    /// The highest hp this distribution can represent.
    pub fn max_hp(&self) -> u32 {
        (self.0.len() - 1) as u32
    }

    /// Probability of ending with exactly `hp`. Zero when out of range.
    pub fn probability(&self, hp: u32) -> f64 {
        self.0.get(hp as usize).copied().unwrap_or(0.0)
    }

    /// The raw probabilities, indexed by hp.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate `(hp, probability)` pairs in ascending hp order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0.iter().enumerate().map(|(hp, &p)| (hp as u32, p))
    }

    /// Sum of all entries. One for a well-formed distribution, up to drift.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Whether the total lies within `tolerance` of one.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total() - 1.0).abs() <= tolerance
    }

    /// Probability of being dead (hp 0).
    pub fn chance_to_kill(&self) -> f64 {
        self.0[0]
    }

    /// Probability of having any hp left.
    pub fn survival_probability(&self) -> f64 {
        self.0[1..].iter().sum()
    }

    /// Expected remaining hp, counting death as zero.
    pub fn average_hp(&self) -> f64 {
        self.iter().map(|(hp, p)| f64::from(hp) * p).sum()
    }

    /// Lowest hp with non-negligible probability.
    pub fn worst_case_hp(&self) -> Option<u32> {
        self.iter()
            .find(|&(_, p)| p > NEGLIGIBLE_MASS)
            .map(|(hp, _)| hp)
    }

    /// Highest hp with non-negligible probability.
    pub fn best_case_hp(&self) -> Option<u32> {
        (0..=self.max_hp())
            .rev()
            .find(|&hp| self.probability(hp) > NEGLIGIBLE_MASS)
    }

    /// Add another distribution of the same size into this one, entry by entry.
    ///
    /// # Panics
    ///
    /// Panics if the two distributions have different max hp.
    pub fn accumulate(&mut self, other: &HpDistribution) {
        self.accumulate_scaled(other, 1.0);
    }

    /// Weighted sum of same-sized distributions.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is empty or the sizes differ.
    pub fn mix<'a>(parts: impl IntoIterator<Item = (f64, &'a HpDistribution)>) -> Self {
        let mut parts = parts.into_iter().peekable();
        let max_hp = parts
            .peek()
            .map(|(_, d)| d.max_hp())
            .expect("cannot mix zero distributions");
        let mut out = Self::zeros(max_hp);
        for (weight, dist) in parts {
            out.accumulate_scaled(dist, weight);
        }
        out
    }

    pub(crate) fn add_mass(&mut self, hp: usize, mass: f64) {
        self.0[hp] += mass;
    }

    fn accumulate_scaled(&mut self, other: &HpDistribution, weight: f64) {
        assert_eq!(
            self.0.len(),
            other.0.len(),
            "distributions cover different hp ranges"
        );
        for (dst, src) in self.0.iter_mut().zip(&other.0) {
            *dst += weight * src;
        }
    }
}

/// A side's hp distribution split by whether it ended up slowed.
///
/// This is what a fight hands forward when the same combatant engages
/// again later in the turn: the slowed share keeps fighting at half damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HpSummary {
    /// Mass for outcomes where the side is not slowed.
    pub unslowed: HpDistribution,
    /// Mass for outcomes where the side is slowed, if slowing was possible.
    pub slowed: Option<HpDistribution>,
}

impl HpSummary {
    /// A summary with every outcome unslowed.
    pub fn unslowed(dist: HpDistribution) -> Self {
        Self {
            unslowed: dist,
            slowed: None,
        }
    }

    /// The highest hp either variant can represent.
    pub fn max_hp(&self) -> u32 {
        self.unslowed.max_hp()
    }

    /// Combined probability of ending with `hp`, slowed or not.
    pub fn probability(&self, hp: u32) -> f64 {
        self.unslowed.probability(hp) + self.slowed.as_ref().map_or(0.0, |s| s.probability(hp))
    }

    /// Combined probability of being alive.
    pub fn alive_probability(&self) -> f64 {
        self.unslowed.survival_probability()
            + self
                .slowed
                .as_ref()
                .map_or(0.0, HpDistribution::survival_probability)
    }

    /// Combined mass of both variants.
    pub fn total(&self) -> f64 {
        self.unslowed.total() + self.slowed.as_ref().map_or(0.0, HpDistribution::total)
    }

    /// Collapse both variants into one distribution.
    pub fn flatten(&self) -> HpDistribution {
        let mut flat = self.unslowed.clone();
        if let Some(slowed) = &self.slowed {
            flat.accumulate(slowed);
        }
        flat
    }
}

impl std::fmt::Display for HpDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self
            .iter()
            .filter(|&(_, p)| p > NEGLIGIBLE_MASS)
            .map(|(hp, p)| format!("{hp}: {:.2}%", p * 100.0))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn point_mass() {
        let d = HpDistribution::point(7, 10);
        assert_eq!(d.max_hp(), 10);
        assert_eq!(d.as_slice().len(), 11);
        assert!((d.probability(7) - 1.0).abs() < EPS);
        assert!(d.is_normalized(EPS));
        assert_eq!(d.worst_case_hp(), Some(7));
        assert_eq!(d.best_case_hp(), Some(7));
    }

    #[test]
    #[should_panic(expected = "exceeds max hp")]
    fn point_above_max_panics() {
        let _ = HpDistribution::point(11, 10);
    }

    #[test]
    fn summary_statistics() {
        let d = HpDistribution::from_probabilities(vec![0.25, 0.0, 0.5, 0.25]);
        assert!((d.chance_to_kill() - 0.25).abs() < EPS);
        assert!((d.survival_probability() - 0.75).abs() < EPS);
        assert!((d.average_hp() - 1.75).abs() < EPS);
        assert_eq!(d.worst_case_hp(), Some(0));
        assert_eq!(d.best_case_hp(), Some(3));
    }

    #[test]
    fn out_of_range_probability_is_zero() {
        let d = HpDistribution::point(2, 3);
        assert_eq!(d.probability(9), 0.0);
    }

    #[test]
    fn mix_weights_parts() {
        let a = HpDistribution::point(0, 2);
        let b = HpDistribution::point(2, 2);
        let m = HpDistribution::mix([(0.3, &a), (0.7, &b)]);
        assert!((m.probability(0) - 0.3).abs() < EPS);
        assert!((m.probability(2) - 0.7).abs() < EPS);
        assert!(m.is_normalized(EPS));
    }

    #[test]
    #[should_panic(expected = "different hp ranges")]
    fn accumulate_rejects_size_mismatch() {
        let mut a = HpDistribution::zeros(3);
        a.accumulate(&HpDistribution::zeros(4));
    }

    #[test]
    fn summary_flattens_both_variants() {
        let summary = HpSummary {
            unslowed: HpDistribution::from_probabilities(vec![0.1, 0.2, 0.3]),
            slowed: Some(HpDistribution::from_probabilities(vec![0.0, 0.25, 0.15])),
        };
        let flat = summary.flatten();
        assert!((flat.probability(1) - 0.45).abs() < EPS);
        assert!((summary.alive_probability() - 0.9).abs() < EPS);
        assert!((summary.total() - 1.0).abs() < EPS);
        assert!((summary.probability(2) - 0.45).abs() < EPS);
    }

    #[test]
    fn display_skips_empty_entries() {
        let d = HpDistribution::from_probabilities(vec![0.5, 0.0, 0.5]);
        assert_eq!(d.to_string(), "{0: 50.00%, 2: 50.00%}");
    }
}
