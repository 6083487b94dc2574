//! Crossover operators.
//!
//! Parents are paired cyclically, not at random: offspring `i` is bred
//! from `parents[i mod P]` and `parents[(i + 1) mod P]`. The first parent
//! is always the base copy; the operator decides which positions come from
//! the second.
//!
//! - [`SinglePoint`]: tail from parent2 starting at a random split
//! - [`TwoPoints`]: segment `[p1, p2)` from parent2
//! - [`UniformCrossover`]: each position from parent2 with probability 0.5

use super::error::GaError;
use super::types::Genotype;
use rand::seq::index;
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Crossover operator identifier, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
    #[default]
    SinglePoint,
    TwoPoints,
    Uniform,
}

impl CrossoverKind {
    pub fn name(self) -> &'static str {
        match self {
            CrossoverKind::SinglePoint => "single_point",
            CrossoverKind::TwoPoints => "two_points",
            CrossoverKind::Uniform => "uniform",
        }
    }

    /// Resolves the identifier into an operator.
    pub fn build(self) -> Box<dyn CrossoverStrategy> {
        match self {
            CrossoverKind::SinglePoint => Box::new(SinglePoint),
            CrossoverKind::TwoPoints => Box::new(TwoPoints),
            CrossoverKind::Uniform => Box::new(UniformCrossover),
        }
    }
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrossoverKind {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_point" => Ok(CrossoverKind::SinglePoint),
            "two_points" => Ok(CrossoverKind::TwoPoints),
            "uniform" => Ok(CrossoverKind::Uniform),
            other => Err(GaError::config(format!("unknown crossover type '{other}'"))),
        }
    }
}

/// Recombines parents into offspring.
pub trait CrossoverStrategy {
    /// Operator name used in run summaries.
    fn name(&self) -> &'static str;

    /// Breeds one child from a parent pair.
    fn cross(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        rng: &mut dyn RngCore,
    ) -> Result<Genotype, GaError>;

    /// Produces exactly `offspring_count` children of length `genome_length`
    /// using cyclic parent pairing.
    fn combine(
        &self,
        parents: &[Genotype],
        offspring_count: usize,
        genome_length: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Genotype>, GaError> {
        if offspring_count == 0 {
            return Ok(Vec::new());
        }
        if parents.is_empty() {
            return Err(GaError::operator(self.name(), "no parents to recombine"));
        }
        if let Some(bad) = parents.iter().find(|p| p.len() != genome_length) {
            return Err(GaError::InvalidGenotype {
                expected: genome_length,
                found: bad.len(),
            });
        }

        let p = parents.len();
        (0..offspring_count)
            .map(|i| self.cross(&parents[i % p], &parents[(i + 1) % p], rng))
            .collect()
    }
}

/// Single-point crossover.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePoint;

impl SinglePoint {
    /// `parent1[..split]` followed by `parent2[split..]`.
    pub fn child_at(
        parent1: &Genotype,
        parent2: &Genotype,
        split: usize,
    ) -> Result<Genotype, GaError> {
        parent1.blend(parent2, |i| i >= split)
    }
}

impl CrossoverStrategy for SinglePoint {
    fn name(&self) -> &'static str {
        CrossoverKind::SinglePoint.name()
    }

    fn cross(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        rng: &mut dyn RngCore,
    ) -> Result<Genotype, GaError> {
        if parent1.is_empty() {
            return Err(GaError::operator(self.name(), "empty genotype"));
        }
        let split = rng.random_range(0..parent1.len());
        Self::child_at(parent1, parent2, split)
    }
}

/// Two-point crossover.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPoints;

impl TwoPoints {
    /// `parent1` with `[start, end)` replaced by `parent2`'s segment.
    ///
    /// `start == end` leaves `parent1` unchanged.
    pub fn child_between(
        parent1: &Genotype,
        parent2: &Genotype,
        start: usize,
        end: usize,
    ) -> Result<Genotype, GaError> {
        parent1.blend(parent2, |i| start <= i && i < end)
    }
}

impl CrossoverStrategy for TwoPoints {
    fn name(&self) -> &'static str {
        CrossoverKind::TwoPoints.name()
    }

    fn cross(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        rng: &mut dyn RngCore,
    ) -> Result<Genotype, GaError> {
        let n = parent1.len();
        if n < 2 {
            return Err(GaError::operator(
                self.name(),
                format!("genome length {n} is too short for two cut points"),
            ));
        }
        let picked = index::sample(rng, n, 2);
        let (a, b) = (picked.index(0), picked.index(1));
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self::child_between(parent1, parent2, start, end)
    }
}

/// Uniform crossover.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCrossover;

impl CrossoverStrategy for UniformCrossover {
    fn name(&self) -> &'static str {
        CrossoverKind::Uniform.name()
    }

    fn cross(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        rng: &mut dyn RngCore,
    ) -> Result<Genotype, GaError> {
        parent1.blend(parent2, |_| rng.random_bool(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::random::create_rng;
    use proptest::prelude::*;

    fn real(v: &[f64]) -> Genotype {
        Genotype::Real(v.to_vec())
    }

    #[test]
    fn test_single_point_extremes() {
        let p1 = real(&[1.0, 2.0, 3.0, 4.0]);
        let p2 = real(&[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(SinglePoint::child_at(&p1, &p2, 0).unwrap(), p2);
        assert_eq!(SinglePoint::child_at(&p1, &p2, 4).unwrap(), p1);
        assert_eq!(
            SinglePoint::child_at(&p1, &p2, 2).unwrap(),
            real(&[1.0, 2.0, 7.0, 8.0])
        );
    }

    #[test]
    fn test_two_points_segment() {
        let p1 = Genotype::Binary(vec![0; 6]);
        let p2 = Genotype::Binary(vec![1; 6]);
        assert_eq!(
            TwoPoints::child_between(&p1, &p2, 1, 4).unwrap(),
            Genotype::Binary(vec![0, 1, 1, 1, 0, 0])
        );
        assert_eq!(TwoPoints::child_between(&p1, &p2, 3, 3).unwrap(), p1);
    }

    #[test]
    fn test_two_points_needs_two_genes() {
        let mut rng = create_rng(42);
        let p = real(&[1.0]);
        assert!(TwoPoints.cross(&p, &p, &mut rng).is_err());
    }

    #[test]
    fn test_uniform_mixes_parents() {
        let mut rng = create_rng(42);
        let p1 = Genotype::Binary(vec![0; 200]);
        let p2 = Genotype::Binary(vec![1; 200]);
        let child = UniformCrossover.cross(&p1, &p2, &mut rng).unwrap();
        let ones = child.as_bits().unwrap().iter().filter(|&&b| b == 1).count();
        assert!(ones > 70 && ones < 130, "expected ~50% from parent2, got {ones}");
    }

    #[test]
    fn test_combine_count_and_length() {
        let mut rng = create_rng(42);
        let parents = vec![real(&[0.0, 0.0, 0.0]), real(&[1.0, 1.0, 1.0])];
        for kind in [
            CrossoverKind::SinglePoint,
            CrossoverKind::TwoPoints,
            CrossoverKind::Uniform,
        ] {
            let op = kind.build();
            let kids = op.combine(&parents, 7, 3, &mut rng).unwrap();
            assert_eq!(kids.len(), 7, "{}", op.name());
            assert!(kids.iter().all(|k| k.len() == 3));
        }
    }

    #[test]
    fn test_combine_pairs_cyclically() {
        // With one gene, single-point always splits at 0: child == parent2,
        // which for offspring i is parents[(i + 1) mod P].
        let mut rng = create_rng(42);
        let parents = vec![real(&[0.0]), real(&[1.0]), real(&[2.0])];
        let kids = SinglePoint.combine(&parents, 5, 1, &mut rng).unwrap();
        let firsts: Vec<f64> = kids.iter().map(|k| k.as_real().unwrap()[0]).collect();
        assert_eq!(firsts, vec![1.0, 2.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_combine_errors() {
        let mut rng = create_rng(42);
        assert!(SinglePoint.combine(&[], 3, 2, &mut rng).is_err());
        assert!(SinglePoint.combine(&[], 0, 2, &mut rng).unwrap().is_empty());
        let parents = vec![real(&[0.0, 1.0])];
        assert!(matches!(
            SinglePoint.combine(&parents, 1, 3, &mut rng),
            Err(GaError::InvalidGenotype { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_kind_registry() {
        assert_eq!(
            "two_points".parse::<CrossoverKind>().unwrap(),
            CrossoverKind::TwoPoints
        );
        assert!("scattered".parse::<CrossoverKind>().is_err());
    }

    proptest! {
        #[test]
        fn prop_two_points_keeps_outside_of_segment(
            len in 2usize..32,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let p1 = Genotype::Binary(vec![0; len]);
            let p2 = Genotype::Binary(vec![1; len]);
            let child = TwoPoints.cross(&p1, &p2, &mut rng).unwrap();
            let bits = child.as_bits().unwrap();
            // Ones form one contiguous run (possibly empty) that never
            // reaches the last position, since the segment end is exclusive.
            let first = bits.iter().position(|&b| b == 1);
            let last = bits.iter().rposition(|&b| b == 1);
            if let (Some(f), Some(l)) = (first, last) {
                prop_assert!(bits[f..=l].iter().all(|&b| b == 1));
            }
            prop_assert_eq!(bits[len - 1], 0);
        }
    }
}
