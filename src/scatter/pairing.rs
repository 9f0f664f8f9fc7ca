//! Pairing generation.
//!
//! A [`PairingPlan`] holds two permutations of `0..len`:
//! - `association[p]` is the target index that receives point `p`
//! - `timing[p]` is the time slot at which that pairing is keyed
//!
//! The two are drawn from separate generators so that shuffling one never
//! disturbs the other.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// One point-to-target-to-time association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pairing {
    pub point: usize,
    pub target: usize,
    pub slot: usize,
}

/// Seeds for the association and timing shuffles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleSeeds {
    pub association: u64,
    pub timing: u64,
}

impl ShuffleSeeds {
    /// Expands one user seed into two unrelated sub-seeds.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut master = StdRng::seed_from_u64(seed);
        Self {
            association: master.random(),
            timing: master.random(),
        }
    }

    /// Draws two fresh seeds from the thread-local generator.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            association: rand::random(),
            timing: rand::random(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairingPlan {
    association: Vec<usize>,
    timing: Vec<usize>,
}

impl PairingPlan {
    /// Both permutations are the identity: point `i` goes to target `i` at slot `i`.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            association: (0..len).collect(),
            timing: (0..len).collect(),
        }
    }

    /// Builds a plan, shuffling each permutation only when its flag is set.
    #[must_use]
    pub fn generate(
        len: usize,
        shuffle_association: bool,
        shuffle_timing: bool,
        seeds: ShuffleSeeds,
    ) -> Self {
        let association = if shuffle_association {
            shuffled_indices(len, seeds.association)
        } else {
            (0..len).collect()
        };
        let timing = if shuffle_timing {
            shuffled_indices(len, seeds.timing)
        } else {
            (0..len).collect()
        };

        log::debug!("Pairing plan: association={association:?} timing={timing:?}");
        Self {
            association,
            timing,
        }
    }

    /// Builds a plan from explicit permutations.
    ///
    /// Returns `None` unless both vectors have the same length and each is a
    /// permutation of `0..len`.
    #[must_use]
    pub fn from_permutations(association: Vec<usize>, timing: Vec<usize>) -> Option<Self> {
        if association.len() != timing.len()
            || !is_permutation(&association)
            || !is_permutation(&timing)
        {
            return None;
        }
        Some(Self {
            association,
            timing,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.association.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.association.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn association(&self) -> &[usize] {
        &self.association
    }

    #[inline]
    #[must_use]
    pub fn timing(&self) -> &[usize] {
        &self.timing
    }

    /// Pairings in natural point order.
    pub fn pairings(&self) -> impl Iterator<Item = Pairing> + '_ {
        self.association
            .iter()
            .zip(&self.timing)
            .enumerate()
            .map(|(point, (&target, &slot))| Pairing {
                point,
                target,
                slot,
            })
    }
}

/// Uniform Fisher-Yates shuffle of `0..len`.
fn shuffled_indices(len: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let j = rng.random_range(0..=i);
        indices.swap(i, j);
    }
    indices
}

/// Every value in `0..values.len()` appears exactly once.
#[must_use]
pub fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &v in values {
        match seen.get_mut(v) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
