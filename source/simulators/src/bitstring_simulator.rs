// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! A classical model of correlations in a small register, tracking
//! only the probability of each bitstring.


pub mod distribution;

use crate::error::Error;
use distribution::{Bitstring, Distribution};
use log::debug;
use rand::{Rng, SeedableRng as _, rngs::StdRng, seq::SliceRandom as _};
use std::fmt;

/// Total weight tolerance for a distribution to be accepted as a state.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// The value of a bit appended to the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitValue {
    Zero,
    One,
    /// An even superposition of zero and one.
    Superposed,
}

impl TryFrom<i64> for BitValue {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            _ => Err(Error::InvalidBitValue(value)),
        }
    }
}

/// A register whose state is a probability distribution over bitstrings.
///
/// Bit positions are numbered from the left: position 0 is the first bit
/// of every bitstring, and new bits are appended on the right.
pub struct BitstringSimulator<R: Rng = StdRng> {
    /// The probability of each bitstring. The weights add up to 1.
    distribution: Distribution,
    /// Source for every random choice the simulator makes.
    rng: R,
}

impl BitstringSimulator<StdRng> {
    /// Creates a one-bit register seeded with `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BitstringSimulator<R> {
    /// Creates a one-bit register in an even superposition of `0` and `1`.
    pub fn new(rng: R) -> Self {
        let distribution = [
            (Bitstring::new(vec![false]), 0.5),
            (Bitstring::new(vec![true]), 0.5),
        ]
        .into_iter()
        .collect();
        Self { distribution, rng }
    }

    /// Creates a register in the given state.
    ///
    /// The bitstrings must all have the same length and the weights must be
    /// non-negative and add up to 1.
    pub fn from_distribution(distribution: Distribution, rng: R) -> Result<Self, Error> {
        let Some(width) = distribution.width() else {
            return Err(Error::InvalidDistribution(
                "a state needs at least one bitstring".to_string(),
            ));
        };
        if let Some((bitstring, _)) = distribution.iter().find(|(b, _)| b.len() != width) {
            return Err(Error::InvalidDistribution(format!(
                "bitstring <{bitstring}> does not have width {width}"
            )));
        }
        if let Some((bitstring, weight)) = distribution
            .iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(Error::InvalidDistribution(format!(
                "bitstring <{bitstring}> has invalid weight {weight}"
            )));
        }
        let total = distribution.total_weight();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::InvalidDistribution(format!(
                "weights add up to {total} instead of 1"
            )));
        }
        Ok(Self { distribution, rng })
    }

    #[must_use]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Number of bit positions in the register.
    #[must_use]
    pub fn width(&self) -> usize {
        self.distribution.width().unwrap_or_default()
    }

    /// The probability of observing `bitstring`.
    #[must_use]
    pub fn probability(&self, bitstring: &Bitstring) -> f64 {
        self.distribution.weight(bitstring)
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.distribution.total_weight()
    }

    /// Appends a bit on the right of every bitstring.
    ///
    /// A fixed value extends each bitstring with its weight unchanged. A
    /// superposed bit splits each weight evenly between both extensions.
    pub fn add_bit(&mut self, value: BitValue) {
        self.distribution = match value {
            BitValue::Zero => self.distribution.map_bitstrings(|b| b.pushed(false)),
            BitValue::One => self.distribution.map_bitstrings(|b| b.pushed(true)),
            BitValue::Superposed => self.distribution.flat_map_bitstrings(|b, w| {
                [(b.pushed(false), w * 0.5), (b.pushed(true), w * 0.5)]
            }),
        };
        debug!("added {value:?} bit, width is now {}", self.width());
    }

    /// Appends a bit whose value, 0 or 1, is picked at random.
    pub fn add_random_bit(&mut self) -> BitValue {
        let value = if self.rng.gen_bool(0.5) {
            BitValue::One
        } else {
            BitValue::Zero
        };
        self.add_bit(value);
        value
    }

    /// Inverts the bit at `position` in every bitstring.
    pub fn flip_bit(&mut self, position: usize) -> Result<(), Error> {
        self.check_position(position)?;
        self.distribution = self.distribution.map_bitstrings(|b| b.flipped(position));
        debug!("flipped bit {position}");
        Ok(())
    }

    /// Inverts the `target` bit of every bitstring whose `control` bit is 1.
    pub fn controlled_flip(&mut self, control: usize, target: usize) -> Result<(), Error> {
        self.check_position(control)?;
        self.check_position(target)?;
        self.distribution = self.distribution.map_bitstrings(|b| {
            if b.get(control) == Some(true) {
                b.flipped(target)
            } else {
                b.clone()
            }
        });
        debug!("controlled flip with control {control} and target {target}");
        Ok(())
    }

    /// Applies a controlled flip between two random positions, which may be
    /// the same position. Returns the `(control, target)` pair used.
    ///
    /// Nothing happens when the state holds a single possible bitstring.
    pub fn random_controlled_flip(&mut self) -> Option<(usize, usize)> {
        let width = self.width();
        if self.distribution.support_len() <= 1 || width == 0 {
            return None;
        }
        let control = self.rng.gen_range(0..width);
        let target = self.rng.gen_range(0..width);
        self.controlled_flip(control, target)
            .expect("random positions should be within the register");
        Some((control, target))
    }

    /// Whether the bit at `position` takes both values across the
    /// bitstrings with nonzero probability.
    pub fn is_correlated(&self, position: usize) -> Result<bool, Error> {
        self.check_position(position)?;
        Ok(self.is_correlated_unchecked(position))
    }

    fn is_correlated_unchecked(&self, position: usize) -> bool {
        let mut values = self
            .distribution
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .map(|(b, _)| b.get(position));
        match values.next() {
            Some(first) => values.any(|value| value != first),
            None => false,
        }
    }

    /// Positions holding the same value in every possible bitstring.
    #[must_use]
    pub fn uncorrelated_positions(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|p| !self.is_correlated_unchecked(*p))
            .collect()
    }

    /// Positions whose value varies between possible bitstrings.
    #[must_use]
    pub fn correlated_positions(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|p| self.is_correlated_unchecked(*p))
            .collect()
    }

    /// Couples every uncorrelated position to a random correlated one by
    /// applying a controlled flip with the uncorrelated position as control.
    /// Returns the `(control, target)` pairs applied.
    ///
    /// Nothing happens when no position is correlated.
    pub fn create_correlations(&mut self) -> Vec<(usize, usize)> {
        let uncorrelated = self.uncorrelated_positions();
        let correlated = self.correlated_positions();
        let mut applied = Vec::with_capacity(uncorrelated.len());
        for control in uncorrelated {
            let Some(&target) = correlated.choose(&mut self.rng) else {
                break;
            };
            self.controlled_flip(control, target)
                .expect("positions should be within the register");
            applied.push((control, target));
        }
        applied
    }

    /// Marginalizes out the bit at `position`, adding together the weights
    /// of the bitstrings that become identical.
    ///
    /// Removing a correlated bit discards information; callers should only
    /// remove positions reported by [`Self::uncorrelated_positions`].
    pub fn remove_bit(&mut self, position: usize) -> Result<(), Error> {
        self.check_position(position)?;
        self.distribution = self.distribution.map_bitstrings(|b| b.without(position));
        debug!("removed bit {position}, width is now {}", self.width());
        Ok(())
    }

    /// Removes one uncorrelated bit picked at random and returns its position.
    ///
    /// Nothing happens when the state holds a single possible bitstring or when every
    /// position is correlated.
    pub fn remove_one_uncorrelated_bit(&mut self) -> Option<usize> {
        if self.distribution.support_len() <= 1 {
            return None;
        }
        let position = *self.uncorrelated_positions().choose(&mut self.rng)?;
        self.remove_bit(position)
            .expect("uncorrelated position should be within the register");
        Some(position)
    }

    /// Removes every uncorrelated bit and returns the removed positions,
    /// numbered as they were before any removal.
    ///
    /// Nothing happens when the state holds a single possible bitstring.
    pub fn remove_all_uncorrelated_bits(&mut self) -> Vec<usize> {
        let mut removed = Vec::new();
        if self.distribution.support_len() <= 1 {
            return removed;
        }
        // Highest first, so pending positions keep their numbering.
        for position in self.uncorrelated_positions().into_iter().rev() {
            self.remove_bit(position)
                .expect("uncorrelated position should be within the register");
            removed.push(position);
            if self.distribution.support_len() <= 1 {
                break;
            }
        }
        removed.reverse();
        removed
    }

    fn check_position(&self, index: usize) -> Result<(), Error> {
        let width = self.width();
        if index < width {
            Ok(())
        } else {
            Err(Error::BitIndexOutOfRange { index, width })
        }
    }
}

impl<R: Rng> fmt::Display for BitstringSimulator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.distribution, f)
    }
}
