// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::Error;
use rustc_hash::FxHashMap;
use std::{fmt, str::FromStr};

/// A fixed-length sequence of bits. Position 0 is the leftmost bit, which
/// is also the first character of the textual form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bitstring(Vec<bool>);

impl Bitstring {
    #[must_use]
    pub fn new(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<bool> {
        self.0.get(position).copied()
    }

    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Returns a copy with the bit at `position` inverted.
    #[must_use]
    pub fn flipped(&self, position: usize) -> Self {
        let mut bits = self.0.clone();
        bits[position] = !bits[position];
        Self(bits)
    }

    /// Returns a copy extended on the right by `bit`.
    #[must_use]
    pub fn pushed(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(bit);
        Self(bits)
    }

    /// Returns a copy with the bit at `position` dropped.
    #[must_use]
    pub fn without(&self, position: usize) -> Self {
        let mut bits = self.0.clone();
        bits.remove(position);
        Self(bits)
    }
}

impl FromStr for Bitstring {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(Error::InvalidDistribution(format!(
                    "invalid bitstring character `{c}` in `{s}`"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A mapping from bitstrings to weights.
///
/// Inserting a bitstring that is already present adds the new weight to
/// the existing one instead of replacing it. Every structural operation
/// of the bitstring simulator relies on this to merge outcomes that
/// collide after the operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    weights: FxHashMap<Bitstring, f64>,
}

impl Distribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the entry for `bitstring`, inserting it if absent.
    pub fn accumulate(&mut self, bitstring: Bitstring, weight: f64) {
        *self.weights.entry(bitstring).or_insert(0.0) += weight;
    }

    /// The weight of `bitstring`, zero if it is absent.
    #[must_use]
    pub fn weight(&self, bitstring: &Bitstring) -> f64 {
        self.weights.get(bitstring).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, bitstring: &Bitstring) -> bool {
        self.weights.contains_key(bitstring)
    }

    /// Number of distinct bitstrings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of bitstrings with nonzero weight.
    #[must_use]
    pub fn support_len(&self) -> usize {
        self.weights.values().filter(|w| **w > 0.0).count()
    }

    /// Length of the bitstrings, `None` for an empty distribution.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.weights.keys().next().map(Bitstring::len)
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Bitstring, f64)> {
        self.weights.iter().map(|(k, w)| (k, *w))
    }

    /// Entries sorted by bitstring.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&Bitstring, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Rewrites every bitstring with `f`, accumulating the weights of the
    /// bitstrings that map onto the same result.
    #[must_use]
    pub fn map_bitstrings(&self, f: impl Fn(&Bitstring) -> Bitstring) -> Self {
        let mut mapped = Self::new();
        for (bitstring, weight) in self.iter() {
            mapped.accumulate(f(bitstring), weight);
        }
        mapped
    }

    /// Like [`Self::map_bitstrings`], but each bitstring is rewritten into
    /// several weighted bitstrings.
    #[must_use]
    pub fn flat_map_bitstrings<I>(&self, f: impl Fn(&Bitstring, f64) -> I) -> Self
    where
        I: IntoIterator<Item = (Bitstring, f64)>,
    {
        let mut mapped = Self::new();
        for (bitstring, weight) in self.iter() {
            for (new_bitstring, new_weight) in f(bitstring, weight) {
                mapped.accumulate(new_bitstring, new_weight);
            }
        }
        mapped
    }
}

impl FromIterator<(Bitstring, f64)> for Distribution {
    fn from_iter<T: IntoIterator<Item = (Bitstring, f64)>>(iter: T) -> Self {
        let mut distribution = Self::new();
        for (bitstring, weight) in iter {
            distribution.accumulate(bitstring, weight);
        }
        distribution
    }
}

/// One `0.25 <0110>` line per bitstring, sorted by bitstring.
impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (bitstring, weight) in self.sorted() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{weight:.2} <{bitstring}>")?;
        }
        Ok(())
    }
}
