// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unknown product state that can only be learned by measuring copies
//! of it.


use crate::{
    config::{MAX_QUBITS, SimulatorConfig, TomographyConfig},
    error::Error,
    state_vector::{self, QubitID},
};
use log::debug;
use ndarray::Array1;
use rand::{
    Rng, SeedableRng as _,
    distributions::{Distribution as _, WeightedIndex},
    rngs::StdRng,
};
use std::{collections::BTreeMap, f64::consts::PI};

/// Number of times each outcome index was observed.
pub type Histogram = BTreeMap<usize, usize>;

/// How far a guessed angle is from the actual one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleComparison {
    pub qubit: QubitID,
    pub guess: f64,
    pub actual: f64,
    pub difference_degrees: f64,
}

/// A pool of identical copies of an unknown `n`-qubit product state.
///
/// Each qubit `k` is in the state `cos(θ_k)|0⟩ + sin(θ_k)|1⟩`. Copies are
/// checked out with [`Self::allocate`], optionally rotated, and consumed by
/// [`Self::measure`]. Outcome indices follow the convention of
/// [`crate::state_vector`]: qubit 0 is the most significant bit.
pub struct TomographySimulator<R: Rng = StdRng> {
    num_qubits: usize,
    /// The hidden angle of each qubit.
    thetas: Vec<f64>,
    /// The state every checked out copy starts from. Never modified.
    reference_state: Array1<f64>,
    /// The state of the checked out copies.
    working_state: Array1<f64>,
    /// Copies that can still be checked out.
    available_copies: usize,
    /// Copies checked out and not yet measured.
    active_copies: usize,
    rng: R,
}

impl TomographySimulator<StdRng> {
    /// Creates a simulator from a configuration, drawing the angles from the
    /// configured generator.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, Error> {
        config.validate()?;
        let TomographyConfig {
            num_qubits,
            num_copies,
        } = config.tomography;
        Self::new(num_qubits, num_copies, config.rng())
    }

    pub fn with_seed(num_qubits: usize, num_copies: usize, seed: u64) -> Result<Self, Error> {
        Self::new(num_qubits, num_copies, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TomographySimulator<R> {
    /// Creates `num_copies` copies of a state whose angles are drawn
    /// uniformly from `[0, π]`.
    pub fn new(num_qubits: usize, num_copies: usize, mut rng: R) -> Result<Self, Error> {
        check_num_qubits(num_qubits)?;
        let thetas = (0..num_qubits).map(|_| rng.gen_range(0.0..=PI)).collect();
        Self::with_angles(thetas, num_copies, rng)
    }

    /// Creates `num_copies` copies of the state with the given angles.
    pub fn with_angles(thetas: Vec<f64>, num_copies: usize, rng: R) -> Result<Self, Error> {
        check_num_qubits(thetas.len())?;
        if let Some(theta) = thetas.iter().find(|t| !t.is_finite()) {
            return Err(Error::InvalidAngle(*theta));
        }
        let qubit_states: Vec<_> = thetas.iter().map(|t| state_vector::qubit_state(*t)).collect();
        let reference_state = state_vector::tensor_product_all(&qubit_states);
        debug!(
            "created {num_copies} copies of a {}-qubit system",
            thetas.len()
        );
        Ok(Self {
            num_qubits: thetas.len(),
            working_state: reference_state.clone(),
            reference_state,
            thetas,
            available_copies: num_copies,
            active_copies: 0,
            rng,
        })
    }

    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[must_use]
    pub fn available_copies(&self) -> usize {
        self.available_copies
    }

    #[must_use]
    pub fn active_copies(&self) -> usize {
        self.active_copies
    }

    #[must_use]
    pub fn reference_state(&self) -> &Array1<f64> {
        &self.reference_state
    }

    #[must_use]
    pub fn working_state(&self) -> &Array1<f64> {
        &self.working_state
    }

    /// Checks out `count` fresh copies, discarding any rotation applied to
    /// the previous ones.
    pub fn allocate(&mut self, count: usize) -> Result<(), Error> {
        if count > self.available_copies {
            return Err(Error::InsufficientCopies {
                requested: count,
                available: self.available_copies,
            });
        }
        self.working_state.assign(&self.reference_state);
        self.active_copies = count;
        self.available_copies -= count;
        debug!(
            "checked out {count} copies, {} remaining",
            self.available_copies
        );
        Ok(())
    }

    /// Rotates `qubit` of the checked out copies by `angle` radians.
    ///
    /// The rotation is expanded into the full `2^n x 2^n` operator and
    /// applied as a dense matrix-vector product.
    pub fn rotate(&mut self, qubit: QubitID, angle: f64) -> Result<(), Error> {
        if !angle.is_finite() {
            return Err(Error::InvalidAngle(angle));
        }
        if qubit >= self.num_qubits {
            return Err(Error::QubitIndexOutOfRange {
                index: qubit,
                num_qubits: self.num_qubits,
            });
        }
        let operator =
            state_vector::single_qubit_operator(self.num_qubits, qubit, &state_vector::ry(angle));
        self.working_state = operator.dot(&self.working_state);
        debug!("rotated qubit {qubit} by {angle:.4} radians");
        Ok(())
    }

    /// Measures the checked out copies `shots` times, sampling outcome
    /// indices with weights given by the squared amplitudes. All the
    /// checked out copies are consumed, whatever the number of shots.
    pub fn measure(&mut self, shots: usize) -> Result<Histogram, Error> {
        if self.active_copies == 0 {
            return Err(Error::NoActiveCopies);
        }
        let mut histogram = Histogram::new();
        if shots == 0 {
            self.active_copies = 0;
            return Ok(histogram);
        }
        let weights = state_vector::probabilities(&self.working_state);
        let outcomes = WeightedIndex::new(&weights).map_err(|_| Error::DegenerateState)?;
        self.active_copies = 0;
        for _ in 0..shots {
            *histogram.entry(outcomes.sample(&mut self.rng)).or_default() += 1;
        }
        debug!("measurement results: {histogram:?}");
        Ok(histogram)
    }

    /// Measures each checked out copy once.
    pub fn measure_active(&mut self) -> Result<Histogram, Error> {
        self.measure(self.active_copies)
    }

    /// Reveals the hidden angles next to the given guesses. No copy can be
    /// checked out afterwards.
    pub fn compare(&mut self, guesses: &[f64]) -> Result<Vec<AngleComparison>, Error> {
        if guesses.len() != self.num_qubits {
            return Err(Error::GuessCountMismatch {
                expected: self.num_qubits,
                actual: guesses.len(),
            });
        }
        if let Some(guess) = guesses.iter().find(|g| !g.is_finite()) {
            return Err(Error::InvalidAngle(*guess));
        }
        let comparisons = guesses
            .iter()
            .zip(&self.thetas)
            .enumerate()
            .map(|(qubit, (guess, actual))| AngleComparison {
                qubit,
                guess: *guess,
                actual: *actual,
                difference_degrees: (guess - actual).abs().to_degrees(),
            })
            .collect();
        self.available_copies = 0;
        debug!("angles revealed, no more copies available");
        Ok(comparisons)
    }
}

fn check_num_qubits(num_qubits: usize) -> Result<(), Error> {
    if (1..=MAX_QUBITS).contains(&num_qubits) {
        Ok(())
    } else {
        Err(Error::InvalidStateVector(format!(
            "a register should have between 1 and {MAX_QUBITS} qubits, got {num_qubits}"
        )))
    }
}
