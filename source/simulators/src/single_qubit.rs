// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::{config::SimulatorConfig, error::Error};
use log::debug;
use rand::{Rng, SeedableRng as _, rngs::StdRng};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Two basis angles closer than this are considered the same basis.
const BASIS_TOLERANCE: f64 = 1e-9;

/// A measurement reference frame: the direction read as |0⟩ and the
/// perpendicular one read as |1⟩.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub angle: f64,
    pub perpendicular: f64,
}

impl Basis {
    #[must_use]
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            perpendicular: angle + FRAC_PI_2,
        }
    }
}

/// `(p0, p1)` pairs for the current basis and the one before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasisProbabilities {
    pub previous: (f64, f64),
    pub current: (f64, f64),
}

/// A single qubit drawn as an arrow on the unit circle.
///
/// The qubit is `cos(θ)|0⟩ + sin(θ)|1⟩`, where θ is the angle of the
/// arrow measured from the current basis and kept in `[0, 2π)`. Every
/// angle the qubit has been in is recorded, and basis changes re-express
/// that whole history in the new basis.
pub struct SingleQubit<R: Rng = StdRng> {
    theta: f64,
    history: Vec<f64>,
    bases: Vec<Basis>,
    rng: R,
}

impl SingleQubit<StdRng> {
    pub fn with_seed(theta: f64, seed: u64) -> Result<Self, Error> {
        Self::new(theta, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &SimulatorConfig) -> Result<Self, Error> {
        config.validate()?;
        Self::new(config.single_qubit.initial_angle, config.rng())
    }
}

impl<R: Rng> SingleQubit<R> {
    pub fn new(theta: f64, rng: R) -> Result<Self, Error> {
        let theta = normalize(check_angle(theta)?);
        Ok(Self {
            theta,
            history: vec![theta],
            bases: vec![Basis::new(0.0)],
            rng,
        })
    }

    /// The current angle, in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.theta
    }

    /// Every angle the qubit has been in, expressed in the current basis.
    #[must_use]
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// The bases applied so far, oldest first.
    #[must_use]
    pub fn bases(&self) -> &[Basis] {
        &self.bases
    }

    #[must_use]
    pub fn basis(&self) -> Basis {
        *self.bases.last().expect("there should be at least one basis")
    }

    pub fn rotate(&mut self, angle: f64) -> Result<(), Error> {
        self.set_angle(self.theta + check_angle(angle)?);
        Ok(())
    }

    /// Reflects the arrow across the line at angle `axis`.
    pub fn reflect(&mut self, axis: f64) -> Result<(), Error> {
        self.set_angle(2.0 * check_angle(axis)? - self.theta);
        Ok(())
    }

    fn set_angle(&mut self, theta: f64) {
        self.theta = normalize(theta);
        self.history.push(self.theta);
        debug!("qubit moved to {:.4} radians", self.theta);
    }

    /// The probabilities `(p0, p1)` of measuring |0⟩ and |1⟩.
    #[must_use]
    pub fn probabilities(&self) -> (f64, f64) {
        probabilities(self.theta)
    }

    /// Measures `shots` copies of the qubit and counts the outcomes.
    pub fn measure(&mut self, shots: usize) -> [usize; 2] {
        let (p0, _) = self.probabilities();
        let mut counts = [0, 0];
        for _ in 0..shots {
            let sample: f64 = self.rng.gen_range(0.0..1.0);
            counts[usize::from(sample >= p0)] += 1;
        }
        counts
    }

    /// Moves the reference frame to `angle`, re-expressing the whole
    /// history relative to it. Angles are compared modulo 2π, so a full
    /// turn away from the current basis is the same basis.
    pub fn change_basis(&mut self, angle: f64) -> Result<(), Error> {
        let angle = check_angle(angle)?;
        let current = self.basis().angle;
        let difference = normalize(angle - current);
        if difference < BASIS_TOLERANCE || TAU - difference < BASIS_TOLERANCE {
            return Err(Error::BasisUnchanged(angle));
        }
        self.shift_history(current - angle);
        self.bases.push(Basis::new(angle));
        debug!("basis changed from {current:.4} to {angle:.4} radians");
        Ok(())
    }

    /// Undoes the last basis change. Returns `false`, changing nothing,
    /// when no basis change is left to undo.
    pub fn revert_basis_change(&mut self) -> bool {
        if self.bases.len() < 2 {
            return false;
        }
        let current = self.bases.pop().expect("there should be a basis to revert");
        self.shift_history(current.angle - self.basis().angle);
        debug!("basis change to {:.4} radians reverted", current.angle);
        true
    }

    /// The probabilities of the current state read in the current basis
    /// and in the one before it. `None` if the basis was never changed.
    #[must_use]
    pub fn probabilities_in_both_bases(&self) -> Option<BasisProbabilities> {
        let [.., previous, current] = self.bases.as_slice() else {
            return None;
        };
        let previous_theta = normalize(self.theta + current.angle - previous.angle);
        Some(BasisProbabilities {
            previous: probabilities(previous_theta),
            current: self.probabilities(),
        })
    }

    fn shift_history(&mut self, shift: f64) {
        for angle in &mut self.history {
            *angle = normalize(*angle + shift);
        }
        self.theta = *self.history.last().expect("history should not be empty");
    }
}

fn probabilities(theta: f64) -> (f64, f64) {
    let p0 = theta.cos().powi(2);
    (p0, 1.0 - p0)
}

fn check_angle(angle: f64) -> Result<f64, Error> {
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(Error::InvalidAngle(angle))
    }
}

/// Reduces `angle` into `[0, 2π)`.
fn normalize(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // `rem_euclid` may round up to the modulus itself.
    if reduced >= TAU { 0.0 } else { reduced }
}
