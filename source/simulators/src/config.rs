// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::error::Error;
use rand::{SeedableRng as _, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Largest register the dense simulators accept. A dense operator for this
/// many qubits already holds 2^20 entries.
pub const MAX_QUBITS: usize = 10;

/// Tolerance used when comparing dense state vectors.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Configuration for all the simulators in this crate.
///
/// This is the format in which the user config files are
/// written. Every section, and every field within a section,
/// may be omitted, in which case the defaults are used.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seed for the random number generator. A fresh entropy-seeded
    /// generator is used when absent.
    pub seed: Option<u64>,
    pub tomography: TomographyConfig,
    pub swap: SwapConfig,
    pub single_qubit: SingleQubitConfig,
}

impl SimulatorConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tomography.validate()?;
        self.swap.validate()?;
        self.single_qubit.validate()
    }

    /// Builds the random number generator described by this configuration.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Parameters of the unknown system handed out by the tomography simulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomographyConfig {
    pub num_qubits: usize,
    pub num_copies: usize,
}

impl TomographyConfig {
    pub const DEFAULT: Self = Self {
        num_qubits: 2,
        num_copies: 1000,
    };

    pub fn validate(&self) -> Result<(), Error> {
        if (1..=MAX_QUBITS).contains(&self.num_qubits) {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "`tomography.num_qubits` should be between 1 and {MAX_QUBITS}, got {}",
                self.num_qubits
            )))
        }
    }
}

impl Default for TomographyConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Largest per-amplitude difference tolerated by the post-swap check.
    pub tolerance: f64,
}

impl SwapConfig {
    pub const DEFAULT: Self = Self {
        tolerance: DEFAULT_TOLERANCE,
    };

    pub fn validate(&self) -> Result<(), Error> {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "`swap.tolerance` should be a non-negative number, got {}",
                self.tolerance
            )))
        }
    }
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleQubitConfig {
    /// Initial angle of the qubit, in radians.
    pub initial_angle: f64,
}

impl SingleQubitConfig {
    pub const DEFAULT: Self = Self { initial_angle: 0.0 };

    pub fn validate(&self) -> Result<(), Error> {
        if self.initial_angle.is_finite() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "`single_qubit.initial_angle` should be finite, got {}",
                self.initial_angle
            )))
        }
    }
}

impl Default for SingleQubitConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
