// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Small teaching simulators for qubit registers.
//!
//! Each simulator models one idea: a probability map over classical
//! bitstrings, state tomography over copies of a product state, routing
//! swaps over a register with limited connectivity, and a single qubit
//! drawn as an arrow on the unit circle.

pub mod bitstring_simulator;
pub mod config;
pub mod error;
pub mod single_qubit;
pub mod state_vector;
pub mod swap_simulator;
pub mod tomography_simulator;

pub use bitstring_simulator::{
    BitValue, BitstringSimulator,
    distribution::{Bitstring, Distribution},
};
pub use config::SimulatorConfig;
pub use error::Error;
pub use single_qubit::SingleQubit;
pub use state_vector::{QubitID, QubitState};
pub use swap_simulator::{
    SwapSimulator,
    topology::{Slot, Topology},
};
pub use tomography_simulator::TomographySimulator;
