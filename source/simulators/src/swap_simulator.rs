// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Moves qubits around a register with limited connectivity.


pub mod topology;

use crate::{
    config::{DEFAULT_TOLERANCE, SimulatorConfig},
    error::Error,
    state_vector::{self, ONE, QubitID, QubitState, ZERO},
};
use log::{debug, trace, warn};
use ndarray::Array1;
use topology::{Slot, Topology};

/// A register of product-state qubits laid out on a [`Topology`].
///
/// The simulator keeps two views of the register: the single-qubit state
/// held by each slot, and the dense state vector of the whole register.
/// The dense vector uses the slot order of the topology, the first slot
/// being the most significant qubit.
pub struct SwapSimulator {
    topology: Topology,
    /// The state held by each slot, in topology order.
    slot_states: Vec<QubitState>,
    /// The dense state of the whole register.
    state: Array1<f64>,
    /// Largest per-amplitude difference tolerated when verifying a swap.
    tolerance: f64,
}

impl SwapSimulator {
    /// Creates a register where slot `i` of `topology` holds `slot_states[i]`.
    pub fn new(topology: Topology, slot_states: Vec<QubitState>) -> Result<Self, Error> {
        if slot_states.len() != topology.len() {
            return Err(Error::InvalidStateVector(format!(
                "expected {} slot states, got {}",
                topology.len(),
                slot_states.len()
            )));
        }
        let state = state_vector::tensor_product_all(&slot_states);
        Ok(Self {
            topology,
            slot_states,
            state,
            tolerance: DEFAULT_TOLERANCE,
        })
    }

    /// The default seven-slot register, with slots alternating between
    /// |0⟩ and |1⟩ starting from |0⟩.
    #[must_use]
    pub fn default_register() -> Self {
        let topology = Topology::default_register();
        let slot_states = (0..topology.len())
            .map(|i| if i % 2 == 0 { ZERO } else { ONE })
            .collect();
        Self::new(topology, slot_states).expect("default register should be valid")
    }

    /// The default register, verified with the configured tolerance.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::default_register().with_tolerance(config.swap.tolerance))
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn state(&self) -> &Array1<f64> {
        &self.state
    }

    #[must_use]
    pub fn slot_states(&self) -> &[QubitState] {
        &self.slot_states
    }

    pub fn slot_state(&self, slot: Slot) -> Result<QubitState, Error> {
        Ok(self.slot_states[self.topology.index_of(slot)?])
    }

    /// Applies a controlled flip to the dense state. Qubits are given by
    /// their index in the topology order.
    ///
    /// Only the dense state changes; the slot states are left as they are.
    pub fn controlled_flip(&mut self, control: QubitID, target: QubitID) -> Result<(), Error> {
        let num_qubits = self.topology.len();
        for index in [control, target] {
            if index >= num_qubits {
                return Err(Error::QubitIndexOutOfRange { index, num_qubits });
            }
        }
        self.state = state_vector::controlled_flip(&self.state, num_qubits, control, target);
        Ok(())
    }

    /// Exchanges the qubits of two neighboring slots.
    ///
    /// The exchange is carried out on the dense state as three controlled
    /// flips. The dense state is then rebuilt from the exchanged slot states
    /// and compared with the flipped one. Returns whether both agreed; a
    /// disagreement is logged but the swap is not undone.
    pub fn swap_adjacent(&mut self, a: Slot, b: Slot) -> Result<bool, Error> {
        let a_index = self.topology.index_of(a)?;
        let b_index = self.topology.index_of(b)?;
        if !self.topology.are_adjacent(a, b) {
            return Err(Error::SlotsNotAdjacent(a, b));
        }

        let num_qubits = self.topology.len();
        let flipped = [(a_index, b_index), (b_index, a_index), (a_index, b_index)]
            .into_iter()
            .fold(self.state.clone(), |state, (control, target)| {
                state_vector::controlled_flip(&state, num_qubits, control, target)
            });

        self.slot_states.swap(a_index, b_index);
        self.state = state_vector::tensor_product_all(&self.slot_states);

        let verified = state_vector::approx_eq(&flipped, &self.state, self.tolerance);
        if verified {
            debug!("swapped the qubits of slots {a} and {b}");
        } else {
            warn!("swapping the qubits of slots {a} and {b} did not preserve the product state");
        }
        Ok(verified)
    }

    /// Exchanges the qubits of any two slots.
    ///
    /// The qubit of `x` is walked along a shortest path to `y` one neighbor
    /// swap at a time, then the qubit that ended up next to `y` is walked
    /// back to `x`, returning every slot in between to its original qubit.
    /// Returns whether every neighbor swap was verified.
    pub fn swap(&mut self, x: Slot, y: Slot) -> Result<bool, Error> {
        let path = self.topology.shortest_path(x, y)?;
        if x == y {
            return Ok(true);
        }
        trace!("routing swap of {x} and {y} along {path:?}");

        let mut verified = true;
        for hop in path.windows(2) {
            verified &= self.swap_adjacent(hop[0], hop[1])?;
        }
        for hop in path[..path.len() - 1].windows(2).rev() {
            verified &= self.swap_adjacent(hop[1], hop[0])?;
        }
        Ok(verified)
    }

    /// Whether the dense state matches the tensor product of the slot states.
    #[must_use]
    pub fn verify_state(&self) -> bool {
        let expected = state_vector::tensor_product_all(&self.slot_states);
        state_vector::approx_eq(&self.state, &expected, self.tolerance)
    }
}
