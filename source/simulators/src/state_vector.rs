// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dense real state vectors and the operators acting on them.
//!
//! Qubit 0 is the most significant bit of a basis index: it is the first
//! factor of every tensor product and Kronecker chain built here. For
//! three qubits, index `0b100` is the basis state where only qubit 0 is one.

#[cfg(test)]
mod tests;

use ndarray::{Array1, Array2, array, linalg::kron};

/// A qubit ID.
pub type QubitID = usize;

/// The real amplitudes `(a0, a1)` of a single qubit.
pub type QubitState = [f64; 2];

/// The basis state |0⟩.
pub const ZERO: QubitState = [1.0, 0.0];

/// The basis state |1⟩.
pub const ONE: QubitState = [0.0, 1.0];

/// The state `cos(theta)|0⟩ + sin(theta)|1⟩`.
#[must_use]
pub fn qubit_state(theta: f64) -> QubitState {
    [theta.cos(), theta.sin()]
}

/// The tensor product `a ⊗ b`, flattened so that the index of `a` is the
/// most significant part of the result index.
#[must_use]
pub fn tensor_product(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter()
        .flat_map(|x| b.iter().map(move |y| x * y))
        .collect()
}

/// The tensor product of the given single-qubit states, in order.
#[must_use]
pub fn tensor_product_all(states: &[QubitState]) -> Array1<f64> {
    let amplitudes = states
        .iter()
        .fold(vec![1.0], |acc, state| tensor_product(&acc, state));
    Array1::from(amplitudes)
}

/// The Kronecker product of the given matrices, in order.
#[must_use]
pub fn kronecker_chain(factors: &[Array2<f64>]) -> Array2<f64> {
    factors
        .iter()
        .fold(array![[1.0]], |acc, factor| kron(&acc, factor))
}

/// A rotation by `angle` in the real plane:
///
/// ```text
/// [cos, -sin;
///  sin,  cos]
/// ```
#[must_use]
pub fn ry(angle: f64) -> Array2<f64> {
    let (sin, cos) = angle.sin_cos();
    array![[cos, -sin], [sin, cos]]
}

/// Expands a 2x2 `gate` acting on `target` into the full
/// `2^num_qubits x 2^num_qubits` operator, with identities on every
/// other qubit.
#[must_use]
pub fn single_qubit_operator(num_qubits: usize, target: QubitID, gate: &Array2<f64>) -> Array2<f64> {
    let factors: Vec<Array2<f64>> = (0..num_qubits)
        .map(|q| {
            if q == target {
                gate.clone()
            } else {
                Array2::eye(2)
            }
        })
        .collect();
    kronecker_chain(&factors)
}

/// The mask selecting `qubit` in a basis index.
#[must_use]
pub fn qubit_mask(num_qubits: usize, qubit: QubitID) -> usize {
    1 << (num_qubits - 1 - qubit)
}

/// Applies a controlled flip to `state` by walking every basis index.
///
/// Each amplitude is added into the index it maps to, so amplitudes whose
/// indices collide are summed.
#[must_use]
pub fn controlled_flip(
    state: &Array1<f64>,
    num_qubits: usize,
    control: QubitID,
    target: QubitID,
) -> Array1<f64> {
    let control_mask = qubit_mask(num_qubits, control);
    let target_mask = qubit_mask(num_qubits, target);
    let mut result = Array1::zeros(state.len());
    for (index, amplitude) in state.iter().enumerate() {
        let mapped = if index & control_mask == 0 {
            index
        } else {
            index ^ target_mask
        };
        result[mapped] += amplitude;
    }
    result
}

/// Whether every amplitude of `a` is within `tolerance` of `b`.
#[must_use]
pub fn approx_eq(a: &Array1<f64>, b: &Array1<f64>, tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance)
}

/// The probability of each basis index, the squared amplitudes.
#[must_use]
pub fn probabilities(state: &Array1<f64>) -> Vec<f64> {
    state.iter().map(|a| a * a).collect()
}
