// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{
    ONE, ZERO, approx_eq, controlled_flip, kronecker_chain, probabilities, qubit_mask,
    qubit_state, ry, single_qubit_operator, tensor_product, tensor_product_all,
};
use ndarray::{Array1, Array2, array};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const TOLERANCE: f64 = 1e-12;

fn basis_state(num_qubits: usize, index: usize) -> Array1<f64> {
    let mut state = Array1::zeros(1 << num_qubits);
    state[index] = 1.0;
    state
}

#[test]
fn tensor_product_puts_first_factor_in_high_bits() {
    assert_eq!(
        tensor_product(&[1.0, 2.0], &[3.0, 4.0]),
        vec![3.0, 4.0, 6.0, 8.0]
    );
}

#[test]
fn tensor_product_of_angles_selects_cos_and_sin() {
    let state = tensor_product_all(&[qubit_state(0.0), qubit_state(FRAC_PI_2)]);
    assert!(approx_eq(&state, &array![0.0, 1.0, 0.0, 0.0], TOLERANCE));
}

#[test]
fn tensor_product_of_three_angles_matches_product_formula() {
    let thetas = [0.3, 1.1, 2.5];
    let states: Vec<_> = thetas.iter().map(|t| qubit_state(*t)).collect();
    let state = tensor_product_all(&states);
    for index in 0..8 {
        let expected: f64 = thetas
            .iter()
            .enumerate()
            .map(|(q, theta)| {
                if index & qubit_mask(3, q) == 0 {
                    theta.cos()
                } else {
                    theta.sin()
                }
            })
            .product();
        assert!((state[index] - expected).abs() < TOLERANCE);
    }
}

#[test]
fn empty_tensor_product_is_scalar_one() {
    assert_eq!(tensor_product_all(&[]), array![1.0]);
}

#[test]
fn kronecker_chain_of_identities_is_identity() {
    let chain = kronecker_chain(&[Array2::eye(2), Array2::eye(2), Array2::eye(2)]);
    assert_eq!(chain, Array2::<f64>::eye(8));
}

#[test]
fn kronecker_chain_places_first_factor_in_outer_blocks() {
    let chain = kronecker_chain(&[array![[0.0, 1.0], [1.0, 0.0]], Array2::eye(2)]);
    let expected = array![
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ];
    assert_eq!(chain, expected);
}

#[test]
fn zero_rotation_operator_is_identity() {
    let operator = single_qubit_operator(3, 1, &ry(0.0));
    assert_eq!(operator, Array2::<f64>::eye(8));
}

#[test]
fn rotation_turns_zero_into_one() {
    let state = tensor_product_all(&[ZERO, ZERO]);
    let rotated = single_qubit_operator(2, 1, &ry(FRAC_PI_2)).dot(&state);
    assert!(approx_eq(&rotated, &basis_state(2, 0b01), TOLERANCE));
}

#[test]
fn rotation_composes_additively() {
    let state = tensor_product_all(&[qubit_state(0.2), qubit_state(0.4)]);
    let once = single_qubit_operator(2, 0, &ry(2.0 * FRAC_PI_4)).dot(&state);
    let twice = {
        let half = single_qubit_operator(2, 0, &ry(FRAC_PI_4));
        half.dot(&half.dot(&state))
    };
    assert!(approx_eq(&once, &twice, TOLERANCE));
    let expected = tensor_product_all(&[qubit_state(0.2 + FRAC_PI_2), qubit_state(0.4)]);
    assert!(approx_eq(&once, &expected, TOLERANCE));
}

#[test]
fn controlled_flip_uses_most_significant_bit_first() {
    let state = tensor_product_all(&[ONE, ZERO, ZERO]);
    assert_eq!(state, basis_state(3, 0b100));
    let flipped = controlled_flip(&state, 3, 0, 2);
    assert_eq!(flipped, basis_state(3, 0b101));
}

#[test]
fn controlled_flip_ignores_zero_control() {
    let state = basis_state(3, 0b010);
    assert_eq!(controlled_flip(&state, 3, 0, 1), state);
}

#[test]
fn three_controlled_flips_swap_two_qubits() {
    let state = tensor_product_all(&[qubit_state(0.3), qubit_state(1.2)]);
    let swapped = controlled_flip(&state, 2, 0, 1);
    let swapped = controlled_flip(&swapped, 2, 1, 0);
    let swapped = controlled_flip(&swapped, 2, 0, 1);
    let expected = tensor_product_all(&[qubit_state(1.2), qubit_state(0.3)]);
    assert!(approx_eq(&swapped, &expected, TOLERANCE));
}

#[test]
fn approx_eq_rejects_length_mismatch() {
    assert!(!approx_eq(&array![1.0], &array![1.0, 0.0], 1.0));
}

#[test]
fn probabilities_are_squared_amplitudes() {
    let p = probabilities(&array![0.6, -0.8]);
    assert!((p[0] - 0.36).abs() < TOLERANCE);
    assert!((p[1] - 0.64).abs() < TOLERANCE);
}
