// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Basis, SingleQubit, normalize};
use crate::{config::SimulatorConfig, error::Error};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI, TAU};

const TOLERANCE: f64 = 1e-9;

fn qubit(theta: f64) -> SingleQubit {
    SingleQubit::with_seed(theta, 21).expect("angle should be valid")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn initial_angle_is_reduced_modulo_two_pi() {
    assert_close(qubit(-FRAC_PI_2).angle(), 3.0 * FRAC_PI_2);
    assert_close(qubit(TAU + 1.0).angle(), 1.0);
    assert_close(qubit(TAU).angle(), 0.0);
}

#[test]
fn normalize_never_returns_two_pi() {
    assert!(normalize(-1e-18) < TAU);
}

#[test]
fn non_finite_angles_are_rejected() {
    assert!(matches!(
        SingleQubit::with_seed(f64::NAN, 0),
        Err(Error::InvalidAngle(_))
    ));
    let mut qubit = qubit(0.0);
    assert!(matches!(
        qubit.rotate(f64::INFINITY),
        Err(Error::InvalidAngle(_))
    ));
    assert_eq!(qubit.history().len(), 1);
}

#[test]
fn rotations_are_recorded() {
    let mut qubit = qubit(0.0);
    qubit.rotate(FRAC_PI_3).expect("rotation should succeed");
    qubit.rotate(2.0 * PI).expect("rotation should succeed");
    assert_close(qubit.angle(), FRAC_PI_3);
    assert_eq!(qubit.history().len(), 3);
    assert_close(qubit.history()[0], 0.0);
}

#[test]
fn reflection_mirrors_across_the_axis() {
    let mut qubit = qubit(FRAC_PI_3);
    qubit.reflect(FRAC_PI_4).expect("reflection should succeed");
    assert_close(qubit.angle(), FRAC_PI_6);
}

#[test]
fn probabilities_follow_the_arrow() {
    let (p0, p1) = qubit(FRAC_PI_3).probabilities();
    assert_close(p0, 0.25);
    assert_close(p1, 0.75);
}

#[test]
fn basis_states_always_measure_the_same() {
    assert_eq!(qubit(0.0).measure(100), [100, 0]);
    assert_eq!(qubit(PI).measure(100), [100, 0]);
}

#[test]
fn measurement_counts_every_shot() {
    let counts = qubit(FRAC_PI_4).measure(2000);
    assert_eq!(counts[0] + counts[1], 2000);
    assert!((800..=1200).contains(&counts[0]), "got {counts:?}");
}

#[test]
fn changing_to_the_same_basis_is_an_error() {
    let mut qubit = qubit(FRAC_PI_3);
    assert_eq!(qubit.change_basis(0.0), Err(Error::BasisUnchanged(0.0)));
    assert_eq!(qubit.bases().len(), 1);
}

#[test]
fn a_full_turn_is_the_same_basis() {
    let mut qubit = qubit(FRAC_PI_3);
    assert_eq!(qubit.change_basis(TAU), Err(Error::BasisUnchanged(TAU)));
    assert_eq!(qubit.change_basis(-TAU), Err(Error::BasisUnchanged(-TAU)));
    assert_eq!(qubit.bases().len(), 1);
    assert_close(qubit.angle(), FRAC_PI_3);
}

#[test]
fn basis_change_re_expresses_the_history() {
    let mut qubit = qubit(0.0);
    qubit.rotate(FRAC_PI_3).expect("rotation should succeed");
    qubit.change_basis(FRAC_PI_2).expect("basis change should succeed");
    assert_close(qubit.angle(), 11.0 * FRAC_PI_6);
    assert_close(qubit.history()[0], 3.0 * FRAC_PI_2);
    assert_eq!(qubit.basis(), Basis::new(FRAC_PI_2));
    assert_close(qubit.basis().perpendicular, PI);
}

#[test]
fn probabilities_in_both_bases_require_a_basis_change() {
    let mut qubit = qubit(FRAC_PI_3);
    assert!(qubit.probabilities_in_both_bases().is_none());
    qubit.change_basis(FRAC_PI_2).expect("basis change should succeed");
    let probabilities = qubit
        .probabilities_in_both_bases()
        .expect("there should be two bases");
    assert_close(probabilities.previous.0, 0.25);
    assert_close(probabilities.current.0, 0.75);
    assert_close(probabilities.current.1, 0.25);
}

#[test]
fn reverting_restores_the_previous_basis() {
    let mut qubit = qubit(0.0);
    qubit.rotate(FRAC_PI_3).expect("rotation should succeed");
    qubit.change_basis(FRAC_PI_2).expect("basis change should succeed");
    qubit.change_basis(PI).expect("basis change should succeed");
    assert_close(qubit.angle(), 4.0 * FRAC_PI_3);

    assert!(qubit.revert_basis_change());
    assert_close(qubit.angle(), 11.0 * FRAC_PI_6);
    assert!(qubit.revert_basis_change());
    assert_close(qubit.angle(), FRAC_PI_3);
    assert_eq!(qubit.history().len(), 2);
    assert_eq!(qubit.bases().len(), 1);
}

#[test]
fn reverting_without_a_basis_change_is_a_no_op() {
    let mut qubit = qubit(1.0);
    assert!(!qubit.revert_basis_change());
    assert_close(qubit.angle(), 1.0);
}

#[test]
fn from_config_uses_the_initial_angle() {
    let config = SimulatorConfig::from_json(r#"{ "single_qubit": { "initial_angle": -1.0 } }"#)
        .expect("config should parse");
    let qubit = SingleQubit::from_config(&config).expect("qubit should be built");
    assert_close(qubit.angle(), TAU - 1.0);
}
