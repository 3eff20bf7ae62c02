// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::swap_simulator::topology::Slot;
use miette::Diagnostic;
use thiserror::Error;

/// Errors reported by the simulators.
///
/// An operation that returns one of these errors leaves the simulator
/// untouched. Conditions where there is simply nothing to act upon (no
/// correlated bits to target, no basis change to revert, ...) are not
/// errors and are reported as successful no-ops instead.
#[derive(Clone, Debug, Diagnostic, Error, PartialEq)]
pub enum Error {
    #[error("bit position {index} is out of range for a register of width {width}")]
    #[diagnostic(code("Qreg.Bitstring.IndexOutOfRange"))]
    BitIndexOutOfRange { index: usize, width: usize },

    #[error("qubit index {index} is out of range for a register of {num_qubits} qubits")]
    #[diagnostic(code("Qreg.StateVector.IndexOutOfRange"))]
    QubitIndexOutOfRange { index: usize, num_qubits: usize },

    #[error("bit value {0} is not valid")]
    #[diagnostic(code("Qreg.Bitstring.InvalidBitValue"))]
    #[diagnostic(help("a bit value must be 0 or 1"))]
    InvalidBitValue(i64),

    #[error("angle {0} is not a finite real number")]
    #[diagnostic(code("Qreg.InvalidAngle"))]
    #[diagnostic(help("angles are given in radians, i.e. `rotate(0, 1.2121)`"))]
    InvalidAngle(f64),

    #[error("expected {expected} angle guesses, got {actual}")]
    #[diagnostic(code("Qreg.Tomography.GuessCountMismatch"))]
    GuessCountMismatch { expected: usize, actual: usize },

    #[error("cannot check out {requested} copies, only {available} available")]
    #[diagnostic(code("Qreg.Tomography.InsufficientCopies"))]
    InsufficientCopies { requested: usize, available: usize },

    #[error("no active copies to measure")]
    #[diagnostic(code("Qreg.Tomography.NoActiveCopies"))]
    #[diagnostic(help("check out copies with `allocate` before measuring"))]
    NoActiveCopies,

    #[error("slot {0} is not part of the topology")]
    #[diagnostic(code("Qreg.Topology.UnknownSlot"))]
    UnknownSlot(Slot),

    #[error("slot {1} is not a neighbor of slot {0}")]
    #[diagnostic(code("Qreg.Topology.NotAdjacent"))]
    SlotsNotAdjacent(Slot, Slot),

    #[error("there is no path from slot {0} to slot {1}")]
    #[diagnostic(code("Qreg.Topology.NoPath"))]
    NoPath(Slot, Slot),

    #[error("invalid topology: {0}")]
    #[diagnostic(code("Qreg.Topology.Invalid"))]
    InvalidTopology(String),

    #[error("invalid distribution: {0}")]
    #[diagnostic(code("Qreg.Bitstring.InvalidDistribution"))]
    InvalidDistribution(String),

    #[error("invalid state vector: {0}")]
    #[diagnostic(code("Qreg.StateVector.Invalid"))]
    InvalidStateVector(String),

    #[error("the basis is already at angle {0}")]
    #[diagnostic(code("Qreg.SingleQubit.BasisUnchanged"))]
    BasisUnchanged(f64),

    #[error("the state has no outcome with nonzero probability")]
    #[diagnostic(code("Qreg.DegenerateState"))]
    DegenerateState,

    #[error("invalid configuration: {0}")]
    #[diagnostic(code("Qreg.Config"))]
    Config(String),
}
