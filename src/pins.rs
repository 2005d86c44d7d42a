//! Pin assignments for the two circuits under test
//!
//! An assignment maps each logical signal to a GPIO line. It is fixed once
//! built; [`AdderPins::validate`] and [`GatePins::validate`] enforce that no
//! line is used for two signals, so the output and input sets stay disjoint.

use crate::error::TesterError;
use crate::gpio::{Direction, Pin};
use std::collections::BTreeSet;

/// Pins wired to a 1-bit full adder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdderPins {
    /// Driven: adder input A
    pub a: Pin,
    /// Driven: adder input B
    pub b: Pin,
    /// Driven: adder carry-in
    pub carry_in: Pin,
    /// Read: adder sum output
    pub sum: Pin,
    /// Read: adder carry-out
    pub carry_out: Pin,
}

impl AdderPins {
    /// Pins driven by the tester, in `(A, B, Cin)` order
    pub fn outputs(&self) -> [Pin; 3] {
        [self.a, self.b, self.carry_in]
    }

    /// Pins read by the tester, in `(Cout, Sum)` order
    pub fn inputs(&self) -> [Pin; 2] {
        [self.carry_out, self.sum]
    }

    /// Every pin with the direction it is claimed in
    pub fn directions(&self) -> impl Iterator<Item = (Pin, Direction)> {
        let outputs = self.outputs().into_iter().map(|p| (p, Direction::Output));
        let inputs = self.inputs().into_iter().map(|p| (p, Direction::Input));
        outputs.chain(inputs)
    }

    /// Check that no pin is assigned to more than one signal
    pub fn validate(&self) -> Result<(), TesterError> {
        ensure_distinct(self.directions().map(|(p, _)| p))
    }
}

/// Pins wired to an unknown 2-input gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePins {
    /// Driven: gate input A
    pub a: Pin,
    /// Driven: gate input B
    pub b: Pin,
    /// Read: gate output
    pub out: Pin,
}

impl GatePins {
    /// Every pin with the direction it is claimed in
    pub fn directions(&self) -> [(Pin, Direction); 3] {
        [
            (self.a, Direction::Output),
            (self.b, Direction::Output),
            (self.out, Direction::Input),
        ]
    }

    /// Check that no pin is assigned to more than one signal
    pub fn validate(&self) -> Result<(), TesterError> {
        ensure_distinct(self.directions().into_iter().map(|(p, _)| p))
    }
}

fn ensure_distinct(pins: impl Iterator<Item = Pin>) -> Result<(), TesterError> {
    let mut seen = BTreeSet::new();
    for pin in pins {
        if !seen.insert(pin) {
            return Err(TesterError::PinConflict { pin });
        }
    }
    Ok(())
}
