//! 2-input gate identification
//!
//! [`GateClassifier`] drives the four `(A, B)` rows of [`GATE_INPUTS`],
//! gathers the sampled outputs into a 4-bit pattern and looks it up among
//! the six simple gates. A pattern that matches nothing is an ordinary
//! [`GateIdentity::Unknown`] result.

use crate::error::TesterError;
use crate::gpio::{Gpio, PinGuard};
use crate::pins::GatePins;
use crate::truth_table::{format_bits, GateKind, GATE_INPUTS};
use std::fmt;

/// What the classifier concluded about the circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateIdentity {
    /// The pattern is the signature of a known gate
    Known(GateKind),
    /// The pattern matched no known gate
    Unknown {
        /// Outputs observed for rows `(0,0)`, `(0,1)`, `(1,0)`, `(1,1)`
        pattern: [bool; 4],
    },
}

impl GateIdentity {
    /// Classify an observed pattern
    pub fn from_pattern(pattern: [bool; 4]) -> Self {
        match GateKind::from_pattern(pattern) {
            Some(gate) => GateIdentity::Known(gate),
            None => GateIdentity::Unknown { pattern },
        }
    }

    /// The identified gate, if any
    pub fn gate(&self) -> Option<GateKind> {
        match self {
            GateIdentity::Known(gate) => Some(*gate),
            GateIdentity::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for GateIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateIdentity::Known(gate) => write!(f, "{}", gate),
            GateIdentity::Unknown { .. } => f.write_str("UNKNOWN"),
        }
    }
}

/// Identifies the gate wired between two driven pins and one sampled pin
#[derive(Debug)]
pub struct GateClassifier<'g, G: Gpio + ?Sized> {
    guard: PinGuard<'g, G>,
    pins: GatePins,
}

impl<'g, G: Gpio + ?Sized> GateClassifier<'g, G> {
    /// Claim A and B as outputs and OUT as an input
    ///
    /// Fails the same way as [`AdderVerifier::configure`](crate::AdderVerifier::configure).
    pub fn configure(gpio: &'g mut G, pins: GatePins) -> Result<Self, TesterError> {
        pins.validate()?;
        let mut guard = PinGuard::new(gpio);
        for (pin, direction) in pins.directions() {
            guard
                .claim(pin, direction)
                .map_err(TesterError::Configuration)?;
        }
        Ok(Self { guard, pins })
    }

    /// The pin assignment in use
    pub fn pins(&self) -> &GatePins {
        &self.pins
    }

    /// Drive `(A, B)` and sample the gate output
    pub fn query(&mut self, a: bool, b: bool) -> Result<bool, TesterError> {
        self.guard
            .write(self.pins.a, a)
            .map_err(TesterError::Hardware)?;
        self.guard
            .write(self.pins.b, b)
            .map_err(TesterError::Hardware)?;
        let level = self
            .guard
            .read(self.pins.out)
            .map_err(TesterError::Hardware)?;
        log::debug!("A={} B={} -> OUT={}", a as u8, b as u8, level as u8);
        Ok(level)
    }

    /// Sample the four rows in order and return the observed pattern
    pub fn sample(&mut self) -> Result<[bool; 4], TesterError> {
        let mut pattern = [false; 4];
        for (slot, [a, b]) in pattern.iter_mut().zip(GATE_INPUTS) {
            *slot = self.query(a, b)?;
        }
        Ok(pattern)
    }

    /// Sample the gate and classify it
    ///
    /// An unrecognised pattern is logged and returned as
    /// [`GateIdentity::Unknown`]; only pin access failures are errors.
    pub fn identify(&mut self) -> Result<GateIdentity, TesterError> {
        log::info!(
            "identifying gate: A={} B={} OUT={}",
            self.pins.a,
            self.pins.b,
            self.pins.out
        );
        let identity = GateIdentity::from_pattern(self.sample()?);
        match identity {
            GateIdentity::Known(gate) => log::info!("identified {} gate", gate),
            GateIdentity::Unknown { pattern } => {
                log::warn!("unknown truth table result of: {}", format_bits(&pattern))
            }
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::SimulatedGpio;

    const PINS: GatePins = GatePins {
        a: 17,
        b: 27,
        out: 22,
    };

    #[test]
    fn test_identity_display() {
        assert_eq!(GateIdentity::Known(GateKind::Nor).to_string(), "NOR");
        let unknown = GateIdentity::Unknown {
            pattern: [true; 4],
        };
        assert_eq!(unknown.to_string(), "UNKNOWN");
        assert_eq!(unknown.gate(), None);
    }

    #[test]
    fn test_identifies_every_gate() {
        for kind in GateKind::ALL {
            let mut gpio = SimulatedGpio::gate(kind, &PINS);
            let mut classifier = GateClassifier::configure(&mut gpio, PINS).unwrap();
            assert_eq!(classifier.identify().unwrap(), GateIdentity::Known(kind));
        }
    }

    #[test]
    fn test_follower_is_unknown() {
        // OUT wired straight to A
        let mut gpio = SimulatedGpio::new(|driven, _| driven.get(&17).copied().unwrap_or(false));
        let mut classifier = GateClassifier::configure(&mut gpio, PINS).unwrap();
        assert_eq!(
            classifier.identify().unwrap(),
            GateIdentity::Unknown {
                pattern: [false, false, true, true]
            }
        );
    }
}
