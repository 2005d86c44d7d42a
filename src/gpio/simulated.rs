//! In-memory GPIO backend
//!
//! [`SimulatedGpio`] models a circuit as a function from the currently driven
//! output levels to the level seen on an input pin. It keeps the same claim
//! bookkeeping as a real chip (double claims and wrong-direction accesses are
//! rejected) and can inject a failure on the n-th read or write.

use super::{Direction, Gpio, GpioError, Pin};
use crate::pins::{AdderPins, GatePins};
use crate::truth_table::{full_adder, GateKind};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type Circuit = Box<dyn Fn(&BTreeMap<Pin, bool>, Pin) -> bool>;

/// A single pin access recorded by [`SimulatedGpio`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// An output pin was driven to a level
    Write(Pin, bool),
    /// An input pin was sampled and returned a level
    Read(Pin, bool),
}

/// Simulated GPIO chip wired to a user-supplied circuit
pub struct SimulatedGpio {
    circuit: Circuit,
    line_count: Option<Pin>,
    directions: BTreeMap<Pin, Direction>,
    driven: BTreeMap<Pin, bool>,
    events: Vec<SimEvent>,
    reads: usize,
    writes: usize,
    fail_read_at: Option<usize>,
    fail_write_at: Option<usize>,
    release_count: usize,
}

impl SimulatedGpio {
    /// Create a backend whose inputs are computed by `circuit`
    ///
    /// The closure receives the levels of every driven output (undriven
    /// outputs are absent) and the input pin being read.
    pub fn new<F>(circuit: F) -> Self
    where
        F: Fn(&BTreeMap<Pin, bool>, Pin) -> bool + 'static,
    {
        Self {
            circuit: Box::new(circuit),
            line_count: None,
            directions: BTreeMap::new(),
            driven: BTreeMap::new(),
            events: Vec::new(),
            reads: 0,
            writes: 0,
            fail_read_at: None,
            fail_write_at: None,
            release_count: 0,
        }
    }

    /// An ideal full adder wired to `pins`
    pub fn full_adder(pins: &AdderPins) -> Self {
        let pins = *pins;
        Self::new(move |driven, pin| {
            let level = |p: Pin| driven.get(&p).copied().unwrap_or(false);
            let (carry_out, sum) = full_adder(level(pins.a), level(pins.b), level(pins.carry_in));
            if pin == pins.carry_out {
                carry_out
            } else if pin == pins.sum {
                sum
            } else {
                false
            }
        })
    }

    /// A 2-input gate of the given kind wired to `pins`
    pub fn gate(kind: GateKind, pins: &GatePins) -> Self {
        let pins = *pins;
        Self::new(move |driven, pin| {
            let level = |p: Pin| driven.get(&p).copied().unwrap_or(false);
            pin == pins.out && kind.eval(level(pins.a), level(pins.b))
        })
    }

    /// Every input reads `level` regardless of what is driven
    pub fn constant(level: bool) -> Self {
        Self::new(move |_, _| level)
    }

    /// Reject claims on pins at or above `count`, like a chip with that many lines
    pub fn with_line_count(mut self, count: Pin) -> Self {
        self.line_count = Some(count);
        self
    }

    /// Fail the `n`-th read (1-based, counted across the backend's lifetime)
    pub fn fail_read_at(mut self, n: usize) -> Self {
        self.fail_read_at = Some(n);
        self
    }

    /// Fail the `n`-th write (1-based, counted across the backend's lifetime)
    pub fn fail_write_at(mut self, n: usize) -> Self {
        self.fail_write_at = Some(n);
        self
    }

    /// Number of times [`Gpio::release_all`] has been called
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    /// Currently claimed pins and their directions
    pub fn claimed_pins(&self) -> Vec<(Pin, Direction)> {
        self.directions.iter().map(|(&p, &d)| (p, d)).collect()
    }

    /// Every write and read performed so far, in order
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Level currently driven on an output pin
    pub fn driven_level(&self, pin: Pin) -> Option<bool> {
        self.driven.get(&pin).copied()
    }

    fn check(&self, pin: Pin, expected: Direction) -> Result<(), GpioError> {
        match self.directions.get(&pin) {
            None => Err(GpioError::NotClaimed { pin }),
            Some(&d) if d != expected => Err(GpioError::WrongDirection { pin, expected }),
            Some(_) => Ok(()),
        }
    }
}

impl Gpio for SimulatedGpio {
    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), GpioError> {
        if self.line_count.is_some_and(|count| pin >= count) {
            return Err(GpioError::Claim {
                pin,
                direction,
                message: Arc::from("invalid line offset"),
            });
        }
        if self.directions.contains_key(&pin) {
            return Err(GpioError::AlreadyClaimed { pin });
        }
        self.directions.insert(pin, direction);
        if direction == Direction::Output {
            self.driven.insert(pin, false);
        }
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: bool) -> Result<(), GpioError> {
        self.check(pin, Direction::Output)?;
        self.writes += 1;
        if self.fail_write_at == Some(self.writes) {
            return Err(GpioError::Injected {
                operation: "write",
                count: self.writes,
            });
        }
        self.driven.insert(pin, level);
        self.events.push(SimEvent::Write(pin, level));
        Ok(())
    }

    fn read(&mut self, pin: Pin) -> Result<bool, GpioError> {
        self.check(pin, Direction::Input)?;
        self.reads += 1;
        if self.fail_read_at == Some(self.reads) {
            return Err(GpioError::Injected {
                operation: "read",
                count: self.reads,
            });
        }
        let level = (self.circuit)(&self.driven, pin);
        self.events.push(SimEvent::Read(pin, level));
        Ok(level)
    }

    fn release_all(&mut self) {
        self.directions.clear();
        self.driven.clear();
        self.release_count += 1;
    }
}

impl fmt::Debug for SimulatedGpio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedGpio")
            .field("directions", &self.directions)
            .field("driven", &self.driven)
            .field("reads", &self.reads)
            .field("writes", &self.writes)
            .field("release_count", &self.release_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_requires_input_claim() {
        let mut gpio = SimulatedGpio::constant(true);
        assert_eq!(gpio.read(3), Err(GpioError::NotClaimed { pin: 3 }));

        gpio.set_direction(3, Direction::Output).unwrap();
        assert_eq!(
            gpio.read(3),
            Err(GpioError::WrongDirection {
                pin: 3,
                expected: Direction::Input
            })
        );
    }

    #[test]
    fn test_write_requires_output_claim() {
        let mut gpio = SimulatedGpio::constant(false);
        gpio.set_direction(8, Direction::Input).unwrap();
        assert!(matches!(
            gpio.write(8, true),
            Err(GpioError::WrongDirection { pin: 8, .. })
        ));
    }

    #[test]
    fn test_outputs_start_low() {
        let mut gpio = SimulatedGpio::constant(false);
        gpio.set_direction(2, Direction::Output).unwrap();
        assert_eq!(gpio.driven_level(2), Some(false));
    }

    #[test]
    fn test_line_count_rejects_invalid_pin() {
        let mut gpio = SimulatedGpio::constant(false).with_line_count(28);
        assert!(gpio.set_direction(27, Direction::Output).is_ok());
        assert!(matches!(
            gpio.set_direction(28, Direction::Output),
            Err(GpioError::Claim { pin: 28, .. })
        ));
    }

    #[test]
    fn test_injected_read_failure() {
        let mut gpio = SimulatedGpio::constant(true).fail_read_at(2);
        gpio.set_direction(1, Direction::Input).unwrap();
        assert_eq!(gpio.read(1), Ok(true));
        assert_eq!(
            gpio.read(1),
            Err(GpioError::Injected {
                operation: "read",
                count: 2
            })
        );
        assert_eq!(gpio.read(1), Ok(true));
    }

    #[test]
    fn test_release_allows_reclaim() {
        let mut gpio = SimulatedGpio::constant(false);
        gpio.set_direction(4, Direction::Output).unwrap();
        gpio.release_all();
        assert!(gpio.claimed_pins().is_empty());
        assert!(gpio.set_direction(4, Direction::Input).is_ok());
        assert_eq!(gpio.release_count(), 1);
    }

    #[test]
    fn test_gate_circuit() {
        let pins = GatePins { a: 1, b: 2, out: 3 };
        let mut gpio = SimulatedGpio::gate(GateKind::Nand, &pins);
        gpio.set_direction(1, Direction::Output).unwrap();
        gpio.set_direction(2, Direction::Output).unwrap();
        gpio.set_direction(3, Direction::Input).unwrap();
        assert_eq!(gpio.read(3), Ok(true));
        gpio.write(1, true).unwrap();
        gpio.write(2, true).unwrap();
        assert_eq!(gpio.read(3), Ok(false));
        assert_eq!(
            gpio.events(),
            &[
                SimEvent::Read(3, true),
                SimEvent::Write(1, true),
                SimEvent::Write(2, true),
                SimEvent::Read(3, false),
            ]
        );
    }
}
