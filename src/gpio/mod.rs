//! GPIO access layer
//!
//! The verifiers never touch hardware directly. They are handed a [`Gpio`]
//! implementation, which keeps the process-wide hardware context explicit and
//! lets tests substitute the [`SimulatedGpio`] backend for a real board.
//!
//! Pin ownership is scoped by [`PinGuard`]: every pin claimed through a guard
//! is released exactly once, when the guard is dropped, whether the run
//! finished normally or bailed out with an error.
//!
//! # Example
//!
//! ```
//! use logic_tester::gpio::{Direction, Gpio, PinGuard, SimulatedGpio};
//!
//! # fn main() -> Result<(), logic_tester::gpio::GpioError> {
//! // A wire from pin 2 to pin 3
//! let mut gpio = SimulatedGpio::new(|driven, _pin| driven.get(&2).copied().unwrap_or(false));
//! {
//!     let mut guard = PinGuard::new(&mut gpio);
//!     guard.claim(2, Direction::Output)?;
//!     guard.claim(3, Direction::Input)?;
//!     guard.write(2, true)?;
//!     assert!(guard.read(3)?);
//! }
//! assert_eq!(gpio.release_count(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

#[cfg(feature = "gpio")]
mod cdev;
mod error;
mod simulated;

#[cfg(feature = "gpio")]
pub use cdev::CdevGpio;
pub use error::GpioError;
pub use simulated::{SimEvent, SimulatedGpio};

/// A GPIO line identifier (BCM number / gpiochip line offset)
pub type Pin = u32;

/// Direction a pin is claimed in, from the program's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Read by the program
    Input,
    /// Driven by the program
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
        }
    }
}

/// Hardware access collaborator
///
/// Implementations own whatever handles the platform needs. `set_direction`
/// claims a pin; `release_all` gives back every pin claimed so far and leaves
/// the backend ready to claim them again.
pub trait Gpio {
    /// Claim `pin` in the given direction
    ///
    /// Outputs start driven low.
    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), GpioError>;

    /// Drive an output pin high (`true`) or low (`false`)
    fn write(&mut self, pin: Pin, level: bool) -> Result<(), GpioError>;

    /// Sample an input pin
    fn read(&mut self, pin: Pin) -> Result<bool, GpioError>;

    /// Release every claimed pin
    fn release_all(&mut self);
}

impl<G: Gpio + ?Sized> Gpio for &mut G {
    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), GpioError> {
        (**self).set_direction(pin, direction)
    }

    fn write(&mut self, pin: Pin, level: bool) -> Result<(), GpioError> {
        (**self).write(pin, level)
    }

    fn read(&mut self, pin: Pin) -> Result<bool, GpioError> {
        (**self).read(pin)
    }

    fn release_all(&mut self) {
        (**self).release_all()
    }
}

/// Scoped pin ownership
///
/// Borrows a [`Gpio`] backend for the lifetime of one test run and calls
/// [`Gpio::release_all`] exactly once on drop. Every other backend method is
/// reachable through `Deref`.
pub struct PinGuard<'a, G: Gpio + ?Sized> {
    gpio: &'a mut G,
    claimed: Vec<(Pin, Direction)>,
}

impl<'a, G: Gpio + ?Sized> PinGuard<'a, G> {
    /// Start a scope on `gpio`; nothing is claimed yet
    pub fn new(gpio: &'a mut G) -> Self {
        Self {
            gpio,
            claimed: Vec::new(),
        }
    }

    /// Claim a pin and remember it for the release log
    pub fn claim(&mut self, pin: Pin, direction: Direction) -> Result<(), GpioError> {
        log::debug!("claiming pin {} as {}", pin, direction);
        self.gpio.set_direction(pin, direction)?;
        self.claimed.push((pin, direction));
        Ok(())
    }

    /// Pins claimed through this guard, in claim order
    pub fn claimed(&self) -> &[(Pin, Direction)] {
        &self.claimed
    }
}

impl<G: Gpio + ?Sized> Deref for PinGuard<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.gpio
    }
}

impl<G: Gpio + ?Sized> DerefMut for PinGuard<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.gpio
    }
}

impl<G: Gpio + ?Sized> Drop for PinGuard<'_, G> {
    fn drop(&mut self) {
        log::debug!("releasing {} claimed pin(s)", self.claimed.len());
        self.gpio.release_all();
    }
}

impl<G: Gpio + ?Sized> fmt::Debug for PinGuard<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinGuard")
            .field("claimed", &self.claimed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_circuit() -> SimulatedGpio {
        SimulatedGpio::new(|_, _| false)
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let mut gpio = open_circuit();
        {
            let mut guard = PinGuard::new(&mut gpio);
            guard.claim(5, Direction::Output).unwrap();
            guard.claim(6, Direction::Input).unwrap();
            assert_eq!(
                guard.claimed(),
                &[(5, Direction::Output), (6, Direction::Input)]
            );
        }
        assert_eq!(gpio.release_count(), 1);
        assert!(gpio.claimed_pins().is_empty());
    }

    #[test]
    fn test_guard_releases_after_failed_claim() {
        let mut gpio = open_circuit();
        {
            let mut guard = PinGuard::new(&mut gpio);
            guard.claim(5, Direction::Output).unwrap();
            let err = guard.claim(5, Direction::Input).unwrap_err();
            assert_eq!(err, GpioError::AlreadyClaimed { pin: 5 });
        }
        assert_eq!(gpio.release_count(), 1);
    }

    #[test]
    fn test_guard_over_trait_object() {
        let mut gpio = open_circuit();
        {
            let dyn_gpio: &mut dyn Gpio = &mut gpio;
            let mut guard = PinGuard::new(dyn_gpio);
            guard.claim(1, Direction::Output).unwrap();
            guard.write(1, true).unwrap();
        }
        assert_eq!(gpio.release_count(), 1);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Input.to_string(), "input");
        assert_eq!(Direction::Output.to_string(), "output");
    }
}
