//! Error types for the circuit testers
//!
//! A mismatched adder row and an unrecognised gate pattern are results, not
//! errors. What remains here is the fatal set: a pin that cannot be claimed,
//! a pin assignment that reuses a line, a hardware access that fails mid-run
//! and operator I/O.

use crate::gpio::{GpioError, Pin};
use std::fmt;
use std::io;

/// The main error type for the testers
#[derive(Debug)]
pub enum TesterError {
    /// A pin could not be claimed in the requested direction
    ///
    /// Raised while configuring a verifier; no row has been driven yet.
    Configuration(GpioError),

    /// The same pin was assigned to two signals
    PinConflict {
        /// The pin that appears more than once
        pin: Pin,
    },

    /// Writing or reading a claimed pin failed during enumeration
    Hardware(GpioError),

    /// Reading operator input or writing the report failed
    Io(io::Error),
}

impl fmt::Display for TesterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TesterError::Configuration(err) => write!(f, "Pin configuration failed: {}", err),
            TesterError::PinConflict { pin } => write!(
                f,
                "GPIO pin {} is assigned to more than one signal",
                pin
            ),
            TesterError::Hardware(err) => write!(f, "Hardware access failed: {}", err),
            TesterError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TesterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TesterError::Configuration(err) | TesterError::Hardware(err) => Some(err),
            TesterError::Io(err) => Some(err),
            TesterError::PinConflict { .. } => None,
        }
    }
}

impl From<io::Error> for TesterError {
    fn from(err: io::Error) -> Self {
        TesterError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_configuration_display() {
        let err = TesterError::Configuration(GpioError::AlreadyClaimed { pin: 12 });
        let msg = err.to_string();
        assert!(msg.starts_with("Pin configuration failed"));
        assert!(msg.contains("pin 12"));
    }

    #[test]
    fn test_pin_conflict_display() {
        let err = TesterError::PinConflict { pin: 9 };
        assert_eq!(
            err.to_string(),
            "GPIO pin 9 is assigned to more than one signal"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed");
        let err: TesterError = io_err.into();
        assert!(err.to_string().contains("stdin closed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_hardware_source() {
        let err = TesterError::Hardware(GpioError::NotClaimed { pin: 3 });
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("GPIO pin 3 has not been claimed"));
    }
}
