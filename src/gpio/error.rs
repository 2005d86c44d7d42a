//! Error types for GPIO pin access

use super::{Direction, Pin};
use std::fmt;
use std::sync::Arc;

/// Errors reported by a [`Gpio`](super::Gpio) backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// The pin is already claimed by this process
    AlreadyClaimed {
        /// The pin that was requested twice
        pin: Pin,
    },
    /// The pin was written or read without being claimed first
    NotClaimed {
        /// The unclaimed pin
        pin: Pin,
    },
    /// The pin is claimed in the other direction
    WrongDirection {
        /// The pin that was accessed
        pin: Pin,
        /// The direction the operation needs
        expected: Direction,
    },
    /// The backend refused to claim the pin
    ///
    /// Covers invalid line offsets, lines held by another process and
    /// permission problems on the GPIO character device.
    Claim {
        /// The pin that could not be claimed
        pin: Pin,
        /// The requested direction
        direction: Direction,
        /// Backend error message
        message: Arc<str>,
    },
    /// A write or read on a claimed pin failed
    Access {
        /// The pin being accessed
        pin: Pin,
        /// Backend error message
        message: Arc<str>,
    },
    /// Fault injected by the simulated backend
    Injected {
        /// The operation that failed ("read" or "write")
        operation: &'static str,
        /// 1-based count of that operation when it failed
        count: usize,
    },
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpioError::AlreadyClaimed { pin } => write!(f, "GPIO pin {} is already claimed", pin),
            GpioError::NotClaimed { pin } => write!(f, "GPIO pin {} has not been claimed", pin),
            GpioError::WrongDirection { pin, expected } => write!(
                f,
                "GPIO pin {} is not configured as an {}",
                pin, expected
            ),
            GpioError::Claim {
                pin,
                direction,
                message,
            } => write!(
                f,
                "Cannot claim GPIO pin {} as {}: {}",
                pin, direction, message
            ),
            GpioError::Access { pin, message } => {
                write!(f, "GPIO pin {} access failed: {}", pin, message)
            }
            GpioError::Injected { operation, count } => {
                write!(f, "Injected fault on {} #{}", operation, count)
            }
        }
    }
}

impl std::error::Error for GpioError {}
