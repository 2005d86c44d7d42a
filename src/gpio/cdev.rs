//! Linux GPIO character-device backend
//!
//! Each claimed pin becomes a line request on the chip, held through the
//! `embedded-hal` pin types from `gpiocdev-embedded-hal`. Dropping a request
//! gives the line back to the kernel, so releasing is just clearing the map.
//! On a Raspberry Pi the line offsets of `/dev/gpiochip0` are the BCM numbers.

use super::{Direction, Gpio, GpioError, Pin};
use embedded_hal::digital::{InputPin as _, OutputPin as _, PinState};
use gpiocdev_embedded_hal::{InputPin, OutputPin};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

enum Line {
    Input(InputPin),
    Output(OutputPin),
}

/// GPIO backend on a `/dev/gpiochipN` device
pub struct CdevGpio {
    chip: PathBuf,
    lines: BTreeMap<Pin, Line>,
}

impl CdevGpio {
    /// Use the given chip; lines are requested lazily by `set_direction`
    pub fn new<P: AsRef<Path>>(chip: P) -> Self {
        Self {
            chip: chip.as_ref().to_path_buf(),
            lines: BTreeMap::new(),
        }
    }

    /// Path of the chip device
    pub fn chip(&self) -> &Path {
        &self.chip
    }
}

fn message(err: impl fmt::Display) -> Arc<str> {
    Arc::from(err.to_string().as_str())
}

fn claim_error(pin: Pin, direction: Direction, err: impl fmt::Display) -> GpioError {
    GpioError::Claim {
        pin,
        direction,
        message: message(err),
    }
}

impl Gpio for CdevGpio {
    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), GpioError> {
        if self.lines.contains_key(&pin) {
            return Err(GpioError::AlreadyClaimed { pin });
        }
        let line = match direction {
            Direction::Input => InputPin::new(&self.chip, pin)
                .map(Line::Input)
                .map_err(|e| claim_error(pin, direction, e))?,
            Direction::Output => OutputPin::new(&self.chip, pin, PinState::Low)
                .map(Line::Output)
                .map_err(|e| claim_error(pin, direction, e))?,
        };
        self.lines.insert(pin, line);
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: bool) -> Result<(), GpioError> {
        match self.lines.get_mut(&pin) {
            Some(Line::Output(line)) => {
                line.set_state(PinState::from(level))
                    .map_err(|e| GpioError::Access {
                        pin,
                        message: message(e),
                    })
            }
            Some(Line::Input(_)) => Err(GpioError::WrongDirection {
                pin,
                expected: Direction::Output,
            }),
            None => Err(GpioError::NotClaimed { pin }),
        }
    }

    fn read(&mut self, pin: Pin) -> Result<bool, GpioError> {
        match self.lines.get_mut(&pin) {
            Some(Line::Input(line)) => line.is_high().map_err(|e| GpioError::Access {
                pin,
                message: message(e),
            }),
            Some(Line::Output(_)) => Err(GpioError::WrongDirection {
                pin,
                expected: Direction::Input,
            }),
            None => Err(GpioError::NotClaimed { pin }),
        }
    }

    fn release_all(&mut self) {
        self.lines.clear();
    }
}

impl fmt::Debug for CdevGpio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdevGpio")
            .field("chip", &self.chip)
            .field("lines", &self.lines.keys().collect::<Vec<_>>())
            .finish()
    }
}
