//! Full-adder verification
//!
//! [`AdderVerifier`] claims five pins, walks the eight rows of
//! [`FULL_ADDER`] in order and compares the `(Cout, Sum)` pair read back from
//! the circuit with the expected one. A mismatching row only marks the report
//! as failed; every row is always driven.
//!
//! # Example
//!
//! ```
//! use logic_tester::gpio::SimulatedGpio;
//! use logic_tester::{AdderPins, AdderVerifier, RunConfig};
//! use std::io;
//!
//! # fn main() -> Result<(), logic_tester::TesterError> {
//! let pins = AdderPins { a: 17, b: 27, carry_in: 22, sum: 23, carry_out: 24 };
//! let mut gpio = SimulatedGpio::full_adder(&pins);
//!
//! let report = {
//!     let mut verifier = AdderVerifier::configure(&mut gpio, pins)?;
//!     verifier.run_all(&RunConfig::default(), &mut io::empty(), &mut io::sink())?
//! };
//! assert!(report.passed());
//! assert_eq!(gpio.release_count(), 1);
//! # Ok(())
//! # }
//! ```

use crate::config::RunConfig;
use crate::error::TesterError;
use crate::gpio::{Gpio, PinGuard};
use crate::pins::AdderPins;
use crate::truth_table::{format_bits, AdderRow, FULL_ADDER};
use std::fmt;
use std::io::{BufRead, Write};

/// Column header printed before the per-row lines
pub const ADDER_HEADER: &str = "(A, B, Cin) : (Cout, S) Result: (Cout, S)";

/// Outcome of driving one truth-table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOutcome {
    /// The row that was driven, with its expected `(Cout, Sum)`
    pub row: AdderRow,
    /// `(Cout, Sum)` read back from the circuit
    pub observed: [bool; 2],
}

impl RowOutcome {
    /// Whether the circuit produced the expected outputs
    pub fn is_match(&self) -> bool {
        self.observed == self.row.outputs
    }
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} Result: {}",
            format_bits(&self.row.inputs),
            format_bits(&self.row.outputs),
            format_bits(&self.observed)
        )
    }
}

/// Result of one full pass over the adder truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdderReport {
    rows: Vec<RowOutcome>,
}

impl AdderReport {
    /// Per-row outcomes in enumeration order
    pub fn rows(&self) -> &[RowOutcome] {
        &self.rows
    }

    /// True iff every row matched
    pub fn passed(&self) -> bool {
        self.rows.iter().all(RowOutcome::is_match)
    }

    /// Number of rows that matched
    pub fn matched(&self) -> usize {
        self.rows.iter().filter(|r| r.is_match()).count()
    }

    /// Rows where the circuit disagreed with the table
    pub fn mismatches(&self) -> impl Iterator<Item = &RowOutcome> {
        self.rows.iter().filter(|r| !r.is_match())
    }

    /// Human-readable verdict line
    pub fn verdict(&self) -> &'static str {
        if self.passed() {
            "Connected circuit is a functional full-adder"
        } else {
            "Connected circuit is NOT a correctly functioning full-adder"
        }
    }
}

/// Drives a full adder through its truth table
///
/// Holds the claimed pins for its whole lifetime; dropping the verifier
/// releases them.
#[derive(Debug)]
pub struct AdderVerifier<'g, G: Gpio + ?Sized> {
    guard: PinGuard<'g, G>,
    pins: AdderPins,
}

impl<'g, G: Gpio + ?Sized> AdderVerifier<'g, G> {
    /// Claim the three driven pins as outputs and the two sampled pins as inputs
    ///
    /// # Errors
    ///
    /// - [`TesterError::PinConflict`] if a pin is assigned twice; nothing is claimed.
    /// - [`TesterError::Configuration`] if the backend refuses a claim. Pins
    ///   claimed before the failure are released before returning.
    pub fn configure(gpio: &'g mut G, pins: AdderPins) -> Result<Self, TesterError> {
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
    pub fn pins(&self) -> &AdderPins {
        &self.pins
    }

    /// Drive `(A, B, Cin)` and sample `(Cout, Sum)`
    pub fn query(&mut self, inputs: [bool; 3]) -> Result<[bool; 2], TesterError> {
        for (pin, level) in self.pins.outputs().into_iter().zip(inputs) {
            log::debug!("write pin {} = {}", pin, level as u8);
            self.guard
                .write(pin, level)
                .map_err(TesterError::Hardware)?;
        }
        let mut observed = [false; 2];
        for (slot, pin) in observed.iter_mut().zip(self.pins.inputs()) {
            *slot = self.guard.read(pin).map_err(TesterError::Hardware)?;
            log::debug!("read pin {} = {}", pin, *slot as u8);
        }
        Ok(observed)
    }

    /// Run all eight rows and collect the outcomes
    ///
    /// With `config.detailed`, writes [`ADDER_HEADER`] and one line per row to
    /// `out`. Between rows the verifier pauses as `config.pacing` says, reading
    /// operator input from `input` in interactive mode.
    ///
    /// # Errors
    ///
    /// A failed pin access aborts the pass with [`TesterError::Hardware`];
    /// a failed write to `out` or read from `input` with [`TesterError::Io`].
    pub fn run_all<R: BufRead, W: Write>(
        &mut self,
        config: &RunConfig,
        input: &mut R,
        out: &mut W,
    ) -> Result<AdderReport, TesterError> {
        log::info!(
            "testing full adder: A={} B={} CIN={} SUM={} COUT={}",
            self.pins.a,
            self.pins.b,
            self.pins.carry_in,
            self.pins.sum,
            self.pins.carry_out
        );
        if config.detailed {
            writeln!(out, "{}", ADDER_HEADER)?;
        }

        let mut rows = Vec::with_capacity(FULL_ADDER.len());
        for (i, row) in FULL_ADDER.iter().enumerate() {
            let observed = self.query(row.inputs)?;
            let outcome = RowOutcome {
                row: *row,
                observed,
            };
            if !outcome.is_match() {
                log::warn!("row mismatch: {}", outcome);
            }
            if config.detailed {
                writeln!(out, "{}", outcome)?;
            }
            rows.push(outcome);

            if i + 1 < FULL_ADDER.len() {
                config.pause(input, out)?;
            }
        }

        let report = AdderReport { rows };
        log::info!("{}/{} rows matched", report.matched(), report.rows.len());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::gpio::SimulatedGpio;
    use std::io::{self, Cursor};

    const PINS: AdderPins = AdderPins {
        a: 2,
        b: 3,
        carry_in: 4,
        sum: 5,
        carry_out: 6,
    };

    #[test]
    fn test_row_display() {
        let outcome = RowOutcome {
            row: FULL_ADDER[3],
            observed: [true, true],
        };
        assert_eq!(outcome.to_string(), "(0, 1, 1) : (1, 0) Result: (1, 1)");
        assert!(!outcome.is_match());
    }

    #[test]
    fn test_query_reads_carry_then_sum() {
        let mut gpio = SimulatedGpio::full_adder(&PINS);
        let mut verifier = AdderVerifier::configure(&mut gpio, PINS).unwrap();
        assert_eq!(verifier.query([true, true, false]).unwrap(), [true, false]);
        assert_eq!(verifier.query([false, false, true]).unwrap(), [false, true]);
    }

    #[test]
    fn test_quiet_run_writes_nothing() {
        let mut gpio = SimulatedGpio::full_adder(&PINS);
        let mut verifier = AdderVerifier::configure(&mut gpio, PINS).unwrap();
        let config = RunConfig {
            detailed: false,
            ..Default::default()
        };
        let mut out = Vec::new();
        let report = verifier
            .run_all(&config, &mut io::empty(), &mut out)
            .unwrap();
        assert!(report.passed());
        assert!(out.is_empty());
    }

    #[test]
    fn test_interactive_prompts_between_rows() {
        let mut gpio = SimulatedGpio::full_adder(&PINS);
        let mut verifier = AdderVerifier::configure(&mut gpio, PINS).unwrap();
        let config = RunConfig {
            pacing: Pacing::Interactive,
            ..Default::default()
        };
        let mut input = Cursor::new("\n".repeat(10));
        let mut out = Vec::new();
        verifier.run_all(&config, &mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(crate::config::INTERACTIVE_PROMPT).count(), 7);
        assert_eq!(input.position(), 7);
    }

    #[test]
    fn test_slow_pacing_uses_interval() {
        let mut gpio = SimulatedGpio::full_adder(&PINS);
        let mut verifier = AdderVerifier::configure(&mut gpio, PINS).unwrap();
        let config = RunConfig {
            pacing: Pacing::Slow,
            slow_interval: std::time::Duration::from_millis(5),
            detailed: false,
        };
        let start = std::time::Instant::now();
        let report = verifier
            .run_all(&config, &mut io::empty(), &mut io::sink())
            .unwrap();
        assert!(report.passed());
        assert!(start.elapsed() >= std::time::Duration::from_millis(35));
    }
}
