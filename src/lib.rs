//! # Logic Tester
//!
//! Exercise small combinational circuits wired to a single-board computer's
//! GPIO pins and compare what they do against a truth table.
//!
//! ## Overview
//!
//! Two checks are provided, each with its own command-line front end:
//!
//! - **Full adder verification** ([`AdderVerifier`]) drives A, B and carry-in
//!   through all eight combinations and checks the sum and carry-out lines.
//! - **Gate identification** ([`GateClassifier`]) drives A and B through all
//!   four combinations and names the gate from the observed output pattern:
//!   AND, NAND, OR, NOR, XOR or XNOR.
//!
//! Both follow the same lifecycle: claim the pins, enumerate the rows in a
//! fixed order, then release the pins. Release happens exactly once per
//! run, on every exit path, because claimed pins are owned by a
//! [`PinGuard`](gpio::PinGuard) that releases them on drop.
//!
//! ## Hardware Access
//!
//! Nothing talks to the board directly. The verifiers borrow a
//! [`Gpio`](gpio::Gpio) backend:
//!
//! - [`CdevGpio`](gpio::CdevGpio) uses the Linux GPIO character device
//!   (`gpio` feature, on by default).
//! - [`SimulatedGpio`](gpio::SimulatedGpio) evaluates a circuit in memory
//!   and can inject faults, which is how the test suite runs without hardware.
//!
//! ## Verifying a Full Adder
//!
//! ```
//! use logic_tester::gpio::SimulatedGpio;
//! use logic_tester::{AdderPins, AdderVerifier, RunConfig};
//!
//! # fn main() -> Result<(), logic_tester::TesterError> {
//! let pins = AdderPins { a: 17, b: 27, carry_in: 22, sum: 23, carry_out: 24 };
//! let mut gpio = SimulatedGpio::full_adder(&pins);
//! let mut verifier = AdderVerifier::configure(&mut gpio, pins)?;
//!
//! let mut out = Vec::new();
//! let report = verifier.run_all(&RunConfig::default(), &mut std::io::empty(), &mut out)?;
//! assert!(report.passed());
//! assert!(String::from_utf8_lossy(&out).contains("(1, 1, 1) : (1, 1) Result: (1, 1)"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Identifying a Gate
//!
//! ```
//! use logic_tester::gpio::SimulatedGpio;
//! use logic_tester::{GateClassifier, GateIdentity, GateKind, GatePins};
//!
//! # fn main() -> Result<(), logic_tester::TesterError> {
//! let pins = GatePins { a: 5, b: 6, out: 13 };
//! let mut gpio = SimulatedGpio::gate(GateKind::Xnor, &pins);
//! let mut classifier = GateClassifier::configure(&mut gpio, pins)?;
//!
//! assert_eq!(classifier.identify()?, GateIdentity::Known(GateKind::Xnor));
//! # Ok(())
//! # }
//! ```

pub mod adder;
pub mod config;
pub mod error;
pub mod gate;
pub mod gpio;
pub mod pins;
pub mod truth_table;

pub use adder::{AdderReport, AdderVerifier, RowOutcome};
pub use config::{Pacing, RunConfig};
pub use error::TesterError;
pub use gate::{GateClassifier, GateIdentity};
pub use pins::{AdderPins, GatePins};
pub use truth_table::{GateKind, TruthRow, FULL_ADDER, GATE_INPUTS};
