//! Full Adder Tester - Command Line Interface
//!
//! Drives a 1-bit full adder through its truth table using 5 GPIO pins

use clap::Parser;
use logic_tester::gpio::{CdevGpio, Pin};
use logic_tester::{AdderPins, AdderVerifier, Pacing, RunConfig, TesterError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "full-adder-tester")]
#[command(about = "Test a binary full adder with 5 GPIO pins", long_about = None)]
#[command(version)]
struct Args {
    /// GPIO pin for input A
    #[arg(value_name = "A")]
    a: Pin,

    /// GPIO pin for input B
    #[arg(value_name = "B")]
    b: Pin,

    /// GPIO pin for input CARRY_IN
    #[arg(value_name = "CIN")]
    carry_in: Pin,

    /// GPIO pin for single bit SUM from full adder
    #[arg(value_name = "SUM")]
    sum: Pin,

    /// GPIO pin for CARRY_OUT signal from full adder
    #[arg(value_name = "COUT")]
    carry_out: Pin,

    /// Slowly iterate through each test (1 per second) to watch the output
    /// (useful if logic probes are attached)
    #[arg(short = 's', long = "slow")]
    slow: bool,

    /// Iterate through each test one at a time by pressing ENTER on each one
    /// (useful for testing with logic probes)
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Only print the final verdict
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// GPIO character device the pins belong to
    #[arg(short = 'c', long = "chip", default_value = "/dev/gpiochip0")]
    chip: PathBuf,
}

impl Args {
    fn pins(&self) -> AdderPins {
        AdderPins {
            a: self.a,
            b: self.b,
            carry_in: self.carry_in,
            sum: self.sum,
            carry_out: self.carry_out,
        }
    }

    fn config(&self) -> RunConfig {
        RunConfig {
            pacing: Pacing::from_flags(self.slow, self.interactive),
            detailed: !self.quiet,
            ..Default::default()
        }
    }
}

fn run(args: &Args) -> Result<(), TesterError> {
    let mut gpio = CdevGpio::new(&args.chip);
    let mut verifier = AdderVerifier::configure(&mut gpio, args.pins())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = verifier.run_all(&args.config(), &mut stdin.lock(), &mut out)?;
    writeln!(out, "{}", report.verdict())?;
    Ok(())
}

fn main() {
    env_logger::builder()
        .format_timestamp(None)
        .format_target(false)
        .parse_env(env_logger::Env::default().default_filter_or("warn"))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
