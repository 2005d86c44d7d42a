//! Logic Gate Detector - Command Line Interface
//!
//! Identifies a 2-input logic gate using 3 GPIO pins

use clap::Parser;
use logic_tester::gpio::{CdevGpio, Pin};
use logic_tester::truth_table::format_bits;
use logic_tester::{GateClassifier, GateIdentity, GatePins, TesterError};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "logic-gate-detector")]
#[command(about = "Test logic gates using 3 GPIO pins", long_about = None)]
#[command(version)]
struct Args {
    /// GPIO pin for input A to logic gate
    #[arg(value_name = "A")]
    a: Pin,

    /// GPIO pin for input B to logic gate
    #[arg(value_name = "B")]
    b: Pin,

    /// GPIO pin for output from logic gate
    #[arg(value_name = "OUT")]
    out: Pin,

    /// GPIO character device the pins belong to
    #[arg(short = 'c', long = "chip", default_value = "/dev/gpiochip0")]
    chip: PathBuf,
}

impl Args {
    fn pins(&self) -> GatePins {
        GatePins {
            a: self.a,
            b: self.b,
            out: self.out,
        }
    }
}

fn report(pins: &GatePins, identity: &GateIdentity) -> Vec<String> {
    let mut lines = Vec::new();
    if let GateIdentity::Unknown { pattern } = identity {
        lines.push(format!(
            "Unknown truth table result of: {}",
            format_bits(pattern)
        ));
    }
    lines.push(format!(
        "Gate on A={}, B={}, OUT={} is an {} gate.",
        pins.a, pins.b, pins.out, identity
    ));
    lines
}

fn run(args: &Args) -> Result<(), TesterError> {
    let pins = args.pins();
    let mut gpio = CdevGpio::new(&args.chip);
    let identity = {
        let mut classifier = GateClassifier::configure(&mut gpio, pins)?;
        classifier.identify()?
    };
    for line in report(&pins, &identity) {
        println!("{}", line);
    }
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
