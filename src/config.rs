//! Run configuration
//!
//! [`RunConfig`] carries everything that changes how a pass over the truth
//! table is presented: how rows are paced and whether each row is reported.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Prompt shown before blocking in [`Pacing::Interactive`] mode
pub const INTERACTIVE_PROMPT: &str = "Press enter for next test...";

/// How the enumeration advances from one row to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// No pause between rows
    #[default]
    Fast,
    /// Sleep for [`RunConfig::slow_interval`] between rows
    Slow,
    /// Wait for the operator to press enter between rows
    Interactive,
}

impl Pacing {
    /// Combine the `--slow` and `--interactive` flags; interactive wins
    pub fn from_flags(slow: bool, interactive: bool) -> Self {
        if interactive {
            Pacing::Interactive
        } else if slow {
            Pacing::Slow
        } else {
            Pacing::Fast
        }
    }
}

/// Configuration for one verification run
///
/// # Examples
///
/// ```
/// use logic_tester::{Pacing, RunConfig};
///
/// let config = RunConfig {
///     pacing: Pacing::from_flags(true, false),
///     ..Default::default()
/// };
/// assert_eq!(config.pacing, Pacing::Slow);
/// assert!(config.detailed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Pause policy between rows
    ///
    /// **Default:** [`Pacing::Fast`]
    pub pacing: Pacing,

    /// Report every row's driven, expected and observed values
    ///
    /// **Default:** `true`
    pub detailed: bool,

    /// Pause length in [`Pacing::Slow`] mode
    ///
    /// **Default:** 1 second
    pub slow_interval: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::Fast,
            detailed: true,
            slow_interval: Duration::from_secs(1),
        }
    }
}

impl RunConfig {
    /// Block according to the pacing policy
    ///
    /// In interactive mode the prompt is written to `out` and one line is
    /// consumed from `input`. End of input counts as advancing.
    pub fn pause<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<()> {
        match self.pacing {
            Pacing::Fast => Ok(()),
            Pacing::Slow => {
                thread::sleep(self.slow_interval);
                Ok(())
            }
            Pacing::Interactive => {
                write!(out, "{}", INTERACTIVE_PROMPT)?;
                out.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                Ok(())
            }
        }
    }
}
