//! Time values for clock periods and buffer delays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A time value stored in nanoseconds.
///
/// Parses from period strings ("10ns", "2500ps", "0.5us"), frequency strings
/// ("100MHz", "50khz"), or bare numbers (nanoseconds). A frequency is
/// converted to the period of one cycle.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ClockPeriod(f64);

impl ClockPeriod {
    /// Creates a period from a value in nanoseconds.
    pub fn from_ns(ns: f64) -> Self {
        Self(ns)
    }

    /// Creates the period of one cycle at the given frequency in Hertz.
    pub fn from_hz(hz: f64) -> Self {
        Self(1e9 / hz)
    }

    /// Returns the value in nanoseconds.
    pub fn ns(self) -> f64 {
        self.0
    }

    /// Returns the value in picoseconds.
    pub fn ps(self) -> f64 {
        self.0 * 1_000.0
    }

    /// Returns the frequency in MHz of a clock with this period, or 0 for a
    /// non-positive period.
    pub fn mhz(self) -> f64 {
        if self.0 > 0.0 {
            1_000.0 / self.0
        } else {
            0.0
        }
    }
}

impl fmt::Debug for ClockPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockPeriod({self})")
    }
}

impl fmt::Display for ClockPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Error returned when a time or frequency string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid period: '{input}'")]
pub struct ParsePeriodError {
    /// The input string that failed to parse.
    pub input: String,
}

/// Returns `true` if `falling - rising` is half of `period`, within a
/// tolerance of `1e-9 * max(1, period)`.
///
/// This is the 50% duty-cycle waveform invariant every explicit waveform
/// must satisfy.
pub fn is_half_period(period: f64, rising: f64, falling: f64) -> bool {
    let tolerance = 1e-9 * period.abs().max(1.0);
    ((falling - rising) - period / 2.0).abs() <= tolerance
}

const TIME_UNITS: &[(&str, f64)] = &[("ps", 1e-3), ("ns", 1.0), ("us", 1e3), ("ms", 1e6)];
const FREQ_UNITS: &[(&str, f64)] = &[("ghz", 1e9), ("mhz", 1e6), ("khz", 1e3), ("hz", 1.0)];

impl FromStr for ClockPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParsePeriodError {
            input: s.to_string(),
        };
        let lower = s.to_ascii_lowercase();

        for (suffix, scale) in FREQ_UNITS {
            if let Some(num) = lower.strip_suffix(suffix) {
                let val: f64 = num.trim().parse().map_err(|_| err())?;
                if val <= 0.0 {
                    return Err(err());
                }
                return Ok(ClockPeriod::from_hz(val * scale));
            }
        }
        for (suffix, scale) in TIME_UNITS {
            if let Some(num) = lower.strip_suffix(suffix) {
                let val: f64 = num.trim().parse().map_err(|_| err())?;
                return Ok(ClockPeriod(val * scale));
            }
        }

        let val: f64 = s.parse().map_err(|_| err())?;
        Ok(ClockPeriod(val))
    }
}
