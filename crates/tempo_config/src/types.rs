//! Configuration types deserialized from `tempo.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tempo_common::ClockPeriod;

/// The top-level configuration parsed from `tempo.toml`.
///
/// Every section is optional; an empty file yields the default buffer
/// library, no seed clocks, and the default pass order.
#[derive(Debug, Default, Deserialize)]
pub struct TempoConfig {
    /// Clock-buffer primitives and their delay constants.
    #[serde(default)]
    pub library: LibraryConfig,
    /// Seed clocks, keyed by clock name.
    #[serde(default)]
    pub clocks: BTreeMap<String, ClockDef>,
    /// Which propagation passes run, and how often.
    #[serde(default)]
    pub propagation: PropagationConfig,
}

/// The two clock-buffer primitives the buffer pass traverses.
#[derive(Debug, Deserialize)]
pub struct LibraryConfig {
    /// The input buffer primitive (pad to fabric).
    #[serde(default = "BufferDef::input_buffer")]
    pub input_buffer: BufferDef,
    /// The global clock buffer primitive.
    #[serde(default = "BufferDef::global_buffer")]
    pub global_buffer: BufferDef,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            input_buffer: BufferDef::input_buffer(),
            global_buffer: BufferDef::global_buffer(),
        }
    }
}

/// A buffer cell type, its clock output pin, and its fixed delay.
#[derive(Debug, Clone, Deserialize)]
pub struct BufferDef {
    /// The cell type name as it appears in the netlist (e.g., "IBUF").
    pub cell: String,
    /// The output pin carrying the buffered clock.
    #[serde(default = "default_output_pin")]
    pub output: String,
    /// Fixed propagation delay through one instance.
    #[serde(default = "zero_delay", deserialize_with = "deserialize_time")]
    pub delay: ClockPeriod,
}

impl BufferDef {
    /// The Xilinx-style input buffer `IBUF` with zero delay.
    pub fn input_buffer() -> Self {
        Self {
            cell: "IBUF".to_string(),
            output: default_output_pin(),
            delay: zero_delay(),
        }
    }

    /// The Xilinx-style global clock buffer `BUFG` with zero delay.
    pub fn global_buffer() -> Self {
        Self {
            cell: "BUFG".to_string(),
            output: default_output_pin(),
            delay: zero_delay(),
        }
    }
}

fn default_output_pin() -> String {
    "O".to_string()
}

fn zero_delay() -> ClockPeriod {
    ClockPeriod::from_ns(0.0)
}

/// A seed clock bound to one wire of the design.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockDef {
    /// Period as a time ("10ns") or frequency ("100MHz"); bare numbers are ns.
    #[serde(deserialize_with = "deserialize_time")]
    pub period: ClockPeriod,
    /// Name of the design wire the clock is applied to.
    pub wire: String,
    /// Optional explicit `[rising, falling]` edge offsets in ns.
    /// If absent, defaults to 50% duty cycle anchored at 0.
    pub waveform: Option<[f64; 2]>,
}

/// Pass ordering for a propagation run.
#[derive(Debug, Deserialize)]
pub struct PropagationConfig {
    /// Passes to run, in order.
    #[serde(default = "PropagationKind::all")]
    pub passes: Vec<PropagationKind>,
    /// How many times the natural pass may repeat while it still finds wires.
    /// `1` runs it exactly once.
    #[serde(default = "default_natural_rounds")]
    pub natural_rounds: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            passes: PropagationKind::all(),
            natural_rounds: default_natural_rounds(),
        }
    }
}

fn default_natural_rounds() -> usize {
    1
}

/// Identity of a propagation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationKind {
    /// Zero-delay alias propagation (direct assigns).
    Natural,
    /// Propagation through clock-buffer primitives.
    Buffer,
    /// Reserved for clock dividers; currently changes nothing.
    ClockDivider,
}

impl PropagationKind {
    /// All strategies in their default order.
    pub fn all() -> Vec<Self> {
        vec![Self::Natural, Self::Buffer, Self::ClockDivider]
    }

    /// Returns the configuration spelling of this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Buffer => "buffer",
            Self::ClockDivider => "clock_divider",
        }
    }
}

impl std::fmt::Display for PropagationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserializes a time value given either as a string with a unit
/// (`"2.5ns"`, `"100MHz"`) or as a bare number of nanoseconds.
fn deserialize_time<'de, D>(deserializer: D) -> Result<ClockPeriod, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimeValue;

    impl<'de> Visitor<'de> for TimeValue {
        type Value = ClockPeriod;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a time or frequency string, or a number of nanoseconds")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(ClockPeriod::from_ns(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(ClockPeriod::from_ns(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(ClockPeriod::from_ns(v as f64))
        }
    }

    deserializer.deserialize_any(TimeValue)
}
