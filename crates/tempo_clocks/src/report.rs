//! Read-back of propagation results for constraint emission.

use crate::netlist::WireNames;
use crate::registry::ClockRegistry;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::trace;

/// Marker line written ahead of the directives when propagated clocks are included.
pub const PROPAGATED_MARKER: &str = "# propagated clocks";

/// One timing directive: a clock applied to one wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockEntry {
    /// Clock name.
    pub clock: String,
    /// Target wire name.
    pub wire: String,
    /// Period in ns.
    pub period: f64,
    /// Rising edge offset in ns.
    pub rising_edge: f64,
    /// Falling edge offset in ns.
    pub falling_edge: f64,
}

/// Snapshot of every (clock, wire) pair in a registry, by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockReport {
    /// Whether the entries include clocks found by propagation, not just seeds.
    pub propagated: bool,
    /// Entries sorted by clock name, then by registration order within a clock.
    pub entries: Vec<ClockEntry>,
}

impl ClockReport {
    /// Builds a report from `registry`, naming wires through `design`.
    ///
    /// Wires the design cannot name are reported by their handle (`w12`).
    pub fn from_registry(registry: &ClockRegistry, design: &dyn WireNames, propagated: bool) -> Self {
        let mut names = registry.clock_names();
        names.sort_unstable();

        let mut entries = Vec::with_capacity(registry.wire_count());
        for name in names {
            let Some(clock) = registry.clock(name) else {
                continue;
            };
            for cw in clock.clock_wires() {
                let wire = design
                    .wire_name(cw.wire())
                    .map(str::to_string)
                    .unwrap_or_else(|| cw.wire().to_string());
                trace!(
                    clock = name,
                    wire = %wire,
                    period = cw.period(),
                    rising = cw.rising_edge(),
                    falling = cw.falling_edge(),
                    "clock wire"
                );
                entries.push(ClockEntry {
                    clock: name.to_string(),
                    wire,
                    period: cw.period(),
                    rising_edge: cw.rising_edge(),
                    falling_edge: cw.falling_edge(),
                });
            }
        }

        Self {
            propagated,
            entries,
        }
    }

    /// Renders the report as SDC, one `create_clock` per entry.
    pub fn to_sdc(&self) -> String {
        let mut out = String::new();
        if self.propagated {
            out.push_str(PROPAGATED_MARKER);
            out.push('\n');
        }
        for e in &self.entries {
            let _ = writeln!(
                out,
                "create_clock -period {} -name {} -waveform {{{} {}}} {}",
                e.period, e.clock, e.rising_edge, e.falling_edge, e.wire
            );
        }
        out
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
