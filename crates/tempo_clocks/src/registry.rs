//! The per-run registry of clocks, keyed by name.

use crate::clock::Clock;
use crate::clock_wire::ClockWire;
use std::collections::BTreeMap;
use tempo_common::WireId;

/// Owns every [`Clock`] known to a propagation run.
///
/// A registry is built fresh for each run, seeded with the clocks from the
/// design's constraints, mutated in place by the propagation passes, and
/// read back by the constraint writer. Clock names are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockRegistry {
    clocks: BTreeMap<String, Clock>,
}

impl ClockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `wire` under clock `name` with a 50% duty waveform anchored at 0.
    pub fn add_clock_wire(&mut self, name: &str, wire: WireId, period: f64) {
        self.add_clock_wire_with_waveform(name, wire, period, 0.0, period / 2.0);
    }

    /// Registers `wire` under clock `name` with explicit edges.
    ///
    /// The clock is created on first reference to `name`. See
    /// [`Clock::add_clock_wire`] for how an already-known wire is retimed.
    pub fn add_clock_wire_with_waveform(
        &mut self,
        name: &str,
        wire: WireId,
        period: f64,
        rising_edge: f64,
        falling_edge: f64,
    ) {
        self.clocks
            .entry(name.to_string())
            .or_insert_with(|| Clock::new(name))
            .add_clock_wire(wire, period, rising_edge, falling_edge);
    }

    /// Registers every wire in `wires` under clock `name` with identical timing.
    pub fn add_clock_wires(
        &mut self,
        name: &str,
        wires: impl IntoIterator<Item = WireId>,
        period: f64,
        rising_edge: f64,
        falling_edge: f64,
    ) {
        for wire in wires {
            self.add_clock_wire_with_waveform(name, wire, period, rising_edge, falling_edge);
        }
    }

    /// Names of all registered clocks. The order is not part of the contract.
    pub fn clock_names(&self) -> Vec<&str> {
        self.clocks.keys().map(String::as_str).collect()
    }

    /// Returns the clock called `name`, if registered.
    pub fn clock(&self, name: &str) -> Option<&Clock> {
        self.clocks.get(name)
    }

    /// Iterates over all registered clocks.
    pub fn clocks(&self) -> impl Iterator<Item = &Clock> {
        self.clocks.values()
    }

    /// Number of registered clocks.
    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    /// Total number of (clock, wire) entries across all clocks.
    pub fn wire_count(&self) -> usize {
        self.clocks.values().map(Clock::len).sum()
    }

    /// Copies the current wires of clock `name`; empty if it is unknown.
    pub(crate) fn snapshot(&self, name: &str) -> Vec<ClockWire> {
        self.clocks
            .get(name)
            .map(|clock| clock.clock_wires().to_vec())
            .unwrap_or_default()
    }

    pub(crate) fn owned_names(&self) -> Vec<String> {
        self.clocks.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn w(n: u32) -> WireId {
        WireId::from_raw(n)
    }

    #[test]
    fn empty_registry() {
        let reg = ClockRegistry::new();
        assert!(reg.clock_names().is_empty());
        assert_eq!(reg.clock_count(), 0);
        assert_eq!(reg.wire_count(), 0);
        assert!(reg.clock("clk").is_none());
    }

    #[test]
    fn first_reference_creates_clock() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wire("clk", w(1), 10.0);
        let clock = reg.clock("clk").unwrap();
        assert_eq!(clock.name(), "clk");
        assert_eq!(clock.len(), 1);
    }

    #[test]
    fn default_overload_uses_half_duty() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wire("clk", w(1), 8.0);
        let cw = reg.clock("clk").unwrap().find(w(1)).unwrap();
        assert_eq!(cw.rising_edge(), 0.0);
        assert_eq!(cw.falling_edge(), 4.0);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wire("clk", w(1), 10.0);
        reg.add_clock_wire("CLK", w(2), 10.0);
        assert_eq!(reg.clock_count(), 2);
    }

    #[test]
    fn clock_names_ignore_registration_order() {
        let mut a = ClockRegistry::new();
        a.add_clock_wire("clk1", w(1), 10.0);
        a.add_clock_wire("clk2", w(2), 5.0);
        let mut b = ClockRegistry::new();
        b.add_clock_wire("clk2", w(2), 5.0);
        b.add_clock_wire("clk1", w(1), 10.0);

        let expected: HashSet<&str> = ["clk1", "clk2"].into_iter().collect();
        assert_eq!(a.clock_names().into_iter().collect::<HashSet<_>>(), expected);
        assert_eq!(b.clock_names().into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn add_clock_wires_shares_timing() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wires("clk", [w(1), w(2), w(3)], 10.0, 1.0, 6.0);
        let clock = reg.clock("clk").unwrap();
        assert_eq!(clock.len(), 3);
        for cw in clock.clock_wires() {
            assert_eq!(cw.period(), 10.0);
            assert_eq!(cw.rising_edge(), 1.0);
            assert_eq!(cw.falling_edge(), 6.0);
        }
    }

    #[test]
    fn add_clock_wires_with_no_wires_creates_nothing() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wires("clk", Vec::new(), 10.0, 0.0, 5.0);
        assert!(reg.clock("clk").is_none());
    }

    #[test]
    fn reregistration_is_last_write_wins() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wire("clk", w(1), 10.0);
        reg.add_clock_wire_with_waveform("clk", w(1), 12.0, 2.0, 8.0);
        let clock = reg.clock("clk").unwrap();
        assert_eq!(clock.len(), 1);
        let cw = clock.find(w(1)).unwrap();
        assert_eq!((cw.period(), cw.rising_edge(), cw.falling_edge()), (12.0, 2.0, 8.0));
    }

    #[test]
    fn same_wire_in_two_clocks_is_two_entries() {
        let mut reg = ClockRegistry::new();
        reg.add_clock_wire("a", w(1), 10.0);
        reg.add_clock_wire("b", w(1), 4.0);
        assert_eq!(reg.wire_count(), 2);
        assert_eq!(reg.clock("b").unwrap().find(w(1)).unwrap().period(), 4.0);
    }
}
