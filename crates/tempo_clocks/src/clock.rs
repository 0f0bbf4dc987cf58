//! A named clock domain and the wires it drives.

use crate::clock_wire::ClockWire;
use tempo_common::WireId;

/// One logical clock: a name plus the set of wires it drives.
///
/// Each wire appears at most once. Entries keep registration order, but
/// callers must not depend on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    name: String,
    wires: Vec<ClockWire>,
}

impl Clock {
    /// Creates an empty clock.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wires: Vec::new(),
        }
    }

    /// Creates a clock driving a single wire.
    pub fn with_wire(
        name: impl Into<String>,
        wire: WireId,
        period: f64,
        rising_edge: f64,
        falling_edge: f64,
    ) -> Self {
        let mut clock = Self::new(name);
        clock.add_clock_wire(wire, period, rising_edge, falling_edge);
        clock
    }

    /// The clock's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Associates `wire` with this clock, or retimes it if already present.
    ///
    /// A known wire first has its period reset (50% duty at 0), then gets
    /// the requested edges, so the stored waveform always ends up exactly
    /// as requested.
    ///
    /// # Panics
    ///
    /// Panics when retiming a known wire to a waveform that is not 50% duty.
    pub fn add_clock_wire(
        &mut self,
        wire: WireId,
        period: f64,
        rising_edge: f64,
        falling_edge: f64,
    ) {
        match self.wires.iter_mut().find(|cw| cw.wire() == wire) {
            Some(existing) => {
                existing.update_period(period);
                existing.update_waveform(rising_edge, falling_edge);
            }
            None => self
                .wires
                .push(ClockWire::new(wire, period, rising_edge, falling_edge)),
        }
    }

    /// The clock's current wires. The slice can be iterated any number of times.
    pub fn clock_wires(&self) -> &[ClockWire] {
        &self.wires
    }

    /// Returns the entry for `wire`, if this clock drives it.
    pub fn find(&self, wire: WireId) -> Option<&ClockWire> {
        self.wires.iter().find(|cw| cw.wire() == wire)
    }

    /// Number of wires driven by this clock.
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Returns `true` if the clock drives no wires.
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u32) -> WireId {
        WireId::from_raw(n)
    }

    #[test]
    fn new_clock_is_empty() {
        let clock = Clock::new("clk");
        assert_eq!(clock.name(), "clk");
        assert!(clock.is_empty());
        assert_eq!(clock.clock_wires().len(), 0);
    }

    #[test]
    fn with_wire_inserts_one_entry() {
        let clock = Clock::with_wire("clk", w(3), 10.0, 0.0, 5.0);
        assert_eq!(clock.len(), 1);
        assert_eq!(clock.find(w(3)).unwrap().period(), 10.0);
    }

    #[test]
    fn distinct_wires_are_all_kept() {
        let mut clock = Clock::new("clk");
        clock.add_clock_wire(w(1), 10.0, 0.0, 5.0);
        clock.add_clock_wire(w(2), 10.0, 1.0, 6.0);
        assert_eq!(clock.len(), 2);
        assert!(clock.find(w(1)).is_some());
        assert!(clock.find(w(2)).is_some());
        assert!(clock.find(w(3)).is_none());
    }

    #[test]
    fn same_wire_same_timing_is_idempotent() {
        let mut clock = Clock::new("clk");
        clock.add_clock_wire(w(1), 10.0, 0.0, 5.0);
        clock.add_clock_wire(w(1), 10.0, 0.0, 5.0);
        assert_eq!(clock.len(), 1);
        assert_eq!(clock.clock_wires()[0], ClockWire::new(w(1), 10.0, 0.0, 5.0));
    }

    #[test]
    fn same_wire_new_timing_last_write_wins() {
        let mut clock = Clock::new("clk");
        clock.add_clock_wire(w(1), 10.0, 0.0, 5.0);
        clock.add_clock_wire(w(1), 20.0, 3.0, 13.0);
        assert_eq!(clock.len(), 1);
        let cw = clock.find(w(1)).unwrap();
        assert_eq!(cw.period(), 20.0);
        assert_eq!(cw.rising_edge(), 3.0);
        assert_eq!(cw.falling_edge(), 13.0);
    }

    #[test]
    #[should_panic]
    fn retiming_to_skewed_waveform_panics() {
        let mut clock = Clock::new("clk");
        clock.add_clock_wire(w(1), 10.0, 0.0, 5.0);
        clock.add_clock_wire(w(1), 10.0, 0.0, 2.0);
    }

    #[test]
    fn wires_can_be_enumerated_repeatedly() {
        let mut clock = Clock::new("clk");
        clock.add_clock_wire(w(1), 10.0, 0.0, 5.0);
        clock.add_clock_wire(w(2), 10.0, 0.0, 5.0);
        let first: Vec<_> = clock.clock_wires().iter().map(|cw| cw.wire()).collect();
        let second: Vec<_> = clock.clock_wires().iter().map(|cw| cw.wire()).collect();
        assert_eq!(first, second);
    }
}
