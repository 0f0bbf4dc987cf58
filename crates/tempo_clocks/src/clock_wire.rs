//! A single wire driven by a clock, with the waveform it carries.

use serde::{Deserialize, Serialize};
use tempo_common::{is_half_period, WireId};

/// A (wire, waveform) pair: the atomic unit of clock information.
///
/// The wire is a non-owning handle into the host design. The waveform is a
/// period in ns plus rising and falling edge offsets within that period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockWire {
    wire: WireId,
    period: f64,
    rising_edge: f64,
    falling_edge: f64,
}

impl ClockWire {
    /// Creates a clock wire with the waveform exactly as given.
    ///
    /// The waveform is not checked; callers are trusted to pass a
    /// consistent one.
    pub fn new(wire: WireId, period: f64, rising_edge: f64, falling_edge: f64) -> Self {
        Self {
            wire,
            period,
            rising_edge,
            falling_edge,
        }
    }

    /// Creates a clock wire with a 50% duty waveform anchored at 0.
    pub fn with_period(wire: WireId, period: f64) -> Self {
        Self::new(wire, period, 0.0, period / 2.0)
    }

    /// Sets a new period and resets the waveform to 50% duty anchored at 0,
    /// discarding any explicit edges.
    pub fn update_period(&mut self, period: f64) {
        self.period = period;
        self.rising_edge = 0.0;
        self.falling_edge = period / 2.0;
    }

    /// Sets explicit edges for the current period.
    ///
    /// # Panics
    ///
    /// Panics if `falling_edge - rising_edge` is not half the period. Only
    /// 50% duty clocks are modelled, so anything else is a caller bug.
    pub fn update_waveform(&mut self, rising_edge: f64, falling_edge: f64) {
        self.rising_edge = rising_edge;
        self.falling_edge = falling_edge;
        assert!(
            is_half_period(self.period, rising_edge, falling_edge),
            "waveform {{{rising_edge} {falling_edge}}} on {} is not 50% duty for period {}",
            self.wire,
            self.period
        );
    }

    /// The wire this clock drives.
    pub fn wire(&self) -> WireId {
        self.wire
    }

    /// Clock period in ns.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Rising edge offset in ns.
    pub fn rising_edge(&self) -> f64 {
        self.rising_edge
    }

    /// Falling edge offset in ns.
    pub fn falling_edge(&self) -> f64 {
        self.falling_edge
    }

    /// Fraction of the period the clock is high, or 0.5 for a non-positive period.
    pub fn duty_cycle(&self) -> f64 {
        if self.period <= 0.0 {
            return 0.5;
        }
        let high = if self.falling_edge > self.rising_edge {
            self.falling_edge - self.rising_edge
        } else {
            self.period - self.rising_edge + self.falling_edge
        };
        high / self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u32) -> WireId {
        WireId::from_raw(n)
    }

    #[test]
    fn new_stores_values_verbatim() {
        let cw = ClockWire::new(w(1), 10.0, 3.0, 8.0);
        assert_eq!(cw.wire(), w(1));
        assert_eq!(cw.period(), 10.0);
        assert_eq!(cw.rising_edge(), 3.0);
        assert_eq!(cw.falling_edge(), 8.0);
    }

    #[test]
    fn new_does_not_validate() {
        let cw = ClockWire::new(w(1), 10.0, 0.0, 7.0);
        assert_eq!(cw.falling_edge(), 7.0);
    }

    #[test]
    fn default_duty_is_half_period() {
        for period in [1.0, 2.5, 10.0, 33.3] {
            let cw = ClockWire::with_period(w(0), period);
            assert_eq!(cw.rising_edge(), 0.0);
            assert_eq!(cw.falling_edge() - cw.rising_edge(), period / 2.0);
        }
    }

    #[test]
    fn update_period_resets_edges() {
        let mut cw = ClockWire::new(w(1), 10.0, 2.0, 7.0);
        cw.update_period(20.0);
        assert_eq!(cw.period(), 20.0);
        assert_eq!(cw.rising_edge(), 0.0);
        assert_eq!(cw.falling_edge(), 10.0);
    }

    #[test]
    fn update_waveform_sets_edges() {
        let mut cw = ClockWire::with_period(w(1), 10.0);
        cw.update_waveform(4.0, 9.0);
        assert_eq!(cw.rising_edge(), 4.0);
        assert_eq!(cw.falling_edge(), 9.0);
    }

    #[test]
    #[should_panic(expected = "not 50% duty")]
    fn update_waveform_rejects_skewed_duty() {
        let mut cw = ClockWire::with_period(w(1), 10.0);
        cw.update_waveform(0.0, 6.0);
    }

    #[test]
    fn duty_cycle_of_default_waveform() {
        let cw = ClockWire::with_period(w(1), 8.0);
        assert!((cw.duty_cycle() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn duty_cycle_with_wrapped_edges() {
        let cw = ClockWire::new(w(1), 10.0, 8.0, 3.0);
        assert!((cw.duty_cycle() - 0.5).abs() < 1e-12);
    }
}
