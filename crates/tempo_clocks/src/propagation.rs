//! Propagation strategies that grow each clock's wire set.
//!
//! Each strategy asks a graph-traversal collaborator for wires related to
//! the wires a clock already drives, and registers what it finds back into
//! the [`ClockRegistry`]. Every pass works on a snapshot taken when it
//! starts, so wires discovered during a pass are never queried in that same
//! pass and every pass terminates.

use crate::buffer::{BufferDescriptor, BufferLibrary};
use crate::registry::ClockRegistry;
use tempo_common::WireId;
use tempo_config::PropagationKind;
use tracing::{debug, info};

/// Finds wires electrically identical to a wire through zero-delay connections.
pub trait AliasFinder {
    /// Returns the aliases of `wire`.
    fn find_alias_wires(&self, wire: WireId) -> Vec<WireId>;
}

/// Finds buffer outputs reachable from a wire.
pub trait SinkFinder {
    /// Returns the `output_pin` wires of every `cell_type` instance driven by `wire`.
    fn find_sink_wires_for_cell_type(
        &self,
        wire: WireId,
        cell_type: &str,
        output_pin: &str,
    ) -> Vec<WireId>;
}

/// A propagation strategy together with the collaborators it needs.
#[derive(Clone, Copy)]
pub enum Propagation<'a> {
    /// Copy each clock's waveform unchanged onto the aliases of its wires.
    Natural(&'a dyn AliasFinder),
    /// Push each clock through the library's input and global buffers,
    /// shifting edges by the buffer delay.
    Buffer {
        /// Locates buffer outputs.
        finder: &'a dyn SinkFinder,
        /// The buffers to traverse.
        library: &'a BufferLibrary,
    },
    /// Reserved for clock dividers. Changes nothing.
    ClockDivider,
}

impl Propagation<'_> {
    /// Identity of this strategy.
    pub fn kind(&self) -> PropagationKind {
        match self {
            Propagation::Natural(_) => PropagationKind::Natural,
            Propagation::Buffer { .. } => PropagationKind::Buffer,
            Propagation::ClockDivider => PropagationKind::ClockDivider,
        }
    }
}

impl std::fmt::Debug for Propagation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Propagation({})", self.kind())
    }
}

impl ClockRegistry {
    /// Runs one pass of `strategy` over every registered clock.
    pub fn propagate(&mut self, strategy: Propagation<'_>) {
        match strategy {
            Propagation::Natural(finder) => self.propagate_natural(finder),
            Propagation::Buffer { finder, library } => self.propagate_buffers(finder, library),
            Propagation::ClockDivider => self.propagate_clock_dividers(),
        }
    }

    /// Repeats `strategy` until a pass adds no wire to any clock, running at
    /// most `max_rounds` passes. Returns the number of passes run.
    ///
    /// Only membership is compared; a pass that merely retimes existing
    /// wires counts as stable.
    pub fn propagate_until_stable(&mut self, strategy: Propagation<'_>, max_rounds: usize) -> usize {
        let mut rounds = 0;
        while rounds < max_rounds {
            let before = self.wire_count();
            self.propagate(strategy);
            rounds += 1;
            if self.wire_count() == before {
                break;
            }
        }
        debug!(strategy = %strategy.kind(), rounds, "propagation settled");
        rounds
    }

    fn propagate_natural(&mut self, finder: &dyn AliasFinder) {
        info!("start natural clock propagation");
        for name in self.owned_names() {
            debug!(clock = %name, "processing clock");
            for clock_wire in self.snapshot(&name) {
                let aliases = finder.find_alias_wires(clock_wire.wire());
                self.add_clock_wires(
                    &name,
                    aliases,
                    clock_wire.period(),
                    clock_wire.rising_edge(),
                    clock_wire.falling_edge(),
                );
            }
        }
        info!("finish natural clock propagation");
    }

    fn propagate_buffers(&mut self, finder: &dyn SinkFinder, library: &BufferLibrary) {
        info!("start buffer clock propagation");
        for name in self.owned_names() {
            debug!(clock = %name, "processing clock");
            for buffer in library.buffers() {
                self.propagate_through_buffer(&name, finder, buffer);
            }
        }
        info!("finish buffer clock propagation");
    }

    /// Registers the outputs of `buffer` instances driven by clock `name`.
    ///
    /// For each wire the clock drives when the call starts, the delay starts
    /// at zero and grows by the buffer delay for every sink found, so the
    /// n-th sink of one source is shifted by n times the delay. The period is
    /// never changed.
    pub fn propagate_through_buffer(
        &mut self,
        name: &str,
        finder: &dyn SinkFinder,
        buffer: &BufferDescriptor,
    ) {
        for clock_wire in self.snapshot(name) {
            let sinks = finder.find_sink_wires_for_cell_type(
                clock_wire.wire(),
                &buffer.cell_type,
                &buffer.output_pin,
            );
            let mut path_delay = 0.0;
            for sink in sinks {
                debug!(cell = %buffer.cell_type, wire = %sink, "buffer output");
                path_delay += buffer.delay;
                self.add_clock_wire_with_waveform(
                    name,
                    sink,
                    clock_wire.period(),
                    clock_wire.rising_edge() + path_delay,
                    clock_wire.falling_edge() + path_delay,
                );
            }
        }
    }

    fn propagate_clock_dividers(&self) {
        info!("start clock divider clock propagation");
        for name in self.clock_names() {
            debug!(clock = %name, "processing clock");
        }
        info!("finish clock divider clock propagation");
    }
}
