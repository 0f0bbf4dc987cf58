//! Clock propagation for FPGA synthesis constraint generation.
//!
//! Given the clocks declared on a design, this crate finds every wire each
//! clock drives and the waveform that wire carries, so a later stage can
//! write one timing directive per clocked wire for place and route.
//!
//! # Usage
//!
//! ```
//! use tempo_clocks::{BufferLibrary, ClockRegistry, ClockReport, Netlist, Propagation};
//!
//! let mut design = Netlist::new();
//! let pad = design.add_wire("clk_pad");
//! let buffered = design.add_wire("clk");
//! design.add_buffer("ibuf0", "IBUF", pad, "O", buffered);
//!
//! let mut clocks = ClockRegistry::new();
//! clocks.add_clock_wire("sys_clk", pad, 10.0);
//!
//! let library = BufferLibrary::default();
//! clocks.propagate(Propagation::Natural(&design));
//! clocks.propagate(Propagation::Buffer { finder: &design, library: &library });
//! clocks.propagate(Propagation::ClockDivider);
//!
//! let report = ClockReport::from_registry(&clocks, &design, true);
//! assert_eq!(report.len(), 2);
//! ```
//!
//! # Architecture
//!
//! - [`clock_wire`] — one wire and its waveform, with the 50% duty invariant
//! - [`clock`] — a named clock and its set of wires
//! - [`registry`] — the per-run name → clock map and registration entry points
//! - [`buffer`] — the input and global clock buffer descriptors
//! - [`propagation`] — finder traits and the natural, buffer and clock-divider passes
//! - [`netlist`] — a small in-memory design graph implementing the finders
//! - [`sdc`] — seeding clocks from `create_clock` directives
//! - [`report`] — reading results back and rendering them as SDC
//! - [`stage`] — a whole run driven by `tempo.toml`

#![warn(missing_docs)]

pub mod buffer;
pub mod clock;
pub mod clock_wire;
pub mod netlist;
pub mod propagation;
pub mod registry;
pub mod report;
pub mod sdc;
pub mod stage;

pub use buffer::{BufferDescriptor, BufferLibrary};
pub use clock::Clock;
pub use clock_wire::ClockWire;
pub use netlist::{Cell, Netlist, WireNames};
pub use propagation::{AliasFinder, Propagation, SinkFinder};
pub use registry::ClockRegistry;
pub use report::{ClockEntry, ClockReport, PROPAGATED_MARKER};
pub use sdc::read_sdc;
pub use stage::{run_passes, run_stage, run_stage_in_dir, seed_registry, StageError};
pub use tempo_common::WireId;
pub use tempo_config::PropagationKind;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_sdc_in_sdc_out() {
        let mut design = Netlist::new();
        let pad = design.add_wire("clk_pad");
        let alias = design.add_wire("clk_pad_alias");
        let ibuf = design.add_wire("clk_ibuf");
        let bufg = design.add_wire("clk_bufg");
        design.assign(alias, pad);
        design.add_buffer("ibuf0", "IBUF", pad, "O", ibuf);
        design.add_buffer("bufg0", "BUFG", ibuf, "O", bufg);

        let mut clocks = ClockRegistry::new();
        let seeded = read_sdc(
            "create_clock -period 10 -name sys [get_ports clk_pad]",
            &design,
            &mut clocks,
        );
        assert_eq!(seeded, 1);

        let library = BufferLibrary {
            input_buffer: BufferDescriptor::new("IBUF", "O", 1.0),
            global_buffer: BufferDescriptor::new("BUFG", "O", 1.0),
        };
        clocks.propagate(Propagation::Natural(&design));
        clocks.propagate(Propagation::Buffer {
            finder: &design,
            library: &library,
        });
        clocks.propagate(Propagation::ClockDivider);

        let sdc = ClockReport::from_registry(&clocks, &design, true).to_sdc();
        assert_eq!(
            sdc,
            "# propagated clocks\n\
             create_clock -period 10 -name sys -waveform {0 5} clk_pad\n\
             create_clock -period 10 -name sys -waveform {0 5} clk_pad_alias\n\
             create_clock -period 10 -name sys -waveform {1 6} clk_ibuf\n\
             create_clock -period 10 -name sys -waveform {2 7} clk_bufg\n"
        );
    }
}
