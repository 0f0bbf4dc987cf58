//! A minimal in-memory design graph for hosts without their own.
//!
//! The [`Netlist`] holds named wires, zero-delay `assign` connections
//! between wires, and typed cell instances with named pins. It implements
//! [`AliasFinder`] and [`SinkFinder`] with single-hop lookups, which is what
//! the propagation passes expect from a design graph.

use crate::propagation::{AliasFinder, SinkFinder};
use std::collections::HashMap;
use tempo_common::{CellId, WireId};

/// Resolves wire handles to and from their names in the design.
pub trait WireNames {
    /// Returns the name of `wire`, if it exists.
    fn wire_name(&self, wire: WireId) -> Option<&str>;

    /// Returns the wire called `name`, if it exists.
    fn wire_by_name(&self, name: &str) -> Option<WireId>;
}

/// A cell instance and the wires on its pins.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Handle of this cell.
    pub id: CellId,
    /// Instance name.
    pub name: String,
    /// Cell type (e.g., "IBUF", "BUFG", "LUT4").
    pub cell_type: String,
    /// `(pin, wire)` pairs for input pins.
    pub inputs: Vec<(String, WireId)>,
    /// `(pin, wire)` pairs for output pins.
    pub outputs: Vec<(String, WireId)>,
}

/// A flat design graph of wires, assigns and cells.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    wire_names: Vec<String>,
    by_name: HashMap<String, WireId>,
    assigns: Vec<(WireId, WireId)>,
    cells: Vec<Cell>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wire and returns its handle. A wire with the same name is
    /// returned as-is instead of being duplicated.
    pub fn add_wire(&mut self, name: &str) -> WireId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = WireId::from_raw(self.wire_names.len() as u32);
        self.wire_names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Connects `lhs` and `rhs` with a zero-delay assign (`assign lhs = rhs`).
    pub fn assign(&mut self, lhs: WireId, rhs: WireId) {
        self.assigns.push((lhs, rhs));
    }

    /// Adds a cell instance with no connections and returns its handle.
    pub fn add_cell(&mut self, name: &str, cell_type: &str) -> CellId {
        let id = CellId::from_raw(self.cells.len() as u32);
        self.cells.push(Cell {
            id,
            name: name.to_string(),
            cell_type: cell_type.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        });
        id
    }

    /// Connects input `pin` of `cell` to `wire`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was not returned by this netlist.
    pub fn connect_input(&mut self, cell: CellId, pin: &str, wire: WireId) {
        self.cells[cell.index()].inputs.push((pin.to_string(), wire));
    }

    /// Connects output `pin` of `cell` to `wire`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was not returned by this netlist.
    pub fn connect_output(&mut self, cell: CellId, pin: &str, wire: WireId) {
        self.cells[cell.index()].outputs.push((pin.to_string(), wire));
    }

    /// Adds a single-input, single-output buffer cell between two wires.
    pub fn add_buffer(
        &mut self,
        name: &str,
        cell_type: &str,
        input: WireId,
        output_pin: &str,
        output: WireId,
    ) -> CellId {
        let cell = self.add_cell(name, cell_type);
        self.connect_input(cell, "I", input);
        self.connect_output(cell, output_pin, output);
        cell
    }

    /// Returns the cell with the given handle, if this netlist has it.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Number of wires.
    pub fn wire_count(&self) -> usize {
        self.wire_names.len()
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl WireNames for Netlist {
    fn wire_name(&self, wire: WireId) -> Option<&str> {
        self.wire_names.get(wire.index()).map(String::as_str)
    }

    fn wire_by_name(&self, name: &str) -> Option<WireId> {
        self.by_name.get(name).copied()
    }
}

impl AliasFinder for Netlist {
    /// Wires joined to `wire` by one assign in either direction, in assign
    /// order, without duplicates and without `wire` itself.
    fn find_alias_wires(&self, wire: WireId) -> Vec<WireId> {
        let mut aliases = Vec::new();
        for &(lhs, rhs) in &self.assigns {
            let other = if lhs == wire {
                rhs
            } else if rhs == wire {
                lhs
            } else {
                continue;
            };
            if other != wire && !aliases.contains(&other) {
                aliases.push(other);
            }
        }
        aliases
    }
}

impl SinkFinder for Netlist {
    /// `output_pin` wires of every `cell_type` cell with an input on `wire`,
    /// in cell order.
    fn find_sink_wires_for_cell_type(
        &self,
        wire: WireId,
        cell_type: &str,
        output_pin: &str,
    ) -> Vec<WireId> {
        self.cells
            .iter()
            .filter(|cell| cell.cell_type == cell_type)
            .filter(|cell| cell.inputs.iter().any(|(_, w)| *w == wire))
            .flat_map(|cell| {
                cell.outputs
                    .iter()
                    .filter(|(pin, _)| pin == output_pin)
                    .map(|(_, w)| *w)
            })
            .collect()
    }
}
