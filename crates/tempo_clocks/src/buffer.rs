//! Clock-buffering primitives the buffer pass propagates through.

use serde::{Deserialize, Serialize};
use tempo_config::{BufferDef, LibraryConfig};

/// Static description of a clock-buffer cell type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferDescriptor {
    /// Cell type name as it appears in the netlist.
    pub cell_type: String,
    /// Output pin carrying the buffered clock.
    pub output_pin: String,
    /// Fixed delay through one instance, in ns.
    pub delay: f64,
}

impl BufferDescriptor {
    /// Creates a descriptor.
    pub fn new(cell_type: impl Into<String>, output_pin: impl Into<String>, delay: f64) -> Self {
        Self {
            cell_type: cell_type.into(),
            output_pin: output_pin.into(),
            delay,
        }
    }
}

impl From<&BufferDef> for BufferDescriptor {
    fn from(def: &BufferDef) -> Self {
        Self::new(def.cell.clone(), def.output.clone(), def.delay.ns())
    }
}

/// The two built-in buffers: an input buffer and a global clock buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferLibrary {
    /// Pad-to-fabric input buffer (`IBUF` by default).
    pub input_buffer: BufferDescriptor,
    /// Global clock buffer (`BUFG` by default).
    pub global_buffer: BufferDescriptor,
}

impl BufferLibrary {
    /// Builds the library from the `[library]` configuration section.
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self {
            input_buffer: (&config.input_buffer).into(),
            global_buffer: (&config.global_buffer).into(),
        }
    }

    /// Both buffers in traversal order: input buffer first, then global buffer.
    pub fn buffers(&self) -> [&BufferDescriptor; 2] {
        [&self.input_buffer, &self.global_buffer]
    }
}

impl Default for BufferLibrary {
    fn default() -> Self {
        Self::from_config(&LibraryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_library_is_ibuf_then_bufg() {
        let lib = BufferLibrary::default();
        let [first, second] = lib.buffers();
        assert_eq!(first.cell_type, "IBUF");
        assert_eq!(first.output_pin, "O");
        assert_eq!(second.cell_type, "BUFG");
        assert_eq!(second.delay, 0.0);
    }

    #[test]
    fn from_config_carries_delays() {
        let config = tempo_config::load_config_from_str(
            r#"
[library.input_buffer]
cell = "IBUF"
delay = "2ns"

[library.global_buffer]
cell = "BUFGCTRL"
output = "O"
delay = "500ps"
"#,
        )
        .unwrap();
        let lib = BufferLibrary::from_config(&config.library);
        assert_eq!(lib.input_buffer, BufferDescriptor::new("IBUF", "O", 2.0));
        assert_eq!(lib.global_buffer.cell_type, "BUFGCTRL");
        assert!((lib.global_buffer.delay - 0.5).abs() < 1e-12);
    }
}
