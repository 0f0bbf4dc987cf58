//! Parsing and validation of `tempo.toml` clock propagation configuration.
//!
//! The configuration supplies the cell-library constants for the clock
//! buffers the engine traverses, the seed clocks a run starts from, and the
//! order of propagation passes.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
