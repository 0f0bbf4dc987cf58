//! A complete propagation run driven by `tempo.toml`.
//!
//! The stage seeds a fresh [`ClockRegistry`] from the configured clocks,
//! runs the configured passes in order, and hands the registry back to the
//! caller for reporting.

use crate::buffer::BufferLibrary;
use crate::netlist::WireNames;
use crate::propagation::{AliasFinder, Propagation, SinkFinder};
use crate::registry::ClockRegistry;
use std::path::Path;
use tempo_config::{load_config, ConfigError, PropagationKind, TempoConfig};
use tracing::info;

/// Errors that stop a propagation run before any pass executes.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configured clock names a wire the design does not have.
    #[error("clock '{clock}' targets unknown wire '{wire}'")]
    UnknownWire {
        /// The clock being seeded.
        clock: String,
        /// The missing wire name.
        wire: String,
    },
}

/// Builds a registry holding the configured seed clocks.
pub fn seed_registry(
    config: &TempoConfig,
    design: &dyn WireNames,
) -> Result<ClockRegistry, StageError> {
    let mut registry = ClockRegistry::new();
    for (name, def) in &config.clocks {
        let wire = design
            .wire_by_name(&def.wire)
            .ok_or_else(|| StageError::UnknownWire {
                clock: name.clone(),
                wire: def.wire.clone(),
            })?;
        let period = def.period.ns();
        match def.waveform {
            Some([rising, falling]) => {
                registry.add_clock_wire_with_waveform(name, wire, period, rising, falling)
            }
            None => registry.add_clock_wire(name, wire, period),
        }
    }
    Ok(registry)
}

/// Runs the configured passes over `registry`, in order.
pub fn run_passes<D>(registry: &mut ClockRegistry, config: &TempoConfig, design: &D)
where
    D: AliasFinder + SinkFinder,
{
    let library = BufferLibrary::from_config(&config.library);
    for kind in &config.propagation.passes {
        let strategy = match kind {
            PropagationKind::Natural => Propagation::Natural(design),
            PropagationKind::Buffer => Propagation::Buffer {
                finder: design,
                library: &library,
            },
            PropagationKind::ClockDivider => Propagation::ClockDivider,
        };
        let rounds = match kind {
            PropagationKind::Natural => config.propagation.natural_rounds,
            _ => 1,
        };
        registry.propagate_until_stable(strategy, rounds);
    }
}

/// Seeds a registry from `config` and propagates it through `design`.
pub fn run_stage<D>(config: &TempoConfig, design: &D) -> Result<ClockRegistry, StageError>
where
    D: AliasFinder + SinkFinder + WireNames,
{
    let mut registry = seed_registry(config, design)?;
    info!(
        clocks = registry.clock_count(),
        wires = registry.wire_count(),
        "seeded clock registry"
    );
    run_passes(&mut registry, config, design);
    info!(
        clocks = registry.clock_count(),
        wires = registry.wire_count(),
        "clock propagation complete"
    );
    Ok(registry)
}

/// Loads `<project_dir>/tempo.toml` and runs [`run_stage`] with it.
pub fn run_stage_in_dir<D>(project_dir: &Path, design: &D) -> Result<ClockRegistry, StageError>
where
    D: AliasFinder + SinkFinder + WireNames,
{
    let config = load_config(project_dir)?;
    run_stage(&config, design)
}
