// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments and
// dispatches to these handlers.

pub mod dispatch;
pub mod distances;
pub mod locations;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use courier_lib::{DispatchSession, NetworkConfig, NetworkPreset, RouteSpec};

/// Built-in network selected with `--network-preset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// Nine-route chain from Colombo to Anuradhapura.
    Reference,
    /// A direct route between every pair of districts.
    Complete,
}

impl From<PresetArg> for NetworkPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Reference => NetworkPreset::Reference,
            PresetArg::Complete => NetworkPreset::Complete,
        }
    }
}

/// Load the network (preset, explicit path, environment, config dir or
/// built-in), apply any extra `--route` entries and start a session on it.
pub fn load_session(
    network: Option<&Path>,
    preset: Option<PresetArg>,
    extra_routes: &[String],
) -> Result<DispatchSession> {
    let config = match preset {
        Some(preset) => NetworkPreset::from(preset).config(),
        None => NetworkConfig::load(network).context("failed to load network configuration")?,
    };
    let mut session =
        DispatchSession::from_config(&config).context("invalid network configuration")?;

    for spec in extra_routes {
        let route = RouteSpec::parse_inline(spec)
            .with_context(|| format!("invalid --route value {spec:?}"))?;
        session
            .add_route(route.from.as_str(), route.to.as_str(), route.distance)
            .with_context(|| format!("failed to add route {spec:?}"))?;
    }

    Ok(session)
}
