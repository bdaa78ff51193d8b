//! Network configuration: catalog, routes and the courier's depot.
//!
//! A network is normally one of the built-in eight-district maps (see
//! [`NetworkPreset`]). Callers can supply their own as JSON:
//!
//! ```json
//! {
//!   "start": "A",
//!   "locations": [{ "code": "A", "label": "Colombo" }, { "code": "B", "label": "Gampaha" }],
//!   "routes": [{ "from": "A", "to": "B", "distance": 20 }]
//! }
//! ```

use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{parse_distance, RouteGraph};
use crate::location::{Location, LocationCatalog, LocationId, MAX_SUGGESTIONS};

/// Environment variable that points at a network configuration file.
pub const NETWORK_ENV_VAR: &str = "COURIER_NETWORK";

/// File name looked up inside the platform configuration directory.
const NETWORK_FILENAME: &str = "network.json";

const BUILTIN_START: &str = "A";

const BUILTIN_ROUTES: [(&str, &str, u32); 9] = [
    ("A", "B", 20),
    ("A", "C", 50),
    ("B", "C", 30),
    ("B", "D", 40),
    ("C", "D", 70),
    ("D", "E", 60),
    ("E", "F", 80),
    ("F", "G", 120),
    ("G", "H", 90),
];

/// Every district pair connected directly.
const BUILTIN_COMPLETE_ROUTES: [(&str, &str, u32); 28] = [
    ("A", "B", 20),
    ("A", "C", 50),
    ("A", "D", 100),
    ("A", "E", 150),
    ("A", "F", 200),
    ("A", "G", 250),
    ("A", "H", 300),
    ("B", "C", 30),
    ("B", "D", 60),
    ("B", "E", 90),
    ("B", "F", 130),
    ("B", "G", 180),
    ("B", "H", 230),
    ("C", "D", 70),
    ("C", "E", 100),
    ("C", "F", 140),
    ("C", "G", 190),
    ("C", "H", 240),
    ("D", "E", 60),
    ("D", "F", 100),
    ("D", "G", 150),
    ("D", "H", 200),
    ("E", "F", 80),
    ("E", "G", 130),
    ("E", "H", 180),
    ("F", "G", 120),
    ("F", "H", 170),
    ("G", "H", 90),
];

/// Built-in networks over the eight reference districts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkPreset {
    /// Sparse chain of nine routes from Colombo to Anuradhapura.
    #[default]
    Reference,
    /// Direct routes between every pair of districts.
    Complete,
}

impl NetworkPreset {
    pub fn config(self) -> NetworkConfig {
        match self {
            NetworkPreset::Reference => NetworkConfig::builtin(),
            NetworkPreset::Complete => NetworkConfig::builtin_complete(),
        }
    }
}

/// A single undirected route in a network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub from: LocationId,
    pub to: LocationId,
    pub distance: u32,
}

impl RouteSpec {
    /// Parse the inline `FROM:TO:DISTANCE` form used on the command line.
    pub fn parse_inline(spec: &str) -> Result<Self> {
        let mut parts = spec.splitn(3, ':').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(from), Some(to), Some(distance)) if !from.is_empty() && !to.is_empty() => {
                Ok(Self {
                    from: from.into(),
                    to: to.into(),
                    distance: parse_distance(distance)?,
                })
            }
            _ => Err(Error::InvalidRouteSpec {
                spec: spec.to_string(),
            }),
        }
    }
}

/// Serializable description of a delivery network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Default depot for dispatch passes.
    pub start: LocationId,
    pub locations: Vec<Location>,
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl NetworkConfig {
    /// The reference network: eight districts starting from Colombo.
    pub fn builtin() -> Self {
        Self::with_builtin_catalog(&BUILTIN_ROUTES)
    }

    /// The eight districts with a direct route between every pair.
    pub fn builtin_complete() -> Self {
        Self::with_builtin_catalog(&BUILTIN_COMPLETE_ROUTES)
    }

    fn with_builtin_catalog(routes: &[(&str, &str, u32)]) -> Self {
        Self {
            start: BUILTIN_START.into(),
            locations: LocationCatalog::builtin()
                .iter()
                .map(|(code, label)| Location {
                    code: code.clone(),
                    label: label.to_string(),
                })
                .collect(),
            routes: routes
                .iter()
                .map(|(from, to, distance)| RouteSpec {
                    from: (*from).into(),
                    to: (*to).into(),
                    distance: *distance,
                })
                .collect(),
        }
    }

    /// Load a network from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let config = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            locations = config.locations.len(),
            routes = config.routes.len(),
            "loaded network configuration"
        );
        Ok(config)
    }

    /// Load a network from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load from `path` when given, otherwise fall back to
    /// [`resolve_network_path`] and finally the built-in network.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(resolve_network_path) {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("using built-in network");
                Ok(Self::builtin())
            }
        }
    }

    /// Validate the configuration and build its catalog and route graph.
    pub fn build(&self) -> Result<(LocationCatalog, RouteGraph)> {
        let mut catalog = LocationCatalog::new();
        for location in &self.locations {
            if catalog
                .insert(location.code.clone(), location.label.clone())
                .is_some()
            {
                return Err(Error::DuplicateLocation {
                    code: location.code.clone(),
                });
            }
        }

        if !catalog.contains(self.start.as_str()) {
            return Err(Error::UnknownLocation {
                query: self.start.to_string(),
                suggestions: catalog.fuzzy_matches(self.start.as_str(), MAX_SUGGESTIONS),
            });
        }

        let mut graph = RouteGraph::new(catalog.clone());
        for route in &self.routes {
            graph.add_edge(route.from.clone(), route.to.clone(), route.distance)?;
        }
        debug!(
            locations = catalog.len(),
            routes = graph.edge_count(),
            "built route graph"
        );

        Ok((catalog, graph))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Locate a network configuration file without an explicit path.
///
/// Checks the [`NETWORK_ENV_VAR`] environment variable first, then
/// `network.json` inside the platform configuration directory. Returns `None`
/// when neither exists.
pub fn resolve_network_path() -> Option<PathBuf> {
    if let Some(value) = env::var_os(NETWORK_ENV_VAR) {
        if !value.is_empty() {
            return Some(PathBuf::from(value));
        }
    }

    let candidate = default_network_path()?;
    candidate.exists().then_some(candidate)
}

/// Platform-specific location of the user's network file.
pub fn default_network_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "courier", "courier")
        .map(|dirs| dirs.config_dir().join(NETWORK_FILENAME))
}
