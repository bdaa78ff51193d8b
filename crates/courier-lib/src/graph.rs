use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::location::{LocationCatalog, LocationId, MAX_SUGGESTIONS};

/// Directed half of an undirected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub target: LocationId,
    pub distance: u32,
}

/// Undirected weighted road network over catalog locations.
///
/// Every [`RouteGraph::add_edge`] call stores the edge in both directions with
/// the same weight. Parallel edges are kept as separate entries.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    catalog: LocationCatalog,
    adjacency: HashMap<LocationId, Vec<Edge>>,
    edge_count: usize,
}

impl RouteGraph {
    /// Create an empty graph whose edges may only join `catalog` locations.
    pub fn new(catalog: LocationCatalog) -> Self {
        Self {
            catalog,
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Add an undirected route of `distance` between `start` and `end`.
    ///
    /// Both endpoints must be catalog locations. When either is unknown the
    /// graph is left unchanged and [`Error::UnknownLocation`] is returned.
    pub fn add_edge(
        &mut self,
        start: impl Into<LocationId>,
        end: impl Into<LocationId>,
        distance: u32,
    ) -> Result<()> {
        let start = start.into();
        let end = end.into();
        for endpoint in [&start, &end] {
            if !self.catalog.contains(endpoint.as_str()) {
                warn!(%start, %end, "route references a location outside the catalog");
                return Err(Error::UnknownLocation {
                    query: endpoint.to_string(),
                    suggestions: self
                        .catalog
                        .fuzzy_matches(endpoint.as_str(), MAX_SUGGESTIONS),
                });
            }
        }

        self.adjacency
            .entry(start.clone())
            .or_default()
            .push(Edge {
                target: end.clone(),
                distance,
            });
        self.adjacency.entry(end.clone()).or_default().push(Edge {
            target: start.clone(),
            distance,
        });
        self.edge_count += 1;

        debug!(%start, %end, distance, "route added");
        Ok(())
    }

    /// Return the neighbours for a given location.
    pub fn neighbours(&self, location: &str) -> &[Edge] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Locations that appear as an endpoint of at least one route.
    pub fn locations(&self) -> impl Iterator<Item = &LocationId> {
        self.adjacency.keys()
    }

    /// Whether `location` is an endpoint of any route.
    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    /// Number of undirected routes added so far.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Weight of the cheapest direct route between two locations.
    pub fn direct_distance(&self, start: &str, end: &str) -> Option<u32> {
        self.neighbours(start)
            .iter()
            .filter(|edge| edge.target.as_str() == end)
            .map(|edge| edge.distance)
            .min()
    }
}

/// Parse a textual route distance, rejecting negative or non-numeric values.
pub fn parse_distance(value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidDistance {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> RouteGraph {
        RouteGraph::new(LocationCatalog::builtin())
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = graph();
        graph.add_edge("A", "B", 20).unwrap();

        assert_eq!(graph.neighbours("A"), &[Edge { target: "B".into(), distance: 20 }]);
        assert_eq!(graph.neighbours("B"), &[Edge { target: "A".into(), distance: 20 }]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn unknown_endpoint_leaves_graph_untouched() {
        let mut graph = graph();
        graph.add_edge("A", "B", 20).unwrap();

        let err = graph.add_edge("A", "Z", 5).expect_err("Z is not catalogued");
        assert!(matches!(err, Error::UnknownLocation { ref query, .. } if query == "Z"));
        assert_eq!(graph.neighbours("A").len(), 1);
        assert!(!graph.contains("Z"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut graph = graph();
        graph.add_edge("A", "B", 20).unwrap();
        graph.add_edge("B", "A", 15).unwrap();

        assert_eq!(graph.neighbours("A").len(), 2);
        assert_eq!(graph.direct_distance("A", "B"), Some(15));
        assert_eq!(graph.direct_distance("A", "C"), None);
    }

    #[test]
    fn isolated_catalog_location_has_no_neighbours() {
        let graph = graph();
        assert!(graph.neighbours("H").is_empty());
        assert_eq!(graph.locations().count(), 0);
    }

    #[test]
    fn unknown_endpoint_suggestions_are_capped() {
        let catalog: LocationCatalog = (1..=6)
            .map(|n| crate::location::Location {
                code: LocationId::new(format!("P{n}")),
                label: format!("Port{n}"),
            })
            .collect();
        let mut graph = RouteGraph::new(catalog);

        match graph.add_edge("Port", "P1", 3) {
            Err(Error::UnknownLocation { suggestions, .. }) => {
                assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
            }
            other => panic!("expected unknown location, got {other:?}"),
        }
    }

    #[test]
    fn parse_distance_rejects_negative_values() {
        assert_eq!(parse_distance(" 40 ").unwrap(), 40);
        assert!(matches!(
            parse_distance("-5"),
            Err(Error::InvalidDistance { .. })
        ));
        assert!(parse_distance("far").is_err());
    }
}
