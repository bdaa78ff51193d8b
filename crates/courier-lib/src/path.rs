use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::graph::RouteGraph;
use crate::location::LocationId;

/// Shortest distances from a single source, as computed by
/// [`shortest_distances`].
///
/// Every location that is a route endpoint has an entry; `None` marks a
/// location with no path from the source. Catalog locations without any
/// routes are absent, and [`DistanceMap::distance_to`] reports them the same
/// way as unreachable ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceMap {
    source: LocationId,
    distances: BTreeMap<LocationId, Option<u64>>,
}

impl DistanceMap {
    pub fn source(&self) -> &LocationId {
        &self.source
    }

    /// Distance to `location`, or `None` when there is no path.
    pub fn distance_to(&self, location: &str) -> Option<u64> {
        self.distances.get(location).copied().flatten()
    }

    pub fn is_reachable(&self, location: &str) -> bool {
        self.distance_to(location).is_some()
    }

    /// Whether `location` has an entry at all (finite or not).
    pub fn contains(&self, location: &str) -> bool {
        self.distances.contains_key(location)
    }

    /// All entries in location order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, Option<u64>)> {
        self.distances
            .iter()
            .map(|(location, distance)| (location, *distance))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Cheapest path between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePath {
    pub steps: Vec<LocationId>,
    pub distance: u64,
}

impl RoutePath {
    /// Number of routes travelled.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm from `source` over the whole graph.
pub fn shortest_distances(graph: &RouteGraph, source: &LocationId) -> DistanceMap {
    let search = dijkstra(graph, source, None);
    let reachable = search.distances.values().filter(|d| d.is_some()).count();
    debug!(
        %source,
        locations = search.distances.len(),
        reachable,
        "computed shortest distances"
    );

    DistanceMap {
        source: source.clone(),
        distances: search.distances.into_iter().collect(),
    }
}

/// Find the lowest-cost path from `start` to `goal`.
///
/// Returns `None` when `goal` cannot be reached.
pub fn shortest_path(graph: &RouteGraph, start: &LocationId, goal: &LocationId) -> Option<RoutePath> {
    if start == goal {
        return Some(RoutePath {
            steps: vec![start.clone()],
            distance: 0,
        });
    }

    let search = dijkstra(graph, start, Some(goal));
    let distance = search.distances.get(goal).copied().flatten()?;
    Some(RoutePath {
        steps: reconstruct_path(&search.parents, start, goal),
        distance,
    })
}

struct Search {
    distances: HashMap<LocationId, Option<u64>>,
    parents: HashMap<LocationId, LocationId>,
}

/// Core Dijkstra loop with lazy deletion of stale frontier entries.
///
/// With a `goal` the search stops as soon as the goal is settled; the
/// distances of locations not yet settled are then tentative.
fn dijkstra(graph: &RouteGraph, source: &LocationId, goal: Option<&LocationId>) -> Search {
    let mut distances: HashMap<LocationId, Option<u64>> = graph
        .locations()
        .map(|location| (location.clone(), None))
        .collect();
    let mut parents: HashMap<LocationId, LocationId> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    distances.insert(source.clone(), Some(0));
    frontier.push(QueueEntry::new(source.clone(), 0));

    while let Some(entry) = frontier.pop() {
        match distances.get(&entry.node).copied().flatten() {
            Some(recorded) if entry.cost > recorded => continue,
            Some(_) => {}
            None => continue,
        }

        if goal == Some(&entry.node) {
            break;
        }

        for edge in graph.neighbours(entry.node.as_str()) {
            let next_cost = entry.cost + u64::from(edge.distance);
            let improves = distances
                .get(&edge.target)
                .copied()
                .flatten()
                .map_or(true, |known| next_cost < known);
            if improves {
                distances.insert(edge.target.clone(), Some(next_cost));
                parents.insert(edge.target.clone(), entry.node.clone());
                frontier.push(QueueEntry::new(edge.target.clone(), next_cost));
            }
        }
    }

    Search { distances, parents }
}

fn reconstruct_path(
    parents: &HashMap<LocationId, LocationId>,
    start: &LocationId,
    goal: &LocationId,
) -> Vec<LocationId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.clone());
        if node == start {
            break;
        }
        current = parents.get(node);
    }
    path.reverse();
    path
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: LocationId,
    cost: u64,
}

impl QueueEntry {
    fn new(node: LocationId, cost: u64) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
