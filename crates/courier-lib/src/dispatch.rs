//! The dispatch pass: drain the queue and cost each delivery.
//!
//! Routing is greedy. Each order is costed from wherever the previous
//! delivery ended, starting at an explicit depot location.

use serde::Serialize;
use tracing::{info, warn};

use crate::graph::RouteGraph;
use crate::location::LocationId;
use crate::order::Order;
use crate::path::{shortest_distances, shortest_path};
use crate::queue::DispatchQueue;

/// Options for a dispatch pass.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Where the courier starts.
    pub start: LocationId,
    /// Also reconstruct the locations visited on each leg.
    pub include_paths: bool,
}

impl DispatchOptions {
    pub fn from_start(start: impl Into<LocationId>) -> Self {
        Self {
            start: start.into(),
            include_paths: false,
        }
    }

    pub fn with_paths(mut self, include_paths: bool) -> Self {
        self.include_paths = include_paths;
        self
    }
}

/// One dispatched order and the cost of reaching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryLeg {
    /// Position of the leg in the pass, starting at 1.
    pub sequence: usize,
    pub order: Order,
    pub from: LocationId,
    pub to: LocationId,
    /// Shortest distance, `None` when no path exists.
    pub distance: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<LocationId>>,
}

impl DeliveryLeg {
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

/// Sequential route-cost trace produced by [`dispatch_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPlan {
    pub start: LocationId,
    pub legs: Vec<DeliveryLeg>,
}

impl DispatchPlan {
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Sum of the reachable legs' distances.
    pub fn total_distance(&self) -> u64 {
        self.legs.iter().filter_map(|leg| leg.distance).sum()
    }

    pub fn unreachable_count(&self) -> usize {
        self.legs.iter().filter(|leg| !leg.is_reachable()).count()
    }

    /// Where the courier ends up after the last delivery.
    pub fn finish(&self) -> &LocationId {
        self.legs.last().map(|leg| &leg.to).unwrap_or(&self.start)
    }
}

/// Drain `queue` in dispatch order, costing each delivery from the courier's
/// current position.
///
/// The courier moves to each order's location even when it is unreachable,
/// so one unreachable order does not hide the cost of the ones after it.
pub fn dispatch_all(
    queue: &mut DispatchQueue,
    graph: &RouteGraph,
    options: &DispatchOptions,
) -> DispatchPlan {
    let mut current = options.start.clone();
    let mut legs = Vec::with_capacity(queue.len());

    while let Some(order) = queue.dequeue() {
        let distances = shortest_distances(graph, &current);
        let to = order.location().clone();
        let distance = distances.distance_to(to.as_str());

        match distance {
            Some(units) => info!(from = %current, to = %to, units, "shortest path found"),
            None => warn!(from = %current, to = %to, order = order.name(), "no path found"),
        }

        let path = if options.include_paths {
            shortest_path(graph, &current, &to).map(|route| route.steps)
        } else {
            None
        };

        legs.push(DeliveryLeg {
            sequence: legs.len() + 1,
            order,
            from: current,
            to: to.clone(),
            distance,
            path,
        });
        current = to;
    }

    DispatchPlan {
        start: options.start.clone(),
        legs,
    }
}
