//! A dispatch session: one network, one queue, one depot.
//!
//! [`DispatchSession`] is the entry point for drivers such as the CLI. It
//! resolves user-supplied location names against the catalog before handing
//! them to the queue and the graph, and it owns both for the lifetime of the
//! session.

use tracing::debug;

use crate::config::NetworkConfig;
use crate::dispatch::{dispatch_all, DispatchOptions, DispatchPlan};
use crate::error::{Error, Result};
use crate::graph::RouteGraph;
use crate::location::{LocationCatalog, LocationId};
use crate::order::{DeliveryTier, Order, OrderRequest};
use crate::path::{shortest_distances, shortest_path, DistanceMap, RoutePath};
use crate::queue::DispatchQueue;

/// Outcome of submitting a batch of orders.
#[derive(Debug, Default)]
pub struct SubmissionReport {
    pub accepted: usize,
    pub rejected: Vec<(OrderRequest, Error)>,
}

#[derive(Debug, Clone)]
pub struct DispatchSession {
    graph: RouteGraph,
    queue: DispatchQueue,
    start: LocationId,
}

impl DispatchSession {
    /// Start a session over `graph` with the courier at `start`.
    ///
    /// Every catalog location is available until
    /// [`DispatchSession::set_available_locations`] narrows the set.
    pub fn new(graph: RouteGraph, start: &str) -> Result<Self> {
        let start = graph.catalog().resolve(start)?;
        let queue = DispatchQueue::with_available(graph.catalog().codes().cloned());
        Ok(Self {
            graph,
            queue,
            start,
        })
    }

    /// Build the network described by `config` and start a session on it.
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        let (_, graph) = config.build()?;
        Self::new(graph, config.start.as_str())
    }

    pub fn catalog(&self) -> &LocationCatalog {
        self.graph.catalog()
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn queue(&self) -> &DispatchQueue {
        &self.queue
    }

    pub fn start(&self) -> &LocationId {
        &self.start
    }

    /// Move the courier's depot for subsequent dispatch passes.
    pub fn set_start(&mut self, start: &str) -> Result<()> {
        self.start = self.catalog().resolve(start)?;
        Ok(())
    }

    /// Restrict today's deliveries to `locations`.
    ///
    /// Entries may be codes or labels. If any entry is unknown nothing changes.
    pub fn set_available_locations<'a, I>(&mut self, locations: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let resolved = locations
            .into_iter()
            .map(|query| self.catalog().resolve(query))
            .collect::<Result<Vec<_>>>()?;
        self.queue.set_available_locations(resolved);
        Ok(())
    }

    /// Whether orders for `location` (code or label) are accepted today.
    pub fn is_location_valid(&self, location: &str) -> bool {
        self.catalog()
            .resolve(location)
            .map(|code| self.queue.is_location_valid(code.as_str()))
            .unwrap_or(false)
    }

    /// Queue an order; `location` may be a code or a label.
    pub fn enqueue(&mut self, name: &str, tier: DeliveryTier, location: &str) -> Result<&Order> {
        let code = self.catalog().resolve(location)?;
        self.queue.enqueue(name, tier, code)
    }

    pub fn submit(&mut self, request: &OrderRequest) -> Result<&Order> {
        self.enqueue(&request.name, request.tier, &request.location)
    }

    /// Submit every request, collecting rejections instead of stopping.
    pub fn submit_all<'a, I>(&mut self, requests: I) -> SubmissionReport
    where
        I: IntoIterator<Item = &'a OrderRequest>,
    {
        let mut report = SubmissionReport::default();
        for request in requests {
            match self.submit(request) {
                Ok(_) => report.accepted += 1,
                Err(err) => report.rejected.push((request.clone(), err)),
            }
        }
        debug!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "order batch submitted"
        );
        report
    }

    pub fn dequeue(&mut self) -> Option<Order> {
        self.queue.dequeue()
    }

    /// Add a route between two catalog locations (codes or labels).
    pub fn add_route(&mut self, start: &str, end: &str, distance: u32) -> Result<()> {
        let start = self.catalog().resolve(start)?;
        let end = self.catalog().resolve(end)?;
        self.graph.add_edge(start, end, distance)
    }

    pub fn shortest_distances(&self, source: &str) -> Result<DistanceMap> {
        let source = self.catalog().resolve(source)?;
        Ok(shortest_distances(&self.graph, &source))
    }

    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Option<RoutePath>> {
        let from = self.catalog().resolve(from)?;
        let to = self.catalog().resolve(to)?;
        Ok(shortest_path(&self.graph, &from, &to))
    }

    /// Drain the queue from the session's depot.
    pub fn dispatch(&mut self, include_paths: bool) -> DispatchPlan {
        let options = DispatchOptions::from_start(self.start.clone()).with_paths(include_paths);
        dispatch_all(&mut self.queue, &self.graph, &options)
    }

    /// Clear queued orders and today's available locations. The network and
    /// depot are kept.
    pub fn reset(&mut self) {
        self.queue.reset();
    }
}
