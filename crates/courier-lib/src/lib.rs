//! Courier dispatch library entry points.
//!
//! This crate holds the two-tier dispatch queue, the weighted location graph
//! with its shortest-path search, and the dispatch pass that drains the queue
//! while costing each delivery from the courier's current position.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod batch;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod graph;
pub mod location;
pub mod order;
pub mod output;
pub mod path;
pub mod queue;
pub mod session;

pub use batch::{load_orders, load_orders_from_path};
pub use config::{
    resolve_network_path, NetworkConfig, NetworkPreset, RouteSpec, NETWORK_ENV_VAR,
};
pub use dispatch::{dispatch_all, DeliveryLeg, DispatchOptions, DispatchPlan};
pub use error::{Error, Result};
pub use graph::{parse_distance, Edge, RouteGraph};
pub use location::{Location, LocationCatalog, LocationId};
pub use order::{DeliveryTier, Order, OrderRequest};
pub use output::{DispatchSummary, DistanceSummary, LocationRef, PathSummary, RenderMode};
pub use path::{shortest_distances, shortest_path, DistanceMap, RoutePath};
pub use queue::DispatchQueue;
pub use session::{DispatchSession, SubmissionReport};
