//! Distances command handler: shortest distances from one location.

use anyhow::{Context, Result};

use courier_lib::{DispatchSession, DistanceSummary};

use crate::output::{render_distances, OutputFormat};

pub fn handle_distances(session: &DispatchSession, from: &str, format: OutputFormat) -> Result<()> {
    let distances = session
        .shortest_distances(from)
        .with_context(|| format!("cannot compute distances from {from:?}"))?;
    let summary = DistanceSummary::from_map(session.catalog(), &distances);
    render_distances(&summary, format)?;
    Ok(())
}
