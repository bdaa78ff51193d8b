//! Route command handler for the cheapest path between two locations.

use anyhow::{anyhow, Context, Result};

use courier_lib::{DispatchSession, PathSummary};

use crate::output::{render_path, OutputFormat};

pub fn handle_route(
    session: &DispatchSession,
    from: &str,
    to: &str,
    format: OutputFormat,
) -> Result<()> {
    let path = session
        .shortest_path(from, to)
        .context("failed to resolve route endpoints")?
        .ok_or_else(|| anyhow!("no route found between {from} and {to}"))?;

    let summary = PathSummary::from_path(session.catalog(), &path)
        .context("failed to build route summary for display")?;
    render_path(&summary, format)?;
    Ok(())
}
