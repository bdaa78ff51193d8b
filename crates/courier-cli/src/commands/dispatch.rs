//! Dispatch command handler: queue orders, then drain and cost them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use courier_lib::{
    load_orders_from_path, DeliveryTier, DispatchSession, DispatchSummary, OrderRequest,
};

use crate::output::{format_available, format_queue, render_dispatch, OutputFormat};

/// Arguments for the dispatch command.
#[derive(Debug, Clone, Default)]
pub struct DispatchCommandArgs {
    /// Today's available locations; empty means every catalog location.
    pub available: Vec<String>,
    /// Inline expedited orders (`NAME@LOCATION`).
    pub expedited: Vec<String>,
    /// Inline standard orders (`NAME@LOCATION`).
    pub standard: Vec<String>,
    /// CSV batch of additional orders.
    pub orders: Option<PathBuf>,
    /// Override the network's depot.
    pub start: Option<String>,
    /// Attach the visited locations to each leg.
    pub show_paths: bool,
    /// Print the queue contents per tier before dispatching.
    pub show_queue: bool,
}

impl DispatchCommandArgs {
    /// Collect order requests: inline expedited, inline standard, then the
    /// CSV batch.
    pub fn requests(&self) -> Result<Vec<OrderRequest>> {
        let mut requests = Vec::new();
        for (specs, tier) in [
            (&self.expedited, DeliveryTier::Expedited),
            (&self.standard, DeliveryTier::Standard),
        ] {
            for spec in specs {
                requests.push(OrderRequest::parse_inline(spec, tier)?);
            }
        }

        if let Some(path) = &self.orders {
            let batch = load_orders_from_path(path)
                .with_context(|| format!("failed to load orders from {}", path.display()))?;
            requests.extend(batch);
        }
        Ok(requests)
    }
}

/// Handle the dispatch subcommand.
///
/// Rejected orders are logged and skipped; they never abort the pass.
pub fn handle_dispatch(
    session: &mut DispatchSession,
    args: &DispatchCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    if let Some(start) = &args.start {
        session
            .set_start(start)
            .with_context(|| format!("invalid start location {start:?}"))?;
    }

    if !args.available.is_empty() {
        session
            .set_available_locations(args.available.iter().map(String::as_str))
            .context("invalid available location")?;
    }

    let requests = args.requests()?;
    let report = session.submit_all(&requests);
    for (request, err) in &report.rejected {
        warn!(order = %request.name, location = %request.location, "order rejected: {err}");
    }
    info!(
        accepted = report.accepted,
        rejected = report.rejected.len(),
        "orders queued"
    );

    if args.show_queue && !format.is_json() {
        print!(
            "{}",
            format_available(session.catalog(), session.queue().available_locations())
        );
        print!("{}", format_queue(session.queue()));
    }

    let plan = session.dispatch(args.show_paths);
    if plan.is_empty() && !format.is_json() {
        println!("No orders to dispatch.");
        return Ok(());
    }

    let summary = DispatchSummary::from_plan(session.catalog(), &plan);
    render_dispatch(&summary, format)?;
    Ok(())
}
