//! Locations command handler: list the network's catalog.

use anyhow::Result;

use courier_lib::DispatchSession;

use crate::output::{render_locations, OutputFormat};

pub fn handle_locations(session: &DispatchSession, format: OutputFormat) -> Result<()> {
    render_locations(session.catalog(), format)?;
    Ok(())
}
