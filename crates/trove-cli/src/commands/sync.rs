//! Sync command handler

use anyhow::{Context, Result};

use crate::output::Output;
use crate::App;

/// Run a refresh cycle and report the outcome.
///
/// Joins the startup refresh when one is still in flight; otherwise runs
/// a fresh cycle.
pub async fn run(app: &App, output: &Output) -> Result<()> {
    output.message("Refreshing catalog...");

    let outcome = match app.coordinator.join().await.context("Refresh failed")? {
        Some(outcome) => Some(outcome),
        None => app
            .coordinator
            .refresh_and_join()
            .await
            .context("Refresh failed")?,
    };

    if let Some(o) = outcome {
        output.success(&format!(
            "Catalog refreshed: {} item(s), {} property name(s)",
            o.items, o.properties
        ));
    }
    Ok(())
}
