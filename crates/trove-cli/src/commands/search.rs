//! Search and property-index command handlers

use anyhow::{Context, Result};

use trove_core::TroveError;

use crate::output::Output;
use crate::App;

/// List every distinct property name in the catalog
pub async fn properties(app: &App, output: &Output) -> Result<()> {
    app.coordinator.join().await.context("Refresh failed")?;

    match app.coordinator.require_index().await {
        Ok(index) => output.print_properties(&index),
        Err(TroveError::NoProperties) => output.message("No properties available yet."),
        Err(e) => return Err(e).context("Property index unavailable"),
    }
    Ok(())
}

/// Values of properties whose name contains the fragment
pub async fn by_name(app: &App, fragment: String, output: &Output) -> Result<()> {
    app.coordinator.join().await.context("Refresh failed")?;

    match app.store.values_by_name_fragment(&fragment).await {
        Ok(values) => output.print_values(&values),
        Err(TroveError::NotLoaded) => output.message("No items loaded yet."),
        Err(e) => return Err(e).context("Search failed"),
    }
    Ok(())
}

/// Items with a property value equal to the target
pub async fn by_value(app: &App, value: String, output: &Output) -> Result<()> {
    app.coordinator.join().await.context("Refresh failed")?;

    match app.store.find_by_value(&value).await {
        Ok(matches) => output.print_matches(&matches),
        Err(TroveError::NotLoaded) => output.message("No items loaded yet."),
        Err(e) => return Err(e).context("Search failed"),
    }
    Ok(())
}
