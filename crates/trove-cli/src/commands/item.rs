//! Item command handlers
//!
//! Every handler joins the in-flight refresh before touching the store.
//! Create and delete trigger a full follow-up refresh rather than patching
//! the collection locally; the store is authoritative only after it.

use anyhow::{bail, Context, Result};

use trove_core::{Item, PropertyValue, RemoteSource};

use crate::output::Output;
use crate::App;

/// List all items
pub async fn list(app: &App, output: &Output) -> Result<()> {
    app.coordinator.join().await.context("Refresh failed")?;

    match app.store.get_all().await {
        Some(items) => output.print_items(&items),
        None => output.message("No items loaded yet."),
    }
    Ok(())
}

/// Create a new item and push it through a refresh
pub async fn create(app: &App, name: String, props: Vec<String>, output: &Output) -> Result<()> {
    app.coordinator.join().await.context("Refresh failed")?;

    let mut item = Item::new(&name);
    for pair in &props {
        let (prop_name, value) = parse_prop(pair)?;
        item.set_property(prop_name, value);
    }

    let stored = app
        .remote
        .create(&item)
        .await
        .context("Failed to create item on the remote")?;
    app.store.add(stored.clone()).await;

    app.coordinator
        .refresh_and_join()
        .await
        .context("Refresh after create failed")?;

    output.success(&format!("Created item: {}", stored.name));
    output.print_item(&stored);
    Ok(())
}

/// Delete an item by id
pub async fn delete(app: &App, id: String, output: &Output) -> Result<()> {
    app.coordinator.join().await.context("Refresh failed")?;

    let removed = app.store.remove_by_id(&id).await;
    if !removed {
        output.message(&format!("No item with id: {}", id));
        return Ok(());
    }

    // Mirror the removal upstream, then re-sync the authoritative view
    app.remote
        .delete(&id)
        .await
        .context("Failed to delete item on the remote")?;

    app.coordinator
        .refresh_and_join()
        .await
        .context("Refresh after delete failed")?;

    output.success(&format!("Deleted item: {}", id));
    Ok(())
}

/// Parse a `name=value` property pair.
///
/// Values that parse as numbers become numeric properties.
fn parse_prop(pair: &str) -> Result<(String, PropertyValue)> {
    let Some((name, value)) = pair.split_once('=') else {
        bail!("Invalid property '{}': expected name=value", pair);
    };

    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid property '{}': empty name", pair);
    }

    let value = value.trim();
    let value = match value.parse::<f64>() {
        Ok(n) => PropertyValue::Number(n),
        Err(_) => PropertyValue::Text(value.to_string()),
    };

    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prop_text() {
        let (name, value) = parse_prop("Color=Red").unwrap();
        assert_eq!(name, "Color");
        assert_eq!(value, PropertyValue::Text("Red".to_string()));
    }

    #[test]
    fn test_parse_prop_number() {
        let (name, value) = parse_prop("Weight=10").unwrap();
        assert_eq!(name, "Weight");
        assert_eq!(value, PropertyValue::Number(10.0));
    }

    #[test]
    fn test_parse_prop_trims_whitespace() {
        let (name, value) = parse_prop(" Color = Dark Red ").unwrap();
        assert_eq!(name, "Color");
        assert_eq!(value, PropertyValue::Text("Dark Red".to_string()));
    }

    #[test]
    fn test_parse_prop_rejects_bad_pairs() {
        assert!(parse_prop("no-equals-sign").is_err());
        assert!(parse_prop("=value-only").is_err());
    }
}
