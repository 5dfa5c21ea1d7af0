//! Output of the three command-line modes

use towerinv_api::InventorySummary;
use towerinv_client::InventorySource;

use crate::aggregator::InventoryBuilder;
use crate::config::Settings;
use crate::error::Result;

/// Message printed for host-detail mode, which is not supported
pub const HOST_DETAILS_UNSUPPORTED: &str = "Not implemented. For more information: http://docs.ansible.com/developing_inventory.html#tuning-the-external-inventory-script";

/// Format inventories as `[id] name` lines in the order given
#[must_use]
pub fn format_inventories(inventories: &[InventorySummary]) -> String {
    inventories
        .iter()
        .map(|inventory| format!("[{}] {}", inventory.id, inventory.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the configured inventory and serialize it as JSON
///
/// # Errors
/// Returns an error if no inventory id is configured, a remote read fails, or
/// serialization fails.
pub async fn inventory_json<S: InventorySource + ?Sized>(
    source: &S,
    settings: &Settings,
    pretty: bool,
) -> Result<String> {
    let inventory = InventoryBuilder::new(source)
        .with_all_hosts_group(settings.all_hosts_group)
        .build(settings.inventory_id()?)
        .await?;

    let json = if pretty {
        serde_json::to_string_pretty(&inventory)?
    } else {
        serde_json::to_string(&inventory)?
    };
    Ok(json)
}

/// Fetch and format every inventory visible to the caller
///
/// # Errors
/// Returns an error if the remote read fails.
pub async fn list_inventories<S: InventorySource + ?Sized>(source: &S) -> Result<String> {
    let inventories = source.list_inventories().await?;
    Ok(format_inventories(&inventories))
}

/// Host-detail mode
///
/// Host variables are already delivered through `_meta.hostvars`, so no remote
/// call is made.
#[must_use]
pub fn host_details(host: &str) -> &'static str {
    tracing::debug!(host, "host detail mode requested");
    HOST_DETAILS_UNSUPPORTED
}
