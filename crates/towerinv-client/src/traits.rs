//! Remote source capability

use async_trait::async_trait;
use towerinv_api::{Group, Host, InventorySummary, Variables};

use crate::error::Result;

/// Read access to the fleet-management API needed to build an inventory
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Every inventory visible to the authenticated principal
    async fn list_inventories(&self) -> Result<Vec<InventorySummary>>;

    /// Groups of an inventory, in the order the remote source returns them
    async fn list_groups(&self, inventory_id: &str) -> Result<Vec<Group>>;

    /// Hosts of a group, in the order the remote source returns them
    async fn list_hosts(&self, group: &Group) -> Result<Vec<Host>>;

    /// Variable payload behind a `variable_data` locator; an empty body is `{}`
    async fn variables(&self, locator: &str) -> Result<Variables>;

    /// Variable payload of the inventory itself
    async fn inventory_variables(&self, inventory_id: &str) -> Result<Variables>;
}
