//! Inventory aggregation
//!
//! Walks groups, their hosts and every variable payload of one inventory and
//! folds the results into an [`Inventory`] document. Reads are issued one at a
//! time; the first failing read aborts the build and nothing is returned.

use tracing::{debug, info, instrument, warn};

use towerinv_api::{ALL_HOSTS_GROUP, GroupEntry, Host, Inventory};
use towerinv_client::{ClientError, InventorySource, Result};

/// Builds inventory documents from an [`InventorySource`]
pub struct InventoryBuilder<'a, S: ?Sized> {
    source: &'a S,
    all_hosts_group: bool,
}

impl<'a, S: InventorySource + ?Sized> InventoryBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            all_hosts_group: false,
        }
    }

    /// Also emit the synthetic group listing every host with the inventory's
    /// own variables
    #[must_use]
    pub fn with_all_hosts_group(mut self, enabled: bool) -> Self {
        self.all_hosts_group = enabled;
        self
    }

    /// Build the inventory document for `inventory_id`
    ///
    /// A fresh document is assembled on every call.
    ///
    /// # Errors
    /// Returns the first remote read error; no partial document is produced.
    #[instrument(skip(self))]
    pub async fn build(&self, inventory_id: &str) -> Result<Inventory> {
        let mut inventory = Inventory::new();

        let mut all_hosts = if self.all_hosts_group {
            let vars = self.source.inventory_variables(inventory_id).await?;
            Some(GroupEntry {
                hosts: Vec::new(),
                vars: Some(vars),
            })
        } else {
            None
        };

        let groups = self.source.list_groups(inventory_id).await?;
        debug!(groups = groups.len(), "fetched groups");

        for group in groups {
            let mut entry = GroupEntry::default();

            for host in self.source.list_hosts(&group).await? {
                let vars = self.source.variables(host_vars_locator(&host)?).await?;

                if let Some(all_hosts) = all_hosts.as_mut() {
                    all_hosts.hosts.push(host.name.clone());
                }
                entry.hosts.push(host.name.clone());
                inventory.meta.hostvars.insert(host.name, vars);
            }

            let locator = group.related.variable_data.as_deref().ok_or_else(|| {
                ClientError::MissingLocator {
                    resource: "group",
                    name: group.name.clone(),
                    locator: "variable_data",
                }
            })?;
            let entry = entry.with_vars(self.source.variables(locator).await?);

            debug!(group = %group.name, hosts = entry.hosts.len(), "group assembled");
            if inventory.groups.insert(group.name.clone(), entry).is_some() {
                warn!(group = %group.name, "duplicate group name, keeping the last one");
            }
        }

        if let Some(all_hosts) = all_hosts {
            if inventory
                .groups
                .insert(ALL_HOSTS_GROUP.to_string(), all_hosts)
                .is_some()
            {
                warn!(
                    group = ALL_HOSTS_GROUP,
                    "remote group shadowed by the synthetic all-hosts group"
                );
            }
        }

        info!(
            groups = inventory.groups.len(),
            hosts = inventory.meta.hostvars.len(),
            "inventory built"
        );

        Ok(inventory)
    }
}

fn host_vars_locator(host: &Host) -> Result<&str> {
    host.related
        .variable_data
        .as_deref()
        .ok_or_else(|| ClientError::MissingLocator {
            resource: "host",
            name: host.name.clone(),
            locator: "variable_data",
        })
}
