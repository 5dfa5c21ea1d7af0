//! towerinv-core: Inventory aggregation and settings
//!
//! Builds the inventory document from an [`InventorySource`](towerinv_client::InventorySource),
//! formats the inventory listing, and loads settings from the environment.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod modes;

pub use aggregator::InventoryBuilder;
pub use config::{FileSettings, Settings};
pub use error::{ConfigError, CoreError, Result};
pub use modes::{
    HOST_DETAILS_UNSUPPORTED, format_inventories, host_details, inventory_json, list_inventories,
};
