//! towerinv-api: Shared wire and output types
//!
//! Contains the resource types returned by the fleet-management API and the
//! inventory document emitted for the orchestration tool.

pub mod output;
pub mod resources;

pub use output::{ALL_HOSTS_GROUP, GroupEntry, Inventory, Meta};
pub use resources::{Group, Host, InventorySummary, Page, Related, Variables};
