//! Resource types returned by the fleet-management API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary key-value variables attached to a host, group, or inventory
pub type Variables = Map<String, Value>;

/// Paged list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// Locator of the next page, `None` on the last page
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Inventory as listed by `/inventories/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub id: u64,
    pub name: String,
}

/// Sub-resource locators of a group or host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Related {
    /// Every host of a group, including hosts of child groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_hosts: Option<String>,
    /// Variable payload of the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_data: Option<String>,
}

/// Inventory group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub related: Related,
}

/// Managed host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub related: Related,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_page_deserialization() {
        let body = r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "id": 4,
                "name": "web",
                "description": "",
                "related": {
                    "all_hosts": "/api/v1/groups/4/all_hosts/",
                    "variable_data": "/api/v1/groups/4/variable_data/",
                    "children": "/api/v1/groups/4/children/"
                }
            }]
        }"#;

        let page: Page<Group> = serde_json::from_str(body).unwrap();
        assert_eq!(page.count, Some(1));
        assert!(page.next.is_none());
        assert_eq!(page.results[0].name, "web");
        assert_eq!(
            page.results[0].related.all_hosts.as_deref(),
            Some("/api/v1/groups/4/all_hosts/")
        );
    }

    #[test]
    fn test_host_without_related() {
        let host: Host = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert_eq!(host.name, "a");
        assert!(host.related.variable_data.is_none());
    }

    #[test]
    fn test_page_without_links() {
        let page: Page<InventorySummary> =
            serde_json::from_str(r#"{"results": [{"id": 1, "name": "prod"}]}"#).unwrap();
        assert!(page.next.is_none());
        assert_eq!(
            page.results,
            vec![InventorySummary {
                id: 1,
                name: "prod".to_string()
            }]
        );
    }
}
