//! Inventory document consumed by the orchestration tool
//!
//! Serializes to a single JSON object: one key per group plus the reserved
//! `_meta` key carrying per-host variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resources::Variables;

/// Name of the synthetic group listing every host of the inventory
pub const ALL_HOSTS_GROUP: &str = "all-hosts";

/// Root inventory document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Groups keyed by name
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupEntry>,
    /// Host variables
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

/// Entry of a single group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// Host names in the order the remote source returned them
    pub hosts: Vec<String>,
    /// Group variables, omitted when the remote payload is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<Variables>,
}

/// `_meta` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub hostvars: BTreeMap<String, Variables>,
}

impl Inventory {
    /// Create an empty inventory with an empty `_meta.hostvars`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupEntry {
    /// Attach variables only when the payload is non-empty
    #[must_use]
    pub fn with_vars(mut self, vars: Variables) -> Self {
        self.vars = (!vars.is_empty()).then_some(vars);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vars(value: serde_json::Value) -> Variables {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_inventory_keeps_meta() {
        let value = serde_json::to_value(Inventory::new()).unwrap();
        assert_eq!(value, json!({"_meta": {"hostvars": {}}}));
    }

    #[test]
    fn test_group_without_vars_omits_key() {
        let entry = GroupEntry {
            hosts: vec!["a".into()],
            vars: None,
        }
        .with_vars(Variables::new());

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"hosts": ["a"]}));
    }

    #[test]
    fn test_document_shape() {
        let mut inventory = Inventory::new();
        inventory.groups.insert(
            "web".into(),
            GroupEntry {
                hosts: vec!["a".into(), "b".into()],
                vars: None,
            }
            .with_vars(vars(json!({"tier": "front"}))),
        );
        inventory
            .meta
            .hostvars
            .insert("a".into(), vars(json!({"ip": "10.0.0.1"})));
        inventory.meta.hostvars.insert("b".into(), Variables::new());

        let value = serde_json::to_value(&inventory).unwrap();
        assert_eq!(
            value,
            json!({
                "web": {"hosts": ["a", "b"], "vars": {"tier": "front"}},
                "_meta": {"hostvars": {"a": {"ip": "10.0.0.1"}, "b": {}}}
            })
        );
    }
}
