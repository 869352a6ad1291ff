//! Scalar data attachment
//!
//! Every control that is not an array container gets the value at its scope
//! attached as `data`. A missing (or null) value leaves the control unbound.
//! Details of an `array-select` are skipped: their scopes are relative to the
//! element chosen at render time, not to the document root.

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::Result;
use crate::node::{self, ArrayKind, Visit, DATA};
use crate::scope;

/// Attach data values to controls; returns how many got one
pub fn attach_data(tree: &mut Value, data: &Value) -> Result<usize> {
    let mut bound = 0;

    node::for_each_node_mut(tree, &node::is_control, &mut |control| {
        match ArrayKind::of(control) {
            Some(ArrayKind::ArraySelect) => return Ok(Visit::SkipChildren),
            Some(ArrayKind::Array) => return Ok(Visit::Continue),
            None => {}
        }

        let value = {
            let scope = node::require_scope(control)?;
            let value = scope::resolve_data(data, scope).filter(|v| !v.is_null());
            if value.is_none() {
                trace!(%scope, "no data for control");
            }
            value.cloned()
        };

        if let Some(value) = value {
            node::set(control, DATA, value);
            bound += 1;
        }
        Ok(Visit::Continue)
    })?;

    debug!(bound, "data attachment complete");
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attaches_scalar_values() {
        let mut tree = json!({
            "type": "VerticalLayout",
            "elements": [
                {"type": "Control", "scope": "#/properties/name"},
                {"type": "Control", "scope": "#/properties/personalData/properties/age"},
                {"type": "Control", "scope": "#/properties/vegetarian"}
            ]
        });
        let data = json!({"name": "John Doe", "vegetarian": false, "personalData": {"age": 34}});

        let bound = attach_data(&mut tree, &data).unwrap();
        assert_eq!(bound, 3);
        assert_eq!(tree["elements"][0]["data"], "John Doe");
        assert_eq!(tree["elements"][1]["data"], 34);
        assert_eq!(tree["elements"][2]["data"], false);
    }

    #[test]
    fn missing_and_null_values_stay_unbound() {
        let mut tree = json!({
            "type": "VerticalLayout",
            "elements": [
                {"type": "Control", "scope": "#/properties/missing"},
                {"type": "Control", "scope": "#/properties/nothing"}
            ]
        });
        let bound = attach_data(&mut tree, &json!({"nothing": null})).unwrap();
        assert_eq!(bound, 0);
        assert!(tree["elements"][0].get("data").is_none());
        assert!(tree["elements"][1].get("data").is_none());
    }

    #[test]
    fn array_controls_get_no_data_but_their_details_do() {
        let mut tree = json!({
            "type": "Control",
            "scope": "#/properties/comments",
            "schema": {"type": "array"},
            "options": {"detail": [
                {"type": "Control", "scope": "#/properties/comments/0/properties/name"}
            ]}
        });
        let data = json!({"comments": [{"name": "Ann"}]});

        attach_data(&mut tree, &data).unwrap();
        assert!(tree.get("data").is_none());
        assert_eq!(tree["options"]["detail"][0]["data"], "Ann");
    }

    #[test]
    fn array_select_subtree_is_skipped() {
        let mut tree = json!({
            "type": "Control",
            "scope": "#/properties/comments",
            "schema": {"type": "array-select"},
            "options": {"detail": {
                "type": "Control",
                "scope": "name"
            }}
        });
        let data = json!({"comments": [], "name": "root level"});

        let bound = attach_data(&mut tree, &data).unwrap();
        assert_eq!(bound, 0);
        assert!(tree["options"]["detail"].get("data").is_none());
    }

    #[test]
    fn missing_scope_is_an_error() {
        let mut tree = json!({"type": "Control"});
        assert!(attach_data(&mut tree, &json!({})).is_err());
    }
}
