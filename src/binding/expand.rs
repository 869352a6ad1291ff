//! Array expansion
//!
//! An `array` control with data carries one detail template; it is replaced
//! by one realized sub-tree per data element, in data order:
//!
//! ```text
//! options.detail = { ... #/properties/comments/items/properties/name ... }
//!                          ↓  data.comments = [a, b]
//! options.detail = [ { ... #/properties/comments/0/properties/name ... },
//!                    { ... #/properties/comments/1/properties/name ... } ]
//! ```
//!
//! The output tree is built fresh: untouched branches are moved over,
//! realized clones are expanded again so nested arrays resolve against
//! their concrete parent index.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::Result;
use crate::node::{self, ArrayKind, DETAIL, OPTIONS};
use crate::scope;

/// Expand every `array` control of a tree against a data document
pub fn expand_arrays(tree: Value, data: &Value) -> Result<Value> {
    let mut expanded = 0;
    let tree = expand(tree, data, &mut expanded)?;
    debug!(expanded, "array expansion complete");
    Ok(tree)
}

fn expand(mut node: Value, data: &Value, expanded: &mut usize) -> Result<Value> {
    if node::is_control(&node) {
        match ArrayKind::of(&node) {
            // detail scopes of a selector are element-relative, nothing to expand
            Some(ArrayKind::ArraySelect) => return Ok(node),
            Some(ArrayKind::Array) => {
                let scope = node::require_scope(&node)?.to_string();
                let count = scope::resolve_data(data, &scope)
                    .and_then(Value::as_array)
                    .map(Vec::len);

                match count {
                    Some(count) => {
                        if let Some(realized) = realize(&node, &scope, count, data, expanded)? {
                            set_detail(&mut node, Value::Array(realized));
                            *expanded += 1;
                            return Ok(node);
                        }
                        debug!(%scope, "array control has no detail template");
                    }
                    None => trace!(%scope, "no data array, keeping detail template"),
                }
            }
            None => {}
        }
    }

    node::try_map_children(node, |child| expand(child, data, expanded))
}

/// One expanded copy of the detail template per element
fn realize(
    control: &Value,
    scope: &str,
    count: usize,
    data: &Value,
    expanded: &mut usize,
) -> Result<Option<Vec<Value>>> {
    let Some(template) = node::detail(control).filter(|d| d.is_object()) else {
        return Ok(None);
    };

    let mut realized = Vec::with_capacity(count);
    for index in 0..count {
        let (from, to) = scope::item_prefix(scope, index);
        let instance = rewrite_strings(template, &from, &to);
        realized.push(expand(instance, data, expanded)?);
    }

    Ok(Some(realized))
}

fn set_detail(control: &mut Value, detail: Value) {
    if let Some(options) = control.get_mut(OPTIONS).and_then(Value::as_object_mut) {
        options.insert(DETAIL.to_string(), detail);
    }
}

/// Deep copy of `value` with `from` replaced by `to` in every string and key
fn rewrite_strings(value: &Value, from: &str, to: &str) -> Value {
    match value {
        Value::String(s) => Value::String(s.replace(from, to)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rewrite_strings(item, from, to))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.replace(from, to), rewrite_strings(v, from, to)))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}
