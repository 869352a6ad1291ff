//! Array-select grouping
//!
//! An `array-select` control renders as a selector over its data elements.
//! Instead of one detail per element it gets:
//!
//! - `data`: a mapping `label → element`, where the label joins the values of
//!   `options.elementLabelProps` with a single space (data order, last write
//!   wins on duplicate labels)
//! - one shared `options.detail` whose control scopes are rewritten relative
//!   to a single element (`#/properties/comments/items/properties/message` →
//!   `message`)

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FormError, Result};
use crate::node::{self, ArrayKind, Visit, DATA, ELEMENTS, LABEL_PROP, LABEL_PROPS, OPTIONS, SCOPE};
use crate::scope;

fn is_array_select(value: &Value) -> bool {
    node::is_control(value) && ArrayKind::of(value) == Some(ArrayKind::ArraySelect)
}

/// Group every `array-select` control of a tree; returns how many were found
pub fn group_array_selects(tree: &mut Value, data: &Value) -> Result<usize> {
    let groups = node::for_each_node_mut(tree, &is_array_select, &mut |control| {
        group(control, data)?;
        Ok(Visit::SkipChildren)
    })?;

    debug!(groups, "array-select grouping complete");
    Ok(groups)
}

fn group(control: &mut Value, data: &Value) -> Result<()> {
    let scope = node::require_scope(control)?.to_string();

    if let Some(elements) = scope::resolve_data(data, &scope).and_then(Value::as_array) {
        let props = label_props(control);
        if props.is_empty() {
            return Err(FormError::MissingLabelProps { scope });
        }

        let mut grouped = Map::new();
        for element in elements {
            let label = element_label(element, &props, &scope)?;
            grouped.insert(label, element.clone());
        }
        debug!(%scope, options = grouped.len(), "grouped array-select data");
        node::set(control, DATA, Value::Object(grouped));
    }

    relativize_detail(control, &scope)
}

/// `options.elementLabelProps`, or the singular `options.elementLabelProp`
fn label_props(control: &Value) -> Vec<String> {
    let Some(options) = control.get(OPTIONS) else {
        return vec![];
    };

    match options.get(LABEL_PROPS) {
        Some(Value::Array(props)) => props
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(prop)) => vec![prop.clone()],
        _ => options
            .get(LABEL_PROP)
            .and_then(Value::as_str)
            .map(|p| vec![p.to_string()])
            .unwrap_or_default(),
    }
}

/// Join the label prop values of one element with a space
pub fn element_label(element: &Value, props: &[String], scope: &str) -> Result<String> {
    let mut parts = Vec::with_capacity(props.len());

    for prop in props {
        let part = match scope::resolve_label(element, prop) {
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => {
                return Err(FormError::InvalidLabel {
                    scope: scope.to_string(),
                    prop: prop.clone(),
                })
            }
        };
        parts.push(part);
    }

    Ok(parts.join(" "))
}

/// Rewrite control scopes under `options.detail.elements` to keys relative
/// to one element of the array at `array_scope`
fn relativize_detail(control: &mut Value, array_scope: &str) -> Result<()> {
    let Some(elements) = node::detail_mut(control)
        .and_then(|d| d.get_mut(ELEMENTS))
        .and_then(Value::as_array_mut)
    else {
        return Ok(());
    };

    for element in elements {
        node::for_each_node_mut(element, &node::is_control, &mut |inner| {
            let detail_scope = node::require_scope(inner)?;
            let relative = scope::relative_to_items(array_scope, detail_scope)?;
            node::set(inner, SCOPE, Value::String(relative));
            Ok(Visit::Continue)
        })?;
    }

    Ok(())
}
