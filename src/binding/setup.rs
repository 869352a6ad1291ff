//! Setup pass - data-independent enrichment
//!
//! 1. Every `Control` gets the scalar/array keywords of its schema fragment
//!    copied into `schema`. Nested objects (`properties`, `items`, ...) are
//!    left out; array details are described by `options.detail` instead.
//! 2. Every direct child of a `HorizontalLayout`/`VerticalLayout` gets a
//!    column hint in `schema.col`, computed from the template child count.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::node::{self, NodeKind, Visit, COL, ELEMENTS};
use crate::scope;

/// Enrich a UI Schema in place against its JSON Schema
#[instrument(skip_all)]
pub fn setup(schema: &Value, ui_schema: &mut Value, config: &FormConfig) -> Result<()> {
    let controls = node::for_each_node_mut(ui_schema, &node::is_control, &mut |control| {
        attach_schema(schema, control)?;
        Ok(Visit::Continue)
    })?;

    let layouts = node::for_each_node_mut(ui_schema, &node::is_layout, &mut |layout| {
        stamp_columns(layout, config);
        Ok(Visit::Continue)
    })?;

    debug!(controls, layouts, "setup complete");
    Ok(())
}

/// Copy the non-object keywords of the control's schema fragment onto it
pub fn attach_schema(schema: &Value, control: &mut Value) -> Result<()> {
    let scope = node::require_scope(control)?;

    let fragment = scope::resolve_schema(schema, scope).ok_or_else(|| {
        FormError::SchemaPathNotFound {
            scope: scope.to_string(),
        }
    })?;
    let Some(keywords) = fragment.as_object() else {
        return Err(FormError::SchemaNotObject {
            scope: scope.to_string(),
        });
    };

    let Some(target) = node::schema_mut(control) else {
        return Ok(());
    };
    for (key, value) in keywords {
        if !value.is_object() {
            target.insert(key.clone(), value.clone());
        }
    }

    Ok(())
}

/// Stamp `schema.col` on every direct child of a layout
pub fn stamp_columns(layout: &mut Value, config: &FormConfig) {
    let Some(kind) = NodeKind::of(layout) else {
        return;
    };
    let Some(children) = layout.get_mut(ELEMENTS).and_then(Value::as_array_mut) else {
        return;
    };
    let Some(width) = config.column_width(kind, children.len()) else {
        return;
    };

    let tag = config.column_tag(width);
    for child in children.iter_mut() {
        if let Some(schema) = node::schema_mut(child) {
            schema.insert(COL.to_string(), Value::String(tag.clone()));
        }
    }
}
