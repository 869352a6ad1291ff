//! UI Schema nodes
//!
//! UI nodes stay plain `serde_json::Value` objects; this module gives them
//! typed accessors and the walk primitives every pass is built on.
//!
//! The children of a node are the entries of its `elements` array plus its
//! `options.detail` (one template object before array expansion, a list of
//! realized sub-trees after). Attached `schema` and `data` values are never
//! walked.

use serde_json::{Map, Value};

use crate::error::{FormError, Result};

pub const TYPE: &str = "type";
pub const SCOPE: &str = "scope";
pub const ELEMENTS: &str = "elements";
pub const OPTIONS: &str = "options";
pub const DETAIL: &str = "detail";
pub const SCHEMA: &str = "schema";
pub const DATA: &str = "data";
pub const COL: &str = "col";
pub const LABEL_PROPS: &str = "elementLabelProps";
pub const LABEL_PROP: &str = "elementLabelProp";

/// Node `type` values the engine acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Control,
    HorizontalLayout,
    VerticalLayout,
    Group,
    /// Any other type (Label, Categorization, ...) - carried through untouched
    Other,
}

impl NodeKind {
    /// Kind of a node, `None` when it has no string `type`
    pub fn of(node: &Value) -> Option<Self> {
        node.get(TYPE).and_then(Value::as_str).map(Self::parse)
    }

    /// Case-sensitive, like the UI Schema vocabulary
    pub fn parse(s: &str) -> Self {
        match s {
            "Control" => Self::Control,
            "HorizontalLayout" => Self::HorizontalLayout,
            "VerticalLayout" => Self::VerticalLayout,
            "Group" => Self::Group,
            _ => Self::Other,
        }
    }

    pub fn is_layout(self) -> bool {
        matches!(self, Self::HorizontalLayout | Self::VerticalLayout)
    }
}

/// Array container kind, read from the attached `schema.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    /// One realized detail sub-tree per data element
    Array,
    /// Label-keyed selector sharing one detail template
    ArraySelect,
}

impl ArrayKind {
    pub fn of(node: &Value) -> Option<Self> {
        match node.get(SCHEMA)?.get(TYPE)?.as_str()? {
            "array" => Some(Self::Array),
            "array-select" => Some(Self::ArraySelect),
            _ => None,
        }
    }
}

/// Result of visiting one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Do not walk into this node's children
    SkipChildren,
}

pub fn is_control(node: &Value) -> bool {
    NodeKind::of(node) == Some(NodeKind::Control)
}

pub fn is_layout(node: &Value) -> bool {
    NodeKind::of(node).is_some_and(NodeKind::is_layout)
}

/// The node's scope, if it carries a string one
pub fn scope(node: &Value) -> Option<&str> {
    node.get(SCOPE).and_then(Value::as_str)
}

/// The node's scope, failing with `MissingScope` when absent or empty
pub fn require_scope(node: &Value) -> Result<&str> {
    match scope(node) {
        Some(scope) if !scope.is_empty() => Ok(scope),
        _ => Err(FormError::missing_scope(node)),
    }
}

/// Set a top-level field on an object node
pub fn set(node: &mut Value, key: &str, value: Value) {
    if let Some(map) = node.as_object_mut() {
        map.insert(key.to_string(), value);
    }
}

/// The node's `schema` object, created (or replaced if not an object) on demand
pub fn schema_mut(node: &mut Value) -> Option<&mut Map<String, Value>> {
    let map = node.as_object_mut()?;
    let schema = map
        .entry(SCHEMA)
        .or_insert_with(|| Value::Object(Map::new()));
    if !schema.is_object() {
        *schema = Value::Object(Map::new());
    }
    schema.as_object_mut()
}

pub fn detail(node: &Value) -> Option<&Value> {
    node.get(OPTIONS)?.get(DETAIL)
}

pub fn detail_mut(node: &mut Value) -> Option<&mut Value> {
    node.get_mut(OPTIONS)?.get_mut(DETAIL)
}

/// Direct UI children of a node
pub fn children(node: &Value) -> Vec<&Value> {
    let mut out = Vec::new();

    if let Some(items) = node.get(ELEMENTS).and_then(Value::as_array) {
        out.extend(items);
    }
    match detail(node) {
        Some(Value::Array(items)) => out.extend(items),
        Some(template @ Value::Object(_)) => out.push(template),
        _ => {}
    }

    out
}

/// Call `f` on every direct UI child
pub fn for_each_child_mut<F>(node: &mut Value, mut f: F) -> Result<()>
where
    F: FnMut(&mut Value) -> Result<()>,
{
    let Some(map) = node.as_object_mut() else {
        return Ok(());
    };

    for (key, value) in map.iter_mut() {
        match key.as_str() {
            ELEMENTS => {
                if let Some(items) = value.as_array_mut() {
                    for child in items {
                        f(child)?;
                    }
                }
            }
            OPTIONS => {
                let Some(detail) = value.get_mut(DETAIL) else {
                    continue;
                };
                if detail.is_object() {
                    f(detail)?;
                } else if let Some(items) = detail.as_array_mut() {
                    for child in items {
                        f(child)?;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Depth-first, pre-order: apply `mutator` to every node matching `predicate`
///
/// Returns the number of nodes the mutator ran on.
pub fn for_each_node_mut<P, F>(node: &mut Value, predicate: &P, mutator: &mut F) -> Result<usize>
where
    P: Fn(&Value) -> bool,
    F: FnMut(&mut Value) -> Result<Visit>,
{
    let mut visited = 0;
    let mut visit = Visit::Continue;

    if predicate(node) {
        visit = mutator(&mut *node)?;
        visited += 1;
    }

    if visit == Visit::Continue {
        for_each_child_mut(node, |child| {
            visited += for_each_node_mut(child, predicate, &mut *mutator)?;
            Ok(())
        })?;
    }

    Ok(visited)
}

/// Rebuild a node with every direct UI child passed through `f`
///
/// Children are moved, not cloned.
pub fn try_map_children<F>(mut node: Value, mut f: F) -> Result<Value>
where
    F: FnMut(Value) -> Result<Value>,
{
    if let Some(map) = node.as_object_mut() {
        if let Some(Value::Array(items)) = map.get_mut(ELEMENTS) {
            let taken = std::mem::take(items);
            *items = taken.into_iter().map(&mut f).collect::<Result<_>>()?;
        }

        if let Some(detail) = map.get_mut(OPTIONS).and_then(|o| o.get_mut(DETAIL)) {
            *detail = match detail.take() {
                Value::Array(items) => {
                    Value::Array(items.into_iter().map(&mut f).collect::<Result<_>>()?)
                }
                template @ Value::Object(_) => f(template)?,
                other => other,
            };
        }
    }

    Ok(node)
}

/// First node (pre-order) whose scope equals `scope`
pub fn find_by_scope<'a>(node: &'a Value, scope: &str) -> Option<&'a Value> {
    if self::scope(node) == Some(scope) {
        return Some(node);
    }
    children(node)
        .into_iter()
        .find_map(|child| find_by_scope(child, scope))
}

/// Layout that directly contains the node carrying a scope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentLayout<'a> {
    /// The layout's `type` (empty when it has none)
    pub kind: &'a str,
    /// All siblings, the scoped node included
    pub elements: &'a [Value],
}

/// Find the layout whose `elements` hold the node carrying `scope`
pub fn find_parent_of_scope<'a>(node: &'a Value, scope: &str) -> Option<ParentLayout<'a>> {
    if let Some(elements) = node.get(ELEMENTS).and_then(Value::as_array) {
        if elements.iter().any(|e| self::scope(e) == Some(scope)) {
            return Some(ParentLayout {
                kind: node.get(TYPE).and_then(Value::as_str).unwrap_or_default(),
                elements,
            });
        }
    }
    children(node)
        .into_iter()
        .find_map(|child| find_parent_of_scope(child, scope))
}
