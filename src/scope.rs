//! Scope resolution
//!
//! A scope is a JSON-Pointer-like reference into the JSON Schema, e.g.
//! `#/properties/comments/items/properties/message`. It is split on `/` and
//! each piece becomes one [`Segment`], so property names containing `.` or
//! `[n]` are looked up verbatim. Two segment lists are derived from it:
//!
//! - schema segments: `properties`, `comments`, `items`, `properties`, `message`
//! - data segments:   `comments`, `items`, `message` (data has no `properties` level)
//!
//! Label paths of an array-select (`person.name`) are the only dotted paths;
//! they go through [`crate::util::jsonpath`].

use serde_json::Value;

use crate::error::{FormError, Result};
use crate::util::jsonpath::{self, Segment};

/// JSON-Schema keyword wrapping named fields
const PROPERTIES: &str = "properties";

/// JSON-Schema keyword for the element schema of an array
pub const ITEMS: &str = "items";

/// Strip the leading `#/` (and any trailing `/`) from a scope
pub fn trim(scope: &str) -> &str {
    scope.trim_matches(|c: char| c == '#' || c == '/')
}

fn names(scope: &str) -> Vec<&str> {
    let trimmed = trim(scope);
    if trimmed.is_empty() {
        return vec![];
    }
    trimmed.split('/').collect()
}

/// Numeric pieces index arrays (and still match `"0"` keys on objects)
fn segment(name: &str) -> Segment {
    match name.parse::<usize>() {
        Ok(index) => Segment::Index(index),
        Err(_) => Segment::Field(name.to_string()),
    }
}

/// Lookup segments into the JSON Schema, `properties` kept
pub fn schema_segments(scope: &str) -> Vec<Segment> {
    names(scope).into_iter().map(segment).collect()
}

/// Field names of the data path
///
/// A `properties` piece is dropped only where a keyword is expected, so a
/// field that is itself named `properties` survives.
fn data_names(scope: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut expect_name = false;

    for name in names(scope) {
        if expect_name {
            out.push(name);
            expect_name = false;
        } else if name == PROPERTIES {
            expect_name = true;
        } else {
            out.push(name);
        }
    }

    out
}

/// Lookup segments into the data document
pub fn data_segments(scope: &str) -> Vec<Segment> {
    data_names(scope).into_iter().map(segment).collect()
}

/// Dotted form of the data path, e.g. `personalData.age`
pub fn data_path(scope: &str) -> String {
    data_names(scope).join(".")
}

/// Look up the schema fragment a scope points at
pub fn resolve_schema<'a>(schema: &'a Value, scope: &str) -> Option<&'a Value> {
    jsonpath::apply(schema, &schema_segments(scope))
}

/// Look up the data value a scope points at
pub fn resolve_data<'a>(data: &'a Value, scope: &str) -> Option<&'a Value> {
    jsonpath::apply(data, &data_segments(scope))
}

/// Look up a label path inside one array element
///
/// Accepts a dotted path (`person.name`) or a scope (`#/properties/person/properties/name`).
pub fn resolve_label<'a>(element: &'a Value, path: &str) -> Option<&'a Value> {
    if path.contains('/') {
        resolve_data(element, path)
    } else {
        jsonpath::resolve(element, path)
    }
}

/// `{array_scope}/items/`, the prefix every detail scope of an array control starts with
fn items_prefix(array_scope: &str) -> String {
    format!("{}/{ITEMS}/", array_scope.trim_end_matches('/'))
}

/// Key of a detail scope relative to one element of the array at `array_scope`
///
/// `#/properties/comments`, `#/properties/comments/items/properties/message` → `message`
pub fn relative_to_items(array_scope: &str, scope: &str) -> Result<String> {
    match scope.strip_prefix(items_prefix(array_scope).as_str()).map(data_path) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(FormError::DetailScopeOutsideItems {
            scope: scope.to_string(),
        }),
    }
}

/// Prefix of every detail scope generated from an array control, and its
/// replacement for the element at `index`
///
/// `#/properties/comments`, 1 → (`#/properties/comments/items/`, `#/properties/comments/1/`)
pub fn item_prefix(array_scope: &str, index: usize) -> (String, String) {
    let base = array_scope.trim_end_matches('/');
    (items_prefix(base), format!("{base}/{index}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str) -> Segment {
        Segment::Field(name.to_string())
    }

    #[test]
    fn trims_pointer_prefix() {
        assert_eq!(trim("#/properties/name"), "properties/name");
        assert_eq!(trim("#/properties/name/"), "properties/name");
        assert_eq!(trim("name"), "name");
    }

    #[test]
    fn schema_segments_keep_properties() {
        assert_eq!(
            schema_segments("#/properties/comments/items/properties/message"),
            vec![
                field("properties"),
                field("comments"),
                field("items"),
                field("properties"),
                field("message"),
            ]
        );
    }

    #[test]
    fn data_path_strips_properties() {
        assert_eq!(data_path("#/properties/name"), "name");
        assert_eq!(
            data_path("#/properties/personalData/properties/age"),
            "personalData.age"
        );
        assert_eq!(
            data_segments("#/properties/comments/0/properties/message"),
            vec![field("comments"), Segment::Index(0), field("message")]
        );
    }

    #[test]
    fn data_path_keeps_field_named_properties() {
        assert_eq!(
            data_path("#/properties/properties/properties/x"),
            "properties.x"
        );
    }

    #[test]
    fn data_path_of_empty_scope_is_root() {
        assert!(data_segments("#/").is_empty());
        assert_eq!(data_path(""), "");
    }

    #[test]
    fn dots_and_brackets_are_part_of_the_name() {
        assert_eq!(data_segments("#/properties/a.b"), vec![field("a.b")]);
        assert_eq!(data_segments("#/properties/tags[0]"), vec![field("tags[0]")]);

        let schema = json!({"properties": {"a.b": {"type": "string"}, "a": {"b": {}}}});
        assert_eq!(
            resolve_schema(&schema, "#/properties/a.b"),
            Some(&json!({"type": "string"}))
        );

        let data = json!({"a.b": "dotted", "a": {"b": "nested"}, "tags[0]": "x"});
        assert_eq!(resolve_data(&data, "#/properties/a.b"), Some(&json!("dotted")));
        assert_eq!(resolve_data(&data, "#/properties/tags[0]"), Some(&json!("x")));
    }

    #[test]
    fn resolves_schema_fragment() {
        let schema = json!({
            "properties": {
                "name": {"type": "string", "minLength": 3}
            }
        });
        let fragment = resolve_schema(&schema, "#/properties/name").unwrap();
        assert_eq!(fragment["minLength"], json!(3));
        assert!(resolve_schema(&schema, "#/properties/age").is_none());
    }

    #[test]
    fn resolves_data_value() {
        let data = json!({"personalData": {"age": 34}, "comments": [{"name": "Ann"}]});
        assert_eq!(
            resolve_data(&data, "#/properties/personalData/properties/age"),
            Some(&json!(34))
        );
        assert_eq!(
            resolve_data(&data, "#/properties/comments/0/properties/name"),
            Some(&json!("Ann"))
        );
        assert_eq!(resolve_data(&data, "#/properties/missing"), None);
    }

    #[test]
    fn label_paths_are_dotted_or_scopes() {
        let element = json!({"person": {"name": "Ada"}});
        assert_eq!(resolve_label(&element, "person.name"), Some(&json!("Ada")));
        assert_eq!(
            resolve_label(&element, "#/properties/person/properties/name"),
            Some(&json!("Ada"))
        );
        assert_eq!(resolve_label(&element, "person.age"), None);
    }

    #[test]
    fn relative_key_after_items() {
        assert_eq!(
            relative_to_items(
                "#/properties/comments",
                "#/properties/comments/items/properties/message"
            )
            .unwrap(),
            "message"
        );
        assert_eq!(
            relative_to_items(
                "#/properties/people",
                "#/properties/people/items/properties/address/properties/city"
            )
            .unwrap(),
            "address.city"
        );
    }

    #[test]
    fn relative_key_uses_own_items_segment() {
        assert_eq!(
            relative_to_items(
                "#/properties/order/properties/items",
                "#/properties/order/properties/items/items/properties/sku"
            )
            .unwrap(),
            "sku"
        );
        assert_eq!(
            relative_to_items(
                "#/properties/orders/items/properties/tags",
                "#/properties/orders/items/properties/tags/items/properties/x"
            )
            .unwrap(),
            "x"
        );
    }

    #[test]
    fn relative_key_requires_own_prefix() {
        let err = relative_to_items("#/properties/comments", "#/properties/name").unwrap_err();
        assert!(matches!(err, FormError::DetailScopeOutsideItems { .. }));

        let err = relative_to_items("#/properties/comments", "#/properties/comments/items/")
            .unwrap_err();
        assert!(matches!(err, FormError::DetailScopeOutsideItems { .. }));

        let err = relative_to_items(
            "#/properties/comments",
            "#/properties/other/items/properties/message",
        )
        .unwrap_err();
        assert!(matches!(err, FormError::DetailScopeOutsideItems { .. }));
    }

    #[test]
    fn item_prefix_for_index() {
        let (from, to) = item_prefix("#/properties/comments", 3);
        assert_eq!(from, "#/properties/comments/items/");
        assert_eq!(to, "#/properties/comments/3/");
    }
}
