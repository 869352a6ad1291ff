//! Form submission decoding
//!
//! A submitted form arrives as flat `scope → values` pairs (field names are
//! the control scopes). They are folded back into a nested data document:
//!
//! ```text
//! #/properties/name                          = "John"   → {"name": "John",
//! #/properties/personalData/properties/age   = "34"        "personalData": {"age": 34},
//! #/properties/comments/0/properties/message = "hi"        "comments": [{"message": "hi"}]}
//! ```
//!
//! Only the first value of a field is used. Values that parse as an integer
//! become numbers. Numeric path segments create arrays (padded with null).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::scope;
use crate::util::jsonpath::Segment;

/// Submitted fields, as decoded from `application/x-www-form-urlencoded`
pub type FormFields = BTreeMap<String, Vec<String>>;

/// Numeric segments above this become object keys instead of array slots
pub const MAX_ARRAY_INDEX: usize = 4096;

/// Fold submitted fields into a nested data document
pub fn read_form(fields: &FormFields) -> Value {
    let mut root = Value::Object(Map::new());

    for (key, values) in fields {
        let Some(raw) = values.first() else {
            continue;
        };
        let segments = scope::data_segments(key);
        if segments.is_empty() {
            continue;
        }
        insert_path(&mut root, &segments, coerce(raw));
    }

    root
}

/// Integer when the whole value parses as one, string otherwise
pub fn coerce(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(raw.to_string()),
    }
}

fn insert_path(target: &mut Value, segments: &[Segment], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    match head {
        Segment::Index(index) if *index <= MAX_ARRAY_INDEX && !target.is_object() => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                if items.len() <= *index {
                    items.resize(index + 1, Value::Null);
                }
                insert_path(&mut items[*index], rest, value);
            }
        }
        _ => {
            let key = match head {
                Segment::Field(name) => name.clone(),
                Segment::Index(index) => index.to_string(),
            };
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(map) = target {
                insert_path(map.entry(key).or_insert(Value::Null), rest, value);
            }
        }
    }
}
