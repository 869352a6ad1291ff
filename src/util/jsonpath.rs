//! Dotted path parser - minimal subset
//!
//! Supports:
//! - a.b.c (dot notation)
//! - a.0.b (numeric segment indexes arrays)
//! - a[0].b (bracket index)
//!
//! Numeric segments fall back to an object key lookup when the current
//! value is an object, so `{"0": ...}` maps are reachable too.

use serde_json::Value;

/// A parsed path segment
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Object field access: .field
    Field(String),
    /// Array index access: .0 or [0]
    Index(usize),
}

/// Parse a dotted path into segments
///
/// Examples:
/// - "price.currency" → [Field("price"), Field("currency")]
/// - "items.0.name" → [Field("items"), Index(0), Field("name")]
/// - "" → [] (the root)
pub fn parse(path: &str) -> Vec<Segment> {
    if path.is_empty() {
        return vec![];
    }

    let mut segments = Vec::new();

    for part in path.split('.') {
        // field[0] or [0]
        if let Some(bracket_pos) = part.find('[') {
            let index = part
                .strip_suffix(']')
                .and_then(|p| p[bracket_pos + 1..].parse::<usize>().ok());

            if let Some(index) = index {
                let field = &part[..bracket_pos];
                if !field.is_empty() {
                    segments.push(Segment::Field(field.to_string()));
                }
                segments.push(Segment::Index(index));
                continue;
            }
        }

        match part.parse::<usize>() {
            Ok(index) => segments.push(Segment::Index(index)),
            Err(_) => segments.push(Segment::Field(part.to_string())),
        }
    }

    segments
}

/// Apply segments to a JSON value, borrowing the target
pub fn apply<'a>(value: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let mut current = value;

    for segment in segments {
        current = match (segment, current) {
            (Segment::Field(name), _) => current.get(name)?,
            (Segment::Index(idx), Value::Object(map)) => map.get(&idx.to_string())?,
            (Segment::Index(idx), _) => current.get(*idx)?,
        };
    }

    Some(current)
}

/// Parse and apply a dotted path in one step
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    apply(value, &parse(path))
}
