//! Utilities Module - shared infrastructure
//!
//! - `jsonpath`: Minimal dotted-path parser for schema and data lookups

pub mod jsonpath;
