//! Binding Module - JSON Schema + UI Schema + data → enriched UI tree
//!
//! Two phases:
//! - `setup`: data-independent, schema keywords and column hints
//! - `bind`: data-dependent, array expansion, array-select grouping and
//!   data attachment
//!
//! Data flow:
//! ```text
//! UI Schema ──setup(schema)──→ prepared tree
//!                                   ↓
//!                           expand_arrays(data)
//!                                   ↓
//!                        group_array_selects(data)
//!                                   ↓
//!                            attach_data(data)
//!                                   ↓
//!                              bound tree
//! ```
//!
//! Bind may be skipped entirely: the prepared tree is a valid schema-only
//! preview.

mod attach;
mod expand;
mod select;
mod setup;

use serde_json::Value;
use tracing::instrument;

use crate::error::Result;

pub use attach::attach_data;
pub use expand::expand_arrays;
pub use select::{element_label, group_array_selects};
pub use setup::{attach_schema, setup, stamp_columns};

/// Bind a prepared UI tree to a data document
#[instrument(skip_all)]
pub fn bind(prepared: Value, data: &Value) -> Result<Value> {
    let mut tree = expand_arrays(prepared, data)?;
    group_array_selects(&mut tree, data)?;
    attach_data(&mut tree, data)?;
    Ok(tree)
}
