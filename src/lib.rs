//! jsonforms - bind a JSON Schema, a UI Schema and data into one enriched form tree

pub mod binding;
pub mod config;
pub mod error;
pub mod form;
pub mod node;
pub mod scope;
pub mod submission;
pub mod util;

pub use binding::{bind, setup};
pub use config::FormConfig;
pub use error::{FixSuggestion, FormError, Result};
pub use form::{load_document, Form};
pub use node::{ArrayKind, NodeKind, ParentLayout};
pub use submission::{read_form, FormFields};
