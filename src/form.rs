//! Form - owns the three documents and the enriched UI tree
//!
//! ```no_run
//! use jsonforms::Form;
//!
//! let mut form = Form::from_files("schema.json", "uischema.json")?;
//! form.bind_file("data.json")?;
//! println!("{}", form.to_json_pretty()?);
//! # Ok::<(), jsonforms::FormError>(())
//! ```
//!
//! Setup runs once in the constructor. Binding works on a copy of the
//! prepared tree, so a failed bind leaves the form as it was and a form
//! can be re-bound to other data.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::binding;
use crate::config::FormConfig;
use crate::error::Result;
use crate::node::{self, ParentLayout};

#[derive(Debug, Clone)]
pub struct Form {
    schema: Value,
    /// UI tree after setup, never bound
    prepared: Value,
    /// UI tree after the last successful bind
    bound: Option<Value>,
    data: Option<Value>,
    config: FormConfig,
}

impl Form {
    /// Create a form and run setup with the default config
    pub fn new(schema: Value, ui_schema: Value) -> Result<Self> {
        Self::with_config(schema, ui_schema, FormConfig::default())
    }

    pub fn with_config(schema: Value, ui_schema: Value, config: FormConfig) -> Result<Self> {
        let mut prepared = ui_schema;
        binding::setup(&schema, &mut prepared, &config)?;

        Ok(Self {
            schema,
            prepared,
            bound: None,
            data: None,
            config,
        })
    }

    /// Parse both documents as JSON, then run setup
    pub fn from_slices(schema: &[u8], ui_schema: &[u8]) -> Result<Self> {
        let schema = serde_json::from_slice(schema)?;
        let ui_schema = serde_json::from_slice(ui_schema)?;
        Self::new(schema, ui_schema)
    }

    pub fn from_files(schema: impl AsRef<Path>, ui_schema: impl AsRef<Path>) -> Result<Self> {
        let schema = load_document(schema)?;
        let ui_schema = load_document(ui_schema)?;
        Self::new(schema, ui_schema)
    }

    /// Bind data; replaces the result of any earlier bind
    pub fn bind_data(&mut self, data: Value) -> Result<()> {
        let bound = binding::bind(self.prepared.clone(), &data)?;
        self.bound = Some(bound);
        self.data = Some(data);
        Ok(())
    }

    pub fn bind_slice(&mut self, data: &[u8]) -> Result<()> {
        self.bind_data(serde_json::from_slice(data)?)
    }

    pub fn bind_file(&mut self, data: impl AsRef<Path>) -> Result<()> {
        self.bind_data(load_document(data)?)
    }

    /// The enriched UI tree: bound if data was bound, prepared otherwise
    pub fn ui_schema(&self) -> &Value {
        self.bound.as_ref().unwrap_or(&self.prepared)
    }

    pub fn into_ui_schema(self) -> Value {
        self.bound.unwrap_or(self.prepared)
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self.ui_schema())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.ui_schema())?)
    }

    /// Node carrying `scope` in the current tree
    pub fn find_by_scope(&self, scope: &str) -> Option<&Value> {
        node::find_by_scope(self.ui_schema(), scope)
    }

    /// Layout directly holding the node carrying `scope`
    pub fn find_parent_of_scope(&self, scope: &str) -> Option<ParentLayout<'_>> {
        node::find_parent_of_scope(self.ui_schema(), scope)
    }
}

/// Read a JSON document, or YAML when the extension is `.yaml`/`.yml`
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    debug!(path = %path.display(), is_yaml, "loading document");
    if is_yaml {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use serde_json::json;
    use std::io::Write;

    fn name_form() -> Form {
        Form::new(
            json!({"properties": {"name": {"type": "string", "minLength": 3}}}),
            json!({
                "type": "VerticalLayout",
                "elements": [{"type": "Control", "scope": "#/properties/name"}]
            }),
        )
        .unwrap()
    }

    #[test]
    fn unbound_form_shows_prepared_tree() {
        let form = name_form();
        assert!(!form.is_bound());
        assert!(form.data().is_none());
        assert!(form.ui_schema()["elements"][0].get("data").is_none());
    }

    #[test]
    fn rebinding_starts_from_prepared_tree() {
        let mut form = name_form();
        form.bind_data(json!({"name": "John Doe"})).unwrap();
        assert_eq!(form.ui_schema()["elements"][0]["data"], "John Doe");

        form.bind_data(json!({})).unwrap();
        assert!(form.ui_schema()["elements"][0].get("data").is_none());
    }

    #[test]
    fn failed_bind_keeps_previous_tree() {
        let mut form = Form::new(
            json!({"properties": {"tags": {"type": "array-select"}}}),
            json!({"type": "Control", "scope": "#/properties/tags"}),
        )
        .unwrap();
        form.bind_data(json!({})).unwrap();
        let before = form.ui_schema().clone();

        let err = form.bind_data(json!({"tags": [{"name": "a"}]})).unwrap_err();
        assert!(matches!(err, FormError::MissingLabelProps { .. }));
        assert_eq!(form.ui_schema(), &before);
        assert_eq!(form.data(), Some(&json!({})));
    }

    #[test]
    fn structural_errors_fail_before_setup() {
        let err = Form::from_slices(b"{", b"{}").unwrap_err();
        assert!(matches!(err, FormError::JsonParse(_)));

        let mut form = name_form();
        assert!(matches!(form.bind_slice(b"[1,"), Err(FormError::JsonParse(_))));
    }

    #[test]
    fn loads_yaml_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "properties:\n  name:\n    type: string").unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc, json!({"properties": {"name": {"type": "string"}}}));
    }

    #[test]
    fn loads_json_otherwise() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"name\": \"John\"}}").unwrap();
        assert_eq!(load_document(file.path()).unwrap(), json!({"name": "John"}));
    }

    #[test]
    fn scope_helpers_follow_current_tree() {
        let form = name_form();
        let control = form.find_by_scope("#/properties/name").unwrap();
        assert_eq!(control["schema"]["col"], " column col-12");

        let parent = form.find_parent_of_scope("#/properties/name").unwrap();
        assert_eq!(parent.kind, "VerticalLayout");
    }

    #[test]
    fn into_ui_schema_returns_bound_tree() {
        let mut form = name_form();
        form.bind_data(json!({"name": "Ann"})).unwrap();
        let tree = form.into_ui_schema();
        assert_eq!(tree["elements"][0]["data"], "Ann");
    }
}
