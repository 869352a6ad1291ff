//! Error types with error codes and fix suggestions
//!
//! Error code ranges:
//! - FORM-000-009: Input errors (malformed JSON/YAML, IO)
//! - FORM-010-019: Setup errors (scope and schema references)
//! - FORM-020-029: Bind errors (array-select grouping)
//! - FORM-030-039: Configuration errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug)]
pub enum FormError {
    // ═══════════════════════════════════════════
    // INPUT ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[FORM-001] Invalid JSON document: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("[FORM-002] Invalid YAML document: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("[FORM-003] IO error: {0}")]
    Io(#[from] std::io::Error),

    // ═══════════════════════════════════════════
    // SETUP ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[FORM-010] Control has no scope: {node}")]
    MissingScope { node: String },

    #[error("[FORM-011] Scope '{scope}' does not resolve to a schema fragment")]
    SchemaPathNotFound { scope: String },

    #[error("[FORM-012] Schema fragment at '{scope}' is not an object")]
    SchemaNotObject { scope: String },

    // ═══════════════════════════════════════════
    // BIND ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[FORM-020] Detail scope '{scope}' has no 'items' segment")]
    DetailScopeOutsideItems { scope: String },

    #[error("[FORM-021] array-select control '{scope}' has no elementLabelProps")]
    MissingLabelProps { scope: String },

    #[error("[FORM-022] Label prop '{prop}' of array-select '{scope}' is not a scalar value")]
    InvalidLabel { scope: String, prop: String },

    // ═══════════════════════════════════════════
    // CONFIG ERRORS (030-039)
    // ═══════════════════════════════════════════
    #[error("[FORM-030] Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

impl FormError {
    /// Stable error code, e.g. `FORM-011`
    pub fn code(&self) -> &'static str {
        match self {
            Self::JsonParse(_) => "FORM-001",
            Self::YamlParse(_) => "FORM-002",
            Self::Io(_) => "FORM-003",
            Self::MissingScope { .. } => "FORM-010",
            Self::SchemaPathNotFound { .. } => "FORM-011",
            Self::SchemaNotObject { .. } => "FORM-012",
            Self::DetailScopeOutsideItems { .. } => "FORM-020",
            Self::MissingLabelProps { .. } => "FORM-021",
            Self::InvalidLabel { .. } => "FORM-022",
            Self::Config(_) => "FORM-030",
        }
    }

    /// Build a `MissingScope` error that shows the offending node
    pub fn missing_scope(node: &serde_json::Value) -> Self {
        Self::MissingScope {
            node: node.to_string(),
        }
    }
}

impl FixSuggestion for FormError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            FormError::JsonParse(_) => Some("Check JSON syntax (try parsing with jq)"),
            FormError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            FormError::Io(_) => Some("Check file path and permissions"),
            FormError::MissingScope { .. } => {
                Some("Every Control needs a scope like \"#/properties/name\"")
            }
            FormError::SchemaPathNotFound { .. } => {
                Some("Define the field under 'properties' in the JSON Schema or fix the scope")
            }
            FormError::SchemaNotObject { .. } => {
                Some("A Control must point at an object schema like {\"type\": \"string\"}")
            }
            FormError::DetailScopeOutsideItems { .. } => {
                Some("Detail scopes of an array-select must go through '/items/'")
            }
            FormError::MissingLabelProps { .. } => {
                Some("Add options.elementLabelProps: [\"field\"] to the array-select control")
            }
            FormError::InvalidLabel { .. } => {
                Some("Label props must point at string, number or boolean fields of each element")
            }
            FormError::Config(_) => Some("Check config TOML: grid_columns and column_class"),
        }
    }
}
