//! Form configuration
//!
//! Layout settings used by the setup pass. Loaded from a TOML file:
//!
//! ```toml
//! grid_columns = 12
//! column_class = " column col-"
//! ```
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variable `JSONFORMS_GRID_COLUMNS`
//! 2. Config file
//! 3. Defaults

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::NodeKind;

/// Width of the layout grid every row is divided into
pub const DEFAULT_GRID_COLUMNS: u32 = 12;

/// Class prefix stamped into `schema.col`, followed by the width
pub const DEFAULT_COLUMN_CLASS: &str = " column col-";

pub const GRID_COLUMNS_ENV: &str = "JSONFORMS_GRID_COLUMNS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    /// Grid width; 0 falls back to the default
    pub grid_columns: u32,

    /// Prefix of the column hint, e.g. `" column col-"` → `" column col-6"`
    pub column_class: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            grid_columns: DEFAULT_GRID_COLUMNS,
            column_class: DEFAULT_COLUMN_CLASS.to_string(),
        }
    }
}

impl FormConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    ///
    /// Returns error if the file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Environment variables take precedence over config file values.
    pub fn with_env(mut self) -> Self {
        if let Some(columns) = std::env::var(GRID_COLUMNS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
        {
            self.grid_columns = columns;
        }
        self
    }

    pub fn grid_columns(&self) -> u32 {
        if self.grid_columns == 0 {
            DEFAULT_GRID_COLUMNS
        } else {
            self.grid_columns
        }
    }

    /// Width of each of `children` direct children of a layout
    ///
    /// Horizontal layouts split the grid evenly (integer division), vertical
    /// layouts give every child the full grid. `None` for other kinds or an
    /// empty layout.
    pub fn column_width(&self, kind: NodeKind, children: usize) -> Option<u32> {
        if children == 0 {
            return None;
        }
        match kind {
            NodeKind::HorizontalLayout => {
                let children = u32::try_from(children).unwrap_or(u32::MAX);
                Some(self.grid_columns() / children)
            }
            NodeKind::VerticalLayout => Some(self.grid_columns()),
            _ => None,
        }
    }

    /// Column hint for a width, e.g. `" column col-6"`
    pub fn column_tag(&self, width: u32) -> String {
        format!("{}{}", self.column_class, width)
    }
}
