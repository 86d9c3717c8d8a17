//! Store configuration via TOML
//!
//! A [`StoreConfig`] declares a store without code: the ordering of the id
//! list and a list of attribute indexes. Custom key functions and custom
//! comparators have no TOML form; use [`StoreDefinition`] directly for those.

use std::collections::HashSet;
use std::path::Path;

use normstore_core::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

use crate::definition::{IndexDefinition, IndexKind, StoreDefinition};
use crate::ordering::OrderingPolicy;

/// Ordering over one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Field to sort by
    pub field: String,
    /// Sort in descending order
    #[serde(default)]
    pub descending: bool,
}

impl OrderConfig {
    /// The matching ordering policy
    pub fn to_policy(&self) -> OrderingPolicy {
        if self.descending {
            OrderingPolicy::by_field_desc(self.field.clone())
        } else {
            OrderingPolicy::by_field(self.field.clone())
        }
    }
}

/// One attribute index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Record field the index is keyed by
    pub attribute: String,
    /// `"grouped"` (default) or `"unique"`
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Name override; defaults to `by` + capitalized attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordering of each group (grouped indexes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderConfig>,
}

fn default_kind() -> String {
    IndexKind::Grouped.as_str().to_string()
}

impl IndexConfig {
    /// The matching index definition
    ///
    /// # Errors
    ///
    /// `UnknownIndexKind` when `kind` is neither `"grouped"` nor `"unique"`.
    pub fn to_definition(&self) -> StoreResult<IndexDefinition> {
        let kind: IndexKind = self.kind.parse()?;
        let mut definition = IndexDefinition::attribute(self.attribute.clone()).kind(kind);
        if let Some(name) = &self.name {
            definition = definition.named(name.clone());
        }
        if let Some(order) = &self.order {
            definition = definition.ordered_by(order.to_policy());
        }
        Ok(definition)
    }
}

/// Declarative store configuration
///
/// # Example
///
/// ```toml
/// [order]
/// field = "name"
///
/// [[indexes]]
/// attribute = "containerId"
///
/// [[indexes]]
/// attribute = "slug"
/// kind = "unique"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Ordering of the id list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderConfig>,
    /// Indexes in declaration order
    #[serde(default)]
    pub indexes: Vec<IndexConfig>,
}

impl StoreConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> StoreResult<Self> {
        toml::from_str(content)
            .map_err(|e| StoreError::Config(format!("Failed to parse store config: {}", e)))
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# normstore collection configuration
#
# Ordering of the id list (optional). Without it ids keep insertion order.
# [order]
# field = "name"
# descending = false

# Attribute indexes. kind is "grouped" (default) or "unique".
# [[indexes]]
# attribute = "containerId"
# kind = "grouped"
#
# [indexes.order]
# field = "name"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// declares an unknown index kind.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            StoreError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        // Validate index kinds eagerly
        for index in &config.indexes {
            index.kind.parse::<IndexKind>()?;
        }
        Ok(config)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> StoreResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StoreError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            StoreError::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// The matching store definition
    ///
    /// # Errors
    ///
    /// `UnknownIndexKind` for an unknown `kind`, `InvalidDefinition` when two
    /// indexes end up with the same name.
    pub fn into_definition(self) -> StoreResult<StoreDefinition> {
        let mut definition = StoreDefinition::new();
        if let Some(order) = &self.order {
            definition = definition.ordered_by(order.to_policy());
        }
        let mut names = HashSet::new();
        for index in &self.indexes {
            let index = index.to_definition()?;
            if !names.insert(index.name().to_string()) {
                return Err(StoreError::InvalidDefinition(format!(
                    "index '{}' is defined twice",
                    index.name()
                )));
            }
            definition = definition.with_index(index);
        }
        Ok(definition)
    }
}
