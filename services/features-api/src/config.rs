//! Collection registry loading and types.
//!
//! Every queryable collection is declared up front in a YAML file; the
//! registry is loaded once at startup so request handling never inspects
//! schemas dynamically.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Collection registry loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct FeaturesConfig {
    /// Collection definitions, sorted by id.
    pub collections: Vec<CollectionConfig>,
}

impl FeaturesConfig {
    /// Load configuration from a directory of YAML files, one collection
    /// per file.
    pub fn load_from_dir(dir: &str) -> Result<Self> {
        let path = Path::new(dir);

        // If directory doesn't exist, return default config
        if !path.exists() {
            tracing::warn!(
                "Collections config directory {} does not exist, using defaults",
                dir
            );
            return Ok(Self::default());
        }

        let mut collections = Vec::new();

        for entry in
            std::fs::read_dir(path).with_context(|| format!("Failed to read directory: {}", dir))?
        {
            let entry = entry?;
            let file_path = entry.path();

            if let Some(ext) = file_path.extension() {
                if ext == "yaml" || ext == "yml" {
                    let content = std::fs::read_to_string(&file_path)
                        .with_context(|| format!("Failed to read: {:?}", file_path))?;

                    let config: CollectionConfig = serde_yaml::from_str(&content)
                        .with_context(|| format!("Failed to parse: {:?}", file_path))?;

                    collections.push(config);
                }
            }
        }

        collections.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Self { collections })
    }

    /// Find a collection by id.
    pub fn find_collection(&self, id: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.id == id)
    }
}

/// Definition of one queryable collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Unique collection identifier, also the URL path segment.
    pub id: String,

    /// Human-readable title.
    #[serde(default)]
    pub title: String,

    /// Description of the collection.
    #[serde(default)]
    pub description: String,

    /// Record fields included in responses, in order.
    #[serde(default)]
    pub display_fields: Vec<String>,

    /// Record fields accepted as filter query parameters. Dotted names
    /// address nested fields.
    #[serde(default)]
    pub filter_fields: Vec<String>,

    /// Field carrying the observation timestamp; absent disables the
    /// `datetime` parameter for this collection.
    #[serde(default)]
    pub datetime_field: Option<String>,

    /// Field carrying the primary GeoJSON geometry.
    #[serde(default)]
    pub geometry_field: Option<String>,

    /// Field the `bbox` parameter filters on; absent makes `bbox` a
    /// no-op for this collection. Dotted names address nested fields.
    #[serde(default)]
    pub geometry_filter_field: Option<String>,

    /// Integer field the locations query matches `locationId` against.
    #[serde(default)]
    pub locations_field: Option<String>,

    /// Response shape and default-limit policy.
    #[serde(default)]
    pub api_type: ApiType,

    /// Optional path to a JSON array of records seeded into the store
    /// at startup.
    #[serde(default)]
    pub seed_data: Option<String>,
}

/// API flavor of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    /// Features-style GeoJSON; limit defaults when absent.
    #[default]
    Features,
    /// EDR-style GeoJSON; requests must set a limit.
    Edr,
}
