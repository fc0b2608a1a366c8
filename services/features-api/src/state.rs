//! Application state for the Features API.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

use feature_store::{MemoryStore, RecordStore};
use features_protocol::Record;

use crate::config::FeaturesConfig;
use crate::html::{TableRenderer, TemplateRenderer};

/// Shared application state.
pub struct AppState {
    /// Record store backing all collections.
    pub store: Arc<dyn RecordStore>,

    /// Collection registry (hot-reloadable).
    pub config: Arc<RwLock<FeaturesConfig>>,

    /// HTML renderer collaborator.
    pub renderer: Arc<dyn TemplateRenderer>,

    /// Base URL for building links.
    pub base_url: String,
}

impl AppState {
    /// Create a new AppState from environment configuration.
    pub fn new() -> Result<Self> {
        let base_url = std::env::var("FEATURES_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let config_dir = std::env::var("FEATURES_CONFIG_DIR")
            .unwrap_or_else(|_| "config/collections".to_string());

        let config = FeaturesConfig::load_from_dir(&config_dir)?;

        let store = MemoryStore::new();
        for collection in &config.collections {
            store.register(&collection.id);

            if let Some(path) = &collection.seed_data {
                match load_seed_records(path) {
                    Ok(records) => {
                        let count = store
                            .insert_many(&collection.id, records)
                            .map_err(|e| anyhow::anyhow!("{}", e))?;
                        tracing::info!(
                            "Seeded {} records into collection {}",
                            count,
                            collection.id
                        );
                    }
                    Err(e) => {
                        tracing::warn!("Skipping seed data for {}: {}", collection.id, e);
                    }
                }
            }
        }

        Ok(Self::with_parts(config, Arc::new(store), base_url))
    }

    /// Assemble state from preconstructed parts.
    pub fn with_parts(
        config: FeaturesConfig,
        store: Arc<dyn RecordStore>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            config: Arc::new(RwLock::new(config)),
            renderer: Arc::new(TableRenderer),
            base_url: base_url.into(),
        }
    }
}

fn load_seed_records(path: &str) -> Result<Vec<Record>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path))?;

    let records: Vec<Record> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse: {}", path))?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectionConfig;

    #[test]
    fn test_with_parts_registers_nothing_extra() {
        let config = FeaturesConfig {
            collections: vec![serde_yaml::from_str::<CollectionConfig>("id: sensors").unwrap()],
        };
        let store = Arc::new(MemoryStore::new().with_collection("sensors", vec![]));
        let state = AppState::with_parts(config, store, "http://localhost:8080");

        assert_eq!(state.base_url, "http://localhost:8080");
        assert!(state.store.query("sensors", &[]).unwrap().is_empty());
    }
}
