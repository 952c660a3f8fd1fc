use std::sync::Arc;

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::pokemon::{Pokemon, PokemonPage};
use crate::sources::{Adapter, ApiSource, LocalFileAdapter, PokemonSource, RemoteApiAdapter};
use crate::store::PreferenceStore;

/// Preference key holding the active source identifier.
pub const SOURCE_KEY: &str = "pokemon-api-source";

/// Tracks which source is active and hands out its adapter.
#[derive(Clone)]
pub struct SourceSelector {
    store: Arc<dyn PreferenceStore>,
    local: LocalFileAdapter,
    remote: RemoteApiAdapter,
}

impl SourceSelector {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        config: &SourcesConfig,
    ) -> Result<Self, SourceError> {
        Ok(Self::with_adapters(
            store,
            LocalFileAdapter::from_config(&config.custom),
            RemoteApiAdapter::from_config(&config.pokeapi)?,
        ))
    }

    pub fn with_adapters(
        store: Arc<dyn PreferenceStore>,
        local: LocalFileAdapter,
        remote: RemoteApiAdapter,
    ) -> Self {
        Self {
            store,
            local,
            remote,
        }
    }

    /// Persisted source, or [`ApiSource::Custom`] when unset or invalid.
    pub fn get_active(&self) -> ApiSource {
        match self.store.get(SOURCE_KEY) {
            Some(stored) => stored.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid stored source: {}", stored);
                ApiSource::default()
            }),
            None => ApiSource::default(),
        }
    }

    pub fn set_active(&self, source: ApiSource) -> Result<(), SourceError> {
        self.store
            .set(SOURCE_KEY, source.as_str())
            .map_err(|e| SourceError::Configuration(e.to_string()))?;
        tracing::info!("Active source set to {}", source);
        Ok(())
    }

    pub fn resolve(&self, source: ApiSource) -> Adapter {
        match source {
            ApiSource::Custom => Adapter::Local(self.local.clone()),
            ApiSource::PokeApi => Adapter::Remote(self.remote.clone()),
        }
    }

    pub fn resolve_named(&self, source: &str) -> Result<Adapter, SourceError> {
        Ok(self.resolve(source.parse()?))
    }

    pub fn active_adapter(&self) -> Adapter {
        self.resolve(self.get_active())
    }

    pub async fn list_page(&self, offset: usize, limit: usize) -> Result<PokemonPage, SourceError> {
        self.active_adapter().list_page(offset, limit).await
    }

    pub async fn fetch_by_name(&self, name: &str) -> Result<Pokemon, SourceError> {
        self.active_adapter().fetch_by_name(name).await
    }
}
