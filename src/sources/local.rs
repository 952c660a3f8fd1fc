use std::future::Future;
use std::path::{Path, PathBuf};

use super::{ApiSource, PokemonSource};
use crate::config::CustomSourceConfig;
use crate::error::SourceError;
use crate::normalize::{to_list_item, to_pokemon};
use crate::pokemon::{Pokemon, PokemonPage};
use crate::raw::{IndexEntry, LocalRawPokemon};

const ORIGIN: ApiSource = ApiSource::Custom;

/// Reads a directory holding an index document plus one JSON document per
/// Pokémon, named by its lowercased name.
#[derive(Debug, Clone)]
pub struct LocalFileAdapter {
    data_dir: PathBuf,
    index_file: String,
}

impl LocalFileAdapter {
    pub fn new(data_dir: impl Into<PathBuf>, index_file: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            index_file: index_file.into(),
        }
    }

    pub fn from_config(config: &CustomSourceConfig) -> Self {
        Self::new(config.data_dir.clone(), config.index_file.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // None for names that would escape the data directory.
    fn document_path(&self, name: &str) -> Option<PathBuf> {
        let key = name.trim().to_lowercase();
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return None;
        }
        Some(self.data_dir.join(format!("{}.json", key)))
    }

    async fn read_index(&self) -> Result<Vec<String>, SourceError> {
        let path = self.data_dir.join(&self.index_file);
        tracing::debug!("Reading Pokémon index from {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!("Failed to read index {}: {}", path.display(), e);
            SourceError::Transport {
                origin: ORIGIN,
                message: format!("Failed to fetch Pokemon list: {}", e),
            }
        })?;

        let entries: Vec<IndexEntry> = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Failed to parse index {}: {}", path.display(), e);
            SourceError::MalformedPayload {
                origin: ORIGIN,
                message: format!("index {}: {}", self.index_file, e),
            }
        })?;

        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    async fn read_document(&self, name: &str) -> Result<LocalRawPokemon, SourceError> {
        let not_found = || SourceError::NotFound {
            origin: ORIGIN,
            name: name.to_string(),
        };
        let path = self.document_path(name).ok_or_else(not_found)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(SourceError::Transport {
                    origin: ORIGIN,
                    message: format!("Failed to fetch Pokemon {}: {}", name, e),
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| SourceError::MalformedPayload {
            origin: ORIGIN,
            message: format!("{}: {}", path.display(), e),
        })
    }
}

impl PokemonSource for LocalFileAdapter {
    fn source_id(&self) -> ApiSource {
        ORIGIN
    }

    fn list_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<PokemonPage, SourceError>> + Send {
        async move {
            let names = self.read_index().await?;
            let total_count = names.len();
            let start = offset.min(total_count);
            let end = offset.saturating_add(limit).min(total_count);

            let mut results = Vec::with_capacity(end - start);
            for name in &names[start..end] {
                match self.read_document(name).await {
                    Ok(raw) => results.push(to_list_item(&raw)),
                    Err(e) => tracing::warn!("Failed to fetch data for {}: {}", name, e),
                }
            }

            tracing::debug!(
                "Listed {} of {} Pokémon at offset {}",
                results.len(),
                total_count,
                offset
            );

            Ok(PokemonPage {
                results,
                next_available: offset.saturating_add(limit) < total_count,
                previous_available: offset > 0,
                total_count,
            })
        }
    }

    fn fetch_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Pokemon, SourceError>> + Send {
        async move {
            let raw = self.read_document(name).await.inspect_err(|e| {
                tracing::error!("Error fetching Pokemon {}: {}", name, e);
            })?;
            Ok(to_pokemon(&raw))
        }
    }
}
