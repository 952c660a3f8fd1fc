mod local;
mod remote;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::error::SourceError;
use crate::pokemon::{Pokemon, PokemonPage};

pub use local::LocalFileAdapter;
pub use remote::RemoteApiAdapter;

/// Identifier of a backing data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSource {
    /// Local per-entity JSON documents.
    #[default]
    Custom,
    /// The public PokeAPI.
    PokeApi,
}

impl ApiSource {
    pub const ALL: [ApiSource; 2] = [ApiSource::Custom, ApiSource::PokeApi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiSource::Custom => "custom",
            ApiSource::PokeApi => "pokeapi",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiSource::Custom => "CUSTOM_API_ERROR",
            ApiSource::PokeApi => "POKEAPI_ERROR",
        }
    }
}

impl fmt::Display for ApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| SourceError::Configuration(format!("Unknown API source: {}", s)))
    }
}

/// Operations every data source provides.
///
/// Implementations hold no mutable state, so calls for different offsets may
/// run concurrently.
pub trait PokemonSource {
    fn source_id(&self) -> ApiSource;

    /// Lists `[offset, offset + limit)`. Entities that fail to load are
    /// skipped, so a page may come back short.
    fn list_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<PokemonPage, SourceError>> + Send;

    /// Case-insensitive lookup.
    fn fetch_by_name(&self, name: &str)
    -> impl Future<Output = Result<Pokemon, SourceError>> + Send;
}

/// The adapter backing one [`ApiSource`].
#[derive(Debug, Clone)]
pub enum Adapter {
    Local(LocalFileAdapter),
    Remote(RemoteApiAdapter),
}

impl PokemonSource for Adapter {
    fn source_id(&self) -> ApiSource {
        match self {
            Adapter::Local(adapter) => adapter.source_id(),
            Adapter::Remote(adapter) => adapter.source_id(),
        }
    }

    fn list_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<PokemonPage, SourceError>> + Send {
        async move {
            match self {
                Adapter::Local(adapter) => adapter.list_page(offset, limit).await,
                Adapter::Remote(adapter) => adapter.list_page(offset, limit).await,
            }
        }
    }

    fn fetch_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Pokemon, SourceError>> + Send {
        async move {
            match self {
                Adapter::Local(adapter) => adapter.fetch_by_name(name).await,
                Adapter::Remote(adapter) => adapter.fetch_by_name(name).await,
            }
        }
    }
}
