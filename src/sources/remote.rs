use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

use super::{ApiSource, PokemonSource};
use crate::config::PokeApiConfig;
use crate::error::SourceError;
use crate::normalize::{to_list_item, to_pokemon};
use crate::pokemon::{Pokemon, PokemonPage};
use crate::raw::{RemoteListResponse, RemoteRawPokemon};

const ORIGIN: ApiSource = ApiSource::PokeApi;

/// Talks to a PokeAPI-compatible HTTP service.
#[derive(Debug, Clone)]
pub struct RemoteApiAdapter {
    client: reqwest::Client,
    api_url: String,
}

impl RemoteApiAdapter {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                SourceError::Configuration(format!("cannot build HTTP client: {}", e))
            })?;
        Ok(Self::with_client(api_url, client))
    }

    pub fn with_client(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &PokeApiConfig) -> Result<Self, SourceError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout as u64),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // PokeAPI names are lowercase ASCII letters, digits and hyphens. Anything
    // else could not name a Pokémon and would alter the request URL.
    fn lookup_key(name: &str) -> Option<String> {
        let key = name.trim().to_lowercase();
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        valid.then_some(key)
    }

    // `name` is only used to classify a 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        name: Option<&str>,
    ) -> Result<T, SourceError> {
        tracing::debug!("Fetching from URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, e);
            SourceError::Transport {
                origin: ORIGIN,
                message: format!("Failed to fetch Pokemon data: {}", e),
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(name) = name {
                return Err(SourceError::NotFound {
                    origin: ORIGIN,
                    name: name.to_string(),
                });
            }
        }
        if !status.is_success() {
            return Err(SourceError::Transport {
                origin: ORIGIN,
                message: format!("API request failed with status: {}", status),
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", url, e);
            if e.is_decode() {
                SourceError::MalformedPayload {
                    origin: ORIGIN,
                    message: format!("JSON parsing failed: {}", e),
                }
            } else {
                SourceError::Transport {
                    origin: ORIGIN,
                    message: format!("Failed to read response body: {}", e),
                }
            }
        })
    }
}

impl PokemonSource for RemoteApiAdapter {
    fn source_id(&self) -> ApiSource {
        ORIGIN
    }

    fn list_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<PokemonPage, SourceError>> + Send {
        async move {
            let url = format!(
                "{}/pokemon?offset={}&limit={}",
                self.api_url, offset, limit
            );
            let listing: RemoteListResponse = self.get_json(&url, None).await?;

            let mut results = Vec::with_capacity(listing.results.len());
            for reference in &listing.results {
                match self
                    .get_json::<RemoteRawPokemon>(&reference.url, Some(reference.name.as_str()))
                    .await
                {
                    Ok(raw) => results.push(to_list_item(&raw)),
                    Err(e) => tracing::warn!("Failed to fetch data for {}: {}", reference.name, e),
                }
            }

            Ok(PokemonPage {
                results,
                next_available: listing.next.is_some(),
                previous_available: listing.previous.is_some(),
                total_count: listing.count,
            })
        }
    }

    fn fetch_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Pokemon, SourceError>> + Send {
        async move {
            let key = Self::lookup_key(name).ok_or_else(|| SourceError::NotFound {
                origin: ORIGIN,
                name: name.to_string(),
            })?;
            let url = format!("{}/pokemon/{}", self.api_url, key);
            let raw: RemoteRawPokemon = self.get_json(&url, Some(name)).await.inspect_err(|e| {
                tracing::error!("Error fetching Pokemon {}: {}", name, e);
            })?;
            tracing::debug!("Successfully fetched Pokemon: {}", raw.name);
            Ok(to_pokemon(&raw))
        }
    }
}
