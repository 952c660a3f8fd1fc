// raw.rs
// Wire shapes for each data source, before normalization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NamedAPIResource {
    pub name: String,
}

/// A `{name, url}` reference as returned by a paginated listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PokemonTypeSlot {
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(rename = "type")]
    pub type_info: NamedAPIResource,
}

/// Type list entry: a bare name or a `{type: {name}}` wrapper.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawTypeEntry {
    Name(String),
    Slot(PokemonTypeSlot),
}

impl RawTypeEntry {
    pub fn type_name(&self) -> &str {
        match self {
            RawTypeEntry::Name(name) => name,
            RawTypeEntry::Slot(slot) => &slot.type_info.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct LocalOtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct LocalSprites {
    pub front_default: Option<String>,
    pub other: Option<LocalOtherSprites>,
}

/// One per-entity document from the local collection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocalRawPokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<RawTypeEntry>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub sprites: LocalSprites,
}

/// Entry of the local index document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RemoteOtherSprites {
    pub dream_world: Option<Artwork>,
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RemoteSprites {
    pub front_default: Option<String>,
    pub other: Option<RemoteOtherSprites>,
}

/// PokeAPI `/pokemon/{name}` payload, reduced to the fields we read.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RemoteRawPokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<RawTypeEntry>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub sprites: RemoteSprites,
}

/// PokeAPI `/pokemon?offset=&limit=` payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RemoteListResponse {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ResourceRef>,
}

/// Read access shared by both raw shapes, consumed by the normalizer.
pub trait RawPokemon {
    fn name(&self) -> &str;
    fn height(&self) -> u32;
    fn weight(&self) -> u32;
    fn types(&self) -> &[RawTypeEntry];
    fn stats(&self) -> &[PokemonStat];
    /// Sprite URLs in source-specific priority order.
    fn image_candidates(&self) -> Vec<Option<&str>>;
    fn default_sprite(&self) -> Option<&str>;
}

fn artwork_url(artwork: Option<&Artwork>) -> Option<&str> {
    artwork.and_then(|a| a.front_default.as_deref())
}

impl RawPokemon for LocalRawPokemon {
    fn name(&self) -> &str {
        &self.name
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn types(&self) -> &[RawTypeEntry] {
        &self.types
    }

    fn stats(&self) -> &[PokemonStat] {
        &self.stats
    }

    fn image_candidates(&self) -> Vec<Option<&str>> {
        let other = self.sprites.other.as_ref();
        vec![artwork_url(other.and_then(|o| o.official_artwork.as_ref()))]
    }

    fn default_sprite(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }
}

impl RawPokemon for RemoteRawPokemon {
    fn name(&self) -> &str {
        &self.name
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn types(&self) -> &[RawTypeEntry] {
        &self.types
    }

    fn stats(&self) -> &[PokemonStat] {
        &self.stats
    }

    fn image_candidates(&self) -> Vec<Option<&str>> {
        let other = self.sprites.other.as_ref();
        vec![
            artwork_url(other.and_then(|o| o.dream_world.as_ref())),
            artwork_url(other.and_then(|o| o.official_artwork.as_ref())),
        ]
    }

    fn default_sprite(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }
}
