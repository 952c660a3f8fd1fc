// pokemon.rs
// Unified display model shared by every data source.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PokemonType {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

/// Minimal projection used by list views.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PokemonListItem {
    pub name: String,
    pub image: String,
    /// Primary type first.
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub name: String,
    pub image: String,
    pub types: Vec<PokemonType>,
    /// Decimeters.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub base_stats: BaseStats,
}

impl Pokemon {
    pub fn to_list_item(&self) -> PokemonListItem {
        PokemonListItem {
            name: self.name.clone(),
            image: self.image.clone(),
            types: self.types.clone(),
        }
    }
}

/// One window of list results.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PokemonPage {
    pub results: Vec<PokemonListItem>,
    pub next_available: bool,
    pub previous_available: bool,
    pub total_count: usize,
}
