//! Conversion from raw source payloads into the unified display model.
//!
//! Every function here is pure: the same raw input always produces the same
//! entity, and the output owns all of its data.

use crate::colors::type_color;
use crate::pokemon::{BaseStats, Pokemon, PokemonListItem, PokemonType};
use crate::raw::{PokemonStat, RawPokemon, RawTypeEntry};

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `special-attack` -> `specialAttack`. A hyphen not followed by a lowercase
/// ASCII letter is kept.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

pub fn extract_types(entries: &[RawTypeEntry]) -> Vec<PokemonType> {
    entries
        .iter()
        .map(|entry| {
            let name = entry.type_name();
            PokemonType {
                name: capitalize(name),
                color: type_color(name).to_string(),
            }
        })
        .collect()
}

/// First non-empty candidate, else the default sprite, else an empty string.
pub fn resolve_image(candidates: &[Option<&str>], default_sprite: Option<&str>) -> String {
    candidates
        .iter()
        .flatten()
        .find(|url| !url.is_empty())
        .copied()
        .or(default_sprite)
        .unwrap_or_default()
        .to_string()
}

pub fn fold_stats(stats: &[PokemonStat]) -> BaseStats {
    let mut folded = BaseStats::default();
    for entry in stats {
        let slot = match to_camel_case(&entry.stat.name).as_str() {
            "hp" => &mut folded.hp,
            "attack" => &mut folded.attack,
            "defense" => &mut folded.defense,
            "specialAttack" => &mut folded.special_attack,
            "specialDefense" => &mut folded.special_defense,
            "speed" => &mut folded.speed,
            other => {
                tracing::debug!("Ignoring unrecognized stat: {}", other);
                continue;
            }
        };
        *slot = entry.base_stat;
    }
    folded
}

pub fn to_list_item<R: RawPokemon>(raw: &R) -> PokemonListItem {
    PokemonListItem {
        name: capitalize(raw.name()),
        image: resolve_image(&raw.image_candidates(), raw.default_sprite()),
        types: extract_types(raw.types()),
    }
}

pub fn to_pokemon<R: RawPokemon>(raw: &R) -> Pokemon {
    Pokemon {
        name: capitalize(raw.name()),
        image: resolve_image(&raw.image_candidates(), raw.default_sprite()),
        types: extract_types(raw.types()),
        height: raw.height(),
        weight: raw.weight(),
        base_stats: fold_stats(raw.stats()),
    }
}
