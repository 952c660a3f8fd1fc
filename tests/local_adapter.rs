mod common;

use pokedex_sources::{BaseStats, ErrorKind, PokemonSource};
use pretty_assertions::assert_eq;
use std::fs;

use common::{local_adapter, local_dataset, names};

#[tokio::test]
async fn test_first_and_last_page_of_twenty() {
    let dir = local_dataset(&names(20), &[]);
    let adapter = local_adapter(dir.path());

    let first = adapter.list_page(0, 12).await.unwrap();
    assert_eq!(first.results.len(), 12);
    assert!(first.next_available);
    assert!(!first.previous_available);
    assert_eq!(first.total_count, 20);
    assert_eq!(first.results[0].name, "Mon01");

    let second = adapter.list_page(12, 12).await.unwrap();
    assert_eq!(second.results.len(), 8);
    assert!(!second.next_available);
    assert!(second.previous_available);
    assert_eq!(second.total_count, 20);
    assert_eq!(second.results[0].name, "Mon13");
    assert_eq!(second.results[7].name, "Mon20");
}

#[tokio::test]
async fn test_has_next_matches_window_for_every_offset() {
    let dir = local_dataset(&names(20), &[]);
    let adapter = local_adapter(dir.path());

    for limit in [1, 5, 12, 20, 25] {
        for offset in [0, 1, 7, 15, 19, 20, 30] {
            let page = adapter.list_page(offset, limit).await.unwrap();
            assert_eq!(page.next_available, offset + limit < 20, "offset {offset} limit {limit}");
            assert_eq!(page.previous_available, offset > 0);
            assert_eq!(page.total_count, 20);
        }
    }
}

#[tokio::test]
async fn test_offset_past_end_is_empty_page() {
    let dir = local_dataset(&names(3), &[]);
    let adapter = local_adapter(dir.path());

    let page = adapter.list_page(10, 12).await.unwrap();
    assert!(page.results.is_empty());
    assert!(!page.next_available);
    assert!(page.previous_available);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn test_one_failing_entity_shrinks_page() {
    let all = names(20);
    let dir = local_dataset(&all, &["mon05"]);
    let adapter = local_adapter(dir.path());

    let page = adapter.list_page(0, 12).await.unwrap();
    assert_eq!(page.results.len(), 11);
    assert_eq!(page.total_count, 20);
    assert!(page.results.iter().all(|item| item.name != "Mon05"));
}

#[tokio::test]
async fn test_corrupt_entity_is_skipped() {
    let dir = local_dataset(&names(4), &[]);
    fs::write(dir.path().join("mon02.json"), "{\"name\": 42").unwrap();
    let adapter = local_adapter(dir.path());

    let page = adapter.list_page(0, 4).await.unwrap();
    let listed: Vec<&str> = page.results.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(listed, vec!["Mon01", "Mon03", "Mon04"]);
}

#[tokio::test]
async fn test_corrupt_index_is_malformed_payload() {
    let dir = local_dataset(&names(2), &[]);
    fs::write(dir.path().join(common::INDEX_FILE), "[{\"nom\": 1}]").unwrap();
    let adapter = local_adapter(dir.path());

    let err = adapter.list_page(0, 12).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    assert_eq!(err.to_api_error().code, "CUSTOM_API_ERROR");
}

#[tokio::test]
async fn test_fetch_by_name_is_case_insensitive() {
    let dir = local_dataset(&names(2), &[]);
    let adapter = local_adapter(dir.path());

    let pokemon = adapter.fetch_by_name("MON02").await.unwrap();
    assert_eq!(pokemon.name, "Mon02");
    assert_eq!(pokemon.image, "https://img.test/art/mon02.png");
    assert_eq!(pokemon.types[0].name, "Grass");
    assert_eq!(pokemon.types[1].name, "Poison");
    assert_eq!(
        pokemon.base_stats,
        BaseStats {
            hp: 40,
            attack: 50,
            defense: 45,
            special_attack: 60,
            special_defense: 55,
            speed: 70,
        }
    );
}

#[tokio::test]
async fn test_fetch_nonexistent_is_not_found() {
    let dir = local_dataset(&names(2), &[]);
    let adapter = local_adapter(dir.path());

    let err = adapter.fetch_by_name("nonexistent").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), "CUSTOM_API_ERROR");
}

#[tokio::test]
async fn test_concurrent_pages_do_not_interfere() {
    let dir = local_dataset(&names(20), &[]);
    let adapter = local_adapter(dir.path());

    let (a, b) = tokio::join!(adapter.list_page(0, 10), adapter.list_page(10, 10));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.results[0].name, "Mon01");
    assert_eq!(b.results[0].name, "Mon11");
    assert_eq!(a.total_count, b.total_count);
}
