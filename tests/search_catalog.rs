//! Integration tests for search and category filtering over the full
//! catalog, user places included.

mod helpers;

use helpers::sample_place;
use tempfile::TempDir;

use city_guide::{filter_by_category, search, Category, PlaceCatalog, PlaceStore};

#[tokio::test]
async fn fortress_query_finds_exactly_the_fortress() {
    let dir = TempDir::new().unwrap();
    let catalog = PlaceCatalog::new(PlaceStore::open(dir.path()));

    let corpus = catalog.all().await;
    let results = search("крепость", &corpus);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Курская крепость");

    // Mixed case folds to the same match.
    let shouted = search("КРЕПОСТЬ", &corpus);
    assert_eq!(shouted.len(), 1);
    assert_eq!(shouted[0].id, results[0].id);
}

#[tokio::test]
async fn search_reaches_user_places_after_the_builtin_set() {
    let dir = TempDir::new().unwrap();
    let store = PlaceStore::open(dir.path());
    let mut mine = sample_place(200, "Моя кофейня");
    mine.address = "ул. Ленина, 99".to_string();
    store.save(&mine).await.unwrap();

    let catalog = PlaceCatalog::new(store);
    let corpus = catalog.all().await;

    let by_name = search("кофейня", &corpus);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, 200);

    // The address hit lists builtin matches first, the user place last.
    let by_address = search("ленина", &corpus);
    assert!(by_address.len() > 1);
    assert_eq!(by_address.last().unwrap().id, 200);
}

#[tokio::test]
async fn category_filter_matches_tags_exactly() {
    let dir = TempDir::new().unwrap();
    let catalog = PlaceCatalog::new(PlaceStore::open(dir.path()));

    let churches = catalog.by_category("Храмы").await;
    assert_eq!(churches.len(), 1);
    assert!(churches.iter().all(|p| p.category == "Храмы"));

    // Case differences and unknown tags both miss.
    assert!(catalog.by_category("храмы").await.is_empty());
    assert!(catalog.by_category("Планетарии").await.is_empty());
}

#[tokio::test]
async fn user_places_land_in_their_own_category() {
    let dir = TempDir::new().unwrap();
    let store = PlaceStore::open(dir.path());
    store.save(&sample_place(300, "Добавленное место")).await.unwrap();

    let catalog = PlaceCatalog::new(store);
    let user_tag = Category::UserSubmitted.tag();

    let user_places = catalog.by_category(user_tag).await;
    assert_eq!(user_places.len(), 1);
    assert_eq!(user_places[0].id, 300);

    // The free function agrees with the repository view.
    let corpus = catalog.all().await;
    assert_eq!(filter_by_category(user_tag, &corpus), user_places);
}
