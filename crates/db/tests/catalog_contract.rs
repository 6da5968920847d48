use std::sync::Arc;

use gamedeck_core::{ProductDraft, ProductId};
use gamedeck_db::repositories::{InMemoryProductRepository, ProductRepository, SqlProductRepository};
use gamedeck_db::{connect_with_settings, migrations, DemoCatalog};

async fn sql_repository() -> Arc<dyn ProductRepository> {
    let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
    migrations::run_pending(&pool).await.expect("migrations");
    Arc::new(SqlProductRepository::new(pool))
}

async fn exercise_contract(name: &str, repository: Arc<dyn ProductRepository>) {
    let chess_draft =
        ProductDraft::new("Chess", "Classic strategy.", "https://img.gamedeck.dev/chess.jpg");
    let chess = repository.create(chess_draft).await.expect("create chess");
    let go = repository
        .create(ProductDraft { name: Some("Go".to_string()), ..ProductDraft::default() })
        .await
        .expect("create go");

    assert!(go.id > chess.id, "{name}: ids grow");
    assert_eq!(go.detail, None, "{name}: absent field stored as null");
    assert_eq!(
        repository.find_by_id(chess.id).await.expect("find"),
        Some(chess.clone()),
        "{name}: create then get round-trips"
    );

    let rename = ProductDraft { name: Some("Chess960".to_string()), ..ProductDraft::default() };
    let renamed = repository
        .update(chess.id, rename)
        .await
        .expect("update")
        .expect("chess exists");
    assert_eq!(renamed.name.as_deref(), Some("Chess960"), "{name}");
    assert_eq!(renamed.coverimage, None, "{name}: update is a full overwrite");

    let missing = ProductId(go.id.0 + 100);
    assert_eq!(
        repository.update(missing, ProductDraft::new("x", "y", "z")).await.expect("update"),
        None,
        "{name}: update of missing id"
    );
    assert_eq!(repository.list().await.expect("list").len(), 2, "{name}: no write on miss");

    assert!(repository.delete(go.id).await.expect("delete"), "{name}");
    assert!(!repository.delete(go.id).await.expect("second delete"), "{name}");

    let remaining: Vec<_> =
        repository.list().await.expect("list").into_iter().map(|product| product.id).collect();
    assert_eq!(remaining, vec![chess.id], "{name}");
}

#[tokio::test]
async fn sql_and_memory_repositories_share_one_contract() {
    exercise_contract("sql", sql_repository().await).await;
    exercise_contract("memory", Arc::new(InMemoryProductRepository::default())).await;
}

#[tokio::test]
async fn seeded_catalog_is_visible_through_the_repository() {
    let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
    migrations::run_pending(&pool).await.expect("migrations");
    DemoCatalog::load(&pool).await.expect("seed");

    let products = SqlProductRepository::new(pool.clone()).list().await.expect("list");
    let names: Vec<_> = products.iter().map(|product| product.display_name()).collect();

    assert_eq!(names, DemoCatalog::names().collect::<Vec<_>>());

    pool.close().await;
}
