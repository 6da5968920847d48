use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::warn;

use gamedeck_core::domain::product::{Product, ProductDraft, ProductId};

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

#[derive(Debug, sqlx::FromRow)]
struct GameRow {
    id: i64,
    name: Option<String>,
    detail: Option<String>,
    coverimage: Option<String>,
}

impl From<GameRow> for Product {
    fn from(row: GameRow) -> Self {
        Self {
            id: ProductId(row.id),
            name: row.name,
            detail: row.detail,
            coverimage: row.coverimage,
        }
    }
}

/// `games` table access. Each call acquires one pooled connection, runs all
/// of its stages on it and hands it back on drop, whatever the outcome.
#[derive(Clone)]
pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn fetch_game(
    conn: &mut SqliteConnection,
    id: ProductId,
) -> Result<Option<Product>, sqlx::Error> {
    let row = sqlx::query_as::<_, GameRow>(
        "SELECT id, name, detail, coverimage FROM games WHERE id = ?",
    )
    .bind(id.0)
    .fetch_optional(conn)
    .await?;
    Ok(row.map(Product::from))
}

async fn game_exists(conn: &mut SqliteConnection, id: ProductId) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM games WHERE id = ?")
        .bind(id.0)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let rows =
            sqlx::query_as::<_, GameRow>("SELECT id, name, detail, coverimage FROM games")
                .fetch_all(&mut *conn)
                .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_game(&mut conn, id).await?)
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let columns = draft.columns();

        let mut insert = QueryBuilder::<Sqlite>::new("INSERT INTO games (");
        {
            let mut names = insert.separated(", ");
            for (column, _) in &columns {
                names.push(*column);
            }
        }
        insert.push(") VALUES (");
        {
            let mut values = insert.separated(", ");
            for (_, value) in &columns {
                values.push_bind(value.map(str::to_owned));
            }
        }
        insert.push(")");

        let result = insert.build().execute(&mut *conn).await?;
        let id = ProductId(result.last_insert_rowid());

        // Not a transaction: a failure here leaves the inserted row behind.
        fetch_game(&mut conn, id).await?.ok_or_else(|| {
            RepositoryError::Decode(format!("game {id} was inserted but could not be read back"))
        })
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        if !game_exists(&mut conn, id).await? {
            return Ok(None);
        }

        let mut update = QueryBuilder::<Sqlite>::new("UPDATE games SET ");
        {
            let mut assignments = update.separated(", ");
            for (column, value) in draft.columns() {
                assignments.push(format!("{column} = "));
                assignments.push_bind_unseparated(value.map(str::to_owned));
            }
        }
        update.push(" WHERE id = ").push_bind(id.0);

        let result = update.build().execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            warn!(
                event_name = "catalog.store.update_lost_target",
                product_id = %id,
                "game disappeared between existence check and update"
            );
            return Ok(None);
        }

        Ok(fetch_game(&mut conn, id).await?)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        if !game_exists(&mut conn, id).await? {
            return Ok(false);
        }

        let result =
            sqlx::query("DELETE FROM games WHERE id = ?").bind(id.0).execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            warn!(
                event_name = "catalog.store.delete_lost_target",
                product_id = %id,
                "game disappeared between existence check and delete"
            );
            return Ok(false);
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use gamedeck_core::domain::product::{ProductDraft, ProductId};

    use super::SqlProductRepository;
    use crate::repositories::ProductRepository;
    use crate::{connect_with_settings, migrations, DbPool};

    async fn setup() -> (DbPool, SqlProductRepository) {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        (pool.clone(), SqlProductRepository::new(pool))
    }

    #[tokio::test]
    async fn create_then_find_round_trips_every_field() {
        let (pool, repo) = setup().await;

        let draft =
            ProductDraft::new("Chess", "Two-player strategy", "https://img.example/chess.png");
        let created = repo.create(draft).await.expect("create");
        let found = repo.find_by_id(created.id).await.expect("find").expect("row should exist");

        assert_eq!(found, created);
        assert_eq!(found.name.as_deref(), Some("Chess"));
        assert_eq!(found.detail.as_deref(), Some("Two-player strategy"));
        assert_eq!(found.coverimage.as_deref(), Some("https://img.example/chess.png"));

        pool.close().await;
    }

    #[tokio::test]
    async fn create_persists_absent_fields_as_null() {
        let (pool, repo) = setup().await;

        let created = repo
            .create(ProductDraft { name: Some("Go".to_string()), ..ProductDraft::default() })
            .await
            .expect("create");

        assert_eq!(created.detail, None);
        assert_eq!(created.coverimage, None);

        pool.close().await;
    }

    #[tokio::test]
    async fn find_missing_id_is_none_not_error() {
        let (pool, repo) = setup().await;

        assert_eq!(repo.find_by_id(ProductId(999)).await.expect("find"), None);

        pool.close().await;
    }

    #[tokio::test]
    async fn update_missing_id_writes_nothing() {
        let (pool, repo) = setup().await;
        let existing = repo.create(ProductDraft::new("Chess", "a", "b")).await.expect("create");

        let outcome = repo
            .update(ProductId(existing.id.0 + 100), ProductDraft::new("Ghost", "x", "y"))
            .await
            .expect("update");

        assert_eq!(outcome, None);
        let rows = repo.list().await.expect("list");
        assert_eq!(rows, vec![existing]);

        pool.close().await;
    }

    #[tokio::test]
    async fn update_omitting_a_field_overwrites_it_with_null() {
        let (pool, repo) = setup().await;
        let created = repo
            .create(ProductDraft::new("Chess", "Two-player strategy", "https://img.example/c.png"))
            .await
            .expect("create");

        let updated = repo
            .update(
                created.id,
                ProductDraft {
                    name: Some("Chess 960".to_string()),
                    detail: None,
                    coverimage: Some("https://img.example/c960.png".to_string()),
                },
            )
            .await
            .expect("update")
            .expect("row should exist");

        assert_eq!(updated.name.as_deref(), Some("Chess 960"));
        assert_eq!(updated.detail, None);
        let reread = repo.find_by_id(created.id).await.expect("find").expect("row");
        assert_eq!(reread.detail, None);
        assert_eq!(reread.coverimage.as_deref(), Some("https://img.example/c960.png"));

        pool.close().await;
    }

    #[tokio::test]
    async fn delete_reports_missing_and_removes_existing() {
        let (pool, repo) = setup().await;
        let keep = repo.create(ProductDraft::new("Chess", "", "")).await.expect("create");
        let doomed = repo.create(ProductDraft::new("Checkers", "", "")).await.expect("create");

        assert!(!repo.delete(ProductId(999)).await.expect("delete missing"));
        assert!(repo.delete(doomed.id).await.expect("delete existing"));
        assert!(!repo.delete(doomed.id).await.expect("delete twice"));

        assert_eq!(repo.list().await.expect("list"), vec![keep]);

        pool.close().await;
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let (pool, repo) = setup().await;
        let first = repo.create(ProductDraft::new("Chess", "", "")).await.expect("create");
        assert!(repo.delete(first.id).await.expect("delete"));

        let second = repo.create(ProductDraft::new("Go", "", "")).await.expect("create");

        assert!(second.id > first.id);

        pool.close().await;
    }

    #[tokio::test]
    async fn not_found_paths_release_their_connection() {
        let (pool, repo) = setup().await;

        // The pool holds a single connection; a leak would time out the next call.
        for _ in 0..3 {
            let updated = repo.update(ProductId(1), ProductDraft::default()).await.expect("update");
            assert_eq!(updated, None);
            assert!(!repo.delete(ProductId(1)).await.expect("delete"));
        }
        assert!(repo.list().await.expect("list").is_empty());

        pool.close().await;
    }

    #[tokio::test]
    async fn writes_that_touch_no_rows_are_reported_as_missing() {
        let (pool, repo) = setup().await;
        let chess = repo.create(ProductDraft::new("Chess", "a", "b")).await.expect("create");

        // The row still passes the existence check, but the write itself is dropped.
        for trigger in [
            "CREATE TRIGGER skip_game_update BEFORE UPDATE ON games \
             BEGIN SELECT RAISE(IGNORE); END;",
            "CREATE TRIGGER skip_game_delete BEFORE DELETE ON games \
             BEGIN SELECT RAISE(IGNORE); END;",
        ] {
            sqlx::query(trigger).execute(&pool).await.expect("install trigger");
        }

        let rename = ProductDraft::new("Chess960", "c", "d");
        assert_eq!(repo.update(chess.id, rename).await.expect("update"), None);
        assert!(!repo.delete(chess.id).await.expect("delete"));
        assert_eq!(repo.list().await.expect("list"), vec![chess]);

        pool.close().await;
    }

    #[tokio::test]
    async fn closed_pool_surfaces_database_error() {
        let (pool, repo) = setup().await;
        pool.close().await;

        assert!(repo.list().await.is_err());
    }
}
