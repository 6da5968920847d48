use tokio::sync::RwLock;

use gamedeck_core::domain::product::{Product, ProductDraft, ProductId};

use super::{ProductRepository, RepositoryError};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: Vec<Product>,
}

/// Store double with the same contract as the SQL repository. Identifiers
/// increase monotonically and are never handed out twice.
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        let last_id = products.iter().map(|product| product.id.0).max().unwrap_or(0);
        Self { table: RwLock::new(Table { last_id, rows: products }) }
    }
}

fn apply_draft(id: ProductId, draft: ProductDraft) -> Product {
    Product { id, name: draft.name, detail: draft.detail, coverimage: draft.coverimage }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|product| product.id == id).cloned())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let product = apply_draft(ProductId(table.last_id), draft);
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.table.write().await;
        let Some(slot) = table.rows.iter_mut().find(|product| product.id == id) else {
            return Ok(None);
        };
        *slot = apply_draft(id, draft);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|product| product.id != id);
        Ok(table.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use gamedeck_core::domain::product::{Product, ProductDraft, ProductId};

    use crate::repositories::{InMemoryProductRepository, ProductRepository};

    #[tokio::test]
    async fn in_memory_repo_round_trip() {
        let repo = InMemoryProductRepository::default();

        let created =
            repo.create(ProductDraft::new("Chess", "Strategy", "")).await.expect("create");
        let found = repo.find_by_id(created.id).await.expect("find");

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn in_memory_repo_continues_ids_after_seeded_rows() {
        let repo = InMemoryProductRepository::with_products(vec![Product {
            id: ProductId(41),
            name: Some("Go".to_string()),
            detail: None,
            coverimage: None,
        }]);

        let created = repo.create(ProductDraft::default()).await.expect("create");

        assert_eq!(created.id, ProductId(42));
    }

    #[tokio::test]
    async fn in_memory_repo_update_replaces_all_fields() {
        let repo = InMemoryProductRepository::default();
        let created =
            repo.create(ProductDraft::new("Chess", "Strategy", "cover")).await.expect("create");
        let rename = ProductDraft { name: Some("Chess".to_string()), ..ProductDraft::default() };

        let updated = repo
            .update(created.id, rename)
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.detail, None);
        assert_eq!(updated.coverimage, None);
        let missing = repo.update(ProductId(99), ProductDraft::default()).await.expect("update");
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn in_memory_repo_delete_reports_presence() {
        let repo = InMemoryProductRepository::default();
        let created = repo.create(ProductDraft::default()).await.expect("create");

        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(!repo.delete(created.id).await.expect("delete again"));
        assert!(repo.list().await.expect("list").is_empty());
    }
}
