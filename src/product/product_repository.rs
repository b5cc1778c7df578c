use crate::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use super::product_models::{Product, ProductSummary};

/// Product existence lookups consumed by the messaging engine.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn find_product(&self, product_id: Uuid) -> Result<Option<ProductSummary>>;
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Products `user_id` has sent at least one message about, newest listing first.
    pub async fn find_contacted_by(&self, user_id: Uuid) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT p.* FROM products p
             WHERE EXISTS (
                 SELECT 1 FROM conversations c
                 JOIN messages m ON m.conversation_id = c.id
                 WHERE c.product_id = p.id AND m.sender_id = $1
             )
             ORDER BY p.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

#[async_trait]
impl Catalog for ProductRepository {
    async fn find_product(&self, product_id: Uuid) -> Result<Option<ProductSummary>> {
        let product = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, title, images[1] AS thumbnail FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}
