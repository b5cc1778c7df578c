use crate::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use super::user_models::{User, UserSummary};

/// User existence lookups consumed by the messaging engine.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserSummary>>;
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserSummary>> {
        Ok(self.find_by_id(user_id).await?.map(UserSummary::from))
    }
}
