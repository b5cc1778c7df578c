use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// The slice of a listing the messaging engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: Option<String>,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            thumbnail: product.images.into_iter().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(images: Vec<&str>) -> Product {
        Product {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Vélo de course".to_string(),
            description: None,
            images: images.into_iter().map(String::from).collect(),
            status: "actif".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_thumbnail_is_first_image() {
        let summary = ProductSummary::from(product(vec!["a.jpg", "b.jpg"]));
        assert_eq!(summary.thumbnail.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn test_thumbnail_is_none_without_images() {
        let summary = ProductSummary::from(product(vec![]));
        assert!(summary.thumbnail.is_none());
    }
}
