use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    state::AppState,
    user::user_models::UserSummary,
    product::product_models::Product,
};

/// Get the public profile of a user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserSummary),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok((StatusCode::OK, Json(UserSummary::from(user))))
}

/// Listings a user has contacted sellers about
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/contacted-products",
    tag = "users",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Products the user sent messages about", body = Vec<Product>),
        (status = 400, description = "Malformed user ID")
    )
)]
pub async fn get_contacted_products(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let products = state.product_repository.find_contacted_by(user_id).await?;

    Ok((StatusCode::OK, Json(products)))
}
