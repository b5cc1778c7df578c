use axum::{routing::get, Router};

use crate::state::AppState;
use super::user_handlers;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(user_handlers::get_user))
        .route(
            "/:user_id/contacted-products",
            get(user_handlers::get_contacted_products),
        )
}
