use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::state::AppState;
use super::notification_handlers;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notification_handlers::get_notifications)
                .post(notification_handlers::create_notification),
        )
        .route("/clear", delete(notification_handlers::clear_notifications))
        .route("/:id/read", patch(notification_handlers::mark_notification_read))
        .route("/:id", delete(notification_handlers::delete_notification))
}
