use axum::{routing::get, Router};

use crate::state::AppState;
use super::message_handlers;

pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(message_handlers::get_messages).post(message_handlers::send_message),
        )
        .route("/conversations", get(message_handlers::get_conversations))
        .route("/thread", get(message_handlers::get_thread))
}
