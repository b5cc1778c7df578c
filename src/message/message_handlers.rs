use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::Result,
    middleware::AuthUser,
    state::AppState,
};
use super::{
    message_dto::{SendMessageRequest, ThreadQuery},
    message_models::{ConversationSummary, MessageDetails, MessageResponse},
};

/// Send a message to another user about a listing
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent successfully", body = MessageResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipient or product not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: std::result::Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;

    let message = state.message_service.send_message(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// All messages sent or received by the authenticated user, newest first
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    responses(
        (status = 200, description = "Messages of the user", body = Vec<MessageDetails>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let messages = state.message_service.list_messages(user_id).await?;

    Ok((StatusCode::OK, Json(messages)))
}

/// Conversations of the authenticated user, most recently active first
#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    tag = "messages",
    responses(
        (status = 200, description = "Conversation summaries", body = Vec<ConversationSummary>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_conversations(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let conversations = state.message_service.list_conversations(user_id).await?;

    Ok((StatusCode::OK, Json(conversations)))
}

/// Messages exchanged with one user about one listing, oldest first
#[utoipa::path(
    get,
    path = "/api/messages/thread",
    tag = "messages",
    params(ThreadQuery),
    responses(
        (status = 200, description = "Ordered thread, empty when no conversation exists", body = Vec<MessageResponse>),
        (status = 400, description = "Missing or malformed parameters"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_thread(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: std::result::Result<Query<ThreadQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let (counterpart_id, product_id) = query.required()?;

    let messages: Vec<MessageResponse> = state
        .message_service
        .get_thread(user_id, counterpart_id, product_id)
        .await?
        .into_iter()
        .map(MessageResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(messages)))
}
