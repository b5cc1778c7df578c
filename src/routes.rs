use crate::{
    message::{self, routes::message_routes},
    middleware::auth_middleware,
    notification::{self, routes::notification_routes},
    product::Product,
    state::AppState,
    status,
    user::{self, routes::user_routes},
};
use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        status::api_root,
        status::get_status,
        message::message_handlers::send_message,
        message::message_handlers::get_messages,
        message::message_handlers::get_conversations,
        message::message_handlers::get_thread,
        notification::notification_handlers::get_notifications,
        notification::notification_handlers::create_notification,
        notification::notification_handlers::mark_notification_read,
        notification::notification_handlers::delete_notification,
        notification::notification_handlers::clear_notifications,
        user::user_handlers::get_user,
        user::user_handlers::get_contacted_products,
    ),
    components(
        schemas(
            message::SendMessageRequest,
            message::MessageResponse,
            message::MessageDetails,
            message::ConversationSummary,
            notification::Notification,
            notification::CreateNotificationRequest,
            notification::notification_dto::ClearNotificationsResponse,
            user::UserSummary,
            Product,
            status::StatusResponse,
            status::EnvCheck,
        )
    ),
    tags(
        (name = "messages", description = "Buyer/seller messaging"),
        (name = "notifications", description = "Notification endpoints"),
        (name = "users", description = "Public user information"),
        (name = "status", description = "Service status")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .nest("/messages", message_routes())
        .nest("/notifications", notification_routes())
        .route_layer(auth);

    // Public routes (no auth required)
    let api_routes = Router::new()
        .route("/", get(status::api_root))
        .route("/status", get(status::get_status))
        .nest("/users", user_routes())
        .merge(protected_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
