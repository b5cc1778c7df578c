mod auth;
mod db;
mod error;
mod message;
mod middleware;
mod notification;
mod product;
mod routes;
mod state;
mod status;
mod user;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use db::{create_pool, run_migrations};
use message::{MessageRepository, MessageService};
use notification::{NotificationRepository, NotificationService};
use product::ProductRepository;
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user::UserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marketplace_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env()?);

    tracing::info!("Connecting to database...");
    let db = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to the database")?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await.context("failed to run migrations")?;

    // Create repositories
    let user_repository = UserRepository::new(db.clone());
    let product_repository = ProductRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());
    let message_repository = MessageRepository::new(db.clone());

    // Create services
    let notification_service = NotificationService::new(notification_repository.clone());
    let message_service = MessageService::new(
        Arc::new(message_repository),
        Arc::new(user_repository.clone()),
        Arc::new(product_repository.clone()),
        Arc::new(notification_repository),
    );

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        user_repository,
        product_repository,
        notification_service,
        message_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.bind_address();

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
    }
    tracing::info!("Shutdown signal received");
}
