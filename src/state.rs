use anyhow::Context;
use std::sync::Arc;

use crate::{
    db::DbPool,
    message::message_service::MessageService,
    notification::notification_service::NotificationService,
    product::product_repository::ProductRepository,
    user::user_repository::UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub product_repository: ProductRepository,
    pub notification_service: NotificationService,
    pub message_service: MessageService,
}

/// Environment keys that must be present for the service to start.
pub const REQUIRED_ENV: [&str; 2] = ["DATABASE_URL", "JWT_SECRET"];

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8082".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            app_env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
