use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::{db, state::{AppState, REQUIRED_ENV}};

#[derive(Debug, Serialize, ToSchema)]
pub struct EnvCheck {
    pub key: String,
    pub present: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub environment: String,
    pub port: u16,
    pub database: String,
    pub variables: Vec<EnvCheck>,
    pub ready: bool,
}

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/api",
    tag = "status",
    responses((status = 200, description = "API is up"))
)]
pub async fn api_root() -> Json<Value> {
    Json(json!({ "message": "Marketplace API" }))
}

/// Backend status: configuration and database reachability
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "status",
    responses((status = 200, description = "Status report", body = StatusResponse))
)]
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let (database, db_ok) = match db::ping(&state.db).await {
        Ok(()) => ("connected".to_string(), true),
        Err(e) => {
            tracing::warn!("Status check could not reach the database: {:?}", e);
            (format!("unreachable: {}", e), false)
        }
    };

    let variables: Vec<EnvCheck> = REQUIRED_ENV
        .iter()
        .map(|key| EnvCheck {
            key: key.to_string(),
            present: std::env::var(key).is_ok(),
        })
        .collect();

    let ready = db_ok && variables.iter().all(|v| v.present);

    Json(StatusResponse {
        environment: state.config.app_env.clone(),
        port: state.config.port,
        database,
        variables,
        ready,
    })
}
