//! Liveness check.

use crate::infra::{extract::Json, state::AppState};
use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The health API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// Service health.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Health {
    #[schema(example = "OK")]
    message: String,
}

impl Health {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reports that the service is up.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Success", body = Health),
    )
)]
pub async fn healthz() -> Json<Health> {
    Json(Health {
        message: "OK".to_string(),
    })
}
