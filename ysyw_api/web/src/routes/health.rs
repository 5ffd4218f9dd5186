use axum::{routing, Json, Router};

use crate::models::ApiHealth;

pub fn router() -> Router<()> {
    Router::new().route("/health", routing::get(health))
}

async fn health() -> Json<ApiHealth> {
    Json(ApiHealth { http: true })
}
