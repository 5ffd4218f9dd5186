use std::sync::Arc;

use axum::{extract::State, routing, Form, Json, Router};
use serde::{Deserialize, Serialize};

pub const SITEVERIFY_ROUTE: &str = "/recaptcha/api/siteverify";

/// Siteverify endpoint accepting the responses `success` and `success-SCORE`
/// (SCORE between 0 and 1) for the given secret.
pub fn router(secret: impl Into<Arc<str>>) -> Router<()> {
    Router::new()
        .route(SITEVERIFY_ROUTE, routing::post(siteverify))
        .with_state(secret.into())
}

#[derive(Deserialize)]
struct SiteverifyRequest {
    secret: String,
    response: String,
}

#[derive(Serialize)]
struct SiteverifyResponse {
    success: bool,
    score: Option<f64>,
}

async fn siteverify(
    state: State<Arc<str>>,
    Form(SiteverifyRequest { secret, response }): Form<SiteverifyRequest>,
) -> Json<SiteverifyResponse> {
    let mut parts = response.split('-');
    let success = *secret == **state && parts.next() == Some("success");
    let score = success
        .then(|| parts.next())
        .flatten()
        .and_then(|score| score.parse::<f64>().ok())
        .filter(|score| (0.0..=1.0).contains(score));

    Json(SiteverifyResponse { success, score })
}
