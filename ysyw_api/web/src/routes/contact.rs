use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use ysyw_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::{error, internal_server_error};
use crate::models::{ApiContactRequest, ApiContactResponse};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Json(request): Json<ApiContactRequest>,
) -> Response {
    let challenge_token = request.challenge_token();
    match service.submit(request.fields, challenge_token).await {
        Ok(outcome) => Json(ApiContactResponse {
            notices: outcome.notices(),
            reset: true,
        })
        .into_response(),
        Err(err) if err.is_validation_error() => error(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err @ (ContactSubmitError::ChallengeRequired | ContactSubmitError::ChallengeFailed)) => {
            error(StatusCode::PRECONDITION_FAILED, err.to_string())
        }
        Err(err @ ContactSubmitError::BothFailed { .. }) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(err) => internal_server_error(err),
    }
}
