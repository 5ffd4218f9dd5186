use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::ApiError;

pub mod contact;
pub mod health;
pub mod pages;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn error(code: StatusCode, detail: impl Serialize) -> Response {
    (code, Json(ApiError { detail })).into_response()
}
