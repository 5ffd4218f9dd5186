//! Answer requests whose handler panicked with a 500

use std::{any::Any, panic::AssertUnwindSafe};

use anyhow::anyhow;
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{from_fn, Next},
    response::{Html, IntoResponse, Response},
    Router,
};
use futures::FutureExt;
use tracing::error;

use crate::routes::internal_server_error;

/// Served instead of the landing view if rendering it panicked.
const ERROR_PAGE: &str = "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
                          <title>Your Sport Your World</title></head><body>\
                          <p>Something went wrong. Please try again.</p></body></html>";

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let payload = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => return response,
        Err(payload) => payload,
    };

    let err = anyhow!(
        "handler for {method} {path} panicked: {}",
        panic_message(&*payload)
    );

    // script clients expect a json body
    if path.starts_with("/api/") {
        return internal_server_error(err);
    }

    error!("{err:#}");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}
