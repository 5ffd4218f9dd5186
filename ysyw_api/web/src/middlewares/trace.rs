use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tracing::{debug, field, warn, Span};

use super::request_id::RequestId;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(make_span)
            .on_request(on_request)
            .on_response(on_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn make_span(request: &Request) -> Span {
    let version = request.version();
    let method = request.method();
    // the query string may carry form values
    let path = request.uri().path();
    let request_id = request.extensions().get::<RequestId>().map(field::display);

    tracing::debug_span!("http-request", ?version, %method, path, request_id)
}

fn on_request(_request: &Request, _span: &Span) {
    debug!("started processing request")
}

fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    if status.is_server_error() {
        warn!(?latency, %status, "failed to process request")
    } else {
        debug!(?latency, %status, "finished processing request")
    }
}
