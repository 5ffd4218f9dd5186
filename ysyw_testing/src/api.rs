use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const MESSAGE_ROUTE: &str = "/web/message";

/// Messages submitted with this challenge token are rejected.
pub const INVALID_CAPTCHA_TOKEN: &str = "invalid";

/// Messages from an author with this name fail with an internal error.
pub const FAILING_NAME: &str = "fail";

/// Fake message backend storing all accepted messages in memory.
#[derive(Debug, Clone, Default)]
pub struct MessageApi {
    messages: Arc<Mutex<Vec<StoredMessage>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip)]
    pub captcha_token: Option<String>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

impl MessageApi {
    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(MESSAGE_ROUTE, routing::post(create_message))
            .with_state(self.clone())
    }

    pub async fn messages(&self) -> Vec<StoredMessage> {
        self.messages.lock().await.clone()
    }
}

async fn create_message(
    State(api): State<MessageApi>,
    headers: HeaderMap,
    Json(mut message): Json<StoredMessage>,
) -> (StatusCode, Json<MessageResponse>) {
    message.captcha_token = headers
        .get("captchaToken")
        .and_then(|value| value.to_str().ok())
        .map(Into::into);

    if message.captcha_token.as_deref() == Some(INVALID_CAPTCHA_TOKEN) {
        return (
            StatusCode::FORBIDDEN,
            Json(MessageResponse {
                message: "Invalid captcha",
            }),
        );
    }

    if message.name == FAILING_NAME {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse {
                message: "Internal server error",
            }),
        );
    }

    api.messages.lock().await.push(message);

    (
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Message saved successfully",
        }),
    )
}
