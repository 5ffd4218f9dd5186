use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::sync::Mutex;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// The only public key accepted by the fake provider.
pub const PUBLIC_KEY: &str = "test-public-key";

/// Sending an email with this template always fails.
pub const FAILING_TEMPLATE_ID: &str = "template_fail";

/// Fake EmailJS provider recording all accepted emails in memory.
#[derive(Debug, Clone, Default)]
pub struct EmailJs {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    pub template_params: BTreeMap<String, String>,
}

impl EmailJs {
    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(SEND_ROUTE, routing::post(send))
            .with_state(self.clone())
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }
}

async fn send(
    State(emailjs): State<EmailJs>,
    Json(email): Json<SentEmail>,
) -> (StatusCode, &'static str) {
    if email.user_id != PUBLIC_KEY {
        return (
            StatusCode::BAD_REQUEST,
            "The Public Key is invalid. To find this ID, visit https://dashboard.emailjs.com/admin/account",
        );
    }

    if email.template_id == FAILING_TEMPLATE_ID {
        return (
            StatusCode::BAD_REQUEST,
            "The template ID not found. To find this ID, visit https://dashboard.emailjs.com/admin/templates",
        );
    }

    emailjs.sent.lock().await.push(email);

    (StatusCode::OK, "OK")
}
