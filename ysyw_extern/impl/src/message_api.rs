use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use url::Url;
use ysyw_di::Build;
use ysyw_extern_contracts::message_api::{MessageApiService, SaveMessageResponse};
use ysyw_models::contact::{ChallengeToken, MessagePayload};
use ysyw_utils::{trace_instrument, Apply};

use crate::http::HttpClient;

const MESSAGE_ROUTE: &str = "web/message";

/// Header carrying the challenge token to the backend.
pub const CAPTCHA_TOKEN_HEADER: &str = "captchaToken";

#[derive(Debug, Clone, Build)]
pub struct MessageApiServiceImpl {
    config: MessageApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub enum MessageApiServiceConfig {
    Disabled,
    Enabled { message_endpoint: Arc<Url> },
}

impl MessageApiServiceConfig {
    /// Messages are posted to `{base_url}web/message` if a base url is given.
    pub fn new(base_url: Option<&Url>) -> anyhow::Result<Self> {
        let Some(base_url) = base_url else {
            return Ok(Self::Disabled);
        };

        let message_endpoint = base_url
            .join(MESSAGE_ROUTE)
            .context("Failed to build message api URL")?;

        Ok(Self::Enabled {
            message_endpoint: message_endpoint.into(),
        })
    }
}

impl MessageApiService for MessageApiServiceImpl {
    #[trace_instrument(skip(self, payload, challenge_token))]
    async fn save_message(
        &self,
        payload: MessagePayload,
        challenge_token: Option<ChallengeToken>,
    ) -> anyhow::Result<SaveMessageResponse> {
        let MessageApiServiceConfig::Enabled { message_endpoint } = &self.config else {
            return Ok(SaveMessageResponse::Skipped);
        };

        self.http
            .post((**message_endpoint).clone())
            .json(&payload)
            .apply_map(challenge_token, |request, token| {
                request.header(CAPTCHA_TOKEN_HEADER, token.into_inner())
            })
            .send()
            .await
            .context("Failed to send message api request")?
            .error_for_status()
            .context("Message api request returned an error")?
            .json::<SaveMessageResponseBody>()
            .await
            .map(|body| SaveMessageResponse::Saved {
                message: body.message,
            })
            .context("Failed to deserialize message api response")
    }
}

#[derive(Deserialize)]
struct SaveMessageResponseBody {
    message: String,
}
