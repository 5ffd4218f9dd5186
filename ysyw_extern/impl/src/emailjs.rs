use std::sync::Arc;

use anyhow::{anyhow, Context};
use serde::Serialize;
use url::Url;
use ysyw_di::Build;
use ysyw_extern_contracts::emailjs::{EmailJsApiService, EmailJsSendRequest, TemplateParams};
use ysyw_utils::trace_instrument;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ROUTE: &str = "api/v1.0/email/send";

#[derive(Debug, Clone, Build)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    pub fn new(endpoint: &Url) -> anyhow::Result<Self> {
        let send_endpoint = endpoint
            .join(SEND_ROUTE)
            .context("Failed to build emailjs send URL")?;

        Ok(Self {
            send_endpoint: send_endpoint.into(),
        })
    }
}

impl EmailJsApiService for EmailJsApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send(&self, request: EmailJsSendRequest) -> anyhow::Result<()> {
        let body = SendRequestBody {
            service_id: &request.service_id,
            template_id: &request.template_id,
            user_id: &request.public_key,
            access_token: request.private_key.as_deref().map(String::as_str),
            template_params: &request.template_params,
        };

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&body)
            .send()
            .await
            .context("Failed to send emailjs request")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reason = response.text().await.unwrap_or_default();
        Err(anyhow!(
            "Failed to send email. Status: {}{}",
            status.as_u16(),
            Some(reason.trim())
                .filter(|reason| !reason.is_empty())
                .map(|reason| format!(" ({reason})"))
                .unwrap_or_default()
        ))
    }
}

#[derive(Serialize)]
struct SendRequestBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a TemplateParams,
}
