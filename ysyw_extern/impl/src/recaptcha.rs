use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;
use ysyw_di::Build;
use ysyw_extern_contracts::recaptcha::{RecaptchaApiService, RecaptchaSiteverifyResponse};
use ysyw_utils::trace_instrument;

use crate::http::HttpClient;

const SITEVERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, Clone, Build)]
pub struct RecaptchaApiServiceImpl {
    config: RecaptchaApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct RecaptchaApiServiceConfig {
    siteverify_endpoint: Arc<Url>,
}

impl RecaptchaApiServiceConfig {
    pub fn new(siteverify_endpoint_override: Option<Url>) -> anyhow::Result<Self> {
        let siteverify_endpoint = match siteverify_endpoint_override {
            Some(endpoint) => endpoint,
            None => SITEVERIFY_ENDPOINT
                .parse()
                .context("Failed to parse default siteverify endpoint")?,
        };

        Ok(Self {
            siteverify_endpoint: siteverify_endpoint.into(),
        })
    }
}

impl RecaptchaApiService for RecaptchaApiServiceImpl {
    #[trace_instrument(skip(self, response, secret))]
    async fn siteverify(
        &self,
        response: &str,
        secret: &str,
    ) -> anyhow::Result<RecaptchaSiteverifyResponse> {
        self.http
            .post((*self.config.siteverify_endpoint).clone())
            .form(&SiteverifyRequest { response, secret })
            .send()
            .await
            .context("Failed to send siteverify request")?
            .error_for_status()
            .context("Siteverify request returned an error")?
            .json::<SiteverifyResponse>()
            .await
            .map(Into::into)
            .context("Failed to deserialize siteverify response")
    }
}

#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    response: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    score: Option<f64>,
}

impl From<SiteverifyResponse> for RecaptchaSiteverifyResponse {
    fn from(value: SiteverifyResponse) -> Self {
        Self {
            success: value.success,
            score: value.score,
        }
    }
}
