use std::{collections::BTreeMap, fmt, future::Future};

use serde::Serialize;
use ysyw_models::Sensitive;

/// Client of the EmailJS REST API.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailJsApiService: Send + Sync + 'static {
    /// Send an email rendered from the given template.
    ///
    /// Fails if the request could not be sent or the provider did not accept
    /// the email. The error contains the reason reported by the provider.
    fn send(&self, request: EmailJsSendRequest) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsSendRequest {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<Sensitive<String>>,
    pub template_params: TemplateParams,
}

static REDACTED: Sensitive<()> = Sensitive(());

/// Values substituted into an EmailJS template.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(BTreeMap<&'static str, String>);

impl TemplateParams {
    /// Parameters with these names are redacted in debug output.
    pub const SENSITIVE: &'static [&'static str] = &["message"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl fmt::Debug for TemplateParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(&key, value)| {
                let value: &dyn fmt::Debug = if Self::SENSITIVE.contains(&key) {
                    &REDACTED
                } else {
                    value
                };
                (key, value)
            }))
            .finish()
    }
}

#[cfg(feature = "mock")]
impl MockEmailJsApiService {
    pub fn with_send(mut self, request: EmailJsSendRequest, result: anyhow::Result<()>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
