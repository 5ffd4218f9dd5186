use std::{ops::Deref, sync::LazyLock, time::Duration};

use anyhow::Context;
use ysyw_utils::ysyw_version;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let repository = env!("CARGO_PKG_REPOSITORY");
    let version = ysyw_version();

    format!("Your Sport Your World Website ({homepage}, {repository}, Version {version})")
});

const _: () = {
    assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

/// HTTP client shared by all external api clients.
///
/// Every request is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .timeout(timeout)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
