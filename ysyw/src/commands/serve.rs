use tracing::{info, warn};
use ysyw_config::Config;
use ysyw_di::Provide;
use ysyw_email_contracts::ContactEmailService;

use crate::environment::{
    types::{ContactEmail, WebServer},
    Provider,
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let mut provider = Provider::new(&config)?;

    let contact_email: ContactEmail = provider.provide();
    if !contact_email.config_status().is_valid {
        warn!("Email delivery is not configured, messages can only be saved");
    }
    match &config.api {
        Some(api) => info!("Saving messages via {}", api.base_url),
        None => info!("Message api is disabled, messages can only be emailed"),
    }
    if config.recaptcha.is_none() {
        info!("reCAPTCHA is disabled");
    }

    let server: WebServer = provider.provide();
    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
